use std::path::PathBuf;

use mondrian_media_core::{FloorPlanLoader, ImageFloorPlanLoader};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let plan = ImageFloorPlanLoader.load(&path)?;

    let (width, height) = (plan.width(), plan.height());
    println!("Floor plan: {}", plan.source().display());
    println!("  Size: {width}x{height} px");
    println!("  Exported coordinates span x 0..{width} and y 0..{height}");
    Ok(())
}
