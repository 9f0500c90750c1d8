//! Floor plan handles and loading.

use std::path::{Path, PathBuf};

use mondrian_common::error::{MondrianError, MondrianResult};
use serde::Serialize;

/// A decoded floor-plan image. The engine only needs its pixel size.
///
/// Only built through [`FloorPlan::new`] or a [`FloorPlanLoader`], so the
/// size is never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPlan {
    source: PathBuf,
    width: u32,
    height: u32,
}

impl FloorPlan {
    /// Build a handle, rejecting images without area.
    pub fn new(source: impl Into<PathBuf>, width: u32, height: u32) -> MondrianResult<Self> {
        let source = source.into();
        if width == 0 || height == 0 {
            return Err(MondrianError::load_failure(format!(
                "Floor plan {} has no pixels ({width}x{height})",
                source.display()
            )));
        }
        Ok(Self {
            source,
            width,
            height,
        })
    }

    /// Where the image came from, for logging.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Width in image pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in image pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }
}

const FORMAT_HINT: &str =
    "Please make sure it is correctly formatted as a PNG or JPG image file.";

/// Resolves a floor-plan source into a [`FloorPlan`].
pub trait FloorPlanLoader {
    fn load(&self, source: &Path) -> MondrianResult<FloorPlan>;
}

/// Loads PNG and JPEG floor plans with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFloorPlanLoader;

impl FloorPlanLoader for ImageFloorPlanLoader {
    fn load(&self, source: &Path) -> MondrianResult<FloorPlan> {
        if !source.exists() {
            return Err(MondrianError::FileNotFound {
                path: source.to_path_buf(),
            });
        }

        let format = image::ImageFormat::from_path(source).ok();
        if !matches!(
            format,
            Some(image::ImageFormat::Png) | Some(image::ImageFormat::Jpeg)
        ) {
            return Err(MondrianError::load_failure(format!(
                "Error loading floor plan image file {}. {FORMAT_HINT}",
                source.display()
            )));
        }

        let (width, height) = image::image_dimensions(source).map_err(|e| {
            tracing::warn!(path = %source.display(), error = %e, "Floor plan decode failed");
            MondrianError::load_failure(format!(
                "Error loading floor plan image file {}: {e}. {FORMAT_HINT}",
                source.display()
            ))
        })?;

        FloorPlan::new(source, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_png_dimensions() {
        let dir = scratch_dir("mondrian_test_floor_plan_png");
        let path = dir.join("plan.png");
        image::RgbImage::new(64, 48).save(&path).unwrap();

        let plan = ImageFloorPlanLoader.load(&path).unwrap();
        assert_eq!((plan.width(), plan.height()), (64, 48));
        assert_eq!(plan.source(), path);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_png_is_a_load_failure() {
        let dir = scratch_dir("mondrian_test_floor_plan_bad");
        let path = dir.join("plan.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = ImageFloorPlanLoader.load(&path).unwrap_err();
        assert!(err.is_load_failure());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unsupported_extension_is_a_load_failure() {
        let dir = scratch_dir("mondrian_test_floor_plan_ext");
        let path = dir.join("plan.txt");
        std::fs::write(&path, b"hello").unwrap();

        assert!(ImageFloorPlanLoader.load(&path).unwrap_err().is_load_failure());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ImageFloorPlanLoader
            .load(Path::new("/nonexistent/mondrian/plan.png"))
            .unwrap_err();
        assert!(matches!(err, MondrianError::FileNotFound { .. }));
    }

    #[test]
    fn zero_sized_plan_is_rejected() {
        assert!(FloorPlan::new("empty.png", 0, 10).is_err());
        assert!(FloorPlan::new("ok.png", 1, 1).is_ok());
    }
}
