use std::path::PathBuf;

use anyhow::Context;
use mondrian_common::clock::FrameCadence;
use mondrian_common::config::AppConfig;
use mondrian_media_core::{
    ClockSource, DisplayArea, FloorPlanLoader, ImageFloorPlanLoader, ManualClock, PointerState,
};
use mondrian_recording_engine::{
    CommandOutcome, CsvDirectorySink, ExportRecord, RecordingSession, SessionConfig,
};
use serde::Serialize;

use crate::script::{parse_script, ScriptStep};

pub struct ReplayArgs {
    pub script: PathBuf,
    pub floor_plan: PathBuf,
    pub duration: f64,
    pub output: PathBuf,
    pub fps: u32,
    pub display: (f64, f64),
    pub jump: Option<f64>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub frames: u64,
    pub exports: Vec<ExportRecord>,
    pub unsaved_points: usize,
    pub video_time: f64,
    pub recording: bool,
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_display(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if !(w.is_finite() && h.is_finite() && w >= 2.0 && h >= 1.0) {
        return Err(format!("display too small: {s}"));
    }
    Ok((w, h))
}

/// The floor plan occupies the right half of the display, the video the left.
fn floor_plan_area((width, height): (f64, f64)) -> DisplayArea {
    DisplayArea::new(width / 2.0, 0.0, width / 2.0, height)
}

pub fn run(config: &AppConfig, args: ReplayArgs) -> anyhow::Result<()> {
    let summary = replay(config, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Replayed {} steps ({} frames)", summary.steps, summary.frames);
    if summary.exports.is_empty() {
        println!("  No paths exported");
    }
    for record in &summary.exports {
        let location = record
            .location
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| record.file_name.clone());
        println!("  Path {}: {} points -> {}", record.index, record.rows, location);
    }
    if summary.unsaved_points > 0 {
        println!("  {} unsaved points in current path", summary.unsaved_points);
    }
    println!(
        "  Video at {:.2}s ({})",
        summary.video_time,
        if summary.recording { "recording" } else { "paused" }
    );
    Ok(())
}

pub fn replay(config: &AppConfig, args: &ReplayArgs) -> anyhow::Result<ReplaySummary> {
    let mut defaults = config.session.clone();
    if let Some(jump) = args.jump {
        defaults.jump_interval_secs = jump;
    }
    defaults.validate()?;

    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let steps = parse_script(&content)?;

    let mut session: RecordingSession<ManualClock> =
        RecordingSession::new(SessionConfig::from(&defaults));
    session
        .load_floor_plan(ImageFloorPlanLoader.load(&args.floor_plan))
        .with_context(|| format!("Failed to load floor plan {}", args.floor_plan.display()))?;
    let video_name = args
        .script
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    session
        .load_video(Ok(ManualClock::new(video_name, args.duration)))
        .context("Failed to load video")?;

    let area = floor_plan_area(args.display);
    let (cx, cy) = (area.x + area.width / 2.0, area.y + area.height / 2.0);
    let mut pointer = PointerState::new(area, (cx, cy));
    let cadence = FrameCadence::new(args.fps);
    let mut sink = CsvDirectorySink::new(&args.output);

    tracing::info!(
        steps = steps.len(),
        fps = cadence.fps(),
        output = %args.output.display(),
        "Replaying session script"
    );

    let mut frames = 0u64;
    let mut exports = Vec::new();
    for (line, step) in &steps {
        match *step {
            ScriptStep::Move { x, y } => pointer.move_to(x, y),
            ScriptStep::Wait { secs } => {
                for _ in 0..cadence.frames_in(secs) {
                    if let Some(video) = session.video_mut() {
                        video.advance(cadence.frame_interval_secs());
                    }
                    session.tick(&pointer);
                    session.take_redraw();
                    pointer.end_frame();
                    frames += 1;
                }
            }
            _ => {
                let Some(command) = step.command() else {
                    continue;
                };
                let outcome = session
                    .dispatch(command, &pointer, &mut sink)
                    .with_context(|| format!("Script line {line}: {command:?} failed"))?;
                tracing::debug!(line, ?command, ?outcome, "Dispatched command");
                if let CommandOutcome::Exported(record) = outcome {
                    exports.push(record);
                }
            }
        }
    }

    Ok(ReplaySummary {
        steps: steps.len(),
        frames,
        exports,
        unsaved_points: session.current_path().len(),
        video_time: session.video().map(|v| v.current_time()).unwrap_or(0.0),
        recording: session.is_recording(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("mondrian-replay-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn args(dir: &std::path::Path, script: &str) -> ReplayArgs {
        let plan = dir.join("plan.png");
        image::RgbImage::new(800, 900).save(&plan).unwrap();
        let script_path = dir.join("script.jsonl");
        std::fs::write(&script_path, script).unwrap();
        ReplayArgs {
            script: script_path,
            floor_plan: plan,
            duration: 30.0,
            output: dir.join("out"),
            fps: 10,
            display: (1600.0, 900.0),
            jump: None,
            json: false,
        }
    }

    #[test]
    fn parses_display_sizes() {
        assert_eq!(parse_display("1600x900"), Ok((1600.0, 900.0)));
        assert_eq!(parse_display("1280X720"), Ok((1280.0, 720.0)));
        assert!(parse_display("1600").is_err());
        assert!(parse_display("0x0").is_err());
    }

    #[test]
    fn replay_exports_recorded_path() {
        let dir = workspace("export");
        let script = r#"
{"type":"move","x":800,"y":0}
{"type":"click"}
{"type":"wait","secs":1}
{"type":"move","x":900,"y":100}
{"type":"wait","secs":1}
{"type":"save"}
"#;
        let summary = replay(&AppConfig::default(), &args(&dir, script)).unwrap();

        assert_eq!(summary.exports.len(), 1);
        assert_eq!(summary.exports[0].file_name, "Path_0.csv");
        assert!(!summary.recording);
        assert_eq!(summary.unsaved_points, 0);

        let csv = std::fs::read_to_string(dir.join("out").join("Path_0.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("time,x,y"));
        assert_eq!(lines.next(), Some("0.10,0.00,0.00"));
        assert!(csv.lines().any(|l| l.ends_with(",100.00,100.00")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn clicks_outside_floor_plan_do_not_record() {
        let dir = workspace("outside");
        let script = r#"
{"type":"move","x":100,"y":100}
{"type":"click"}
{"type":"wait","secs":1}
{"type":"save"}
"#;
        let summary = replay(&AppConfig::default(), &args(&dir, script)).unwrap();
        assert!(summary.exports.is_empty());
        assert_eq!(summary.video_time, 0.0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_floor_plan_fails() {
        let dir = workspace("missing");
        let mut a = args(&dir, "");
        a.floor_plan = dir.join("nope.png");
        assert!(replay(&AppConfig::default(), &a).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
