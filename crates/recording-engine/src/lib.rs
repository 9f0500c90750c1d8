//! Mondrian Recording Engine
//!
//! Ties the playback clock of a video to sampling of the pointer over a
//! floor plan:
//! - **Sampling:** Decide per frame whether the current instant becomes a point
//! - **Session:** The load/play/pause/rewind/fast-forward/export state machine
//! - **Export:** Hand finished paths to a sink as `Path_<N>` tables
//! - **Commands:** Map clicks and key presses onto session operations
//!
//! The engine is single-threaded and never blocks: sources arrive already
//! resolved, and every operation completes before the next tick.

pub mod command;
pub mod export;
pub mod sampling;
pub mod session;

pub use command::{Command, CommandOutcome};
pub use export::{CsvDirectorySink, ExportRecord, ExportSink, MemorySink};
pub use sampling::SamplingPolicy;
pub use session::{RecordingSession, Redraw, SessionConfig, SessionState};
