//! Scripted session files.
//!
//! One JSON object per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! # walk from the door to the desk
//! {"type":"move","x":900,"y":300}
//! {"type":"click"}
//! {"type":"wait","secs":2.5}
//! {"type":"key","key":"r"}
//! {"type":"save"}
//! ```

use anyhow::Context;
use mondrian_recording_engine::Command;
use serde::Deserialize;

/// One scripted user action.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Move the pointer to a display position.
    Move { x: f64, y: f64 },
    /// Let frames run for this many seconds of wall time.
    Wait { secs: f64 },
    Click,
    Key { key: char },
    Save,
    Reset,
    Info,
}

impl ScriptStep {
    /// The engine command for steps that are user actions.
    pub fn command(&self) -> Option<Command> {
        match *self {
            Self::Click => Some(Command::Click),
            Self::Key { key } => Some(Command::Key(key)),
            Self::Save => Some(Command::Save),
            Self::Reset => Some(Command::Reset),
            Self::Info => Some(Command::Info),
            Self::Move { .. } | Self::Wait { .. } => None,
        }
    }
}

/// Parse a script, reporting the offending line on error.
pub fn parse_script(content: &str) -> anyhow::Result<Vec<(usize, ScriptStep)>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            let step: ScriptStep = serde_json::from_str(line)
                .with_context(|| format!("Invalid script step on line {line_no}"))?;
            if let ScriptStep::Wait { secs } = step {
                anyhow::ensure!(
                    secs.is_finite() && secs >= 0.0,
                    "Line {line_no}: wait must be a non-negative number of seconds"
                );
            }
            Ok((line_no, step))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_and_skips_comments() {
        let script = concat!(
            "# header\n",
            "\n",
            "{\"type\":\"move\",\"x\":10,\"y\":20.5}\n",
            "{\"type\":\"key\",\"key\":\"f\"}\n",
            "{\"type\":\"save\"}\n",
        );
        let steps = parse_script(script).unwrap();
        assert_eq!(
            steps,
            vec![
                (3, ScriptStep::Move { x: 10.0, y: 20.5 }),
                (4, ScriptStep::Key { key: 'f' }),
                (5, ScriptStep::Save),
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_step() {
        let err = parse_script("{\"type\":\"save\"}\n{\"type\":\"jump\"}\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_negative_wait() {
        assert!(parse_script("{\"type\":\"wait\",\"secs\":-1}").is_err());
    }

    #[test]
    fn maps_actions_to_commands() {
        assert_eq!(ScriptStep::Click.command(), Some(Command::Click));
        assert_eq!(ScriptStep::Key { key: 'r' }.command(), Some(Command::Key('r')));
        assert_eq!(ScriptStep::Wait { secs: 1.0 }.command(), None);
    }

    #[test]
    fn sample_fixture_parses() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("fixtures")
            .join("sample-session")
            .join("script.jsonl");
        let content = std::fs::read_to_string(path).unwrap();
        let steps = parse_script(&content).unwrap();
        assert!(steps.iter().any(|(_, s)| *s == ScriptStep::Save));
    }
}
