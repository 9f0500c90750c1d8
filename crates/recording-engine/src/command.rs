//! User input mapped onto session operations.

use mondrian_common::error::MondrianResult;
use mondrian_media_core::{ClockSource, PointerSource};

use crate::export::{ExportRecord, ExportSink};
use crate::session::RecordingSession;

/// A discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pointer pressed; toggles recording when over the floor plan.
    Click,
    /// Key pressed: `r` rewinds, `f` fast-forwards.
    Key(char),
    /// Save the current path.
    Save,
    /// Discard the current path and restart the video.
    Reset,
    /// Show or hide the info overlay.
    Info,
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    Ignored,
    Exported(ExportRecord),
}

impl From<bool> for CommandOutcome {
    fn from(applied: bool) -> Self {
        if applied {
            Self::Applied
        } else {
            Self::Ignored
        }
    }
}

impl<V: ClockSource> RecordingSession<V> {
    /// Apply a user action. Only exporting can fail.
    pub fn dispatch<P: PointerSource + ?Sized>(
        &mut self,
        command: Command,
        pointer: &P,
        sink: &mut dyn ExportSink,
    ) -> MondrianResult<CommandOutcome> {
        let outcome = match command {
            Command::Click => self.click(pointer).into(),
            Command::Key(key) => self.key(key).into(),
            Command::Save => match self.export(sink)? {
                Some(record) => CommandOutcome::Exported(record),
                None => CommandOutcome::Ignored,
            },
            Command::Reset => self.reset().into(),
            Command::Info => {
                self.toggle_info_overlay();
                CommandOutcome::Applied
            }
        };
        tracing::debug!(?command, ?outcome, "Command dispatched");
        Ok(outcome)
    }

    /// A click over the floor plan toggles recording and dismisses the info
    /// overlay so it does not cover the drawing.
    fn click<P: PointerSource + ?Sized>(&mut self, pointer: &P) -> bool {
        if !self.all_loaded() || !pointer.display_area().contains(pointer.current_position()) {
            return false;
        }
        self.toggle_play_pause();
        if self.is_info_showing() {
            self.toggle_info_overlay();
        }
        true
    }

    fn key(&mut self, key: char) -> bool {
        if !self.all_loaded() {
            return false;
        }
        match key.to_ascii_lowercase() {
            'r' => self.rewind().is_some(),
            'f' => self.fast_forward(),
            _ => false,
        }
    }
}
