//! Deterministic playback clock.

use crate::ClockSource;

/// A video clock advanced explicitly by its owner.
///
/// Used wherever there is no real player behind the engine: scripted
/// replays, tests, and headless batch runs. Time only moves while playing,
/// and never leaves `[0, duration]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualClock {
    name: String,
    time: f64,
    duration: f64,
    playing: bool,
}

impl ManualClock {
    /// Create a paused clock at time zero.
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            duration,
            playing: false,
        }
    }

    /// Source name, for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance playback by `secs` of wall time.
    ///
    /// Does nothing while paused. Reaching the end pauses the clock, like a
    /// media element finishing playback.
    pub fn advance(&mut self, secs: f64) {
        if !self.playing || !secs.is_finite() || secs <= 0.0 {
            return;
        }
        self.time = (self.time + secs).min(self.max_time());
        if self.time >= self.max_time() {
            self.playing = false;
            tracing::debug!(video = %self.name, "Playback reached end");
        }
    }

    fn max_time(&self) -> f64 {
        if self.duration.is_finite() {
            self.duration.max(0.0)
        } else {
            0.0
        }
    }
}

impl ClockSource for ManualClock {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn play(&mut self) {
        if self.time < self.max_time() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    fn seek(&mut self, secs: f64) {
        if secs.is_nan() {
            return;
        }
        self.time = secs.clamp(0.0, self.max_time());
    }
}
