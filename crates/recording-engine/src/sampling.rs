//! Adaptive sampling policy.
//!
//! While the pointer moves, a new point is accepted whenever the clock has
//! advanced at high resolution (hundredths of a second by default). While it
//! is idle, only whole-second advances count, which leaves a sparse heartbeat
//! that keeps the path aligned with the video without flooding the export.

use mondrian_common::clock::{strictly_before_at, SAMPLE_TIME_DECIMALS};
use mondrian_common::config::SessionDefaults;
use mondrian_path_model::Path;

/// Decides whether the current instant should be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPolicy {
    /// Decimal places compared while the pointer is moving.
    pub high_resolution_decimals: u32,
    /// Decimal places compared while the pointer is stationary.
    pub low_resolution_decimals: u32,
}

impl SamplingPolicy {
    /// Resolutions finer than [`SAMPLE_TIME_DECIMALS`] are capped to it: two
    /// samples inside the same recorded hundredth would share a timestamp.
    pub fn new(high_resolution_decimals: u32, low_resolution_decimals: u32) -> Self {
        let high_resolution_decimals = high_resolution_decimals.min(SAMPLE_TIME_DECIMALS);
        Self {
            high_resolution_decimals,
            low_resolution_decimals: low_resolution_decimals.min(high_resolution_decimals),
        }
    }

    /// Whether to append a point at `clock_time`.
    ///
    /// An empty path always samples so the path gets its origin.
    pub fn should_sample(&self, current: &Path, pointer_moved: bool, clock_time: f64) -> bool {
        let Some(last) = current.last_time() else {
            return true;
        };
        let decimals = if pointer_moved {
            self.high_resolution_decimals
        } else {
            self.low_resolution_decimals
        };
        strictly_before_at(last, clock_time, decimals.min(SAMPLE_TIME_DECIMALS))
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::new(2, 0)
    }
}

impl From<&SessionDefaults> for SamplingPolicy {
    fn from(defaults: &SessionDefaults) -> Self {
        Self::new(
            defaults.high_resolution_decimals,
            defaults.low_resolution_decimals,
        )
    }
}
