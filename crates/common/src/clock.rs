//! Clock-time helpers shared by sampling, point capture and export.
//!
//! Every comparison the recording engine makes against the video clock goes
//! through [`fix_decimals`], so sampling and the exported table agree on the
//! same rounding rule:
//! - scale by `10^decimals`
//! - round half away from zero (round-half-up for non-negative times)
//! - scale back

/// Decimal places kept for recorded sample times. Sampling never compares at
/// a finer resolution than this.
pub const SAMPLE_TIME_DECIMALS: u32 = 2;

/// Round `value` to a fixed number of decimal places.
///
/// Rounding happens on the binary product `value * 10^decimals`, with no
/// locale or string formatting involved.
pub fn fix_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Whether `earlier` is strictly before `later` once both are fixed to
/// `decimals` places.
pub fn strictly_before_at(earlier: f64, later: f64, decimals: u32) -> bool {
    fix_decimals(earlier, decimals) < fix_decimals(later, decimals)
}

/// Human-readable playback label, e.g. `"2 minutes  5 seconds"`.
pub fn time_label(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
    let minutes = (secs / 60.0).floor();
    let seconds = (secs - minutes * 60.0).floor();
    format!("{} minutes  {} seconds", minutes as u64, seconds as u64)
}

/// Fixed frame cadence used to drive ticks from a frame loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameCadence {
    fps: u32,
}

impl FrameCadence {
    /// Create a cadence targeting the given frames per second (at least 1).
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Seconds between consecutive frames.
    pub fn frame_interval_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Number of whole frames that fit in `secs` of wall time.
    pub fn frames_in(&self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        (secs * self.fps as f64).round() as u64
    }
}

impl Default for FrameCadence {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fixes_to_two_decimals() {
        assert!((fix_decimals(1.234, 2) - 1.23).abs() < 1e-12);
        assert!((fix_decimals(1.235_1, 2) - 1.24).abs() < 1e-12);
        assert!((fix_decimals(0.29, 2) - 0.29).abs() < 1e-12);
    }

    #[test]
    fn rounds_half_up_to_whole_seconds() {
        assert_eq!(fix_decimals(2.5, 0), 3.0);
        assert_eq!(fix_decimals(2.49, 0), 2.0);
        assert_eq!(fix_decimals(0.0, 0), 0.0);
    }

    #[test]
    fn strict_ordering_respects_resolution() {
        assert!(strictly_before_at(1.00, 1.01, 2));
        assert!(!strictly_before_at(1.001, 1.004, 2));
        assert!(!strictly_before_at(1.2, 1.4, 0));
        assert!(strictly_before_at(1.2, 1.6, 0));
    }

    #[test]
    fn time_label_splits_minutes_and_seconds() {
        assert_eq!(time_label(0.0), "0 minutes  0 seconds");
        assert_eq!(time_label(125.7), "2 minutes  5 seconds");
        assert_eq!(time_label(-3.0), "0 minutes  0 seconds");
    }

    #[test]
    fn frame_cadence_counts_frames() {
        let cadence = FrameCadence::new(60);
        assert_eq!(cadence.frames_in(1.0), 60);
        assert_eq!(cadence.frames_in(0.0), 0);
        assert!((cadence.frame_interval_secs() - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(FrameCadence::new(0).fps(), 1);
    }

    proptest! {
        #[test]
        fn fixing_is_idempotent(value in 0.0f64..10_000.0, decimals in 0u32..4) {
            let once = fix_decimals(value, decimals);
            let twice = fix_decimals(once, decimals);
            prop_assert!((once - twice).abs() < 1e-9);
        }

        #[test]
        fn fixing_preserves_order(
            a in 0.0f64..10_000.0,
            b in 0.0f64..10_000.0,
            decimals in 0u32..4,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(fix_decimals(lo, decimals) <= fix_decimals(hi, decimals));
        }
    }
}
