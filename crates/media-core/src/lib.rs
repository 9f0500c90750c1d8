//! Mondrian media core contracts.
//!
//! This crate holds the collaborator surfaces the recording engine talks to
//! without coupling to a concrete player, window system or image decoder:
//! - [`ClockSource`]: the video's playback clock and transport
//! - [`PointerSource`]: the pointer over the floor-plan display area
//! - [`FloorPlan`] and [`FloorPlanLoader`]: the reference image handle
//!
//! It also ships deterministic implementations ([`ManualClock`],
//! [`PointerState`]) and an `image`-backed loader.

pub mod clock;
pub mod floor_plan;
pub mod pointer;

pub use clock::*;
pub use floor_plan::*;
pub use pointer::*;

use serde::{Deserialize, Serialize};

/// Playback clock and transport of a loaded video.
pub trait ClockSource {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total length in seconds.
    fn duration(&self) -> f64;

    /// Start or resume playback.
    fn play(&mut self);

    /// Pause playback at the current position.
    fn pause(&mut self);

    /// Pause playback and return to the start.
    fn stop(&mut self);

    /// Move the playback position. Implementations clamp to `[0, duration]`.
    fn seek(&mut self, secs: f64);

    /// Move the playback position by a relative amount.
    fn jump(&mut self, delta_secs: f64) {
        let target = self.current_time() + delta_secs;
        self.seek(target);
    }
}

/// Pointer over the display surface.
pub trait PointerSource {
    /// Position this frame, in display coordinates.
    fn current_position(&self) -> (f64, f64);

    /// Position the previous frame, in display coordinates.
    fn previous_position(&self) -> (f64, f64);

    /// Where the floor plan is drawn on the display.
    fn display_area(&self) -> DisplayArea;

    /// Whether the pointer moved since the previous frame, in either axis.
    fn moved(&self) -> bool {
        let (x, y) = self.current_position();
        let (px, py) = self.previous_position();
        x != px || y != py
    }

    /// Current position mapped into reference-image pixels.
    fn scale_to_reference(&self, reference_width: f64, reference_height: f64) -> (f64, f64) {
        scale_to_reference(
            self.current_position(),
            &self.display_area(),
            reference_width,
            reference_height,
        )
    }
}

/// Rectangle on the display where the floor plan is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayArea {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a display position lies inside the area, edges included.
    pub fn contains(&self, (px, py): (f64, f64)) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Clamp a display position into the area.
    pub fn clamp(&self, (px, py): (f64, f64)) -> (f64, f64) {
        (
            px.clamp(self.x, self.x + self.width.max(0.0)),
            py.clamp(self.y, self.y + self.height.max(0.0)),
        )
    }
}

/// Map a display position into reference-image pixels.
///
/// The position is clamped into `area`, moved to the area's origin, scaled by
/// `reference / area` on each axis and fixed to two decimal places.
pub fn scale_to_reference(
    position: (f64, f64),
    area: &DisplayArea,
    reference_width: f64,
    reference_height: f64,
) -> (f64, f64) {
    use mondrian_common::clock::fix_decimals;

    let (cx, cy) = area.clamp(position);
    let sx = if area.width > 0.0 {
        reference_width / area.width
    } else {
        0.0
    };
    let sy = if area.height > 0.0 {
        reference_height / area.height
    } else {
        0.0
    };
    (
        fix_decimals((cx - area.x) * sx, 2),
        fix_decimals((cy - area.y) * sy, 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scales_half_width_display_to_image_pixels() {
        // Floor plan drawn in the right half of a 1600x900 window.
        let area = DisplayArea::new(800.0, 0.0, 800.0, 900.0);
        let (x, y) = scale_to_reference((1200.0, 450.0), &area, 2000.0, 1800.0);
        assert_eq!((x, y), (1000.0, 900.0));
    }

    #[test]
    fn clamps_positions_outside_the_area() {
        let area = DisplayArea::new(800.0, 0.0, 800.0, 900.0);
        assert_eq!(scale_to_reference((100.0, -50.0), &area, 400.0, 300.0), (0.0, 0.0));
        assert_eq!(
            scale_to_reference((5000.0, 5000.0), &area, 400.0, 300.0),
            (400.0, 300.0)
        );
    }

    #[test]
    fn contains_includes_edges() {
        let area = DisplayArea::new(10.0, 10.0, 100.0, 50.0);
        assert!(area.contains((10.0, 10.0)));
        assert!(area.contains((110.0, 60.0)));
        assert!(!area.contains((9.99, 30.0)));
        assert!(!area.contains((50.0, 60.01)));
    }

    #[test]
    fn degenerate_area_maps_to_origin() {
        let area = DisplayArea::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(scale_to_reference((10.0, 10.0), &area, 400.0, 300.0), (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn scaled_position_stays_within_reference(
            px in -500.0f64..2500.0,
            py in -500.0f64..2500.0,
            w in 1.0f64..4000.0,
            h in 1.0f64..4000.0,
        ) {
            let area = DisplayArea::new(800.0, 0.0, 800.0, 900.0);
            let (x, y) = scale_to_reference((px, py), &area, w, h);
            prop_assert!(x >= 0.0 && x <= mondrian_common::fix_decimals(w, 2));
            prop_assert!(y >= 0.0 && y <= mondrian_common::fix_decimals(h, 2));
        }
    }
}
