//! Frame-based pointer tracking.

use crate::{DisplayArea, PointerSource};

/// Pointer position tracked the way a frame loop sees it: the position this
/// frame and the position last frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    current: (f64, f64),
    previous: (f64, f64),
    area: DisplayArea,
}

impl PointerState {
    /// A stationary pointer at `position` over the given floor-plan area.
    pub fn new(area: DisplayArea, position: (f64, f64)) -> Self {
        Self {
            current: position,
            previous: position,
            area,
        }
    }

    /// Record a pointer move; the old position becomes the previous one.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.previous = self.current;
        self.current = (x, y);
    }

    /// Close out a frame: with no further moves, the pointer reads as
    /// stationary next frame.
    pub fn end_frame(&mut self) {
        self.previous = self.current;
    }
}

impl PointerSource for PointerState {
    fn current_position(&self) -> (f64, f64) {
        self.current
    }

    fn previous_position(&self) -> (f64, f64) {
        self.previous
    }

    fn display_area(&self) -> DisplayArea {
        self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_marks_pointer_as_moved_until_frame_ends() {
        let area = DisplayArea::new(0.0, 0.0, 100.0, 100.0);
        let mut pointer = PointerState::new(area, (10.0, 10.0));
        assert!(!pointer.moved());

        pointer.move_to(10.0, 12.0);
        assert!(pointer.moved());
        assert_eq!(pointer.previous_position(), (10.0, 10.0));

        pointer.end_frame();
        assert!(!pointer.moved());
        assert_eq!(pointer.current_position(), (10.0, 12.0));
    }

    #[test]
    fn scales_through_trait_default() {
        let area = DisplayArea::new(50.0, 0.0, 100.0, 100.0);
        let pointer = PointerState::new(area, (100.0, 25.0));
        assert_eq!(pointer.scale_to_reference(1000.0, 400.0), (500.0, 100.0));
    }
}
