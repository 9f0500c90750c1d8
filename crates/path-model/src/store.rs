//! Ownership of all recorded path data.
//!
//! The store holds the completed paths (in the order they were exported),
//! exactly one in-progress path, and the running export counter. Nothing
//! outside this module mutates a path directly.

use crate::path::{Path, PathStyle, Point};

/// Completed paths, the current path and the export counter.
#[derive(Debug, Clone)]
pub struct PathStore {
    completed: Vec<Path>,
    current: Path,
    next_file_index: u32,
    paths_created: usize,
    stroke_weight: f64,
}

impl PathStore {
    /// Create an empty store whose paths use the given stroke weight.
    pub fn new(stroke_weight: f64) -> Self {
        Self {
            completed: Vec::new(),
            current: Path::new(PathStyle::for_ordinal(0, stroke_weight)),
            next_file_index: 0,
            paths_created: 1,
            stroke_weight,
        }
    }

    /// The in-progress path.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Exported paths in completion order.
    pub fn completed(&self) -> &[Path] {
        &self.completed
    }

    /// Index the next export will be named with.
    pub fn next_file_index(&self) -> u32 {
        self.next_file_index
    }

    /// Append a sample to the current path.
    pub fn add_point(&mut self, point: Point) -> bool {
        let accepted = self.current.push(point);
        if !accepted {
            tracing::warn!(t = point.t, "Rejected out-of-order sample");
        }
        accepted
    }

    /// Drop current-path points recorded after `target`. Returns how many
    /// were removed.
    pub fn rewind_to(&mut self, target: f64) -> usize {
        self.current.truncate_after(target)
    }

    /// Empty the current path in place. Completed paths are untouched.
    pub fn clear_current(&mut self) {
        self.current.clear();
    }

    /// Discard the current path and every completed path. The export
    /// counter keeps running so file names are never reused.
    pub fn clear_all(&mut self) {
        self.completed.clear();
        self.current = self.fresh_path();
    }

    /// Move the current path into the completed list after a successful
    /// export, start a fresh current path, and advance the counter.
    ///
    /// Returns the index the exported path was written under.
    pub fn commit_current(&mut self) -> u32 {
        let index = self.next_file_index;
        let fresh = self.fresh_path();
        let finished = std::mem::replace(&mut self.current, fresh);
        self.completed.push(finished);
        self.next_file_index += 1;
        index
    }

    fn fresh_path(&mut self) -> Path {
        let style = PathStyle::for_ordinal(self.paths_created, self.stroke_weight);
        self.paths_created += 1;
        Path::new(style)
    }
}

impl Default for PathStore {
    fn default() -> Self {
        Self::new(PathStyle::default().weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_points(points: &[(f64, f64, f64)]) -> PathStore {
        let mut store = PathStore::default();
        for &(x, y, t) in points {
            assert!(store.add_point(Point::new(x, y, t)));
        }
        store
    }

    #[test]
    fn commit_moves_current_into_completed() {
        let mut store = store_with_points(&[(0.0, 0.0, 0.0), (1.0, 2.0, 1.0)]);
        let index = store.commit_current();

        assert_eq!(index, 0);
        assert_eq!(store.next_file_index(), 1);
        assert_eq!(store.completed().len(), 1);
        assert_eq!(store.completed()[0].len(), 2);
        assert!(store.current().is_empty());
    }

    #[test]
    fn committed_paths_keep_completion_order() {
        let mut store = store_with_points(&[(0.0, 0.0, 0.0)]);
        store.commit_current();
        store.add_point(Point::new(9.0, 9.0, 3.0));
        store.commit_current();

        let firsts: Vec<f64> = store
            .completed()
            .iter()
            .map(|p| p.points()[0].x)
            .collect();
        assert_eq!(firsts, vec![0.0, 9.0]);
        assert_ne!(store.completed()[0].style.color, store.completed()[1].style.color);
    }

    #[test]
    fn clear_current_leaves_completed_alone() {
        let mut store = store_with_points(&[(0.0, 0.0, 0.0)]);
        store.commit_current();
        store.add_point(Point::new(1.0, 1.0, 1.0));
        store.clear_current();

        assert!(store.current().is_empty());
        assert_eq!(store.completed().len(), 1);
    }

    #[test]
    fn clear_all_keeps_counter_running() {
        let mut store = store_with_points(&[(0.0, 0.0, 0.0)]);
        store.commit_current();
        store.add_point(Point::new(1.0, 1.0, 1.0));
        store.clear_all();

        assert!(store.current().is_empty());
        assert!(store.completed().is_empty());
        assert_eq!(store.next_file_index(), 1);
    }

    #[test]
    fn rewind_drops_only_later_points() {
        let mut store = store_with_points(&[(0.0, 0.0, 1.0), (1.0, 1.0, 3.0), (2.0, 2.0, 7.0)]);
        assert_eq!(store.rewind_to(3.0), 1);
        assert_eq!(store.current().last_time(), Some(3.0));
    }
}
