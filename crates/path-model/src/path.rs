//! Recorded points and movement paths.

use serde::{Deserialize, Serialize};

/// A single recorded sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position in floor-plan pixels.
    pub x: f64,
    /// Y position in floor-plan pixels.
    pub y: f64,
    /// Video clock time in seconds when the sample was taken.
    pub t: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

/// 8-bit RGB stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS-style hex string, e.g. `#d7263d`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Stroke colors handed out to new paths in order.
pub const PATH_PALETTE: [Rgb; 8] = [
    Rgb(0xd7, 0x26, 0x3d),
    Rgb(0x1b, 0x4f, 0x9c),
    Rgb(0xf4, 0xb4, 0x00),
    Rgb(0x2e, 0x8b, 0x57),
    Rgb(0x6a, 0x3d, 0x9a),
    Rgb(0xf2, 0x6b, 0x1d),
    Rgb(0x00, 0x8b, 0x8b),
    Rgb(0x33, 0x33, 0x33),
];

/// Rendering metadata carried with a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    /// Stroke weight in display pixels.
    pub weight: f64,
    pub color: Rgb,
}

impl PathStyle {
    /// Style for the `ordinal`-th path created in a session.
    pub fn for_ordinal(ordinal: usize, weight: f64) -> Self {
        Self {
            weight,
            color: PATH_PALETTE[ordinal % PATH_PALETTE.len()],
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::for_ordinal(0, 3.0)
    }
}

/// An ordered run of points whose times never decrease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct Path {
    points: Vec<Point>,
    pub style: PathStyle,
}

/// A point that [`Path::push`] would refuse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("Point {index} has a non-finite coordinate or time")]
    NonFinite { index: usize },

    #[error("Point {index} at t={t} is earlier than the point before it")]
    OutOfOrder { index: usize, t: f64 },
}

/// Serialized form of a [`Path`], checked point by point on the way in.
#[derive(Deserialize)]
struct RawPath {
    points: Vec<Point>,
    style: PathStyle,
}

impl TryFrom<RawPath> for Path {
    type Error = PathError;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        let mut path = Path::new(raw.style);
        for (index, point) in raw.points.into_iter().enumerate() {
            if !path.push(point) {
                return Err(if point.is_finite() {
                    PathError::OutOfOrder { index, t: point.t }
                } else {
                    PathError::NonFinite { index }
                });
            }
        }
        Ok(path)
    }
}

impl Path {
    /// Create an empty path with the given style.
    pub fn new(style: PathStyle) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    /// Recorded points in recording order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time of the most recently recorded point.
    pub fn last_time(&self) -> Option<f64> {
        self.points.last().map(|p| p.t)
    }

    /// Append a point.
    ///
    /// Returns `false` and leaves the path untouched if the point is not
    /// finite or its time is earlier than the last recorded time.
    pub fn push(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            return false;
        }
        if let Some(last) = self.last_time() {
            if point.t < last {
                return false;
            }
        }
        self.points.push(point);
        true
    }

    /// Drop every point recorded after `t`. Returns how many were removed.
    pub fn truncate_after(&mut self, t: f64) -> usize {
        let keep = self.points.partition_point(|p| p.t <= t);
        let removed = self.points.len() - keep;
        self.points.truncate(keep);
        removed
    }

    /// Remove all points, keeping the style.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new(PathStyle::default())
    }
}
