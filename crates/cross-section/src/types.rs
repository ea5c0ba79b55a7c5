//! Geometry types shared by the contouring and labeling stages.

use serde::{Deserialize, Serialize};

/// A point in 2D space (grid-index or drawing coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(a: Point, b: Point) -> Self {
        Self::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Euclidean distance, computed with `hypot` so tiny and huge
    /// separations neither underflow nor overflow.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

/// Ordered ring of points; closed rings repeat the first point at the end.
pub type Ring = Vec<Point>;

/// All rings bounding one contour band, tagged with the band's threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    pub value: f64,
    pub rings: Vec<Ring>,
}

impl PolygonFeature {
    pub fn new(value: f64, rings: Vec<Ring>) -> Self {
        Self { value, rings }
    }

    pub fn point_count(&self) -> usize {
        self.rings.iter().map(|r| r.len()).sum()
    }
}

/// A label candidate: one edge of a band boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Position in the segmenter output; stable identity for culling.
    pub id: usize,
    pub a: Point,
    pub b: Point,
    pub mid: Point,
    /// Direction from `b` to `a`, in radians.
    pub angle: f64,
    pub value: f64,
}

impl LineSegment {
    pub fn new(id: usize, a: Point, b: Point, value: f64) -> Self {
        Self {
            id,
            a,
            b,
            mid: Point::midpoint(a, b),
            angle: (a.y - b.y).atan2(a.x - b.x),
            value,
        }
    }
}
