//! ## Geometry
//!
//! Axis-aligned rectangles and the arithmetic the R-tree strategies need:
//! union, intersection area, enlargement, perimeter, area, centroid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance used when two enlargement/overlap/area values are
/// compared for "equality" ahead of a deterministic tie-break.
pub const EPSILON: f64 = 1e-5;

/// Returns true if `a` and `b` are within [`EPSILON`] of each other,
/// relative to their magnitude (no absolute floor, matching
/// `math.isclose(a, b, rel_tol=EPSILON)`).
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= EPSILON * scale
}

/// An axis-aligned rectangle, stored as its min and max corners.
///
/// A degenerate rectangle (`min_x == max_x` or `min_y == max_y`) is valid
/// and represents a point or a line segment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Builds a rectangle from two corners, normalizing min/max order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Rect {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Builds a zero-area rectangle at a single point.
    pub fn from_point(x: f64, y: f64) -> Self {
        Rect {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The area of the intersection of `self` and `other`, or `0.0` if they
    /// don't overlap.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let dx = (self.max_x.min(other.max_x) - self.min_x.max(other.min_x)).max(0.0);
        let dy = (self.max_y.min(other.max_y) - self.min_y.max(other.min_y)).max(0.0);
        dx * dy
    }

    /// Strict rectangle/rectangle intersection test (touching edges don't count).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Inclusive point-in-rectangle containment test.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Area added to `self` by enlarging it to also cover `other`.
    pub fn enlargement(&self, other: &Rect) -> f64 {
        self.union(other).area() - self.area()
    }
}

/// The smallest rectangle containing every rectangle in `rects`.
///
/// # Panics
///
/// Panics if `rects` is empty; callers never invoke this on an empty
/// entry set (a node always has at least one entry).
pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Rect {
    let mut iter = rects.into_iter();
    let first = *iter
        .next()
        .expect("union_all requires at least one rectangle");
    iter.fold(first, |acc, r| acc.union(r))
}
