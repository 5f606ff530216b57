//! ## Location adapter
//!
//! Uniform interpretation of point-like and rectangle-like query inputs:
//! a `Point`, a `Rect`, a 2-tuple/array of reals (point), or a 4-tuple/array
//! of reals (rectangle). Anything else is rejected with
//! [`TreeError::InvalidLocation`].
//!
//! All conversions are `TryFrom` (never plain `From`), even the ones that
//! can't actually fail, so every accepted input shape shares one error
//! type at the query boundary (`Tree::query`'s bound is
//! `TryInto<Location, Error = TreeError>`).

use crate::error::TreeError;
use crate::geometry::Rect;

/// A query location: either a point or a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Location {
    Point(f64, f64),
    Rect(Rect),
}

impl Location {
    /// True iff this location matches `rect`.
    ///
    /// A point matches using closed (inclusive) containment; a rectangle
    /// matches using strict intersection.
    pub fn matches(&self, rect: &Rect) -> bool {
        match self {
            Location::Point(x, y) => rect.contains_point(*x, *y),
            Location::Rect(query) => query.intersects(rect),
        }
    }
}

impl TryFrom<Rect> for Location {
    type Error = TreeError;

    fn try_from(r: Rect) -> Result<Self, Self::Error> {
        Ok(Location::Rect(r))
    }
}

impl TryFrom<(f64, f64)> for Location {
    type Error = TreeError;

    fn try_from((x, y): (f64, f64)) -> Result<Self, Self::Error> {
        Ok(Location::Point(x, y))
    }
}

impl TryFrom<[f64; 2]> for Location {
    type Error = TreeError;

    fn try_from(p: [f64; 2]) -> Result<Self, Self::Error> {
        Ok(Location::Point(p[0], p[1]))
    }
}

impl TryFrom<(f64, f64, f64, f64)> for Location {
    type Error = TreeError;

    fn try_from((x1, y1, x2, y2): (f64, f64, f64, f64)) -> Result<Self, Self::Error> {
        Ok(Location::Rect(Rect::new(x1, y1, x2, y2)))
    }
}

impl TryFrom<[f64; 4]> for Location {
    type Error = TreeError;

    fn try_from(r: [f64; 4]) -> Result<Self, Self::Error> {
        Ok(Location::Rect(Rect::new(r[0], r[1], r[2], r[3])))
    }
}

impl TryFrom<&[f64]> for Location {
    type Error = TreeError;

    fn try_from(slice: &[f64]) -> Result<Self, Self::Error> {
        match slice.len() {
            2 => Ok(Location::Point(slice[0], slice[1])),
            4 => Ok(Location::Rect(Rect::new(
                slice[0], slice[1], slice[2], slice[3],
            ))),
            n => Err(TreeError::InvalidLocation {
                reason: format!(
                    "expected a 2-element (point) or 4-element (rect) slice, got {n} elements"
                ),
            }),
        }
    }
}
