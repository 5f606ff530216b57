#![allow(dead_code)]

//! Shared constants and sample data for integration tests.

use planartree::geometry::Rect;

pub const CAPACITY: usize = 4;

/// A handful of overlapping and disjoint rectangles, named for readability
/// in failure messages.
pub fn common_rects() -> Vec<(&'static str, Rect)> {
    vec![
        ("a", Rect::new(0.0, 0.0, 5.0, 5.0)),
        ("b", Rect::new(1.0, 1.0, 3.0, 3.0)),
        ("c", Rect::new(4.0, 4.0, 6.0, 6.0)),
        ("d", Rect::new(8.0, 8.0, 10.0, 10.0)),
        ("e", Rect::new(9.0, 9.0, 10.0, 10.0)),
        ("f", Rect::new(20.0, 0.0, 22.0, 2.0)),
        ("g", Rect::new(20.0, 20.0, 23.0, 23.0)),
    ]
}

/// A grid of small, non-overlapping unit rectangles, useful for exercising
/// splits and forced reinsertion without any two entries ever sharing area.
pub fn grid_rects(count: usize, columns: usize) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let x = (i % columns) as f64 * 2.0;
            let y = (i / columns) as f64 * 2.0;
            Rect::new(x, y, x + 1.0, y + 1.0)
        })
        .collect()
}

pub fn query_rect() -> Rect {
    Rect::new(0.0, 0.0, 6.0, 6.0)
}
