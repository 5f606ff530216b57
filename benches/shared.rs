#![allow(dead_code)]

//! Shared utilities for benchmarks.

use criterion::Criterion;
use planartree::geometry::Rect;

pub const BENCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
pub const BENCH_NUM_INSERT: usize = 2000;
pub const BENCH_NODE_CAPACITY: usize = 8;

/// A grid of non-overlapping unit rectangles, generated deterministically
/// so successive benchmark iterations see the same shape of tree.
pub fn generate_2d_data(count: usize) -> Vec<Rect> {
    let columns = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let x = (i % columns) as f64 * 2.0;
            let y = (i / columns) as f64 * 2.0;
            Rect::new(x, y, x + 1.0, y + 1.0)
        })
        .collect()
}

pub fn configure_criterion() -> Criterion {
    Criterion::default().measurement_time(BENCH_TIMEOUT)
}
