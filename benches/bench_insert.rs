#![allow(dead_code)]
#[path = "shared.rs"]
mod shared;
use shared::*;

use criterion::{criterion_group, Criterion};
use planartree::geometry::Rect;
use planartree::tree::{Strategy, Tree};
use std::hint::black_box;

/// A generic helper that benchmarks inserting a full batch of rectangles
/// into a fresh tree.
fn bench_bulk_insert(bench_name: &str, strategy: Strategy, rects: Vec<Rect>, cc: &mut Criterion) {
    cc.bench_function(bench_name, |b| {
        b.iter(|| {
            let mut tree: Tree<usize> = Tree::new(BENCH_NODE_CAPACITY, None, strategy).unwrap();
            for (i, rect) in black_box(&rects).iter().enumerate() {
                tree.insert(i, *rect);
            }
            black_box(tree.node_count())
        })
    });
}

fn bench_insert_guttman_2d(_c: &mut Criterion) {
    let rects = generate_2d_data(BENCH_NUM_INSERT);
    let mut cc = configure_criterion();
    bench_bulk_insert("insert_2d_guttman", Strategy::Guttman, rects, &mut cc);
}

fn bench_insert_rstar_2d(_c: &mut Criterion) {
    let rects = generate_2d_data(BENCH_NUM_INSERT);
    let mut cc = configure_criterion();
    bench_bulk_insert("insert_2d_rstar", Strategy::RStar, rects, &mut cc);
}

fn bench_insert_last_guttman_2d(_c: &mut Criterion) {
    let rects = generate_2d_data(BENCH_NUM_INSERT);
    let to_insert = *rects.last().unwrap();
    let base: Vec<_> = rects[..rects.len() - 1].to_vec();
    let mut cc = configure_criterion();
    cc.bench_function("insert_single_2d_guttman", |b| {
        b.iter_with_setup(
            || {
                let mut tree: Tree<usize> = Tree::new(BENCH_NODE_CAPACITY, None, Strategy::Guttman).unwrap();
                for (i, rect) in base.iter().enumerate() {
                    tree.insert(i, *rect);
                }
                tree
            },
            |mut tree| {
                black_box(tree.insert(BENCH_NUM_INSERT, to_insert));
            },
        )
    });
}

fn bench_insert_last_rstar_2d(_c: &mut Criterion) {
    let rects = generate_2d_data(BENCH_NUM_INSERT);
    let to_insert = *rects.last().unwrap();
    let base: Vec<_> = rects[..rects.len() - 1].to_vec();
    let mut cc = configure_criterion();
    cc.bench_function("insert_single_2d_rstar", |b| {
        b.iter_with_setup(
            || {
                let mut tree: Tree<usize> = Tree::new(BENCH_NODE_CAPACITY, None, Strategy::RStar).unwrap();
                for (i, rect) in base.iter().enumerate() {
                    tree.insert(i, *rect);
                }
                tree
            },
            |mut tree| {
                black_box(tree.insert(BENCH_NUM_INSERT, to_insert));
            },
        )
    });
}

criterion_group!(
    benches,
    bench_insert_guttman_2d,
    bench_insert_rstar_2d,
    bench_insert_last_guttman_2d,
    bench_insert_last_rstar_2d
);
