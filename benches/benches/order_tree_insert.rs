// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_order_tree::{Aabb2D, DrawOrder, OrderTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

fn gen_overlap_grid_rects(n: usize, cell: f64, scale: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell * scale, cell * scale));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, rect_w: f64, rect_h: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - rect_w).max(1.0);
        let y0 = rng.next_f64() * (extent - rect_h).max(1.0);
        out.push(Aabb2D::<f64>::from_xywh(x0, y0, rect_w, rect_h));
    }
    out
}

/// A text-heavy frame: rows of small glyph boxes over a few large backgrounds.
fn gen_text_frame(rows: usize, per_row: usize) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(rows * per_row + rows / 8 + 1);
    out.push(Aabb2D::<f64>::from_xywh(0.0, 0.0, 2000.0, 2000.0));
    for r in 0..rows {
        if r % 8 == 0 {
            out.push(Aabb2D::<f64>::from_xywh(0.0, r as f64 * 16.0, 2000.0, 128.0));
        }
        for g in 0..per_row {
            out.push(Aabb2D::<f64>::from_xywh(
                g as f64 * 8.0,
                r as f64 * 16.0 + 2.0,
                7.0,
                12.0,
            ));
        }
    }
    out
}

/// Same contract as the tree, by scanning every earlier box.
fn linear_orders(rects: &[Aabb2D<f64>]) -> DrawOrder {
    let mut placed: Vec<(Aabb2D<f64>, DrawOrder)> = Vec::with_capacity(rects.len());
    let mut max = 0;
    for r in rects {
        let below = placed
            .iter()
            .filter(|(p, _)| p.overlaps(r))
            .map(|(_, o)| *o)
            .max()
            .unwrap_or(0);
        let order = below + 1;
        max = max.max(order);
        placed.push((*r, order));
    }
    max
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_tree_insert");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("disjoint_grid_n{}", n), |b| {
            b.iter_batched(
                OrderTree::<f64>::new,
                |mut tree| {
                    for r in rects.iter().copied() {
                        black_box(tree.insert(r));
                    }
                    black_box(tree.max_order());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let rects = gen_overlap_grid_rects(64, 10.0, 3.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("overlap_grid", |b| {
        b.iter_batched(
            OrderTree::<f64>::new,
            |mut tree| {
                for r in rects.iter().copied() {
                    black_box(tree.insert(r));
                }
            },
            BatchSize::SmallInput,
        )
    });
    let rects = gen_random_rects(4096, 2000.0, 12.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_4096", |b| {
        b.iter_batched(
            OrderTree::<f64>::new,
            |mut tree| {
                for r in rects.iter().copied() {
                    black_box(tree.insert(r));
                }
            },
            BatchSize::SmallInput,
        )
    });
    let rects = gen_text_frame(100, 120);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("text_frame", |b| {
        b.iter_batched(
            OrderTree::<f64>::new,
            |mut tree| {
                for r in rects.iter().copied() {
                    black_box(tree.insert(r));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_tree_reuse");
    let rects = gen_text_frame(100, 120);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("clear_then_refill", |b| {
        let mut tree = OrderTree::<f64>::with_capacity(rects.len());
        b.iter(|| {
            tree.clear();
            for r in rects.iter().copied() {
                black_box(tree.insert(r));
            }
        });
    });
    group.finish();
}

fn bench_linear_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_scan_baseline");
    for &count in &[256usize, 1024, 4096] {
        let rects = gen_random_rects(count, 2000.0, 12.0, 12.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("random_{}", count), |b| {
            b.iter(|| black_box(linear_orders(&rects)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_reuse, bench_linear_baseline);
criterion_main!(benches);
