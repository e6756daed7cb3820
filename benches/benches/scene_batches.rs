// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Rect, Vec2};
use understory_scene::{AtlasTile, ClipRect, Color, Glyph, Quad, Scene, TextureId};

fn glyph(x: f64, y: f64) -> Glyph {
    Glyph {
        bounds: Rect::new(x, y, x + 7.0, y + 12.0),
        color: Color::BLACK,
        tile: AtlasTile {
            texture: TextureId(0),
            uv: Rect::new(0.0, 0.0, 0.01, 0.01),
        },
    }
}

/// A list view: a panel, then `rows` clipped rows of background plus text.
fn paint_list(scene: &mut Scene, rows: usize, glyphs_per_row: usize) {
    let _ = scene.add_quad(Quad::filled(
        Rect::new(0.0, 0.0, 1200.0, 800.0),
        Color::WHITE,
    ));
    scene.push_content_mask(ClipRect::rounded(Rect::new(8.0, 8.0, 1192.0, 792.0), 6.0));
    for r in 0..rows {
        let y = r as f64 * 20.0;
        scene.push_transform(Affine::translate(Vec2::new(8.0, 8.0 + y)));
        let _ = scene.add_quad(
            Quad::filled(Rect::new(0.0, 0.0, 1184.0, 20.0), Color::rgb(0.95, 0.95, 0.95))
                .with_border(1.0, Color::rgb(0.8, 0.8, 0.8)),
        );
        for g in 0..glyphs_per_row {
            let _ = scene.add_glyph(glyph(4.0 + g as f64 * 8.0, 4.0));
        }
        scene.pop_transform();
    }
    scene.pop_content_mask();
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_collect");
    for &rows in &[20usize, 40, 80] {
        let per_row = 100;
        group.throughput(Throughput::Elements((rows * (per_row + 1) + 1) as u64));
        group.bench_function(format!("list_rows{}", rows), |b| {
            let mut scene = Scene::new();
            b.iter(|| {
                scene.clear();
                paint_list(&mut scene, rows, per_row);
                black_box(scene.max_order());
            });
        });
    }
    group.finish();
}

fn bench_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_batches");
    for &rows in &[20usize, 40, 80] {
        let mut scene = Scene::new();
        paint_list(&mut scene, rows, 100);
        group.throughput(Throughput::Elements(scene.len() as u64));
        group.bench_function(format!("draw_list_rows{}", rows), |b| {
            b.iter(|| {
                let list = scene.draw_list();
                black_box(list.batches().count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collect, bench_batches);
criterion_main!(benches);
