// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene basics.
//!
//! Paint a small card with clips and transforms, then walk the batches a
//! backend would submit. Set `RUST_LOG=understory_scene=trace` to see culling
//! and batching events.
//!
//! Run:
//! - `cargo run -p understory_demos --example scene_basics`

use kurbo::{Affine, Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use understory_scene::{
    AtlasTile, ClipRect, Color, Glyph, Path, Quad, Scene, Shadow, TextureId, Underline,
};

fn glyph(x: f64, y: f64) -> Glyph {
    Glyph {
        bounds: Rect::new(x, y, x + 8.0, y + 14.0),
        color: Color::BLACK,
        tile: AtlasTile {
            texture: TextureId(0),
            uv: Rect::new(0.0, 0.0, 0.05, 0.05),
        },
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new();
    let card = Rect::new(20.0, 20.0, 320.0, 220.0);

    let _ = scene.add_shadow(Shadow {
        bounds: card,
        corner_radii: 8.0.into(),
        blur_radius: 12.0,
        color: Color::rgba(0.0, 0.0, 0.0, 0.3),
    });
    let _ = scene.add_quad(
        Quad::filled(card, Color::WHITE)
            .with_border(1.0, Color::rgb(0.8, 0.8, 0.8))
            .with_corner_radii(8.0),
    );

    scene.push_content_mask(ClipRect::rounded(card, 8.0));
    scene.push_transform(Affine::translate(Vec2::new(card.x0 + 12.0, card.y0 + 12.0)));

    // A line of text with an underline beneath it.
    for i in 0..12 {
        let _ = scene.add_glyph(glyph(f64::from(i) * 9.0, 0.0));
    }
    let _ = scene.add_underline(Underline {
        origin: Point::new(0.0, 15.0),
        width: 108.0,
        thickness: 1.0,
        color: Color::BLACK,
        wavy: true,
    });

    // A check mark, scaled up.
    scene.push_transform(Affine::translate(Vec2::new(0.0, 40.0)) * Affine::scale(2.0));
    let _ = scene.add_path(Path::new(
        vec![
            Point::new(0.0, 5.0),
            Point::new(4.0, 9.0),
            Point::new(10.0, 0.0),
            Point::new(4.0, 7.0),
        ],
        vec![0, 1, 3, 1, 2, 3],
        Color::rgb(0.1, 0.6, 0.2),
    ));
    scene.pop_transform();

    // Scrolled out of the card: culled.
    let hidden = scene.add_glyph(glyph(0.0, 500.0));
    assert_eq!(hidden, None);

    scene.pop_transform();
    scene.pop_content_mask();

    let stats = scene.stats();
    tracing::info!(?stats, "frame collected");

    let list = scene.draw_list();
    for batch in list.batches() {
        let first = batch.primitives[0].order();
        let last = batch.primitives[batch.len() - 1].order();
        println!(
            "{:?} x{} (orders {first}..={last})",
            batch.kind,
            batch.len()
        );
        for glyph in batch.typed::<Glyph>() {
            // A backend would write instance data here.
            let _ = (glyph.primitive.tile, glyph.clip, glyph.transform);
        }
    }
}
