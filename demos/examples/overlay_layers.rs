// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking contexts, overlays, and layers.
//!
//! Paint two overlapping windows with explicit `z_index`, a dropdown layer,
//! and a tooltip, in an order that does not match their visual stacking.
//!
//! Run:
//! - `cargo run -p understory_demos --example overlay_layers`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_scene::{Color, HostTexture, HostTextureId, POPOVER, Quad, Scene, TOOLTIP};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new();

    // The front window is painted first but has the higher z_index.
    let front_bounds = Rect::new(100.0, 100.0, 400.0, 300.0);
    let _ = scene.push_stacking_context(front_bounds, 2);
    let front = scene
        .add_quad(Quad::filled(front_bounds, Color::rgb(0.2, 0.4, 0.9)))
        .unwrap_or_default();
    let _ = scene.add_host_texture(HostTexture {
        bounds: Rect::new(120.0, 120.0, 380.0, 280.0),
        texture: HostTextureId(7),
    });
    scene.pop_stacking_context();

    let back_bounds = Rect::new(0.0, 0.0, 300.0, 200.0);
    let _ = scene.push_stacking_context(back_bounds, 1);
    let back = scene
        .add_quad(Quad::filled(back_bounds, Color::rgb(0.9, 0.9, 0.9)))
        .unwrap_or_default();
    scene.pop_stacking_context();
    println!("front={front} back={back}");
    assert!(back < front);

    // A dropdown in its own layer and overlay tier.
    scene.push_layer();
    scene.begin_overlay(POPOVER);
    let menu = scene
        .add_quad(Quad::filled(
            Rect::new(150.0, 150.0, 250.0, 260.0),
            Color::WHITE,
        ))
        .unwrap_or_default();
    scene.end_overlay();
    scene.pop_layer();

    // A tooltip, painted last but in a lower tier than the menu.
    scene.begin_overlay(TOOLTIP);
    let tooltip = scene
        .add_quad(Quad::filled(
            Rect::new(160.0, 140.0, 240.0, 160.0),
            Color::BLACK,
        ))
        .unwrap_or_default();
    scene.end_overlay();
    println!("menu={menu} tooltip={tooltip}");
    assert!(front < tooltip && tooltip < menu);

    println!("layers: {}", scene.layers().len());
    for batch in scene.draw_list().batches() {
        let orders: Vec<_> = batch.primitives.iter().map(|p| p.order()).collect();
        println!("{:?}: {orders:?}", batch.kind);
    }
}
