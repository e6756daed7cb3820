// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: a Kurbo-native primitive collector with order-sorted batching.
//!
//! UI paint code walks its element tree once per frame and emits primitives
//! (shadows, quads, paths, underlines, glyphs, images and host textures). The
//! [`Scene`] records them in the order they arrive and resolves, for each one:
//!
//! - a draw order from [`understory_order_tree`], so content that overlaps
//!   earlier content paints above it while disjoint content can share an order;
//! - the effective clip from the content-mask stack (primitives entirely outside
//!   it are dropped);
//! - the effective transform from the transform stack.
//!
//! Stacking contexts lift a subtree into its own `z_index` band, and overlay
//! mode lifts tooltips, popovers and modals above all normal content.
//!
//! At the end of the frame, [`Scene::draw_list`] sorts everything by order and
//! [`DrawList::batches`] splits it into maximal same-kind runs for the backend.
//!
//! ## Where this fits
//!
//! - Box tree: geometry and hit testing.
//! - Scene (this crate): per-frame display list with resolved draw order.
//! - Backend: owns pipelines, atlases and GPU buffers, and consumes [`Batch`]es.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Affine, Rect, Vec2};
//! use understory_scene::{ClipRect, Color, PrimitiveKind, Quad, Scene};
//!
//! let mut scene = Scene::new();
//! let panel = scene.add_quad(Quad::filled(Rect::new(0.0, 0.0, 200.0, 100.0), Color::WHITE));
//!
//! scene.push_content_mask(ClipRect::rounded(Rect::new(0.0, 0.0, 200.0, 100.0), 8.0));
//! scene.push_transform(Affine::translate(Vec2::new(10.0, 10.0)));
//! let button = scene.add_quad(Quad::filled(Rect::new(0.0, 0.0, 80.0, 24.0), Color::BLACK));
//! // Entirely outside the mask: dropped.
//! let hidden = scene.add_quad(Quad::filled(Rect::new(500.0, 0.0, 520.0, 20.0), Color::BLACK));
//! scene.pop_transform();
//! scene.pop_content_mask();
//!
//! assert_eq!(panel, Some(1));
//! assert_eq!(button, Some(2));
//! assert_eq!(hidden, None);
//!
//! let list = scene.draw_list();
//! let batches: Vec<_> = list.batches().map(|b| (b.kind, b.len())).collect();
//! assert_eq!(batches, [(PrimitiveKind::Quad, 2)]);
//!
//! // Next frame.
//! scene.clear();
//! assert!(scene.is_empty());
//! ```
//!
//! ## Order bands
//!
//! Final orders are computed as
//! `overlay_base + context_base + z_index * z_index_stride + spatial_order`,
//! saturated into [`DrawOrder`]. The strides live in [`SceneConfig`]. Normal
//! content is assumed to stay below the overlay base; with the default
//! configuration that leaves room for about 150 `z_index` steps.
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_scene::{Color, Quad, Scene, TOOLTIP};
//!
//! let mut scene = Scene::new();
//! let r = Rect::new(0.0, 0.0, 50.0, 50.0);
//!
//! let base = scene.push_stacking_context(r, 2);
//! let raised = scene.add_quad(Quad::filled(r, Color::WHITE)).unwrap();
//! scene.pop_stacking_context();
//! assert!(raised >= base + 20_000);
//!
//! scene.begin_overlay(TOOLTIP);
//! let tip = scene.add_quad(Quad::filled(r, Color::BLACK)).unwrap();
//! scene.end_overlay();
//! assert!(tip > raised);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `trace` for each culled primitive and
//! each batch, `debug` when a draw list is built or the scene is cleared, and
//! `warn` on unbalanced pops. Unbalanced pops are otherwise ignored.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod batch;
pub mod config;
pub mod layer;
pub mod primitives;
pub mod scene;
pub mod types;
mod util;

pub use batch::{Batch, BatchIterator, DrawList};
pub use config::{MODAL, POPOVER, SceneConfig, TOOLTIP};
pub use layer::Layer;
pub use primitives::{
    Glyph, HostTexture, Image, Path, Placed, Primitive, PrimitiveRef, Quad, Shadow, Underline,
};
pub use scene::{Scene, SceneStats, StackingContext};
pub use types::{AtlasTile, ClipRect, Color, HostTextureId, PrimitiveKind, TextureId};
pub use understory_order_tree::DrawOrder;
