// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame primitive collector.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Affine, Rect};
use understory_order_tree::{DrawOrder, OrderTree};

use crate::batch::DrawList;
use crate::config::SceneConfig;
use crate::layer::Layer;
use crate::primitives::{
    Glyph, HostTexture, Image, Path, Placed, Primitive, Quad, Shadow, Underline,
};
use crate::types::{ClipRect, PrimitiveKind};
use crate::util::{has_area, rect_to_aabb, saturate_order, transform_rect_bbox};

// Spatial orders are added on top of this, so they never saturate in practice.
const MAX_BAND_OFFSET: i64 = (DrawOrder::MAX / 2) as i64;

/// An active stacking context: an order band reserved for one subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StackingContext {
    /// Order of the context's own bounds, resolved through any enclosing context.
    pub base_order: DrawOrder,
    /// Position of this context relative to its siblings. Higher paints later.
    pub z_index: u32,
}

/// Summary counters for one frame of a [`Scene`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Stored shadows.
    pub shadows: usize,
    /// Stored quads.
    pub quads: usize,
    /// Stored paths.
    pub paths: usize,
    /// Stored underlines.
    pub underlines: usize,
    /// Stored glyphs.
    pub glyphs: usize,
    /// Stored images.
    pub images: usize,
    /// Stored host textures.
    pub host_textures: usize,
    /// Primitives dropped by clip culling.
    pub culled: usize,
    /// Layers in the scene, including the root layer.
    pub layers: usize,
    /// Nodes in the order tree.
    pub tree_nodes: usize,
    /// Highest order of any stored primitive.
    pub max_order: DrawOrder,
}

impl SceneStats {
    /// Total stored primitives.
    pub fn primitives(&self) -> usize {
        self.shadows
            + self.quads
            + self.paths
            + self.underlines
            + self.glyphs
            + self.images
            + self.host_textures
    }
}

/// Collects one frame of primitives and resolves their draw order, clip and transform.
///
/// Paint code calls the `add_*` methods in any traversal order, scoping them with
/// the clip, transform, stacking-context and overlay controls. Each primitive
/// is resolved once, on insertion, and never changes afterwards. At the end of
/// the frame, [`Scene::draw_list`] produces the order-sorted sequence the
/// backend replays in batches; [`Scene::clear`] then readies the scene for the
/// next frame while keeping its allocations.
pub struct Scene {
    config: SceneConfig,
    tree: OrderTree<f64>,
    layers: Vec<Layer>,
    // Indices into `layers`; the last entry is the current layer. Never empty.
    layer_stack: Vec<usize>,
    // Each entry is the effective clip/transform after the corresponding push.
    clip_stack: Vec<ClipRect>,
    transform_stack: Vec<Affine>,
    stacking_contexts: Vec<StackingContext>,
    overlay_base: u32,
    culled: usize,
    max_order: DrawOrder,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("primitives", &self.len())
            .field("layers", &self.layers.len())
            .field("clip_depth", &self.clip_stack.len())
            .field("transform_depth", &self.transform_stack.len())
            .field("stacking_depth", &self.stacking_contexts.len())
            .field("overlay_base", &self.overlay_base)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Create an empty scene with the default [`SceneConfig`].
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene with a custom configuration.
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            tree: OrderTree::with_capacity(config.initial_capacity),
            layers: vec![Layer::default()],
            layer_stack: vec![0],
            clip_stack: Vec::new(),
            transform_stack: Vec::new(),
            stacking_contexts: Vec::new(),
            overlay_base: 0,
            culled: 0,
            max_order: 0,
        }
    }

    /// The configuration this scene was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Reset for a new frame.
    ///
    /// Drops every primitive and every layer except an empty root layer, empties
    /// all stacks, leaves overlay mode and clears the order tree.
    pub fn clear(&mut self) {
        tracing::debug!(
            primitives = self.len(),
            culled = self.culled,
            layers = self.layers.len(),
            max_order = self.max_order,
            "clearing scene"
        );
        self.layers.truncate(1);
        self.layers[0].clear();
        self.layer_stack.clear();
        self.layer_stack.push(0);
        self.clip_stack.clear();
        self.transform_stack.clear();
        self.stacking_contexts.clear();
        self.overlay_base = 0;
        self.culled = 0;
        self.max_order = 0;
        self.tree.clear();
    }

    // --- clips ---

    /// Intersect `mask` with the current clip for subsequent primitives.
    ///
    /// Masks are in world space and are not affected by the transform stack.
    /// The combined clip keeps the largest corner radius of any mask on the
    /// stack; see [`ClipRect::intersect`].
    pub fn push_content_mask(&mut self, mask: ClipRect) {
        let effective = match self.clip_stack.last() {
            Some(current) => current.intersect(&mask),
            None => mask,
        };
        self.clip_stack.push(effective);
    }

    /// Restore the clip that was active before the matching push.
    pub fn pop_content_mask(&mut self) {
        if self.clip_stack.pop().is_none() {
            tracing::warn!("pop_content_mask without a matching push");
        }
    }

    /// The effective clip, if any mask is active.
    pub fn current_clip(&self) -> Option<ClipRect> {
        self.clip_stack.last().copied()
    }

    // --- transforms ---

    /// Compose `transform` under the current transform (parent, then child).
    pub fn push_transform(&mut self, transform: Affine) {
        let effective = self.current_transform() * transform;
        self.transform_stack.push(effective);
    }

    /// Restore the transform that was active before the matching push.
    pub fn pop_transform(&mut self) {
        if self.transform_stack.pop().is_none() {
            tracing::warn!("pop_transform without a matching push");
        }
    }

    /// The effective transform, or identity.
    pub fn current_transform(&self) -> Affine {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Affine::IDENTITY)
    }

    // --- stacking contexts ---

    /// Open a stacking context over `bounds` (local space) and return its base order.
    ///
    /// The bounds are inserted into the order tree, so the context itself is
    /// ordered above earlier overlapping content. Until the matching pop, every
    /// primitive resolves to `overlay + base_order + z_index * z_index_stride +
    /// spatial_order`, which keeps the subtree inside its own band and orders
    /// sibling contexts by `z_index`. A nested context resolves its base order
    /// through the enclosing one, so its band sits inside the parent's.
    ///
    /// `z_index` is unsigned: the lowest band starts at the context's base
    /// order, so content can never be lifted below order zero. Band offsets are
    /// capped at half the order range, which keeps overlap inside even an
    /// extreme band resolved by the tree.
    pub fn push_stacking_context(&mut self, bounds: Rect, z_index: u32) -> DrawOrder {
        let world = self.world_bounds(bounds);
        let spatial = self.tree.insert(rect_to_aabb(world));
        let base_order = saturate_order(self.band_offset() + i64::from(spatial));
        self.stacking_contexts.push(StackingContext {
            base_order,
            z_index,
        });
        base_order
    }

    /// Close the innermost stacking context.
    pub fn pop_stacking_context(&mut self) {
        if self.stacking_contexts.pop().is_none() {
            tracing::warn!("pop_stacking_context without a matching push");
        }
    }

    /// The innermost active stacking context.
    pub fn current_stacking_context(&self) -> Option<StackingContext> {
        self.stacking_contexts.last().copied()
    }

    // --- overlays ---

    /// Paint subsequent primitives in overlay tier `priority`.
    ///
    /// Overlay orders start at [`SceneConfig::overlay_base_order`] plus
    /// `priority * overlay_tier_stride`, above any normal content. See
    /// [`TOOLTIP`](crate::TOOLTIP), [`POPOVER`](crate::POPOVER) and
    /// [`MODAL`](crate::MODAL).
    pub fn begin_overlay(&mut self, priority: u32) {
        self.overlay_base = self.config.overlay_base(priority);
    }

    /// Return to normal content.
    pub fn end_overlay(&mut self) {
        self.overlay_base = 0;
    }

    /// Order offset applied to new primitives by overlay mode; `0` outside overlays.
    pub fn overlay_base_order(&self) -> u32 {
        self.overlay_base
    }

    // --- layers ---

    /// Append a new empty layer and direct new primitives into it.
    pub fn push_layer(&mut self) {
        self.layers.push(Layer::default());
        self.layer_stack.push(self.layers.len() - 1);
    }

    /// Direct new primitives back to the previously current layer.
    ///
    /// The popped layer keeps its primitives; they are still drawn, in their
    /// own resolved order. Popping the root layer does nothing.
    pub fn pop_layer(&mut self) {
        if self.layer_stack.len() > 1 {
            self.layer_stack.pop();
        } else {
            tracing::warn!("pop_layer without a matching push");
        }
    }

    /// All layers of this frame, in creation order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers, including the root layer.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Index of the layer receiving new primitives.
    pub fn current_layer_index(&self) -> usize {
        self.layer_stack.last().copied().unwrap_or(0)
    }

    // --- primitives ---

    /// Add a primitive of any kind.
    ///
    /// Returns the resolved order, or `None` if the primitive lies outside the
    /// current clip and was dropped. A dropped primitive leaves no trace: the
    /// order tree is not touched.
    pub fn add<P: Primitive>(&mut self, primitive: P) -> Option<DrawOrder> {
        let (world, clip, transform) = self.resolve(primitive.bounds())?;
        let spatial = self.tree.insert(rect_to_aabb(world));
        let offset = (i64::from(self.overlay_base) + self.band_offset()).min(MAX_BAND_OFFSET);
        let order = saturate_order(offset + i64::from(spatial));
        self.store(Placed {
            primitive,
            order,
            clip,
            transform,
        });
        Some(order)
    }

    /// Add a drop shadow.
    pub fn add_shadow(&mut self, shadow: Shadow) -> Option<DrawOrder> {
        self.add(shadow)
    }

    /// Add a filled or bordered rectangle.
    pub fn add_quad(&mut self, quad: Quad) -> Option<DrawOrder> {
        self.add(quad)
    }

    /// Add a tessellated path.
    pub fn add_path(&mut self, path: Path) -> Option<DrawOrder> {
        self.add(path)
    }

    /// Add an underline.
    pub fn add_underline(&mut self, underline: Underline) -> Option<DrawOrder> {
        self.add(underline)
    }

    /// Add a glyph.
    pub fn add_glyph(&mut self, glyph: Glyph) -> Option<DrawOrder> {
        self.add(glyph)
    }

    /// Add a glyph with a caller-chosen order, bypassing the order tree.
    ///
    /// Clip culling and clip/transform resolution still apply; stacking
    /// contexts and overlay mode do not.
    pub fn add_glyph_with_order(&mut self, glyph: Glyph, order: DrawOrder) -> Option<DrawOrder> {
        let (_, clip, transform) = self.resolve(glyph.bounds())?;
        self.store(Placed {
            primitive: glyph,
            order,
            clip,
            transform,
        });
        Some(order)
    }

    /// Add an image.
    pub fn add_image(&mut self, image: Image) -> Option<DrawOrder> {
        self.add(image)
    }

    /// Add an externally rendered texture.
    pub fn add_host_texture(&mut self, texture: HostTexture) -> Option<DrawOrder> {
        self.add(texture)
    }

    // --- inspection ---

    /// Number of stored primitives across all layers.
    pub fn len(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// True if nothing has been stored this frame.
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Layer::is_empty)
    }

    /// Highest order of any stored primitive, or `0`.
    pub fn max_order(&self) -> DrawOrder {
        self.max_order
    }

    /// The order tree backing spatial resolution.
    pub fn order_tree(&self) -> &OrderTree<f64> {
        &self.tree
    }

    /// Counters for the current frame.
    pub fn stats(&self) -> SceneStats {
        let count = |kind: PrimitiveKind| -> usize {
            self.layers.iter().map(|l| l.count(kind)).sum()
        };
        SceneStats {
            shadows: count(PrimitiveKind::Shadow),
            quads: count(PrimitiveKind::Quad),
            paths: count(PrimitiveKind::Path),
            underlines: count(PrimitiveKind::Underline),
            glyphs: count(PrimitiveKind::Glyph),
            images: count(PrimitiveKind::Image),
            host_textures: count(PrimitiveKind::HostTexture),
            culled: self.culled,
            layers: self.layer_count(),
            tree_nodes: self.tree.node_count(),
            max_order: self.max_order,
        }
    }

    /// Every stored primitive sorted by draw order, ready for batching.
    pub fn draw_list(&self) -> DrawList<'_> {
        DrawList::new(&self.layers)
    }

    // --- internals ---

    /// World bounds of `local` under the current transform.
    fn world_bounds(&self, local: Rect) -> Rect {
        match self.transform_stack.last() {
            Some(t) => transform_rect_bbox(*t, local),
            None => local,
        }
    }

    /// Clip-culled world bounds plus the clip and transform to store.
    fn resolve(&mut self, local: Rect) -> Option<(Rect, Option<ClipRect>, Option<Affine>)> {
        let world = self.world_bounds(local);
        let clip = self.current_clip();
        let world = match clip {
            Some(c) => {
                let clipped = world.intersect(c.rect);
                if !has_area(clipped) {
                    self.culled += 1;
                    tracing::trace!(?local, clip = ?c.rect, "culled primitive outside clip");
                    return None;
                }
                clipped
            }
            None => world,
        };
        let transform = self
            .transform_stack
            .last()
            .copied()
            .filter(|t| *t != Affine::IDENTITY);
        Some((world, clip, transform))
    }

    /// Order offset contributed by the innermost stacking context.
    fn band_offset(&self) -> i64 {
        self.stacking_contexts.last().map_or(0, |ctx| {
            let band = i64::from(ctx.base_order)
                + i64::from(ctx.z_index) * i64::from(self.config.z_index_stride);
            band.min(MAX_BAND_OFFSET)
        })
    }

    fn store<P: Primitive>(&mut self, placed: Placed<P>) {
        self.max_order = self.max_order.max(placed.order);
        let current = self.current_layer_index();
        self.layers[current].push(placed);
    }
}
