// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order-band configuration and overlay tiers.
//!
//! Orders from the spatial tree are small (bounded by the overlap depth of a
//! frame). Stacking contexts and overlays lift them into coarse bands:
//!
//! - a stacking context adds `base_order + z_index * z_index_stride`;
//! - overlay mode adds `overlay_base_order + tier * overlay_tier_stride`.
//!
//! Normal content is assumed to stay below `overlay_base_order`, so overlay
//! content always paints above it without comparing against what is on screen.

/// Overlay tier for tooltips.
pub const TOOLTIP: u32 = 0;
/// Overlay tier for popovers and menus.
pub const POPOVER: u32 = 1;
/// Overlay tier for modal dialogs.
pub const MODAL: u32 = 2;

/// Tunables for how a [`Scene`](crate::Scene) maps stacking contexts and
/// overlays onto draw orders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SceneConfig {
    /// Order distance between adjacent `z_index` values inside a stacking context.
    pub z_index_stride: u32,
    /// Base order of overlay content.
    pub overlay_base_order: u32,
    /// Order distance between adjacent overlay tiers.
    pub overlay_tier_stride: u32,
    /// Primitives to reserve room for in the order tree on construction.
    pub initial_capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            z_index_stride: 10_000,
            overlay_base_order: 1_500_000,
            overlay_tier_stride: 100_000,
            initial_capacity: 0,
        }
    }
}

impl SceneConfig {
    /// Overlay base order for `tier`, saturating on overflow.
    pub fn overlay_base(&self, tier: u32) -> u32 {
        self.overlay_base_order
            .saturating_add(tier.saturating_mul(self.overlay_tier_stride))
    }
}
