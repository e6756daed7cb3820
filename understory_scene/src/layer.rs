// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind primitive storage.

use alloc::vec::Vec;

use crate::primitives::{
    Glyph, HostTexture, Image, Path, Placed, Primitive, PrimitiveRef, Quad, Shadow, Underline,
};
use crate::types::PrimitiveKind;

/// A bucket of placed primitives, one list per kind.
///
/// Layers only decide where new primitives are stored. Paint order comes
/// from each primitive's [`Placed::order`], never from the layer holding it.
#[derive(Clone, Debug, Default)]
pub struct Layer {
    pub(crate) shadows: Vec<Placed<Shadow>>,
    pub(crate) quads: Vec<Placed<Quad>>,
    pub(crate) paths: Vec<Placed<Path>>,
    pub(crate) underlines: Vec<Placed<Underline>>,
    pub(crate) glyphs: Vec<Placed<Glyph>>,
    pub(crate) images: Vec<Placed<Image>>,
    pub(crate) host_textures: Vec<Placed<HostTexture>>,
}

impl Layer {
    /// Placed primitives of kind `P`, in insertion order.
    pub fn get<P: Primitive>(&self) -> &[Placed<P>] {
        P::bucket(self)
    }

    /// Number of primitives of `kind`.
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Shadow => self.shadows.len(),
            PrimitiveKind::Quad => self.quads.len(),
            PrimitiveKind::Path => self.paths.len(),
            PrimitiveKind::Underline => self.underlines.len(),
            PrimitiveKind::Glyph => self.glyphs.len(),
            PrimitiveKind::Image => self.images.len(),
            PrimitiveKind::HostTexture => self.host_textures.len(),
        }
    }

    /// Total number of primitives.
    pub fn len(&self) -> usize {
        PrimitiveKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// True if the layer holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every primitive, kind by kind in [`PrimitiveKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = PrimitiveRef<'_>> {
        self.shadows
            .iter()
            .map(Shadow::erase)
            .chain(self.quads.iter().map(Quad::erase))
            .chain(self.paths.iter().map(Path::erase))
            .chain(self.underlines.iter().map(Underline::erase))
            .chain(self.glyphs.iter().map(Glyph::erase))
            .chain(self.images.iter().map(Image::erase))
            .chain(self.host_textures.iter().map(HostTexture::erase))
    }

    pub(crate) fn push<P: Primitive>(&mut self, placed: Placed<P>) {
        P::bucket_mut(self).push(placed);
    }

    /// Empty every bucket, keeping allocations.
    pub(crate) fn clear(&mut self) {
        self.shadows.clear();
        self.quads.clear();
        self.paths.clear();
        self.underlines.clear();
        self.glyphs.clear();
        self.images.clear();
        self.host_textures.clear();
    }
}
