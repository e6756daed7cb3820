// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small value types shared by primitives and the scene: clips, colors, texture handles.

use kurbo::{Rect, RoundedRect};

/// A rounded clip rectangle in world (device-independent pixel) space.
///
/// Clips on the scene's mask stack combine conservatively; see
/// [`ClipRect::intersect`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipRect {
    /// Outer rectangle of the clip.
    pub rect: Rect,
    /// Uniform corner radius.
    pub corner_radius: f64,
}

impl ClipRect {
    /// A square-cornered clip.
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            corner_radius: 0.0,
        }
    }

    /// A clip with a uniform corner radius.
    pub const fn rounded(rect: Rect, corner_radius: f64) -> Self {
        Self {
            rect,
            corner_radius,
        }
    }

    /// Combine two clips.
    ///
    /// The rectangle is the exact intersection; the corner radius is the larger
    /// of the two. The intersection of two rounded rectangles is not itself a
    /// rounded rectangle, so this over-approximates. Disjoint rectangles yield a
    /// zero-area clip.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            rect: self.rect.intersect(other.rect),
            corner_radius: self.corner_radius.max(other.corner_radius),
        }
    }

    /// True if the clip admits no pixels.
    pub fn is_empty(&self) -> bool {
        !(self.rect.width() > 0.0 && self.rect.height() > 0.0)
    }

    /// The clip as a Kurbo rounded rectangle, for backends that build shader uniforms.
    pub fn to_rounded_rect(&self) -> RoundedRect {
        RoundedRect::from_rect(self.rect, self.corner_radius)
    }
}

/// Straight-alpha RGBA color with `f32` channels in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from channels.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// True if alpha is at least `1.0`.
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// Handle of an atlas texture owned by the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A sub-rectangle of an atlas texture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasTile {
    /// Atlas the tile lives in.
    pub texture: TextureId,
    /// Normalized texture coordinates of the tile.
    pub uv: Rect,
}

/// Handle of a texture rendered outside this scene (video frames, embedded 3D views).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostTextureId(pub u64);

/// The closed set of primitive kinds. Each kind maps to one backend pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    /// Blurred drop shadow.
    Shadow,
    /// Filled and/or bordered rectangle.
    Quad,
    /// Tessellated vector path.
    Path,
    /// Text decoration line.
    Underline,
    /// Monochrome glyph sprite.
    Glyph,
    /// Polychrome image sprite.
    Image,
    /// Externally rendered texture.
    HostTexture,
}

impl PrimitiveKind {
    /// All kinds, in the order a draw list flattens them.
    pub const ALL: [Self; 7] = [
        Self::Shadow,
        Self::Quad,
        Self::Path,
        Self::Underline,
        Self::Glyph,
        Self::Image,
        Self::HostTexture,
    ];
}
