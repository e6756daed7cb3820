// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive descriptors and their resolved, placed form.
//!
//! Every kind carries only its visual fields. When a descriptor is added to a
//! [`Scene`](crate::Scene) it is wrapped in [`Placed`], which records the
//! resolved draw order, clip and transform.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, RoundedRectRadii};
use understory_order_tree::DrawOrder;

use crate::layer::Layer;
use crate::types::{AtlasTile, ClipRect, Color, HostTextureId, PrimitiveKind};
use crate::util::points_bbox;

/// A primitive with its order, clip and transform resolved at insertion time.
#[derive(Clone, Debug, PartialEq)]
pub struct Placed<P> {
    /// The kind-specific descriptor, unchanged.
    pub primitive: P,
    /// Paint position; ascending orders paint back to front.
    pub order: DrawOrder,
    /// Effective clip when the primitive was added, if any clip was active.
    pub clip: Option<ClipRect>,
    /// Effective transform when the primitive was added; `None` means identity.
    pub transform: Option<Affine>,
}

mod sealed {
    #[allow(unnameable_types, reason = "Sealing trait; only this crate implements it.")]
    pub trait Sealed {}
}

/// A primitive kind the scene knows how to store and batch.
///
/// The set of kinds is closed; this trait is sealed and gives the scene static
/// dispatch over the per-kind buckets of a [`Layer`].
pub trait Primitive: sealed::Sealed + Sized {
    /// The kind tag used for batching.
    const KIND: PrimitiveKind;

    /// Local-space bounds of everything this primitive paints.
    fn bounds(&self) -> Rect;

    /// The bucket holding this kind in `layer`.
    fn bucket(layer: &Layer) -> &[Placed<Self>];

    #[doc(hidden)]
    fn bucket_mut(layer: &mut Layer) -> &mut Vec<Placed<Self>>;

    /// Erase the kind of a placed primitive.
    fn erase(placed: &Placed<Self>) -> PrimitiveRef<'_>;

    /// Recover the typed primitive from a [`PrimitiveRef`] of the same kind.
    fn from_ref(r: PrimitiveRef<'_>) -> Option<&Placed<Self>>;
}

macro_rules! impl_primitive {
    ($ty:ident, $field:ident) => {
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$ty;

            fn bounds(&self) -> Rect {
                self.paint_bounds()
            }

            fn bucket(layer: &Layer) -> &[Placed<Self>] {
                &layer.$field
            }

            fn bucket_mut(layer: &mut Layer) -> &mut Vec<Placed<Self>> {
                &mut layer.$field
            }

            fn erase(placed: &Placed<Self>) -> PrimitiveRef<'_> {
                PrimitiveRef::$ty(placed)
            }

            fn from_ref(r: PrimitiveRef<'_>) -> Option<&Placed<Self>> {
                match r {
                    PrimitiveRef::$ty(p) => Some(p),
                    _ => None,
                }
            }
        }
    };
}

/// A blurred drop shadow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Bounds of the shape casting the shadow, before blur.
    pub bounds: Rect,
    /// Corner radii of the shape.
    pub corner_radii: RoundedRectRadii,
    /// Blur radius; the shadow paints this far outside `bounds`.
    pub blur_radius: f64,
    /// Shadow color.
    pub color: Color,
}

impl Shadow {
    fn paint_bounds(&self) -> Rect {
        let blur = self.blur_radius.max(0.0);
        self.bounds.inflate(blur, blur)
    }
}

/// A filled and/or bordered rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    /// Outer bounds.
    pub bounds: Rect,
    /// Fill color.
    pub background: Color,
    /// Border color.
    pub border_color: Color,
    /// Border width, drawn inside `bounds`. Zero means no border.
    pub border_width: f64,
    /// Corner radii.
    pub corner_radii: RoundedRectRadii,
}

impl Quad {
    /// A filled rectangle with square corners.
    pub fn filled(bounds: Rect, background: Color) -> Self {
        Self {
            bounds,
            background,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            corner_radii: RoundedRectRadii::from_single_radius(0.0),
        }
    }

    /// Set the border.
    pub fn with_border(mut self, width: f64, color: Color) -> Self {
        self.border_width = width;
        self.border_color = color;
        self
    }

    /// Set the corner radii.
    pub fn with_corner_radii(mut self, radii: impl Into<RoundedRectRadii>) -> Self {
        self.corner_radii = radii.into();
        self
    }

    fn paint_bounds(&self) -> Rect {
        self.bounds
    }
}

/// A tessellated vector path: a triangle list over `vertices`.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Vertex positions in local space.
    pub vertices: Vec<Point>,
    /// Triangle indices into `vertices`, three per triangle.
    pub indices: Vec<u32>,
    /// Fill color.
    pub color: Color,
}

impl Path {
    /// Create a path from pre-tessellated triangles.
    pub fn new(vertices: Vec<Point>, indices: Vec<u32>, color: Color) -> Self {
        debug_assert!(indices.len().is_multiple_of(3), "indices must describe whole triangles");
        Self {
            vertices,
            indices,
            color,
        }
    }

    fn paint_bounds(&self) -> Rect {
        points_bbox(&self.vertices)
    }
}

/// A text decoration line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Underline {
    /// Top-left corner of the line.
    pub origin: Point,
    /// Horizontal extent.
    pub width: f64,
    /// Line thickness.
    pub thickness: f64,
    /// Line color.
    pub color: Color,
    /// Draw as a wave (spell-check style) instead of a straight line.
    pub wavy: bool,
}

impl Underline {
    fn paint_bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.thickness,
        )
    }
}

/// A monochrome glyph sprite sampled from a coverage atlas and tinted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Placement of the glyph quad.
    pub bounds: Rect,
    /// Tint color.
    pub color: Color,
    /// Atlas location of the rasterized glyph.
    pub tile: AtlasTile,
}

impl Glyph {
    fn paint_bounds(&self) -> Rect {
        self.bounds
    }
}

/// A polychrome image sprite (bitmaps, emoji, raster icons).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Image {
    /// Placement of the image quad.
    pub bounds: Rect,
    /// Atlas location of the image.
    pub tile: AtlasTile,
    /// Corner radii applied when sampling.
    pub corner_radii: RoundedRectRadii,
    /// Render in grayscale.
    pub grayscale: bool,
    /// Opacity multiplier in `0.0..=1.0`.
    pub opacity: f32,
}

impl Image {
    fn paint_bounds(&self) -> Rect {
        self.bounds
    }
}

/// A texture rendered by the host outside this scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HostTexture {
    /// Placement of the texture.
    pub bounds: Rect,
    /// Host-side handle.
    pub texture: HostTextureId,
}

impl HostTexture {
    fn paint_bounds(&self) -> Rect {
        self.bounds
    }
}

impl_primitive!(Shadow, shadows);
impl_primitive!(Quad, quads);
impl_primitive!(Path, paths);
impl_primitive!(Underline, underlines);
impl_primitive!(Glyph, glyphs);
impl_primitive!(Image, images);
impl_primitive!(HostTexture, host_textures);

/// A borrowed placed primitive of any kind.
#[derive(Copy, Clone, Debug)]
pub enum PrimitiveRef<'a> {
    /// A shadow.
    Shadow(&'a Placed<Shadow>),
    /// A quad.
    Quad(&'a Placed<Quad>),
    /// A path.
    Path(&'a Placed<Path>),
    /// An underline.
    Underline(&'a Placed<Underline>),
    /// A glyph.
    Glyph(&'a Placed<Glyph>),
    /// An image.
    Image(&'a Placed<Image>),
    /// A host texture.
    HostTexture(&'a Placed<HostTexture>),
}

macro_rules! each_ref {
    ($self:expr, $p:ident => $body:expr) => {
        match $self {
            PrimitiveRef::Shadow($p) => $body,
            PrimitiveRef::Quad($p) => $body,
            PrimitiveRef::Path($p) => $body,
            PrimitiveRef::Underline($p) => $body,
            PrimitiveRef::Glyph($p) => $body,
            PrimitiveRef::Image($p) => $body,
            PrimitiveRef::HostTexture($p) => $body,
        }
    };
}

impl<'a> PrimitiveRef<'a> {
    /// Kind of the referenced primitive.
    pub fn kind(self) -> PrimitiveKind {
        match self {
            Self::Shadow(_) => PrimitiveKind::Shadow,
            Self::Quad(_) => PrimitiveKind::Quad,
            Self::Path(_) => PrimitiveKind::Path,
            Self::Underline(_) => PrimitiveKind::Underline,
            Self::Glyph(_) => PrimitiveKind::Glyph,
            Self::Image(_) => PrimitiveKind::Image,
            Self::HostTexture(_) => PrimitiveKind::HostTexture,
        }
    }

    /// Resolved draw order.
    pub fn order(self) -> DrawOrder {
        each_ref!(self, p => p.order)
    }

    /// Resolved clip.
    pub fn clip(self) -> Option<&'a ClipRect> {
        each_ref!(self, p => p.clip.as_ref())
    }

    /// Resolved transform; `None` means identity.
    pub fn transform(self) -> Option<&'a Affine> {
        each_ref!(self, p => p.transform.as_ref())
    }

    /// Local bounds of the referenced primitive.
    pub fn bounds(self) -> Rect {
        each_ref!(self, p => p.primitive.bounds())
    }

    /// True if both refer to the same stored primitive.
    pub fn ptr_eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Shadow(a), Self::Shadow(b)) => core::ptr::eq(a, b),
            (Self::Quad(a), Self::Quad(b)) => core::ptr::eq(a, b),
            (Self::Path(a), Self::Path(b)) => core::ptr::eq(a, b),
            (Self::Underline(a), Self::Underline(b)) => core::ptr::eq(a, b),
            (Self::Glyph(a), Self::Glyph(b)) => core::ptr::eq(a, b),
            (Self::Image(a), Self::Image(b)) => core::ptr::eq(a, b),
            (Self::HostTexture(a), Self::HostTexture(b)) => core::ptr::eq(a, b),
            _ => false,
        }
    }
}
