// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds and scalar helpers shared by the order tree.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Paint position of a primitive within one frame. Higher paints later (on top).
pub type DrawOrder = u32;

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether the interiors of two boxes intersect.
    ///
    /// Boxes that only share an edge or a corner do not overlap, and a box with
    /// no area overlaps nothing.
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_degenerate()
            && !other.is_degenerate()
            && lt(self.min_x, other.max_x)
            && lt(other.min_x, self.max_x)
            && lt(self.min_y, other.max_y)
            && lt(other.min_y, self.max_y)
    }

    /// Whether this box has no interior: zero or negative extent on either
    /// axis, or NaN coordinates.
    pub fn is_degenerate(&self) -> bool {
        !(lt(self.min_x, self.max_x) && lt(self.min_y, self.max_y))
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        union_aabb(*self, *other)
    }
}

impl Aabb2D<f32> {
    /// Create an AABB from origin and size in f32.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<i64> {
    /// Create an AABB from origin and size in i64.
    pub const fn from_xywh(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

/// Numeric scalar abstraction for the order tree.
///
/// Provides the minimal arithmetic needed for the insertion cost, plus a
/// widened accumulator type (e.g., f32→f64, i64→i128) so that cost
/// comparisons stay robust for large coordinates.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for cost computations.
    type Acc: Copy + PartialOrd + core::ops::Add<Output = Self::Acc> + Debug;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }
}

/// Half the perimeter (`width + height`) of an AABB in the widened accumulator.
///
/// Used as the insertion cost: cheaper than area and still favours compact
/// subtrees.
#[inline]
pub fn half_perimeter<T: Scalar>(a: &Aabb2D<T>) -> T::Acc {
    let w = T::max_zero(T::sub(a.max_x, a.min_x));
    let h = T::max_zero(T::sub(a.max_y, a.min_y));
    T::widen(w) + T::widen(h)
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

pub(crate) fn union_aabb<T: PartialOrd + Copy>(a: Aabb2D<T>, b: Aabb2D<T>) -> Aabb2D<T> {
    Aabb2D {
        min_x: min_t(a.min_x, b.min_x),
        min_y: min_t(a.min_y, b.min_y),
        max_x: max_t(a.max_x, b.max_x),
        max_y: max_t(a.max_y, b.max_y),
    }
}
