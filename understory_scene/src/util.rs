// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and order helpers shared by the scene.

use kurbo::{Affine, Point, Rect};
use understory_order_tree::{Aabb2D, DrawOrder};

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box in world space.
pub(crate) fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    let min_x = (a * rect.x0).min(a * rect.x1) + (c * rect.y0).min(c * rect.y1);
    let max_x = (a * rect.x0).max(a * rect.x1) + (c * rect.y0).max(c * rect.y1);
    let min_y = (b * rect.x0).min(b * rect.x1) + (d * rect.y0).min(d * rect.y1);
    let max_y = (b * rect.x0).max(b * rect.x1) + (d * rect.y0).max(d * rect.y1);
    Rect::new(min_x + e, min_y + f, max_x + e, max_y + f)
}

pub(crate) fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Bounding box of a point set, or `Rect::ZERO` when empty.
pub(crate) fn points_bbox(points: &[Point]) -> Rect {
    let mut it = points.iter();
    let Some(first) = it.next() else {
        return Rect::ZERO;
    };
    it.fold(Rect::from_points(*first, *first), |acc, p| {
        acc.union_pt(*p)
    })
}

/// True if `r` covers a strictly positive area. NaN extents count as empty.
pub(crate) fn has_area(r: Rect) -> bool {
    r.width() > 0.0 && r.height() > 0.0
}

/// Clamp a widened order into the `DrawOrder` range.
pub(crate) fn saturate_order(v: i64) -> DrawOrder {
    DrawOrder::try_from(v.max(0)).unwrap_or(DrawOrder::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;
    use kurbo::Vec2;

    #[test]
    fn bbox_of_rotated_rect() {
        let r = Rect::new(0.0, 0.0, 20.0, 10.0);
        let rotated = transform_rect_bbox(Affine::rotate(FRAC_PI_2), r);
        assert!((rotated.x0 + 10.0).abs() < 1e-9);
        assert!((rotated.x1 - 0.0).abs() < 1e-9);
        assert!((rotated.y0 - 0.0).abs() < 1e-9);
        assert!((rotated.y1 - 20.0).abs() < 1e-9);

        let moved = transform_rect_bbox(Affine::translate(Vec2::new(5.0, -5.0)), r);
        assert_eq!(moved, Rect::new(5.0, -5.0, 25.0, 5.0));
    }

    #[test]
    fn point_bbox() {
        assert_eq!(points_bbox(&[]), Rect::ZERO);
        let pts = [
            Point::new(3.0, 1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, -1.0),
        ];
        assert_eq!(points_bbox(&pts), Rect::new(-2.0, -1.0, 3.0, 4.0));
    }

    #[test]
    fn saturating_orders() {
        assert_eq!(saturate_order(-5), 0);
        assert_eq!(saturate_order(17), 17);
        assert_eq!(saturate_order(i64::MAX), DrawOrder::MAX);
        assert!(!has_area(Rect::new(0.0, 0.0, 0.0, 5.0)));
        assert!(!has_area(Rect::new(f64::NAN, 0.0, 1.0, 1.0)));
        assert!(has_area(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
