// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path helpers.

use hopviz_anim::visual::QuadCurve;
use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};

// Paths here end up in SVG and on screen at roughly 1:1 scale.
const TOLERANCE: f64 = 0.1;

/// A circle as a path.
pub fn circle(center: Point, radius: f64) -> BezPath {
    Circle::new(center, radius.max(0.0))
        .path_elements(TOLERANCE)
        .collect()
}

/// A rounded rectangle as a path.
pub fn rounded_rect(rect: Rect, radius: f64) -> BezPath {
    RoundedRect::from_rect(rect, radius)
        .path_elements(TOLERANCE)
        .collect()
}

/// An open polyline through `points`.
pub fn polyline(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

/// A single quadratic segment.
pub fn quad(curve: &QuadCurve) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(curve.start);
    path.quad_to(curve.control, curve.end);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_bounds_match_radius() {
        let b = circle(Point::new(10.0, 10.0), 5.0).bounding_box();
        assert!((b.width() - 10.0).abs() < 0.2, "{b:?}");
        assert!((b.center().x - 10.0).abs() < 1e-9, "{b:?}");
    }

    #[test]
    fn polyline_visits_every_point() {
        let p = polyline([Point::ZERO, Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(p.elements().len(), 3);
    }
}
