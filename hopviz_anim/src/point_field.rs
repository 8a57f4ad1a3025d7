// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The static background scatter of the document cloud.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Point, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A single decorative point in the cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPoint {
    /// Position in surface coordinates.
    pub pos: Point,
    /// Dot radius.
    pub radius: f64,
    /// Resting opacity before any highlight.
    pub opacity: f64,
}

/// A point field sampled once and kept for the lifetime of its owner.
///
/// Sampling is polar: a uniform angle and a radius of `u^0.55 * 0.46` (in normalized
/// units) around the center, which biases points toward the middle. Coordinates are
/// clamped away from the edges before scaling to the surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct PointField {
    seed: u64,
    size: Size,
    points: Vec<FieldPoint>,
}

impl PointField {
    /// The page's point count.
    pub const DEFAULT_COUNT: usize = 400;
    /// Smallest surface the field is laid out for; smaller sizes are padded up.
    pub const MIN_SIZE: Size = Size::new(400.0, 220.0);

    const RADIUS_EXPONENT: f64 = 0.55;
    const RADIUS_SCALE: f64 = 0.46;

    /// Samples `count` points for a surface of `size` from `seed`.
    ///
    /// The same inputs always produce the same field.
    pub fn generate(seed: u64, count: usize, size: Size) -> Self {
        let size = Size::new(
            size.width.max(Self::MIN_SIZE.width),
            size.height.max(Self::MIN_SIZE.height),
        );
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..count)
            .map(|_| {
                let angle = rng.random::<f64>() * TAU;
                let r = rng.random::<f64>().powf(Self::RADIUS_EXPONENT) * Self::RADIUS_SCALE;
                let x = (0.5 + angle.cos() * r).clamp(0.06, 0.94);
                let y = (0.5 + angle.sin() * r).clamp(0.1, 0.9);
                FieldPoint {
                    pos: Point::new(x * size.width, y * size.height),
                    radius: 1.0 + rng.random::<f64>() * 2.0,
                    opacity: 0.18 + rng.random::<f64>() * 0.35,
                }
            })
            .collect();
        Self { seed, size, points }
    }

    /// Seed the field was sampled from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Surface size the field was laid out for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The sampled points.
    pub fn points(&self) -> &[FieldPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the field has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let a = PointField::generate(7, 400, Size::new(500.0, 280.0));
        let b = PointField::generate(7, 400, Size::new(500.0, 280.0));
        assert_eq!(a, b);
        assert_ne!(a, PointField::generate(8, 400, Size::new(500.0, 280.0)));
    }

    #[test]
    fn points_stay_inside_the_clamped_band() {
        let size = Size::new(500.0, 280.0);
        let field = PointField::generate(42, PointField::DEFAULT_COUNT, size);
        assert_eq!(field.len(), 400);
        for p in field.points() {
            assert!(p.pos.x >= 0.06 * size.width - 1e-9 && p.pos.x <= 0.94 * size.width + 1e-9);
            assert!(p.pos.y >= 0.1 * size.height - 1e-9 && p.pos.y <= 0.9 * size.height + 1e-9);
            assert!((1.0..=3.0).contains(&p.radius), "radius {}", p.radius);
            assert!((0.18..=0.53).contains(&p.opacity), "opacity {}", p.opacity);
        }
    }

    #[test]
    fn small_surfaces_are_padded_to_the_minimum() {
        let field = PointField::generate(1, 10, Size::new(100.0, 100.0));
        assert_eq!(field.size(), PointField::MIN_SIZE);
    }

    #[test]
    fn sampling_is_biased_toward_the_center() {
        let size = Size::new(500.0, 280.0);
        let field = PointField::generate(3, 2000, size);
        let center = Point::new(250.0, 140.0);
        let inner = field
            .points()
            .iter()
            .filter(|p| {
                let d = p.pos - center;
                (d.x / size.width).abs() < 0.23 && (d.y / size.height).abs() < 0.23
            })
            .count();
        // Uniform-area sampling would put 25% inside half the radius.
        assert!(inner > 2000 / 4, "only {inner} points near the center");
    }
}
