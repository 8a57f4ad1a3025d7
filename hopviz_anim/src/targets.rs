// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared hop target table.
//!
//! Both the cloud highlight and the document flight read the target for a hop from
//! this one table, so the green match point and the start of the return flight always
//! coincide.

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::config::ConfigError;

/// Normalized (`[0, 1]` on both axes) nearest-neighbor positions, one per hop.
///
/// Lookups wrap: hop `n` uses entry `n % len`.
#[derive(Clone, Debug, PartialEq)]
pub struct HopTargets {
    points: SmallVec<[Point; 4]>,
}

impl HopTargets {
    /// The page's four targets.
    pub const DEFAULT: [Point; 4] = [
        Point::new(0.3, 0.45),
        Point::new(0.65, 0.55),
        Point::new(0.4, 0.7),
        Point::new(0.7, 0.35),
    ];

    /// Builds a table, rejecting an empty list or a coordinate outside `[0, 1]`.
    pub fn new(points: &[Point]) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::EmptyHopTargets);
        }
        for (index, p) in points.iter().enumerate() {
            let in_range = |v: f64| (0.0..=1.0).contains(&v);
            if !in_range(p.x) || !in_range(p.y) {
                return Err(ConfigError::TargetOutOfRange { index });
            }
        }
        Ok(Self {
            points: points.iter().copied().collect(),
        })
    }

    /// Number of distinct targets.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Normalized target for `hop`.
    pub fn normalized(&self, hop: u32) -> Point {
        self.points[hop as usize % self.points.len()]
    }

    /// Target for `hop` scaled into a surface of the given size.
    pub fn scaled(&self, hop: u32, size: Size) -> Point {
        let p = self.normalized(hop);
        Point::new(p.x * size.width, p.y * size.height)
    }

    /// Iterates the normalized targets in hop order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

impl Default for HopTargets {
    fn default() -> Self {
        Self {
            points: Self::DEFAULT.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_wrap_modulo_len() {
        let t = HopTargets::default();
        assert_eq!(t.normalized(0), Point::new(0.3, 0.45));
        assert_eq!(t.normalized(4), t.normalized(0));
        assert_eq!(t.normalized(7), Point::new(0.7, 0.35));
    }

    #[test]
    fn scaled_multiplies_by_surface_size() {
        let t = HopTargets::default();
        let p = t.scaled(1, Size::new(500.0, 280.0));
        assert!((p.x - 325.0).abs() < 1e-9, "{p:?}");
        assert!((p.y - 154.0).abs() < 1e-9, "{p:?}");
    }

    #[test]
    fn empty_and_out_of_range_tables_are_rejected() {
        assert_eq!(HopTargets::new(&[]), Err(ConfigError::EmptyHopTargets));
        assert_eq!(
            HopTargets::new(&[Point::new(0.5, 0.5), Point::new(1.2, 0.5)]),
            Err(ConfigError::TargetOutOfRange { index: 1 })
        );
    }
}
