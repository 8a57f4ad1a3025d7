// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales for the benchmark chart.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Linear mapping from a value domain onto a pixel range.
///
/// The range may be inverted (`(bottom, top)`) to flip the y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps `x` from the domain into the range. A degenerate domain maps to the range start.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (x - d0) / (d1 - d0) * (r1 - r0)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Round tick values covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Evenly spaced positions for a fixed number of categories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScalePoint {
    /// Creates a scale with half a step of padding on each side.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.5,
        }
    }

    /// Sets the outer padding, in steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Distance between neighboring categories.
    pub fn step(&self) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }
        let span = (self.range.1 - self.range.0).abs();
        let slots = (self.count - 1) as f64 + 2.0 * self.padding;
        if slots == 0.0 { 0.0 } else { span / slots }
    }

    /// Position of category `index`.
    pub fn x(&self, index: usize) -> f64 {
        let start = self.range.0.min(self.range.1);
        let step = self.step();
        if step == 0.0 {
            return (self.range.0 + self.range.1) * 0.5;
        }
        start + step * (self.padding + index as f64)
    }
}

fn nice_ticks(mut lo: f64, mut hi: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if lo == hi {
        return alloc::vec![lo];
    }
    if lo > hi {
        core::mem::swap(&mut lo, &mut hi);
    }
    let step = nice_step((hi - lo) / count as f64);
    if step == 0.0 {
        return alloc::vec![lo, hi];
    }
    let first = (lo / step).ceil() * step;
    let n = ((hi - first) / step + 1e-9).floor();
    if !n.is_finite() || n < 0.0 {
        return alloc::vec![lo, hi];
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite, non-negative and capped before the cast"
    )]
    let n = n.min(10_000.0) as usize;
    (0..=n).map(|i| first + step * i as f64).collect()
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let base = 10_f64.powf(raw.log10().floor());
    let ratio = raw / base;
    let nice = if ratio >= 7.5 {
        10.0
    } else if ratio >= 3.5 {
        5.0
    } else if ratio >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
