// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colors used across the surfaces.

use peniko::Color;
use peniko::color::{AlphaColor, Hsl, Srgb};

/// Cloud points, the traveling vector and its trail.
pub const POINT: Color = Color::from_rgb8(99, 102, 241);
/// Search heat around the target.
pub const HEAT: Color = Color::from_rgb8(251, 146, 60);
/// Match marker, document badges and completed hops.
pub const MATCH: Color = Color::from_rgb8(34, 197, 94);
/// Query badge, the active hop and the encoder bar start.
pub const ACCENT: Color = Color::from_rgb8(59, 130, 246);
/// Encoder bar end.
pub const ACCENT_END: Color = Color::from_rgb8(168, 85, 247);
/// Pending hops and unfilled vector cells.
pub const PENDING: Color = Color::from_rgb8(229, 231, 235);
/// Panel outlines and axis lines.
pub const BORDER: Color = Color::from_rgb8(229, 231, 235);
/// Gridlines and progress-bar tracks.
pub const TRACK: Color = Color::from_rgb8(243, 244, 246);
/// Panel fill.
pub const PANEL: Color = Color::WHITE;
/// Headings.
pub const TEXT: Color = Color::from_rgb8(17, 24, 39);
/// Secondary text.
pub const TEXT_MUTED: Color = Color::from_rgb8(107, 114, 128);
/// Tertiary text.
pub const TEXT_FAINT: Color = Color::from_rgb8(156, 163, 175);

const CELL_LOW: [f64; 3] = [59.0, 130.0, 246.0];
const CELL_MID: [f64; 3] = [139.0, 92.0, 246.0];
const CELL_HIGH: [f64; 3] = [249.0, 115.0, 22.0];

/// `color` with its alpha multiplied by `opacity` (clamped to `[0, 1]`).
#[allow(
    clippy::cast_possible_truncation,
    reason = "opacity is clamped to [0, 1] and f32 precision is plenty"
)]
pub fn fade(color: Color, opacity: f64) -> Color {
    color.multiply_alpha(opacity.clamp(0.0, 1.0) as f32)
}

/// Opaque color from hue (degrees), saturation and lightness (percent).
pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "color components only need f32 precision"
    )]
    let components = [hue as f32, saturation as f32, lightness as f32, 1.0];
    AlphaColor::<Hsl>::new(components).convert::<Srgb>()
}

/// Dense-vector cell color: blue at 0, purple at 0.5, orange at 1.
#[allow(
    clippy::cast_possible_truncation,
    reason = "channels interpolate between values in 0..=255"
)]
pub fn cell_color(value: f64) -> Color {
    let v = value.clamp(0.0, 1.0);
    let (from, to, t) = if v < 0.5 {
        (CELL_LOW, CELL_MID, v * 2.0)
    } else {
        (CELL_MID, CELL_HIGH, (v - 0.5) * 2.0)
    };
    let channel = |i: usize| (from[i] + t * (to[i] - from[i]) + 0.5) as u8;
    Color::from_rgb8(channel(0), channel(1), channel(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_colors_hit_the_anchors() {
        assert_eq!(cell_color(0.0).to_rgba8(), Color::from_rgb8(59, 130, 246).to_rgba8());
        assert_eq!(cell_color(0.5).to_rgba8(), Color::from_rgb8(139, 92, 246).to_rgba8());
        assert_eq!(cell_color(1.0).to_rgba8(), Color::from_rgb8(249, 115, 22).to_rgba8());
        assert_eq!(cell_color(0.25).to_rgba8(), Color::from_rgb8(99, 111, 246).to_rgba8());
    }

    #[test]
    fn fade_scales_alpha() {
        assert_eq!(fade(POINT, 0.0).to_rgba8().a, 0);
        assert_eq!(fade(POINT, 1.0).to_rgba8().a, 255);
        assert_eq!(fade(POINT, 7.0).to_rgba8().a, 255);
    }

    #[test]
    fn hsl_converts_to_srgb() {
        let red = hsl(0.0, 100.0, 50.0).to_rgba8();
        assert_eq!((red.r, red.g, red.b, red.a), (255, 0, 0, 255));
    }
}
