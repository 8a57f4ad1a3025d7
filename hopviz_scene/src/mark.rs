// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark model produced by the render surfaces.
//!
//! A [`Mark`] is a stable id, a `z_index` and a payload. Renderers are expected to sort by
//! `(z_index, id)` for a deterministic paint order. Marks carry fully resolved geometry and
//! paint; nothing in here depends on animation state.

extern crate alloc;

use alloc::string::String;

use kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};
use peniko::Color;
use smallvec::SmallVec;

/// Stable identity of a mark across frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Identity for mark `key` inside a surface `namespace`.
    pub const fn new(namespace: u32, key: u64) -> Self {
        Self(((namespace as u64) << 32) | (key & 0xffff_ffff))
    }

    /// The surface namespace this id belongs to.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "the namespace occupies exactly the high 32 bits"
    )]
    pub const fn namespace(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

/// One color stop of a [`RadialGradient`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset along the radius, `0..=1`.
    pub offset: f64,
    /// Color at the offset.
    pub color: Color,
}

/// A radial gradient centered on a point.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    /// Gradient center.
    pub center: Point,
    /// Radius at which the last stop is reached.
    pub radius: f64,
    /// Stops in increasing offset order.
    pub stops: SmallVec<[GradientStop; 4]>,
}

impl RadialGradient {
    /// Creates a gradient from `(offset, color)` pairs.
    pub fn new(center: Point, radius: f64, stops: &[(f64, Color)]) -> Self {
        Self {
            center,
            radius,
            stops: stops
                .iter()
                .map(|&(offset, color)| GradientStop { offset, color })
                .collect(),
        }
    }
}

/// Fill or stroke paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Color),
    /// A radial gradient.
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Solid(value)
    }
}

impl From<RadialGradient> for Paint {
    fn from(value: RadialGradient) -> Self {
        Self::Radial(value)
    }
}

/// Stroke style.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke paint.
    pub paint: Paint,
    /// Line width.
    pub width: f64,
    /// Dash pattern; empty for a solid line.
    pub dash: SmallVec<[f64; 2]>,
}

impl Stroke {
    /// A solid stroke.
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
            dash: SmallVec::new(),
        }
    }

    /// Sets the dash pattern.
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = dash.iter().copied().collect();
        self
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The position is on the alphabetic baseline.
    #[default]
    Alphabetic,
    /// The position is on the vertical middle of the text.
    Middle,
    /// The position is on the hanging (top) baseline.
    Hanging,
}

/// An axis-aligned, optionally rounded rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry.
    pub rect: Rect,
    /// Corner radius.
    pub corner_radius: f64,
    /// Fill paint.
    pub fill: Paint,
    /// Optional outline.
    pub stroke: Option<Stroke>,
}

impl RectMark {
    /// A filled rectangle with square corners.
    pub fn new(rect: Rect, fill: impl Into<Paint>) -> Self {
        Self {
            rect,
            corner_radius: 0.0,
            fill: fill.into(),
            stroke: None,
        }
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// An arbitrary path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Geometry.
    pub path: BezPath,
    /// Optional fill.
    pub fill: Option<Paint>,
    /// Optional outline.
    pub stroke: Option<Stroke>,
}

impl PathMark {
    /// A filled path.
    pub fn filled(path: BezPath, fill: impl Into<Paint>) -> Self {
        Self {
            path,
            fill: Some(fill.into()),
            stroke: None,
        }
    }

    /// A stroked, unfilled path.
    pub fn stroked(path: BezPath, stroke: Stroke) -> Self {
        Self {
            path,
            fill: None,
            stroke: Some(stroke),
        }
    }
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Whether the text is set bold.
    pub bold: bool,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Clockwise rotation about `pos`, in degrees.
    pub angle: f64,
    /// Fill color.
    pub fill: Color,
}

impl TextMark {
    /// Creates a regular-weight text run anchored at its start.
    pub fn new(pos: Point, text: impl Into<String>, font_size: f64, fill: Color) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size,
            bold: false,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
            fill,
        }
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the text bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Mark geometry and paint.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectMark),
    /// A path.
    Path(PathMark),
    /// A text run.
    Text(TextMark),
}

impl MarkPayload {
    /// Geometric bounds, or `None` for text (which has no shaped extent).
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }

    /// Returns the payload moved by `offset`.
    pub fn translated(self, offset: Vec2) -> Self {
        let move_paint = |paint: Paint| match paint {
            Paint::Radial(mut g) => {
                g.center += offset;
                Paint::Radial(g)
            }
            solid => solid,
        };
        let move_stroke = |stroke: Option<Stroke>| {
            stroke.map(|s| Stroke {
                paint: move_paint(s.paint),
                ..s
            })
        };
        match self {
            Self::Rect(r) => Self::Rect(RectMark {
                rect: r.rect + offset,
                fill: move_paint(r.fill),
                stroke: move_stroke(r.stroke),
                ..r
            }),
            Self::Path(p) => Self::Path(PathMark {
                path: Affine::translate(offset) * p.path,
                fill: p.fill.map(move_paint),
                stroke: move_stroke(p.stroke),
            }),
            Self::Text(t) => Self::Text(TextMark {
                pos: t.pos + offset,
                ..t
            }),
        }
    }
}

impl From<RectMark> for MarkPayload {
    fn from(value: RectMark) -> Self {
        Self::Rect(value)
    }
}

impl From<PathMark> for MarkPayload {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

impl From<TextMark> for MarkPayload {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}

/// A z-ordered, identified piece of a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; lower paints first.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark.
    pub fn new(id: MarkId, z_index: i32, payload: impl Into<MarkPayload>) -> Self {
        Self {
            id,
            z_index,
            payload: payload.into(),
        }
    }

    /// Returns the mark moved by `offset`, keeping its identity and order.
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            payload: self.payload.translated(offset),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_namespaced() {
        let a = MarkId::new(3, 7);
        assert_eq!(a.namespace(), 3);
        assert_ne!(a, MarkId::new(4, 7));
        assert!(MarkId::new(1, u64::MAX) < MarkId::new(2, 0));
    }

    #[test]
    fn translation_moves_geometry_and_gradients() {
        let g = RadialGradient::new(Point::new(5.0, 5.0), 10.0, &[(0.0, Color::WHITE)]);
        let m = Mark::new(
            MarkId::new(0, 0),
            0,
            RectMark::new(Rect::new(0.0, 0.0, 10.0, 10.0), g),
        )
        .translated(Vec2::new(100.0, 50.0));
        let MarkPayload::Rect(r) = &m.payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.rect, Rect::new(100.0, 50.0, 110.0, 60.0));
        let Paint::Radial(g) = &r.fill else {
            panic!("expected a gradient");
        };
        assert_eq!(g.center, Point::new(105.0, 55.0));
    }

    #[test]
    fn text_has_no_bounds() {
        let t = MarkPayload::from(TextMark::new(Point::ZERO, "x", 10.0, Color::BLACK));
        assert_eq!(t.bounds(), None);
    }
}
