// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure derivations for the cloud, the traveling vector and the returning document.
//!
//! Every function here reads an [`AnimationState`] (plus fixed geometry) and returns
//! plain values. Nothing is cached and nothing is random.
//!
//! The outbound vector eases (`1 - (1 - p)^2.5`) while the returning document moves
//! linearly in `p`. Keep the two curves distinct.

use kurbo::{Point, Size, Vec2};

use crate::clock::AnimationState;
use crate::phase::AnimationPhase;
use crate::point_field::FieldPoint;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Radius (surface units) within which background points are highlighted.
pub const NEIGHBOR_RADIUS: f64 = 65.0;
/// Opacity added to a point sitting exactly on the target.
pub const NEIGHBOR_BOOST: f64 = 0.3;
/// Progress at which the match marker appears.
pub const MATCH_THRESHOLD: f64 = 0.4;
/// Radius of the heat gradient around the target.
pub const HEAT_RADIUS: f64 = 80.0;

/// Where the traveling vector enters the cloud surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VectorEntry {
    /// From the left edge at mid-height.
    #[default]
    Left,
    /// From the top edge at a fraction of the width.
    Top {
        /// Horizontal entry position, `0..=1`.
        x_fraction: f64,
    },
}

impl VectorEntry {
    /// The entry used by the page: top edge, aligned under the encoder output.
    pub const PAGE: Self = Self::Top { x_fraction: 0.65 };

    /// Off-surface start point of the vector.
    pub fn start(self, size: Size) -> Point {
        match self {
            Self::Left => Point::new(-25.0, size.height * 0.5),
            Self::Top { x_fraction } => Point::new(size.width * x_fraction, -20.0),
        }
    }

    /// Dashed trail from the edge to the vector's current position.
    pub fn trail(self, size: Size, pos: Point) -> QuadCurve {
        match self {
            Self::Left => QuadCurve {
                start: Point::new(-15.0, size.height * 0.5),
                control: Point::new(pos.x * 0.3, size.height * 0.4),
                end: pos,
            },
            Self::Top { x_fraction } => {
                let x = size.width * x_fraction;
                QuadCurve {
                    start: Point::new(x, -10.0),
                    control: Point::new(x, pos.y * 0.4),
                    end: pos,
                }
            }
        }
    }
}

/// A quadratic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
    /// Start point.
    pub start: Point,
    /// Control point.
    pub control: Point,
    /// End point.
    pub end: Point,
}

impl QuadCurve {
    /// Evaluates the curve at `t`.
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.start.to_vec2() * (mt * mt)
            + self.control.to_vec2() * (2.0 * mt * t)
            + self.end.to_vec2() * (t * t);
        v.to_point()
    }

    /// Converts to a kurbo segment.
    pub fn to_kurbo(&self) -> kurbo::QuadBez {
        kurbo::QuadBez::new(self.start, self.control, self.end)
    }
}

/// Ease-out curve used by the outbound vector.
pub fn ease_out(progress: f64) -> f64 {
    1.0 - (1.0 - progress.clamp(0.0, 1.0)).powf(2.5)
}

/// Position of the traveling vector, if it is shown.
///
/// It eases from `entry` to `target` while traveling, then sits on the target while the
/// cloud is searched.
pub fn vector_position(
    state: &AnimationState,
    entry: VectorEntry,
    size: Size,
    target: Point,
) -> Option<Point> {
    match state.phase {
        AnimationPhase::VectorTraveling => {
            let start = entry.start(size);
            Some(start.lerp(target, ease_out(state.progress)))
        }
        AnimationPhase::CloudSearching => Some(target),
        _ => None,
    }
}

/// Whether the comet (trail plus glow) is drawn.
///
/// The vector position is defined during cloud-searching too, but only the traveling
/// phase draws it.
pub fn shows_comet(state: &AnimationState) -> bool {
    state.phase == AnimationPhase::VectorTraveling
}

/// Heat intensity around the target in `[0, 1]`, if the heat map is shown.
pub fn search_heat(state: &AnimationState) -> Option<f64> {
    match state.phase {
        AnimationPhase::CloudSearching => Some((state.progress * 1.8).min(1.0)),
        AnimationPhase::DocumentReturning => Some((1.0 - state.progress * 0.8).max(0.0)),
        _ => None,
    }
}

/// The expanding ring drawn while searching.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    /// Ring radius.
    pub radius: f64,
    /// Stroke opacity.
    pub opacity: f64,
}

/// Ripple ring, shown only while searching.
pub fn ripple(state: &AnimationState) -> Option<Ripple> {
    if state.phase != AnimationPhase::CloudSearching {
        return None;
    }
    let radius = state.progress * 90.0;
    Some(Ripple {
        radius,
        opacity: (0.4 - radius / 150.0).max(0.0),
    })
}

/// The green "match found" point on the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchMarker {
    /// Overall opacity in `[0, 1]`.
    pub opacity: f64,
    /// Core radius; the glow is three times as wide.
    pub radius: f64,
}

impl MatchMarker {
    /// Glow radius.
    pub fn glow_radius(&self) -> f64 {
        self.radius * 3.0
    }

    /// Radius of the white center dot.
    pub fn inner_radius(&self) -> f64 {
        self.radius * 0.4
    }
}

/// Match marker, shown once searching is past [`MATCH_THRESHOLD`].
pub fn match_marker(state: &AnimationState) -> Option<MatchMarker> {
    if state.phase != AnimationPhase::CloudSearching || state.progress <= MATCH_THRESHOLD {
        return None;
    }
    let opacity = (state.progress - MATCH_THRESHOLD) / (1.0 - MATCH_THRESHOLD);
    Some(MatchMarker {
        opacity,
        radius: 6.0 + opacity * 4.0,
    })
}

/// Opacity of a background point, including the neighbor highlight.
///
/// Points within [`NEIGHBOR_RADIUS`] of the target are boosted in proportion to
/// `1 - distance / radius` while searching or returning.
pub fn point_opacity(state: &AnimationState, point: &FieldPoint, target: Point) -> f64 {
    let highlighting = matches!(
        state.phase,
        AnimationPhase::CloudSearching | AnimationPhase::DocumentReturning
    );
    if !highlighting {
        return point.opacity;
    }
    let dist = point.pos.distance(target);
    if dist >= NEIGHBOR_RADIUS {
        return point.opacity;
    }
    (point.opacity + NEIGHBOR_BOOST * (1.0 - dist / NEIGHBOR_RADIUS)).min(1.0)
}

/// Pose of the document card flying back to the context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DocumentFlight {
    /// Card center.
    pub pos: Point,
    /// Uniform scale, growing from 0.5 to 1.
    pub scale: f64,
    /// Rotation in degrees, settling from 15 to 0.
    pub rotation_deg: f64,
    /// Card opacity; the card fades out at the very end of the flight.
    pub opacity: f64,
    /// Horizontal offset of the motion trail behind the card.
    pub trail_offset: f64,
    /// Opacity of the motion trail.
    pub trail_opacity: f64,
}

/// Path of the returning document from the cloud target to the context anchor.
pub fn flight_curve(start: Point, end: Point) -> QuadCurve {
    let mid = start.midpoint(end);
    QuadCurve {
        start,
        control: Point::new(mid.x + 50.0, start.y.min(end.y) - 50.0),
        end,
    }
}

/// Document flight pose, shown while returning a passage that joins the context.
///
/// `returned_passages` is the number of passages that are appended (3 on the page); a
/// hop at or past that count finds its document but never returns it.
pub fn document_flight(
    state: &AnimationState,
    start: Point,
    end: Point,
    returned_passages: u32,
) -> Option<DocumentFlight> {
    if state.phase != AnimationPhase::DocumentReturning || state.current_hop >= returned_passages
    {
        return None;
    }
    let t = state.progress;
    Some(DocumentFlight {
        pos: flight_curve(start, end).eval(t),
        scale: 0.5 + t * 0.5,
        rotation_deg: (1.0 - t) * 15.0,
        opacity: if t < 0.95 { 1.0 } else { 0.0 },
        trail_offset: t * 20.0,
        trail_opacity: 1.0 - t,
    })
}

/// Offset from the card's pose to its motion trail.
pub fn trail_vector(flight: &DocumentFlight) -> Vec2 {
    Vec2::new(-flight.trail_offset, 0.0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const SIZE: Size = Size::new(500.0, 280.0);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ease_out_hits_endpoints_and_leads_linear() {
        assert!(close(ease_out(0.0), 0.0));
        assert!(close(ease_out(1.0), 1.0));
        assert!(ease_out(0.5) > 0.5);
        assert!(close(ease_out(0.5), 1.0 - 0.5_f64.powf(2.5)));
    }

    #[test]
    fn vector_travels_from_entry_to_target() {
        let target = Point::new(150.0, 126.0);
        let start = AnimationState::at(0, AnimationPhase::VectorTraveling, 0.0);
        let end = AnimationState::at(0, AnimationPhase::VectorTraveling, 1.0);
        assert_eq!(
            vector_position(&start, VectorEntry::Left, SIZE, target),
            Some(Point::new(-25.0, 140.0))
        );
        let p = vector_position(&end, VectorEntry::Left, SIZE, target).unwrap();
        assert!(close(p.x, target.x) && close(p.y, target.y), "{p:?}");
    }

    #[test]
    fn top_entry_starts_above_the_surface() {
        let s = AnimationState::at(0, AnimationPhase::VectorTraveling, 0.0);
        let p = vector_position(&s, VectorEntry::PAGE, SIZE, Point::ZERO).unwrap();
        assert!(close(p.x, 325.0) && close(p.y, -20.0), "{p:?}");
    }

    #[test]
    fn vector_rests_on_target_while_searching_and_hides_otherwise() {
        let target = Point::new(10.0, 20.0);
        let searching = AnimationState::at(0, AnimationPhase::CloudSearching, 0.3);
        assert_eq!(
            vector_position(&searching, VectorEntry::Left, SIZE, target),
            Some(target)
        );
        assert!(!shows_comet(&searching));
        for phase in [
            AnimationPhase::Idle,
            AnimationPhase::Processing,
            AnimationPhase::DocumentReturning,
            AnimationPhase::ContextUpdating,
        ] {
            let s = AnimationState::at(0, phase, 0.5);
            assert_eq!(vector_position(&s, VectorEntry::Left, SIZE, target), None);
        }
    }

    #[test]
    fn heat_ramps_fast_then_decays() {
        let at = |phase, p| search_heat(&AnimationState::at(0, phase, p));
        assert!(close(at(AnimationPhase::CloudSearching, 0.25).unwrap(), 0.45));
        assert_eq!(at(AnimationPhase::CloudSearching, 0.8), Some(1.0));
        assert!(close(at(AnimationPhase::DocumentReturning, 0.5).unwrap(), 0.6));
        assert!(close(at(AnimationPhase::DocumentReturning, 1.0).unwrap(), 0.2));
        assert_eq!(at(AnimationPhase::VectorTraveling, 0.5), None);
    }

    #[test]
    fn match_marker_appears_after_threshold() {
        let at = |p| match_marker(&AnimationState::at(0, AnimationPhase::CloudSearching, p));
        assert_eq!(at(0.4), None);
        let m = at(0.7).unwrap();
        assert!(close(m.opacity, 0.5), "{m:?}");
        assert!(close(m.radius, 8.0), "{m:?}");
        assert!(close(m.glow_radius(), 24.0));
        let full = at(1.0).unwrap();
        assert!(close(full.opacity, 1.0));
        assert!(
            match_marker(&AnimationState::at(0, AnimationPhase::DocumentReturning, 0.9)).is_none()
        );
    }

    #[test]
    fn ripple_fades_as_it_grows() {
        let r = ripple(&AnimationState::at(0, AnimationPhase::CloudSearching, 0.5)).unwrap();
        assert!(close(r.radius, 45.0));
        assert!(close(r.opacity, 0.1));
        let end = ripple(&AnimationState::at(0, AnimationPhase::CloudSearching, 1.0)).unwrap();
        assert_eq!(end.opacity, 0.0);
    }

    #[test]
    fn neighbors_are_boosted_only_while_searching_or_returning() {
        let target = Point::new(100.0, 100.0);
        let near = FieldPoint {
            pos: Point::new(100.0 + 32.5, 100.0),
            radius: 2.0,
            opacity: 0.2,
        };
        let far = FieldPoint {
            pos: Point::new(200.0, 100.0),
            ..near
        };
        let searching = AnimationState::at(0, AnimationPhase::CloudSearching, 0.1);
        let returning = AnimationState::at(0, AnimationPhase::DocumentReturning, 0.1);
        let idle = AnimationState::at(0, AnimationPhase::Idle, 0.1);
        assert!(close(point_opacity(&searching, &near, target), 0.35));
        assert!(close(point_opacity(&returning, &near, target), 0.35));
        assert!(close(point_opacity(&idle, &near, target), 0.2));
        assert!(close(point_opacity(&searching, &far, target), 0.2));
    }

    #[test]
    fn boosted_opacity_is_capped() {
        let p = FieldPoint {
            pos: Point::new(0.0, 0.0),
            radius: 1.0,
            opacity: 0.9,
        };
        let s = AnimationState::at(0, AnimationPhase::CloudSearching, 0.5);
        assert_eq!(point_opacity(&s, &p, Point::ZERO), 1.0);
    }

    #[test]
    fn document_flight_is_linear_in_progress() {
        let start = Point::new(150.0, 126.0);
        let end = Point::new(-30.0, -250.0);
        let curve = flight_curve(start, end);
        let half = AnimationState::at(1, AnimationPhase::DocumentReturning, 0.5);
        let f = document_flight(&half, start, end, 3).unwrap();
        assert_eq!(f.pos, curve.eval(0.5));
        assert!(close(f.scale, 0.75));
        assert!(close(f.rotation_deg, 7.5));
        assert_eq!(f.opacity, 1.0);
        assert!(close(f.trail_opacity, 0.5));
        assert_eq!(trail_vector(&f), Vec2::new(-10.0, 0.0));

        let s0 = AnimationState::at(1, AnimationPhase::DocumentReturning, 0.0);
        assert_eq!(document_flight(&s0, start, end, 3).unwrap().pos, start);
        let s1 = AnimationState::at(1, AnimationPhase::DocumentReturning, 1.0);
        let last = document_flight(&s1, start, end, 3).unwrap();
        assert!(close(last.pos.x, end.x) && close(last.pos.y, end.y));
        assert_eq!(last.opacity, 0.0);
    }

    #[test]
    fn flight_control_point_lifts_above_both_ends() {
        let c = flight_curve(Point::new(100.0, 50.0), Point::new(0.0, 200.0));
        assert_eq!(c.control, Point::new(100.0, 0.0));
        assert_eq!(c.to_kurbo().p1, c.control);
    }

    #[test]
    fn last_hop_document_never_flies() {
        let s = AnimationState::at(3, AnimationPhase::DocumentReturning, 0.5);
        assert!(document_flight(&s, Point::ZERO, Point::ZERO, 3).is_none());
    }
}
