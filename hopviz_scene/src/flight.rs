// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document card flying from the cloud target back into the context.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hopviz_anim::stage::MAX_CONTEXT_DOCS;
use hopviz_anim::visual::{self, DocumentFlight};
use hopviz_anim::{AnimationState, HopTargets, data};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::mark::{Mark, MarkId, PathMark, Stroke, TextMark};
use crate::palette::{self, fade};
use crate::shapes;
use crate::z_order;

const NAMESPACE: u32 = 5;

const KEY_TRAIL: u64 = 0;
const KEY_CARD: u64 = 1;
const KEY_ICON: u64 = 2;
const KEY_TITLE: u64 = 3;
const KEY_SNIPPET: u64 = 4;

const CARD: Rect = Rect::new(-80.0, -32.0, 80.0, 32.0);
const SNIPPET_CHARS: usize = 30;

/// Draws the returning document.
///
/// Coordinates are those of the composed scene: the cloud occupies `cloud_frame`, and
/// the document for hop `n` lands at `landing + n * landing_step`.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentFlightSurface {
    targets: HopTargets,
    cloud_frame: Rect,
    landing: Point,
    landing_step: Vec2,
    returned_passages: u32,
}

impl DocumentFlightSurface {
    /// Creates a flight from targets inside `cloud_frame` to `landing`.
    pub fn new(targets: HopTargets, cloud_frame: Rect, landing: Point) -> Self {
        Self {
            targets,
            cloud_frame,
            landing,
            landing_step: Vec2::ZERO,
            returned_passages: MAX_CONTEXT_DOCS,
        }
    }

    /// Sets the offset between landing spots of consecutive hops.
    pub fn with_landing_step(mut self, step: Vec2) -> Self {
        self.landing_step = step;
        self
    }

    /// Sets how many hops return their document; later hops show no flight.
    pub fn with_returned_passages(mut self, count: u32) -> Self {
        self.returned_passages = count;
        self
    }

    /// Flight start for `hop`: its cloud target.
    pub fn start(&self, hop: u32) -> Point {
        self.cloud_frame.origin() + self.targets.scaled(hop, self.cloud_frame.size()).to_vec2()
    }

    /// Flight end for `hop`.
    pub fn end(&self, hop: u32) -> Point {
        self.landing + self.landing_step * f64::from(hop)
    }

    /// Current pose, if a document is in flight.
    pub fn flight(&self, state: &AnimationState) -> Option<DocumentFlight> {
        let hop = state.current_hop;
        visual::document_flight(state, self.start(hop), self.end(hop), self.returned_passages)
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let (Some(f), Some(passage)) = (
            self.flight(state),
            data::passage_for_hop(state.current_hop),
        ) else {
            return Vec::new();
        };
        let id = |key| MarkId::new(NAMESPACE, key);
        let pose = |at: Point| {
            Affine::translate(at.to_vec2())
                * Affine::rotate(f.rotation_deg.to_radians())
                * Affine::scale(f.scale)
        };
        let card = pose(f.pos);
        let trail = pose(f.pos + visual::trail_vector(&f));
        let text = |local: Point, content: String, size: f64, color, key| {
            Mark::new(
                id(key),
                z_order::OVERLAY_LABELS,
                TextMark::new(card * local, content, size * f.scale, fade(color, f.opacity))
                    .with_angle(f.rotation_deg),
            )
        };

        let mut snippet: String = passage.snippet.chars().take(SNIPPET_CHARS).collect();
        if passage.snippet.chars().count() > SNIPPET_CHARS {
            snippet.push_str("...");
        }

        let mut marks = Vec::with_capacity(5);
        marks.push(Mark::new(
            id(KEY_TRAIL),
            z_order::OVERLAY + 3,
            PathMark::filled(
                trail * shapes::rounded_rect(CARD, 8.0),
                fade(palette::MATCH, 0.5 * f.trail_opacity * f.opacity),
            ),
        ));
        marks.push(Mark::new(
            id(KEY_CARD),
            z_order::OVERLAY + 4,
            PathMark {
                path: card * shapes::rounded_rect(CARD, 8.0),
                fill: Some(fade(palette::PANEL, f.opacity).into()),
                stroke: Some(Stroke::new(fade(palette::BORDER, f.opacity), 1.0)),
            },
        ));
        marks.push(Mark::new(
            id(KEY_ICON),
            z_order::OVERLAY + 5,
            PathMark::filled(
                card * shapes::rounded_rect(Rect::new(-72.0, -24.0, -56.0, -8.0), 3.0),
                fade(palette::MATCH, 0.25 * f.opacity),
            ),
        ));
        marks.push(text(
            Point::new(-50.0, -12.0),
            String::from(passage.title),
            11.0,
            palette::TEXT,
            KEY_TITLE,
        ));
        marks.push(text(
            Point::new(-72.0, 14.0),
            snippet,
            9.0,
            palette::TEXT_MUTED,
            KEY_SNIPPET,
        ));
        marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopviz_anim::AnimationPhase;
    use kurbo::Size;

    fn surface() -> DocumentFlightSurface {
        DocumentFlightSurface::new(
            HopTargets::default(),
            Rect::from_origin_size((400.0, 0.0), Size::new(500.0, 280.0)),
            Point::new(60.0, 60.0),
        )
        .with_landing_step(Vec2::new(0.0, 32.0))
    }

    #[test]
    fn flight_starts_on_the_cloud_target() {
        let f = surface();
        assert!((f.start(0) - Point::new(550.0, 126.0)).hypot() < 1e-9);
        let pose = f
            .flight(&AnimationState::at(0, AnimationPhase::DocumentReturning, 0.0))
            .unwrap();
        assert_eq!(pose.pos, f.start(0));
    }

    #[test]
    fn flight_lands_in_the_hop_slot() {
        let f = surface();
        assert_eq!(f.end(2), Point::new(60.0, 124.0));
        let pose = f
            .flight(&AnimationState::at(2, AnimationPhase::DocumentReturning, 1.0))
            .unwrap();
        assert!((pose.pos - f.end(2)).hypot() < 1e-9, "{pose:?}");
    }

    #[test]
    fn only_returning_hops_fly() {
        let f = surface();
        assert!(f.marks(&AnimationState::at(1, AnimationPhase::CloudSearching, 0.5)).is_empty());
        assert!(f.marks(&AnimationState::at(3, AnimationPhase::DocumentReturning, 0.5)).is_empty());
        assert_eq!(
            f.marks(&AnimationState::at(1, AnimationPhase::DocumentReturning, 0.5)).len(),
            5
        );
    }
}
