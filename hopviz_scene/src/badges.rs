// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The growing context: the query badge plus one badge per returned document.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use hopviz_anim::stage::{self, MAX_CONTEXT_DOCS, StageFlags};
use hopviz_anim::{AnimationState, data};
use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::mark::{Mark, MarkId, RectMark, Stroke, TextBaseline, TextMark};
use crate::palette::{self, fade};
use crate::z_order;

const NAMESPACE: u32 = 4;

const KEY_PANEL: u64 = 0;
const KEY_LABEL: u64 = 1;
const KEY_LANDING: u64 = 2;
const KEY_BADGES: u64 = 100;
const KEY_BADGE_TEXT: u64 = 200;

const WIDTH: f64 = 120.0;
const PAD: f64 = 8.0;
const HEADER_H: f64 = 22.0;
const BADGE_H: f64 = 26.0;
const BADGE_GAP: f64 = 6.0;

/// Draws the context column.
///
/// Slot 0 holds the query; slot `n` holds document `Dn`. At most
/// [`MAX_CONTEXT_DOCS`] documents are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContextBadgesSurface;

impl ContextBadgesSurface {
    /// Creates the surface.
    pub fn new() -> Self {
        Self
    }

    /// Local size, fixed so the column does not grow while documents arrive.
    pub fn size(&self) -> Size {
        let slots = f64::from(MAX_CONTEXT_DOCS + 1);
        Size::new(
            WIDTH,
            HEADER_H + slots * BADGE_H + (slots - 1.0) * BADGE_GAP + PAD,
        )
    }

    /// Bounds of badge slot `slot`.
    pub fn slot_rect(&self, slot: u32) -> Rect {
        let y = HEADER_H + f64::from(slot) * (BADGE_H + BADGE_GAP);
        Rect::new(PAD, y, WIDTH - PAD, y + BADGE_H)
    }

    /// Center of badge slot `slot`; a returning document lands here.
    pub fn slot_center(&self, slot: u32) -> Point {
        self.slot_rect(slot).center()
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let id = |key| MarkId::new(NAMESPACE, key);
        let flags = StageFlags::for_state(state);
        let docs = stage::visible_documents(state);
        let mut marks = Vec::with_capacity(12);

        marks.push(Mark::new(
            id(KEY_PANEL),
            z_order::PANEL,
            RectMark::new(self.size().to_rect(), palette::PANEL)
                .with_corner_radius(8.0)
                .with_stroke(Stroke::new(palette::BORDER, 1.0)),
        ));
        marks.push(Mark::new(
            id(KEY_LABEL),
            z_order::LABELS,
            TextMark::new(
                Point::new(PAD, 15.0),
                stage::context_label(state),
                10.0,
                palette::TEXT_MUTED,
            )
            .bold(),
        ));

        self.push_badge(&mut marks, 0, "Query", palette::ACCENT, false);
        for n in 1..=docs {
            let label = data::EXAMPLE_PASSAGES
                .get(n as usize - 1)
                .map_or_else(|| format!("D{n}"), |p| format!("D{}", p.id));
            let newest = flags.context_update && n == docs;
            self.push_badge(&mut marks, n, &label, palette::MATCH, newest);
        }

        if flags.landing_zone {
            let slot = self.slot_rect(docs + 1);
            marks.push(Mark::new(
                id(KEY_LANDING),
                z_order::CONTENT,
                RectMark::new(slot, fade(palette::MATCH, 0.08))
                    .with_corner_radius(4.0)
                    .with_stroke(Stroke::new(palette::MATCH, 1.5).with_dash(&[4.0, 3.0])),
            ));
        }

        marks
    }

    fn push_badge(&self, marks: &mut Vec<Mark>, slot: u32, label: &str, color: Color, ring: bool) {
        let rect = self.slot_rect(slot);
        let mut badge = RectMark::new(rect, color).with_corner_radius(4.0);
        if ring {
            badge = badge.with_stroke(Stroke::new(fade(color, 0.5), 3.0));
        }
        marks.push(Mark::new(
            MarkId::new(NAMESPACE, KEY_BADGES + u64::from(slot)),
            z_order::CONTENT,
            badge,
        ));
        marks.push(Mark::new(
            MarkId::new(NAMESPACE, KEY_BADGE_TEXT + u64::from(slot)),
            z_order::LABELS,
            TextMark::new(
                Point::new(rect.x0 + 10.0, rect.center().y),
                label,
                12.0,
                palette::PANEL,
            )
            .with_baseline(TextBaseline::Middle)
            .bold(),
        ));
    }
}
