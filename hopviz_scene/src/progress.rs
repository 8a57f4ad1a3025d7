// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hop dots, the progress label and the replay control.

extern crate alloc;

use alloc::vec::Vec;

use hopviz_anim::AnimationState;
use hopviz_anim::stage::{self, HopStatus};
use kurbo::{Point, Rect, Size};

use crate::mark::{Mark, MarkId, PathMark, RectMark, Stroke, TextAnchor, TextBaseline, TextMark};
use crate::palette;
use crate::shapes;
use crate::z_order;

const NAMESPACE: u32 = 6;

const KEY_LABEL: u64 = 0;
const KEY_REPLAY: u64 = 1;
const KEY_REPLAY_TEXT: u64 = 2;
const KEY_DOTS: u64 = 100;

const DOT_R: f64 = 5.0;
const DOT_PITCH: f64 = 20.0;
const ROW_H: f64 = 20.0;
const LABEL_W: f64 = 84.0;
const REPLAY_W: f64 = 64.0;

/// Draws the hop indicator row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HopProgressSurface {
    total_hops: u32,
}

impl HopProgressSurface {
    /// Creates a row with one dot per hop.
    pub fn new(total_hops: u32) -> Self {
        Self {
            total_hops: total_hops.max(1),
        }
    }

    /// Number of dots.
    pub fn total_hops(&self) -> u32 {
        self.total_hops
    }

    fn label_x(&self) -> f64 {
        f64::from(self.total_hops) * DOT_PITCH + 6.0
    }

    /// Hit area of the replay control, in local coordinates.
    pub fn replay_rect(&self) -> Rect {
        let x = self.label_x() + LABEL_W;
        Rect::new(x, 0.0, x + REPLAY_W, ROW_H)
    }

    /// Whether the replay control is shown.
    pub fn replay_visible(&self, state: &AnimationState) -> bool {
        state.is_complete
    }

    /// Local size.
    pub fn size(&self) -> Size {
        Size::new(self.replay_rect().x1, ROW_H)
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let id = |key| MarkId::new(NAMESPACE, key);
        let mid = ROW_H * 0.5;
        let mut marks = Vec::with_capacity(self.total_hops as usize + 3);

        for i in 0..self.total_hops {
            let (color, radius) = match stage::hop_status(state, i) {
                HopStatus::Done => (palette::MATCH, DOT_R),
                HopStatus::Active => (palette::ACCENT, DOT_R * 1.1),
                HopStatus::Pending => (palette::PENDING, DOT_R),
            };
            let center = Point::new(DOT_R + 2.0 + f64::from(i) * DOT_PITCH, mid);
            marks.push(Mark::new(
                id(KEY_DOTS + u64::from(i)),
                z_order::CONTENT,
                PathMark::filled(shapes::circle(center, radius), color),
            ));
        }

        let mut label = TextMark::new(
            Point::new(self.label_x(), mid),
            stage::progress_label(state, self.total_hops),
            12.0,
            if state.is_complete {
                palette::MATCH
            } else {
                palette::TEXT_MUTED
            },
        )
        .with_baseline(TextBaseline::Middle);
        if state.is_complete {
            label = label.bold();
        }
        marks.push(Mark::new(id(KEY_LABEL), z_order::LABELS, label));

        if self.replay_visible(state) {
            let button = self.replay_rect();
            marks.push(Mark::new(
                id(KEY_REPLAY),
                z_order::CONTENT,
                RectMark::new(button, palette::PANEL)
                    .with_corner_radius(ROW_H * 0.5)
                    .with_stroke(Stroke::new(palette::ACCENT, 1.0)),
            ));
            marks.push(Mark::new(
                id(KEY_REPLAY_TEXT),
                z_order::LABELS,
                TextMark::new(button.center(), "Replay", 11.0, palette::ACCENT)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .bold(),
            ));
        }

        marks
    }
}
