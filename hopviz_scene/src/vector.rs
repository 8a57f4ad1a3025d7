// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dense query vector as a strip of colored cells.

extern crate alloc;

use alloc::vec::Vec;

use hopviz_anim::AnimationState;
use hopviz_anim::stage::{self, StageFlags, VECTOR_CELLS};
use kurbo::{BezPath, Point, Rect, Size};

use crate::mark::{Mark, MarkId, PathMark, RectMark, Stroke, TextAnchor, TextMark};
use crate::palette::{self, fade};
use crate::shapes;
use crate::z_order;

const NAMESPACE: u32 = 2;

const KEY_PANEL: u64 = 0;
const KEY_LABEL: u64 = 1;
const KEY_LABEL_DOT: u64 = 2;
const KEY_DIMENSION: u64 = 3;
const KEY_ARROW: u64 = 4;
const KEY_CELLS: u64 = 100;

const PAD: f64 = 12.0;
const CELL_W: f64 = 16.0;
const CELL_H: f64 = 32.0;
const CELL_GAP: f64 = 2.0;
const HEADER_H: f64 = 18.0;
const DIMMED: f64 = 0.3;

/// Draws the 12-cell dense vector for the current hop.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorStripSurface {
    dimension_label: &'static str,
}

impl VectorStripSurface {
    /// Creates the strip with the model's embedding size as caption.
    pub fn new() -> Self {
        Self {
            dimension_label: "d = 4096",
        }
    }

    /// Sets the caption under the cells.
    pub fn with_dimension_label(mut self, label: &'static str) -> Self {
        self.dimension_label = label;
        self
    }

    /// Local size, excluding the outgoing arrow.
    pub fn size(&self) -> Size {
        let cells = VECTOR_CELLS as f64;
        Size::new(
            2.0 * PAD + cells * CELL_W + (cells - 1.0) * CELL_GAP,
            HEADER_H + 2.0 * PAD + CELL_H + 14.0,
        )
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let size = self.size();
        let alpha = if stage::vector_emphasized(state) {
            1.0
        } else {
            DIMMED
        };
        let id = |key| MarkId::new(NAMESPACE, key);
        let panel = Rect::new(0.0, HEADER_H, size.width, size.height);
        let mut marks = Vec::with_capacity(VECTOR_CELLS + 5);

        marks.push(Mark::new(
            id(KEY_LABEL_DOT),
            z_order::LABELS,
            PathMark::filled(
                shapes::circle(Point::new(3.0, 7.0), 3.0),
                fade(palette::POINT, alpha),
            ),
        ));
        marks.push(Mark::new(
            id(KEY_LABEL),
            z_order::LABELS,
            TextMark::new(
                Point::new(10.0, 11.0),
                "Dense Vector",
                11.0,
                fade(palette::TEXT_MUTED, alpha),
            ),
        ));
        marks.push(Mark::new(
            id(KEY_PANEL),
            z_order::PANEL,
            RectMark::new(panel, fade(palette::PANEL, alpha))
                .with_corner_radius(8.0)
                .with_stroke(Stroke::new(fade(palette::BORDER, alpha), 1.0)),
        ));

        let values = stage::vector_values(state.current_hop);
        let visible = stage::visible_cells(state);
        let bottom = HEADER_H + PAD + CELL_H;
        for (i, &v) in values.iter().enumerate() {
            let x = PAD + i as f64 * (CELL_W + CELL_GAP);
            let (height, color) = if i < visible {
                (CELL_H, fade(palette::cell_color(v), alpha))
            } else {
                (CELL_H * 0.3, fade(palette::PENDING, 0.1 * alpha))
            };
            marks.push(Mark::new(
                id(KEY_CELLS + i as u64),
                z_order::CONTENT,
                RectMark::new(Rect::new(x, bottom - height, x + CELL_W, bottom), color)
                    .with_corner_radius(2.0),
            ));
        }

        marks.push(Mark::new(
            id(KEY_DIMENSION),
            z_order::LABELS,
            TextMark::new(
                Point::new(size.width * 0.5, size.height - 6.0),
                self.dimension_label,
                10.0,
                fade(palette::TEXT_FAINT, alpha),
            )
            .with_anchor(TextAnchor::Middle),
        ));

        if StageFlags::for_state(state).vector_output {
            let y = (HEADER_H + size.height) * 0.5;
            let x0 = size.width + 6.0;
            let x1 = x0 + 18.0;
            let mut arrow = BezPath::new();
            arrow.move_to((x0, y));
            arrow.line_to((x1, y));
            arrow.move_to((x1 - 6.0, y - 6.0));
            arrow.line_to((x1, y));
            arrow.line_to((x1 - 6.0, y + 6.0));
            marks.push(Mark::new(
                id(KEY_ARROW),
                z_order::STROKES,
                PathMark::stroked(arrow, Stroke::new(palette::POINT, 2.0)),
            ));
        }

        marks
    }
}

impl Default for VectorStripSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::MarkPayload;
    use hopviz_anim::AnimationPhase;

    fn cell_heights(marks: &[Mark]) -> Vec<f64> {
        (0..VECTOR_CELLS as u64)
            .map(|i| {
                let m = marks
                    .iter()
                    .find(|m| m.id == MarkId::new(NAMESPACE, KEY_CELLS + i))
                    .unwrap();
                let MarkPayload::Rect(r) = &m.payload else {
                    panic!("cells are rects");
                };
                r.rect.height()
            })
            .collect()
    }

    #[test]
    fn cells_fill_left_to_right_while_processing() {
        let s = VectorStripSurface::new();
        let h = cell_heights(&s.marks(&AnimationState::at(0, AnimationPhase::Processing, 0.5)));
        assert!(h[..6].iter().all(|&v| v == CELL_H), "{h:?}");
        assert!(h[6..].iter().all(|&v| v < CELL_H), "{h:?}");
    }

    #[test]
    fn arrow_only_during_vector_output() {
        let s = VectorStripSurface::new();
        let arrow = MarkId::new(NAMESPACE, KEY_ARROW);
        let has_arrow = |phase| {
            s.marks(&AnimationState::at(0, phase, 0.5))
                .iter()
                .any(|m| m.id == arrow)
        };
        assert!(has_arrow(AnimationPhase::VectorTraveling));
        assert!(has_arrow(AnimationPhase::CloudSearching));
        assert!(!has_arrow(AnimationPhase::Processing));
        assert!(!has_arrow(AnimationPhase::ContextUpdating));
    }
}
