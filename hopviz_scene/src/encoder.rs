// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The encoder model block: status line, encoding progress bar and tensor strip.

extern crate alloc;

use alloc::vec::Vec;

use hopviz_anim::AnimationState;
use hopviz_anim::stage::{self, StageFlags};
use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;

use crate::mark::{Mark, MarkId, PathMark, RadialGradient, RectMark, Stroke, TextMark};
use crate::palette::{self, fade};
use crate::z_order;

const NAMESPACE: u32 = 3;

const KEY_GLOW: u64 = 0;
const KEY_PANEL: u64 = 1;
const KEY_LOGO: u64 = 2;
const KEY_TITLE: u64 = 3;
const KEY_SUBTITLE: u64 = 4;
const KEY_TRACK: u64 = 5;
const KEY_BAR: u64 = 6;
const KEY_STATUS: u64 = 7;
const KEY_INPUT_ARROW: u64 = 8;
const KEY_ACTIVITY: u64 = 10;
const KEY_TENSOR: u64 = 100;

const PANEL_SIZE: Size = Size::new(260.0, 110.0);
const TRACK: Rect = Rect::new(16.0, 70.0, 244.0, 78.0);
const TENSOR_TOP: f64 = 122.0;
const TENSOR_MAX_H: f64 = 28.0;
const TENSOR_BAR_W: f64 = 8.0;
const TENSOR_GAP: f64 = 3.0;

const ACTIVITY: Color = Color::from_rgb8(96, 165, 250);

/// Draws the encoder block.
#[derive(Clone, Debug, PartialEq)]
pub struct EncoderSurface {
    title: &'static str,
    subtitle: &'static str,
}

impl EncoderSurface {
    /// Creates the block with the page's model name.
    pub fn new() -> Self {
        Self {
            title: "GRITHopper-7B",
            subtitle: "Multi-Hop Dense Embedder",
        }
    }

    /// Sets the model name.
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }

    /// Sets the line under the model name.
    pub fn with_subtitle(mut self, subtitle: &'static str) -> Self {
        self.subtitle = subtitle;
        self
    }

    /// Local size including the tensor strip.
    pub fn size(&self) -> Size {
        Size::new(PANEL_SIZE.width, TENSOR_TOP + TENSOR_MAX_H)
    }

    /// Where the logo image goes, in local coordinates.
    pub fn logo_rect(&self) -> Rect {
        Rect::new(16.0, 12.0, 64.0, 60.0)
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let id = |key| MarkId::new(NAMESPACE, key);
        let panel = PANEL_SIZE.to_rect();
        let active = stage::encoder_active(state);
        let mut marks = Vec::with_capacity(24);

        if active {
            marks.push(Mark::new(
                id(KEY_GLOW),
                z_order::PANEL - 1,
                RectMark::new(
                    panel.inflate(30.0, 30.0),
                    RadialGradient::new(
                        panel.center(),
                        panel.width() * 0.7,
                        &[(0.0, fade(palette::ACCENT, 0.4)), (1.0, fade(palette::ACCENT, 0.0))],
                    ),
                ),
            ));
        }
        marks.push(Mark::new(
            id(KEY_PANEL),
            z_order::PANEL,
            RectMark::new(panel, palette::PANEL)
                .with_corner_radius(12.0)
                .with_stroke(Stroke::new(palette::BORDER, 1.0)),
        ));
        marks.push(Mark::new(
            id(KEY_LOGO),
            z_order::CONTENT,
            RectMark::new(self.logo_rect(), fade(palette::ACCENT, 0.15)).with_corner_radius(10.0),
        ));
        marks.push(Mark::new(
            id(KEY_TITLE),
            z_order::LABELS,
            TextMark::new(Point::new(76.0, 32.0), self.title, 16.0, palette::TEXT).bold(),
        ));
        marks.push(Mark::new(
            id(KEY_SUBTITLE),
            z_order::LABELS,
            TextMark::new(Point::new(76.0, 50.0), self.subtitle, 11.0, palette::TEXT_MUTED),
        ));

        marks.push(Mark::new(
            id(KEY_TRACK),
            z_order::CONTENT,
            RectMark::new(TRACK, palette::TRACK).with_corner_radius(4.0),
        ));
        let filled = stage::encoder_progress(state);
        if filled > 0.0 {
            let bar = Rect::new(TRACK.x0, TRACK.y0, TRACK.x0 + TRACK.width() * filled, TRACK.y1);
            let end = if filled >= 1.0 {
                palette::ACCENT_END
            } else {
                palette::ACCENT
            };
            marks.push(Mark::new(
                id(KEY_BAR),
                z_order::CONTENT + 1,
                RectMark::new(bar, end).with_corner_radius(4.0),
            ));
        }

        marks.push(Mark::new(
            id(KEY_STATUS),
            z_order::LABELS,
            TextMark::new(
                Point::new(16.0, 98.0),
                stage::status_text(state.phase),
                12.0,
                palette::TEXT_MUTED,
            ),
        ));
        for i in 0..3_u64 {
            let x = panel.x1 - 16.0 - (3 - i) as f64 * 10.0;
            marks.push(Mark::new(
                id(KEY_ACTIVITY + i),
                z_order::CONTENT,
                RectMark::new(
                    Rect::new(x, 86.0, x + 6.0, 102.0),
                    fade(ACTIVITY, if active { 1.0 } else { 0.3 }),
                )
                .with_corner_radius(3.0),
            ));
        }

        if StageFlags::for_state(state).input_to_model {
            let y = panel.center().y;
            let mut arrow = BezPath::new();
            arrow.move_to((-26.0, y));
            arrow.line_to((-6.0, y));
            arrow.move_to((-12.0, y - 6.0));
            arrow.line_to((-6.0, y));
            arrow.line_to((-12.0, y + 6.0));
            marks.push(Mark::new(
                id(KEY_INPUT_ARROW),
                z_order::STROKES,
                PathMark::stroked(arrow, Stroke::new(palette::ACCENT, 2.0)),
            ));
        }

        if let Some(strip) = stage::tensor_strip(state) {
            let bottom = TENSOR_TOP + TENSOR_MAX_H;
            for (i, &v) in strip.values.iter().enumerate() {
                let x = TRACK.x0 + i as f64 * (TENSOR_BAR_W + TENSOR_GAP);
                let top = bottom - stage::tensor_bar_height(v);
                let [h, s, l] = stage::tensor_bar_hsl(v);
                marks.push(Mark::new(
                    id(KEY_TENSOR + i as u64),
                    z_order::CONTENT,
                    RectMark::new(
                        Rect::new(x, top, x + TENSOR_BAR_W, bottom),
                        fade(palette::hsl(h, s, l), strip.opacity),
                    )
                    .with_corner_radius(2.0),
                ));
            }
        }

        marks
    }
}

impl Default for EncoderSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::MarkPayload;
    use hopviz_anim::AnimationPhase;

    fn bar_width(marks: &[Mark]) -> Option<f64> {
        marks.iter().find_map(|m| match (&m.payload, m.id) {
            (MarkPayload::Rect(r), id) if id == MarkId::new(NAMESPACE, KEY_BAR) => {
                Some(r.rect.width())
            }
            _ => None,
        })
    }

    fn status(marks: &[Mark]) -> &str {
        marks
            .iter()
            .find_map(|m| match &m.payload {
                MarkPayload::Text(t) if m.id == MarkId::new(NAMESPACE, KEY_STATUS) => {
                    Some(t.text.as_str())
                }
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn bar_tracks_encoding_progress() {
        let e = EncoderSurface::new();
        assert_eq!(bar_width(&e.marks(&AnimationState::INITIAL)), None);
        let half = bar_width(&e.marks(&AnimationState::at(0, AnimationPhase::Processing, 0.5)));
        assert_eq!(half, Some(TRACK.width() * 0.5));
        let full = bar_width(&e.marks(&AnimationState::at(0, AnimationPhase::CloudSearching, 0.1)));
        assert_eq!(full, Some(TRACK.width()));
    }

    #[test]
    fn status_line_names_the_phase() {
        let e = EncoderSurface::new();
        let marks = e.marks(&AnimationState::at(2, AnimationPhase::DocumentReturning, 0.2));
        assert_eq!(status(&marks), "Retrieving document...");
    }

    #[test]
    fn glow_and_input_arrow_only_while_encoding() {
        let e = EncoderSurface::new();
        let ids = |phase| -> Vec<MarkId> {
            e.marks(&AnimationState::at(0, phase, 0.5))
                .into_iter()
                .map(|m| m.id)
                .collect()
        };
        let processing = ids(AnimationPhase::Processing);
        assert!(processing.contains(&MarkId::new(NAMESPACE, KEY_GLOW)));
        assert!(processing.contains(&MarkId::new(NAMESPACE, KEY_INPUT_ARROW)));
        let idle = ids(AnimationPhase::Idle);
        assert!(!idle.contains(&MarkId::new(NAMESPACE, KEY_GLOW)));
        assert!(!idle.contains(&MarkId::new(NAMESPACE, KEY_TENSOR)));
    }
}
