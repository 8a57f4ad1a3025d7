// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hits@1 by hop depth, revealing the main model one hop at a time.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hopviz_anim::data::{self, PerformanceSeries};
use hopviz_anim::{AnimationState, stage};
use kurbo::{BezPath, Point, Rect, Size};

use crate::mark::{Mark, MarkId, PathMark, Stroke, TextAnchor, TextBaseline, TextMark};
use crate::palette::{self, fade};
use crate::scale::{ScaleLinear, ScalePoint};
use crate::shapes;
use crate::z_order;

const NAMESPACE: u32 = 7;

const KEY_TITLE: u64 = 0;
const KEY_SUBTITLE: u64 = 1;
const KEY_STATUS: u64 = 2;
const KEY_AXIS: u64 = 3;
const KEY_X_GRID: u64 = 50;
const KEY_Y_GRID: u64 = 100;
const KEY_Y_LABELS: u64 = 200;
// Y ticks get one key per tick within a block of this size.
const TICK_KEYS: usize = 100;
const KEY_X_LABELS: u64 = 300;
const KEY_LEGEND: u64 = 400;
const KEY_SERIES: u64 = 1000;
// Each series owns a block of keys: line, then one key per dot.
const SERIES_STRIDE: u64 = 16;
const KEY_PREVIEW: u64 = 2000;
const KEY_VISIBLE: u64 = 3000;

const HEADER_H: f64 = 40.0;
const AXIS_W: f64 = 40.0;
const X_LABELS_H: f64 = 24.0;
const LEGEND_ROW_H: f64 = 15.0;
const Y_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Draws the benchmark chart.
///
/// Baselines are always drawn in full. The main series is drawn twice: a faint dashed
/// preview of all hops and a solid line over the revealed prefix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceChartSurface {
    plot_size: Size,
    tick_count: usize,
}

impl PerformanceChartSurface {
    /// Creates a chart with a 320x180 plot area.
    pub fn new() -> Self {
        Self {
            plot_size: Size::new(320.0, 180.0),
            tick_count: 5,
        }
    }

    /// Sets the plot area size (excluding axes, header and legend).
    pub fn with_plot_size(mut self, size: Size) -> Self {
        self.plot_size = size;
        self
    }

    /// Largest accepted [`with_tick_count`](Self::with_tick_count).
    pub const MAX_TICK_COUNT: usize = 20;

    /// Sets the approximate number of y ticks, clamped to `1..=MAX_TICK_COUNT`.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count.clamp(1, Self::MAX_TICK_COUNT);
        self
    }

    /// Plot area in local coordinates.
    pub fn plot_rect(&self) -> Rect {
        Rect::from_origin_size((AXIS_W, HEADER_H), self.plot_size)
    }

    fn legend_top(&self) -> f64 {
        self.plot_rect().y1 + X_LABELS_H + 8.0
    }

    /// Local size including header and legend.
    pub fn size(&self) -> Size {
        let rows = data::PERFORMANCE_SERIES.len() as f64;
        Size::new(
            self.plot_rect().x1 + 10.0,
            self.legend_top() + rows * LEGEND_ROW_H + 24.0,
        )
    }

    /// Y scale from percent to local coordinates.
    pub fn y_scale(&self) -> ScaleLinear {
        let plot = self.plot_rect();
        ScaleLinear::new(Y_DOMAIN, (plot.y1, plot.y0))
    }

    /// X scale over hop depths.
    pub fn x_scale(&self) -> ScalePoint {
        let plot = self.plot_rect();
        ScalePoint::new((plot.x0, plot.x1), data::HOP_LABELS.len())
    }

    /// Status line under the legend.
    pub fn status_text(state: &AnimationState) -> String {
        let visible = stage::visible_hops(state);
        if visible == 0 {
            String::from("Waiting...")
        } else if state.is_complete {
            String::from("Complete")
        } else {
            format!("Hop {visible} of {}", data::HOP_LABELS.len())
        }
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let mut marks = Vec::with_capacity(96);
        self.push_frame(&mut marks);

        let visible = stage::visible_hops(state);
        for (si, series) in data::PERFORMANCE_SERIES.iter().enumerate() {
            let base = si as u64 * SERIES_STRIDE;
            if series.is_main {
                let preview = series.values.map(Some);
                let key = KEY_PREVIEW + base;
                self.push_series(&mut marks, key, series, &preview, SeriesStyle::PREVIEW);
                let style = SeriesStyle {
                    opacity: stage::main_series_opacity(visible),
                    ..SeriesStyle::VISIBLE
                };
                let revealed = stage::revealed_values(&series.values, visible);
                self.push_series(&mut marks, KEY_VISIBLE + base, series, &revealed, style);
            } else {
                let values = series.values.map(Some);
                let key = KEY_SERIES + base;
                self.push_series(&mut marks, key, series, &values, SeriesStyle::BASELINE);
            }
            self.push_legend_row(&mut marks, si, series);
        }

        let color = if state.is_complete {
            palette::MATCH
        } else if visible == 0 {
            palette::TEXT_FAINT
        } else {
            palette::ACCENT
        };
        marks.push(Mark::new(
            MarkId::new(NAMESPACE, KEY_STATUS),
            z_order::LABELS,
            TextMark::new(
                Point::new(0.0, self.size().height - 6.0),
                Self::status_text(state),
                11.0,
                color,
            ),
        ));
        marks
    }

    fn push_frame(&self, marks: &mut Vec<Mark>) {
        let id = |key| MarkId::new(NAMESPACE, key);
        let plot = self.plot_rect();
        let y = self.y_scale();
        let x = self.x_scale();
        let grid = Stroke::new(palette::TRACK, 1.0).with_dash(&[3.0, 3.0]);

        marks.push(Mark::new(
            id(KEY_TITLE),
            z_order::LABELS,
            TextMark::new(
                Point::new(0.0, 14.0),
                "MultiHop-RAG Benchmark",
                14.0,
                palette::TEXT,
            )
            .bold(),
        ));
        marks.push(Mark::new(
            id(KEY_SUBTITLE),
            z_order::LABELS,
            TextMark::new(
                Point::new(0.0, 30.0),
                "Hits@1 (Tang et al., 2024)",
                10.0,
                palette::TEXT_MUTED,
            ),
        ));

        let ticks = y.ticks(self.tick_count);
        for (i, &tick) in ticks.iter().take(TICK_KEYS).enumerate() {
            let ty = y.map(tick);
            marks.push(Mark::new(
                id(KEY_Y_GRID + i as u64),
                z_order::GRID_LINES,
                PathMark::stroked(
                    shapes::polyline([Point::new(plot.x0, ty), Point::new(plot.x1, ty)]),
                    grid.clone(),
                ),
            ));
            marks.push(Mark::new(
                id(KEY_Y_LABELS + i as u64),
                z_order::LABELS,
                TextMark::new(
                    Point::new(plot.x0 - 6.0, ty),
                    format!("{tick}%"),
                    10.0,
                    palette::TEXT_MUTED,
                )
                .with_anchor(TextAnchor::End)
                .with_baseline(TextBaseline::Middle),
            ));
        }
        for (i, label) in data::HOP_LABELS.iter().enumerate() {
            let tx = x.x(i);
            marks.push(Mark::new(
                id(KEY_X_GRID + i as u64),
                z_order::GRID_LINES,
                PathMark::stroked(
                    shapes::polyline([Point::new(tx, plot.y0), Point::new(tx, plot.y1)]),
                    grid.clone(),
                ),
            ));
            marks.push(Mark::new(
                id(KEY_X_LABELS + i as u64),
                z_order::LABELS,
                TextMark::new(Point::new(tx, plot.y1 + 8.0), *label, 11.0, palette::TEXT_MUTED)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Hanging),
            ));
        }

        let mut axis = BezPath::new();
        axis.move_to((plot.x0, plot.y0));
        axis.line_to((plot.x0, plot.y1));
        axis.line_to((plot.x1, plot.y1));
        marks.push(Mark::new(
            id(KEY_AXIS),
            z_order::STROKES - 1,
            PathMark::stroked(axis, Stroke::new(palette::BORDER, 1.0)),
        ));
    }

    fn push_series(
        &self,
        marks: &mut Vec<Mark>,
        key: u64,
        series: &PerformanceSeries,
        values: &[Option<f64>; 4],
        style: SeriesStyle,
    ) {
        let x = self.x_scale();
        let y = self.y_scale();
        let points: Vec<Point> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| Point::new(x.x(i), y.map(v))))
            .collect();
        let color = fade(series.color, style.opacity);

        if points.len() >= 2 {
            let mut stroke = Stroke::new(color, style.width);
            if style.dashed {
                stroke = stroke.with_dash(&[4.0, 4.0]);
            }
            marks.push(Mark::new(
                MarkId::new(NAMESPACE, key),
                z_order::STROKES + style.layer,
                PathMark::stroked(shapes::polyline(points.iter().copied()), stroke),
            ));
        }
        for (i, &p) in points.iter().enumerate() {
            let dot = PathMark {
                path: shapes::circle(p, style.dot_radius),
                fill: Some(color.into()),
                stroke: style.dot_ring.then(|| Stroke::new(palette::PANEL, 2.0)),
            };
            marks.push(Mark::new(
                MarkId::new(NAMESPACE, key + 1 + i as u64),
                z_order::HIGHLIGHTS + style.layer,
                dot,
            ));
        }
    }

    fn push_legend_row(&self, marks: &mut Vec<Mark>, row: usize, series: &PerformanceSeries) {
        let y = self.legend_top() + row as f64 * LEGEND_ROW_H;
        let alpha = if series.is_main { 1.0 } else { 0.6 };
        let key = KEY_LEGEND + 2 * row as u64;
        marks.push(Mark::new(
            MarkId::new(NAMESPACE, key),
            z_order::CONTENT,
            PathMark::filled(
                shapes::circle(Point::new(5.0, y), 5.0),
                fade(series.color, alpha),
            ),
        ));
        let mut label = TextMark::new(
            Point::new(16.0, y),
            series.display_name,
            if series.is_main { 11.0 } else { 10.0 },
            fade(palette::TEXT, alpha),
        )
        .with_baseline(TextBaseline::Middle);
        if series.is_main {
            label = label.bold();
        }
        marks.push(Mark::new(MarkId::new(NAMESPACE, key + 1), z_order::LABELS, label));
    }
}

impl Default for PerformanceChartSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug)]
struct SeriesStyle {
    opacity: f64,
    width: f64,
    dashed: bool,
    dot_radius: f64,
    dot_ring: bool,
    layer: i32,
}

impl SeriesStyle {
    const BASELINE: Self = Self {
        opacity: 0.45,
        width: 2.0,
        dashed: false,
        dot_radius: 3.0,
        dot_ring: false,
        layer: 0,
    };
    const PREVIEW: Self = Self {
        opacity: 0.12,
        width: 2.0,
        dashed: true,
        dot_radius: 2.0,
        dot_ring: false,
        layer: 1,
    };
    const VISIBLE: Self = Self {
        opacity: 1.0,
        width: 3.0,
        dashed: false,
        dot_radius: 5.0,
        dot_ring: true,
        layer: 2,
    };
}
