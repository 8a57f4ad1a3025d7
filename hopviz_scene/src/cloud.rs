// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The embedding cloud: background scatter, search heat, match marker and comet.

extern crate alloc;

use alloc::vec::Vec;

use hopviz_anim::visual::{self, HEAT_RADIUS, VectorEntry};
use hopviz_anim::{AnimationState, HopTargets, PointField, stage};
use kurbo::{Point, Rect, Size, Vec2};

use crate::mark::{
    Mark, MarkId, PathMark, RadialGradient, RectMark, Stroke, TextAnchor, TextMark,
};
use crate::palette::{self, fade};
use crate::shapes;
use crate::z_order;

const NAMESPACE: u32 = 1;

const KEY_PANEL: u64 = 0;
const KEY_BACKGROUND: u64 = 1;
const KEY_HEAT: u64 = 2;
const KEY_RIPPLE: u64 = 3;
const KEY_MATCH_GLOW: u64 = 4;
const KEY_MATCH_CORE: u64 = 5;
const KEY_MATCH_INNER: u64 = 6;
const KEY_TRAIL: u64 = 7;
const KEY_COMET_GLOW: u64 = 8;
const KEY_COMET_RIM: u64 = 9;
const KEY_COMET_CORE: u64 = 10;
const KEY_FOUND_LABEL: u64 = 11;
const KEY_POINTS: u64 = 1000;

const COMET_GLOW_RADIUS: f64 = 20.0;

/// Parameters for a [`CloudSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudConfig {
    size: Size,
    point_count: usize,
    seed: u64,
    entry: VectorEntry,
}

impl CloudConfig {
    /// The page's surface size.
    pub const DEFAULT_SIZE: Size = Size::new(500.0, 280.0);
    /// Seed used when none is given.
    pub const DEFAULT_SEED: u64 = 0x6772_6974;

    /// Sets the surface size. Sizes below [`PointField::MIN_SIZE`] are padded up.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the number of background points.
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    /// Sets the point field seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets where the traveling vector enters.
    pub fn with_entry(mut self, entry: VectorEntry) -> Self {
        self.entry = entry;
        self
    }

    /// Requested surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of background points.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Point field seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Vector entry mode.
    pub fn entry(&self) -> VectorEntry {
        self.entry
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            point_count: PointField::DEFAULT_COUNT,
            seed: Self::DEFAULT_SEED,
            entry: VectorEntry::PAGE,
        }
    }
}

/// Draws the cloud for a given state.
///
/// The point field is sampled once in [`CloudSurface::new`] and reused for every frame.
#[derive(Clone, Debug)]
pub struct CloudSurface {
    config: CloudConfig,
    field: PointField,
    targets: HopTargets,
}

impl CloudSurface {
    /// Samples the point field and creates the surface.
    pub fn new(config: CloudConfig, targets: HopTargets) -> Self {
        let field = PointField::generate(config.seed, config.point_count, config.size);
        tracing::debug!(
            seed = config.seed,
            points = field.len(),
            width = field.size().width,
            height = field.size().height,
            "point field generated"
        );
        Self {
            config,
            field,
            targets,
        }
    }

    /// The surface configuration.
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// The background points.
    pub fn field(&self) -> &PointField {
        &self.field
    }

    /// Effective surface size (the requested size padded to the field minimum).
    pub fn size(&self) -> Size {
        self.field.size()
    }

    /// The hop target table.
    pub fn targets(&self) -> &HopTargets {
        &self.targets
    }

    /// Target of `hop` in surface coordinates.
    pub fn target(&self, hop: u32) -> Point {
        self.targets.scaled(hop, self.size())
    }

    /// Marks for `state`.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let size = self.size();
        let bounds = size.to_rect();
        let target = self.target(state.current_hop);
        let id = |key| MarkId::new(NAMESPACE, key);
        let mut marks = Vec::with_capacity(self.field.len() + 12);

        marks.push(Mark::new(
            id(KEY_PANEL),
            z_order::PANEL,
            RectMark::new(bounds, palette::PANEL)
                .with_corner_radius(12.0)
                .with_stroke(Stroke::new(palette::TRACK, 1.0)),
        ));
        let center = bounds.center();
        marks.push(Mark::new(
            id(KEY_BACKGROUND),
            z_order::WASH,
            RectMark::new(
                bounds,
                RadialGradient::new(
                    center,
                    size.width * 0.5,
                    &[(0.0, fade(palette::POINT, 0.02)), (1.0, fade(palette::POINT, 0.0))],
                ),
            ),
        ));

        if let Some(heat) = visual::search_heat(state) {
            marks.push(Mark::new(
                id(KEY_HEAT),
                z_order::WASH + 1,
                RectMark::new(
                    bounds,
                    RadialGradient::new(
                        target,
                        HEAT_RADIUS,
                        &[
                            (0.0, fade(palette::HEAT, 0.5 * heat)),
                            (0.4, fade(palette::HEAT, 0.25 * heat)),
                            (1.0, fade(palette::HEAT, 0.0)),
                        ],
                    ),
                ),
            ));
        }

        if let Some(ripple) = visual::ripple(state) {
            marks.push(Mark::new(
                id(KEY_RIPPLE),
                z_order::STROKES,
                PathMark::stroked(
                    shapes::circle(target, ripple.radius),
                    Stroke::new(fade(palette::POINT, ripple.opacity), 1.5),
                ),
            ));
        }

        marks.extend(self.field.points().iter().enumerate().map(|(i, p)| {
            let opacity = visual::point_opacity(state, p, target);
            Mark::new(
                id(KEY_POINTS + i as u64),
                z_order::CONTENT,
                PathMark::filled(shapes::circle(p.pos, p.radius), fade(palette::POINT, opacity)),
            )
        }));

        if let Some(m) = visual::match_marker(state) {
            let glow = m.glow_radius();
            marks.push(Mark::new(
                id(KEY_MATCH_GLOW),
                z_order::HIGHLIGHTS,
                PathMark::filled(
                    shapes::circle(target, glow),
                    RadialGradient::new(
                        target,
                        glow,
                        &[
                            (0.0, fade(palette::MATCH, 0.7 * m.opacity)),
                            (1.0, fade(palette::MATCH, 0.0)),
                        ],
                    ),
                ),
            ));
            marks.push(Mark::new(
                id(KEY_MATCH_CORE),
                z_order::HIGHLIGHTS + 1,
                PathMark::filled(
                    shapes::circle(target, m.radius),
                    fade(palette::MATCH, m.opacity),
                ),
            ));
            marks.push(Mark::new(
                id(KEY_MATCH_INNER),
                z_order::HIGHLIGHTS + 2,
                PathMark::filled(
                    shapes::circle(target, m.inner_radius()),
                    fade(palette::PANEL, 0.8 * m.opacity),
                ),
            ));
        }

        if let Some(label) = stage::found_label(state) {
            marks.push(Mark::new(
                id(KEY_FOUND_LABEL),
                z_order::OVERLAY_LABELS,
                TextMark::new(target + Vec2::new(0.0, -22.0), label, 11.0, palette::MATCH)
                    .with_anchor(TextAnchor::Middle)
                    .bold(),
            ));
        }

        let entry = self.config.entry;
        if let Some(pos) = visual::vector_position(state, entry, size, target)
            .filter(|_| visual::shows_comet(state))
        {
            self.push_comet(&mut marks, entry, size, pos);
        }

        marks
    }

    fn push_comet(&self, marks: &mut Vec<Mark>, entry: VectorEntry, size: Size, pos: Point) {
        let id = |key| MarkId::new(NAMESPACE, key);
        marks.push(Mark::new(
            id(KEY_TRAIL),
            z_order::STROKES + 1,
            PathMark::stroked(
                shapes::quad(&entry.trail(size, pos)),
                Stroke::new(fade(palette::POINT, 0.4), 2.0).with_dash(&[5.0, 4.0]),
            ),
        ));
        marks.push(Mark::new(
            id(KEY_COMET_GLOW),
            z_order::OVERLAY,
            PathMark::filled(
                shapes::circle(pos, COMET_GLOW_RADIUS),
                RadialGradient::new(
                    pos,
                    COMET_GLOW_RADIUS,
                    &[
                        (0.0, fade(palette::POINT, 0.95)),
                        (0.5, fade(palette::POINT, 0.35)),
                        (1.0, fade(palette::POINT, 0.0)),
                    ],
                ),
            ),
        ));
        marks.push(Mark::new(
            id(KEY_COMET_RIM),
            z_order::OVERLAY + 1,
            PathMark::filled(shapes::circle(pos, 5.0), palette::PANEL),
        ));
        marks.push(Mark::new(
            id(KEY_COMET_CORE),
            z_order::OVERLAY + 2,
            PathMark::filled(shapes::circle(pos, 3.0), palette::POINT),
        ));
    }

    /// Surface bounds in local coordinates.
    pub fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}
