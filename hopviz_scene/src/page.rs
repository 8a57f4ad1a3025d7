// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! All surfaces laid out as on the project page.

extern crate alloc;

use alloc::vec::Vec;

use hopviz_anim::{AnimationConfig, AnimationState};
use kurbo::{Point, Rect, Size, Vec2};

use crate::badges::ContextBadgesSurface;
use crate::chart::PerformanceChartSurface;
use crate::cloud::{CloudConfig, CloudSurface};
use crate::encoder::EncoderSurface;
use crate::flight::DocumentFlightSurface;
use crate::mark::Mark;
use crate::progress::HopProgressSurface;
use crate::vector::VectorStripSurface;

const GUTTER: f64 = 30.0;

/// Sorts marks into paint order, `(z_index, id)`.
pub fn sort_marks(marks: &mut [Mark]) {
    marks.sort_by_key(|m| (m.z_index, m.id));
}

/// The animation section: context, encoder, vector, cloud, flight, progress and chart.
#[derive(Clone, Debug)]
pub struct PageScene {
    badges: ContextBadgesSurface,
    encoder: EncoderSurface,
    vector: VectorStripSurface,
    cloud: CloudSurface,
    flight: DocumentFlightSurface,
    progress: HopProgressSurface,
    chart: PerformanceChartSurface,
    encoder_at: Vec2,
    vector_at: Vec2,
    cloud_at: Vec2,
    progress_at: Vec2,
    chart_at: Vec2,
}

impl PageScene {
    /// Lays out every surface for `config`.
    ///
    /// The flight surface shares the cloud's hop targets, so a returning document always
    /// leaves from the match marker.
    pub fn new(config: &AnimationConfig, cloud: CloudConfig) -> Self {
        let badges = ContextBadgesSurface::new();
        let encoder = EncoderSurface::new();
        let vector = VectorStripSurface::new();
        let cloud = CloudSurface::new(cloud, config.hop_targets().clone());
        let progress = HopProgressSurface::new(config.total_hops());
        let chart = PerformanceChartSurface::new();

        let column = badges.size().width + GUTTER + 10.0;
        let encoder_at = Vec2::new(column, 0.0);
        let vector_at = Vec2::new(column, encoder.size().height + 20.0);
        let middle_w = encoder.size().width.max(vector.size().width);
        let cloud_at = Vec2::new(column + middle_w + 40.0, 0.0);
        let content_h = cloud.size().height.max(vector_at.y + vector.size().height);
        let progress_at = Vec2::new(0.0, content_h + 20.0);
        let chart_at = Vec2::new(cloud_at.x + cloud.size().width + GUTTER, 0.0);

        let cloud_frame = Rect::from_origin_size(cloud_at.to_point(), cloud.size());
        let landing = badges.slot_center(1);
        let flight = DocumentFlightSurface::new(cloud.targets().clone(), cloud_frame, landing)
            .with_landing_step(badges.slot_center(2) - landing);

        Self {
            badges,
            encoder,
            vector,
            cloud,
            flight,
            progress,
            chart,
            encoder_at,
            vector_at,
            cloud_at,
            progress_at,
            chart_at,
        }
    }

    /// The cloud surface.
    pub fn cloud(&self) -> &CloudSurface {
        &self.cloud
    }

    /// The flight surface, in page coordinates.
    pub fn flight(&self) -> &DocumentFlightSurface {
        &self.flight
    }

    /// Replay control bounds in page coordinates.
    pub fn replay_rect(&self) -> Rect {
        self.progress.replay_rect() + self.progress_at
    }

    /// Top-left corner of the cloud in page coordinates.
    pub fn cloud_origin(&self) -> Point {
        self.cloud_at.to_point()
    }

    /// Page size covering every surface.
    pub fn size(&self) -> Size {
        let chart = self.chart.size();
        let progress = self.progress.size();
        Size::new(
            self.chart_at.x + chart.width,
            (self.chart_at.y + chart.height).max(self.progress_at.y + progress.height),
        )
    }

    /// Every surface's marks for `state`, in page coordinates and paint order.
    pub fn marks(&self, state: &AnimationState) -> Vec<Mark> {
        let at = |marks: Vec<Mark>, offset: Vec2| {
            marks.into_iter().map(move |m| m.translated(offset))
        };
        let mut marks: Vec<Mark> = self.badges.marks(state);
        marks.extend(at(self.encoder.marks(state), self.encoder_at));
        marks.extend(at(self.vector.marks(state), self.vector_at));
        marks.extend(at(self.cloud.marks(state), self.cloud_at));
        marks.extend(at(self.progress.marks(state), self.progress_at));
        marks.extend(at(self.chart.marks(state), self.chart_at));
        marks.extend(self.flight.marks(state));
        sort_marks(&mut marks);
        marks
    }
}
