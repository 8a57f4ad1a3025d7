// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render surfaces for the multi-hop retrieval animation.
//!
//! Every surface reads an [`AnimationState`](hopviz_anim::AnimationState) snapshot and
//! returns a list of [`Mark`]s in its own local coordinates. Marks have stable ids, so a
//! renderer can diff them across frames, and an explicit `z_index`, so surfaces can be
//! composed into one scene (see [`PageScene`]).
//!
//! Surfaces never mutate animation state and hold no per-frame caches. The one piece of
//! retained data is the cloud's point field, sampled once when the surface is built.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod badges;
mod chart;
mod cloud;
mod encoder;
#[cfg(not(feature = "std"))]
mod float;
mod flight;
mod mark;
mod page;
pub mod palette;
mod progress;
mod scale;
#[cfg(test)]
mod scene_tests;
mod shapes;
mod site;
mod vector;
pub mod z_order;

pub use badges::ContextBadgesSurface;
pub use chart::PerformanceChartSurface;
pub use cloud::{CloudConfig, CloudSurface};
pub use encoder::EncoderSurface;
pub use flight::DocumentFlightSurface;
pub use mark::{
    GradientStop, Mark, MarkId, MarkPayload, Paint, PathMark, RadialGradient, RectMark, Stroke,
    TextAnchor, TextBaseline, TextMark,
};
pub use page::{PageScene, sort_marks};
pub use progress::HopProgressSurface;
pub use scale::{ScaleLinear, ScalePoint};
pub use shapes::{circle, polyline, quad, rounded_rect};
pub use site::SiteConfig;
pub use vector::VectorStripSurface;
