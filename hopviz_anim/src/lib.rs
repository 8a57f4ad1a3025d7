// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation engine for the multi-hop retrieval illustration.
//!
//! The crate is a one-directional pipeline:
//! - a [`PhaseClock`] turns frame timestamps into an [`AnimationState`]
//!   (hop, phase, progress, completion),
//! - an [`Orchestrator`] owns the clock and the playback lifecycle (in-view start,
//!   pause, reset, replay) on top of a host [`Scheduler`], and
//! - the [`visual`] and [`stage`] modules derive every drawn value from a state snapshot.
//!
//! Surfaces only ever read a copied `AnimationState`. The only randomness is the
//! one-time, seeded [`PointField`].

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod clock;
mod config;
pub mod data;
#[cfg(not(feature = "std"))]
mod float;
mod orchestrator;
mod phase;
mod point_field;
mod scheduler;
pub mod stage;
mod targets;
pub mod visual;

pub use clock::{AnimationState, PhaseClock, Step};
pub use config::{AnimationConfig, AnimationConfigBuilder, ConfigError};
pub use orchestrator::Orchestrator;
pub use phase::{AnimationPhase, PhaseDurations};
pub use point_field::{FieldPoint, PointField};
pub use scheduler::{FrameHandle, ManualScheduler, Scheduler, TimerHandle, Wake};
pub use targets::HopTargets;
