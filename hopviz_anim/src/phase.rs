// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation phases and their durations.

use core::fmt;

use crate::config::ConfigError;

/// One of the six sequential sub-states of a hop.
///
/// Phases are visited in [`AnimationPhase::ORDER`] once per hop. After
/// [`AnimationPhase::ContextUpdating`] the clock either starts the next hop at
/// [`AnimationPhase::Idle`] or marks the run complete.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationPhase {
    /// Short pause before the hop starts.
    #[default]
    Idle,
    /// The encoder turns the current context into a dense vector.
    Processing,
    /// The vector travels into the document cloud.
    VectorTraveling,
    /// The cloud lights up around the nearest neighbor.
    CloudSearching,
    /// The matched document flies back towards the context.
    DocumentReturning,
    /// The returned document is appended to the context.
    ContextUpdating,
}

impl AnimationPhase {
    /// Number of phases in a hop.
    pub const COUNT: usize = 6;

    /// The fixed per-hop visiting order.
    pub const ORDER: [Self; Self::COUNT] = [
        Self::Idle,
        Self::Processing,
        Self::VectorTraveling,
        Self::CloudSearching,
        Self::DocumentReturning,
        Self::ContextUpdating,
    ];

    /// Position of this phase in [`Self::ORDER`].
    pub const fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Processing => 1,
            Self::VectorTraveling => 2,
            Self::CloudSearching => 3,
            Self::DocumentReturning => 4,
            Self::ContextUpdating => 5,
        }
    }

    /// The phase that follows this one within the same hop.
    ///
    /// Returns `None` for the last phase of a hop.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Processing),
            Self::Processing => Some(Self::VectorTraveling),
            Self::VectorTraveling => Some(Self::CloudSearching),
            Self::CloudSearching => Some(Self::DocumentReturning),
            Self::DocumentReturning => Some(Self::ContextUpdating),
            Self::ContextUpdating => None,
        }
    }

    /// Returns `true` for the phase that closes a hop.
    pub const fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Kebab-case name, matching the labels used in logs and the page.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::VectorTraveling => "vector-traveling",
            Self::CloudSearching => "cloud-searching",
            Self::DocumentReturning => "document-returning",
            Self::ContextUpdating => "context-updating",
        }
    }
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-phase durations in milliseconds.
///
/// Every phase has an entry; there is no fallback duration. Tables built from
/// explicit entries are checked by [`PhaseDurations::from_entries`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseDurations {
    ms: [f64; AnimationPhase::COUNT],
}

impl PhaseDurations {
    /// The page timing: about 3.8s per hop.
    pub const DEFAULT_MS: [f64; AnimationPhase::COUNT] = [300.0, 700.0, 800.0, 900.0, 700.0, 400.0];

    /// Builds a table from `(phase, milliseconds)` pairs.
    ///
    /// Later entries for the same phase win. Every phase must be present and every duration
    /// must be finite and positive.
    pub fn from_entries(entries: &[(AnimationPhase, f64)]) -> Result<Self, ConfigError> {
        let mut slots: [Option<f64>; AnimationPhase::COUNT] = [None; AnimationPhase::COUNT];
        for &(phase, ms) in entries {
            if !ms.is_finite() || ms <= 0.0 {
                return Err(ConfigError::InvalidDuration { phase, ms });
            }
            slots[phase.index()] = Some(ms);
        }
        let mut ms = [0.0; AnimationPhase::COUNT];
        for phase in AnimationPhase::ORDER {
            ms[phase.index()] = slots[phase.index()].ok_or(ConfigError::MissingDuration(phase))?;
        }
        Ok(Self { ms })
    }

    /// Duration of `phase` in milliseconds.
    pub fn get(&self, phase: AnimationPhase) -> f64 {
        self.ms[phase.index()]
    }

    /// Sum of all phase durations, i.e. the length of one hop.
    pub fn hop_ms(&self) -> f64 {
        self.ms.iter().sum()
    }

    /// Time from the start of hop 0 until the whole run completes.
    pub fn total_ms(&self, total_hops: u32) -> f64 {
        self.hop_ms() * f64::from(total_hops)
    }

    /// Offset of `phase` from the start of its hop.
    pub fn offset_in_hop(&self, phase: AnimationPhase) -> f64 {
        self.ms[..phase.index()].iter().sum()
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            ms: Self::DEFAULT_MS,
        }
    }
}
