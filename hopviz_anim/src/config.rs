// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback configuration.
//!
//! Configuration is an immutable value built once and handed to the
//! [`Orchestrator`](crate::Orchestrator). Invalid tables are rejected here so the
//! clock never has to guess a duration or a target mid-run.

use crate::phase::{AnimationPhase, PhaseDurations};
use crate::targets::HopTargets;

/// Errors returned while building animation configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A phase has no duration entry.
    #[error("no duration configured for phase `{0}`")]
    MissingDuration(AnimationPhase),
    /// A phase duration is zero, negative, or not finite.
    #[error("duration for phase `{phase}` must be positive and finite, got {ms}")]
    InvalidDuration {
        /// The offending phase.
        phase: AnimationPhase,
        /// The rejected duration in milliseconds.
        ms: f64,
    },
    /// `total_hops` was zero.
    #[error("total hop count must be at least 1")]
    ZeroHops,
    /// The hop target table has no entries.
    #[error("hop target table is empty")]
    EmptyHopTargets,
    /// A hop target lies outside the unit square.
    #[error("hop target {index} is outside the normalized [0, 1] range")]
    TargetOutOfRange {
        /// Index of the offending target.
        index: usize,
    },
    /// A settle or replay delay is negative or not finite.
    #[error("delay must be non-negative and finite, got {ms}")]
    InvalidDelay {
        /// The rejected delay in milliseconds.
        ms: f64,
    },
}

/// Validated playback configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    durations: PhaseDurations,
    total_hops: u32,
    settle_delay_ms: f64,
    replay_delay_ms: f64,
    hop_targets: HopTargets,
}

impl AnimationConfig {
    /// Default number of simulated hops.
    pub const DEFAULT_TOTAL_HOPS: u32 = 4;
    /// Delay between the in-view signal and the start of playback.
    pub const DEFAULT_SETTLE_DELAY_MS: f64 = 300.0;
    /// Delay between a replay reset and re-arming playback.
    pub const DEFAULT_REPLAY_DELAY_MS: f64 = 150.0;

    /// Starts a builder pre-filled with the page defaults.
    pub fn builder() -> AnimationConfigBuilder {
        AnimationConfigBuilder::default()
    }

    /// Phase durations.
    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// Number of hops per run (always at least 1).
    pub fn total_hops(&self) -> u32 {
        self.total_hops
    }

    /// In-view settle delay in milliseconds.
    pub fn settle_delay_ms(&self) -> f64 {
        self.settle_delay_ms
    }

    /// Replay re-arm delay in milliseconds.
    pub fn replay_delay_ms(&self) -> f64 {
        self.replay_delay_ms
    }

    /// Shared hop target table.
    pub fn hop_targets(&self) -> &HopTargets {
        &self.hop_targets
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            durations: PhaseDurations::default(),
            total_hops: Self::DEFAULT_TOTAL_HOPS,
            settle_delay_ms: Self::DEFAULT_SETTLE_DELAY_MS,
            replay_delay_ms: Self::DEFAULT_REPLAY_DELAY_MS,
            hop_targets: HopTargets::default(),
        }
    }
}

/// Builder for [`AnimationConfig`].
#[derive(Clone, Debug)]
pub struct AnimationConfigBuilder {
    config: AnimationConfig,
}

impl Default for AnimationConfigBuilder {
    fn default() -> Self {
        Self {
            config: AnimationConfig::default(),
        }
    }
}

impl AnimationConfigBuilder {
    /// Sets the phase durations.
    pub fn with_durations(mut self, durations: PhaseDurations) -> Self {
        self.config.durations = durations;
        self
    }

    /// Sets the number of hops per run.
    pub fn with_total_hops(mut self, total_hops: u32) -> Self {
        self.config.total_hops = total_hops;
        self
    }

    /// Sets the in-view settle delay.
    pub fn with_settle_delay_ms(mut self, ms: f64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    /// Sets the replay re-arm delay.
    pub fn with_replay_delay_ms(mut self, ms: f64) -> Self {
        self.config.replay_delay_ms = ms;
        self
    }

    /// Sets the hop target table.
    pub fn with_hop_targets(mut self, hop_targets: HopTargets) -> Self {
        self.config.hop_targets = hop_targets;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<AnimationConfig, ConfigError> {
        let config = self.config;
        if config.total_hops == 0 {
            return Err(ConfigError::ZeroHops);
        }
        for ms in [config.settle_delay_ms, config.replay_delay_ms] {
            if !ms.is_finite() || ms < 0.0 {
                return Err(ConfigError::InvalidDelay { ms });
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn default_builder_matches_page_constants() {
        let config = AnimationConfig::builder().build().unwrap();
        assert_eq!(config, AnimationConfig::default());
        assert_eq!(config.total_hops(), 4);
        assert_eq!(config.settle_delay_ms(), 300.0);
        assert_eq!(config.replay_delay_ms(), 150.0);
        assert_eq!(config.hop_targets().len(), 4);
    }

    #[test]
    fn zero_hops_is_rejected() {
        let err = AnimationConfig::builder().with_total_hops(0).build();
        assert_eq!(err, Err(ConfigError::ZeroHops));
    }

    #[test]
    fn negative_delay_is_rejected() {
        let err = AnimationConfig::builder()
            .with_replay_delay_ms(-1.0)
            .build();
        assert_eq!(err, Err(ConfigError::InvalidDelay { ms: -1.0 }));
    }

    #[test]
    fn errors_render_a_message() {
        let msg = ConfigError::MissingDuration(AnimationPhase::CloudSearching).to_string();
        assert_eq!(msg, "no duration configured for phase `cloud-searching`");
    }
}
