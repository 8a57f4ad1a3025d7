// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame phase clock.

use crate::phase::{AnimationPhase, PhaseDurations};
use crate::scheduler::{FrameHandle, Scheduler};

/// Snapshot of the animation's progression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Zero-based hop index, always below the configured hop count.
    pub current_hop: u32,
    /// Current phase within the hop.
    pub phase: AnimationPhase,
    /// Fraction of the current phase that has elapsed, in `[0, 1]`.
    pub progress: f64,
    /// Set once the last phase of the last hop finished.
    pub is_complete: bool,
}

impl AnimationState {
    /// The state before playback: hop 0, idle, no progress.
    pub const INITIAL: Self = Self {
        current_hop: 0,
        phase: AnimationPhase::Idle,
        progress: 0.0,
        is_complete: false,
    };

    /// Builds a mid-run state, mostly useful for driving surfaces directly.
    pub fn at(current_hop: u32, phase: AnimationPhase, progress: f64) -> Self {
        Self {
            current_hop,
            phase,
            progress: progress.clamp(0.0, 1.0),
            is_complete: false,
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// What a single [`PhaseClock::advance`] step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Progress moved within the same phase.
    Progressed,
    /// A phase boundary was crossed; the entered phase reports progress 0.
    Transitioned,
    /// The run finished during this step.
    Completed,
    /// Nothing to do: the run is already complete.
    Frozen,
}

/// Advances [`AnimationState`] from frame timestamps.
///
/// Advancement is computed from elapsed time, never from frame count. A completed phase
/// hands its exact end time to the next phase as that phase's start, so frames that
/// overshoot a boundary do not stretch the run. A frame crosses at most one boundary;
/// after a stall longer than the entered phase, that phase starts at the stalled frame.
#[derive(Clone, Debug)]
pub struct PhaseClock {
    durations: PhaseDurations,
    total_hops: u32,
    state: AnimationState,
    phase_start: Option<f64>,
    pending: Option<FrameHandle>,
}

impl PhaseClock {
    /// Creates a clock at [`AnimationState::INITIAL`].
    ///
    /// `total_hops` is expected to be validated already (see
    /// [`AnimationConfig`](crate::AnimationConfig)); zero is treated as one.
    pub fn new(durations: PhaseDurations, total_hops: u32) -> Self {
        Self {
            durations,
            total_hops: total_hops.max(1),
            state: AnimationState::INITIAL,
            phase_start: None,
            pending: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Configured hop count.
    pub fn total_hops(&self) -> u32 {
        self.total_hops
    }

    /// Whether a frame callback is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests the first frame, unless already running or complete.
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        if self.pending.is_some() || self.state.is_complete {
            return;
        }
        self.phase_start = None;
        self.pending = Some(scheduler.request_frame());
    }

    /// Cancels the outstanding frame, if any.
    ///
    /// The phase timing restarts from the next callback after [`PhaseClock::start`].
    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        self.phase_start = None;
    }

    /// Returns to [`AnimationState::INITIAL`] and cancels the outstanding frame.
    ///
    /// This does not resume playback.
    pub fn reset(&mut self, scheduler: &mut impl Scheduler) {
        self.stop(scheduler);
        self.state = AnimationState::INITIAL;
        tracing::debug!("phase clock reset");
    }

    /// Handles a frame callback.
    ///
    /// Callbacks for a handle other than the pending one are ignored and return `None`.
    /// Otherwise the state is advanced and, unless the run completed, the next frame is
    /// requested.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp: f64,
        scheduler: &mut impl Scheduler,
    ) -> Option<Step> {
        if self.pending != Some(handle) {
            tracing::debug!(?handle, "ignoring stale frame callback");
            return None;
        }
        self.pending = None;
        let step = self.advance(timestamp);
        if !self.state.is_complete {
            self.pending = Some(scheduler.request_frame());
        }
        Some(step)
    }

    /// Advances the state to `timestamp` without touching the scheduler.
    ///
    /// The first call after construction, [`PhaseClock::stop`] or [`PhaseClock::reset`]
    /// only captures the phase start. At most one boundary is crossed per call, and the
    /// frame that crosses it reports the entered phase at progress 0.
    pub fn advance(&mut self, timestamp: f64) -> Step {
        if self.state.is_complete {
            return Step::Frozen;
        }
        let start = *self.phase_start.get_or_insert(timestamp);
        let duration = self.durations.get(self.state.phase);
        let progress = ((timestamp - start) / duration).clamp(0.0, 1.0);
        if progress < 1.0 {
            self.state.progress = progress;
            tracing::trace!(
                hop = self.state.current_hop,
                phase = %self.state.phase,
                progress,
                "frame"
            );
            return Step::Progressed;
        }

        let boundary = start + duration;
        match self.state.phase.next() {
            Some(next) => {
                self.enter(next, boundary, timestamp);
                tracing::debug!(hop = self.state.current_hop, phase = %next, "phase advanced");
                Step::Transitioned
            }
            None if self.state.current_hop + 1 >= self.total_hops => {
                self.state.progress = 1.0;
                self.state.is_complete = true;
                tracing::debug!(hops = self.total_hops, "animation complete");
                Step::Completed
            }
            None => {
                self.state.current_hop += 1;
                self.enter(AnimationPhase::Idle, boundary, timestamp);
                tracing::debug!(hop = self.state.current_hop, "hop advanced");
                Step::Transitioned
            }
        }
    }

    /// Starts `phase` at `boundary`, or at `timestamp` if the frame already overran it.
    fn enter(&mut self, phase: AnimationPhase, boundary: f64, timestamp: f64) {
        self.state.phase = phase;
        self.state.progress = 0.0;
        let overrun = timestamp - boundary >= self.durations.get(phase);
        self.phase_start = Some(if overrun { timestamp } else { boundary });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use alloc::vec::Vec;

    fn clock() -> PhaseClock {
        PhaseClock::new(PhaseDurations::default(), 4)
    }

    /// Steps from 0 to `end` in 10 ms frames.
    fn step_until(c: &mut PhaseClock, end: f64) {
        let mut t = 0.0;
        while t < end {
            let _ = c.advance(t);
            t += 10.0;
        }
        let _ = c.advance(end);
    }

    #[test]
    fn first_frame_only_captures_start() {
        let mut c = clock();
        assert_eq!(c.advance(1000.0), Step::Progressed);
        assert_eq!(c.state(), AnimationState::INITIAL);
    }

    #[test]
    fn progress_is_elapsed_over_duration() {
        let mut c = clock();
        let _ = c.advance(0.0);
        let _ = c.advance(150.0);
        let s = c.state();
        assert_eq!(s.phase, AnimationPhase::Idle);
        assert!((s.progress - 0.5).abs() < 1e-12, "{s:?}");
    }

    #[test]
    fn boundary_starts_next_phase_at_zero() {
        let mut c = clock();
        let _ = c.advance(0.0);
        assert_eq!(c.advance(300.0), Step::Transitioned);
        let s = c.state();
        assert_eq!(s.phase, AnimationPhase::Processing);
        assert_eq!(s.progress, 0.0);
    }

    #[test]
    fn transition_frame_reports_zero_then_resumes_from_boundary() {
        let mut c = clock();
        let _ = c.advance(0.0);
        assert_eq!(c.advance(370.0), Step::Transitioned);
        assert_eq!(c.state().phase, AnimationPhase::Processing);
        assert_eq!(c.state().progress, 0.0);
        // Processing started at 300, not at the late frame.
        let _ = c.advance(440.0);
        let s = c.state();
        assert_eq!(s.phase, AnimationPhase::Processing);
        assert!((s.progress - 0.2).abs() < 1e-12, "{s:?}");
    }

    #[test]
    fn long_frame_enters_only_the_next_phase() {
        let mut c = clock();
        let _ = c.advance(0.0);
        // Far enough to cover idle, processing and vector-traveling in one frame.
        assert_eq!(c.advance(2250.0), Step::Transitioned);
        assert_eq!(c.state(), AnimationState::at(0, AnimationPhase::Processing, 0.0));
        // The overrun phase restarts at the stalled frame instead of being skipped.
        let _ = c.advance(2600.0);
        let s = c.state();
        assert_eq!(s.phase, AnimationPhase::Processing);
        assert!((s.progress - 0.5).abs() < 1e-12, "{s:?}");
    }

    #[test]
    fn stalled_frames_still_visit_every_phase() {
        let mut c = clock();
        let _ = c.advance(0.0);
        let mut seen = Vec::new();
        let mut t = 0.0;
        while !c.state().is_complete {
            t += 5000.0;
            let _ = c.advance(t);
            let s = c.state();
            if seen.last() != Some(&(s.current_hop, s.phase)) {
                seen.push((s.current_hop, s.phase));
            }
        }
        let expected: Vec<_> = (0..4)
            .flat_map(|hop| AnimationPhase::ORDER.into_iter().map(move |p| (hop, p)))
            .skip(1)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn hop_changes_only_after_context_updating() {
        let mut c = clock();
        step_until(&mut c, 3799.0);
        assert_eq!(c.state().current_hop, 0);
        assert_eq!(c.state().phase, AnimationPhase::ContextUpdating);
        let _ = c.advance(3800.0);
        assert_eq!(c.state().current_hop, 1);
        assert_eq!(c.state().phase, AnimationPhase::Idle);
    }

    #[test]
    fn completion_freezes_progress_at_one() {
        let mut c = PhaseClock::new(PhaseDurations::default(), 1);
        step_until(&mut c, 3790.0);
        assert_eq!(c.advance(3800.0), Step::Completed);
        let s = c.state();
        assert!(s.is_complete);
        assert_eq!(s.current_hop, 0);
        assert_eq!(s.phase, AnimationPhase::ContextUpdating);
        assert_eq!(s.progress, 1.0);
        assert_eq!(c.advance(9000.0), Step::Frozen);
        assert_eq!(c.state(), s);
    }

    #[test]
    fn stale_frames_are_ignored() {
        let mut s = ManualScheduler::new();
        let mut c = clock();
        c.start(&mut s);
        c.stop(&mut s);
        assert_eq!(c.on_frame(FrameHandle(1), 10.0, &mut s), None);
        assert!(!c.is_running());
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut s = ManualScheduler::new();
        let mut c = clock();
        c.start(&mut s);
        c.start(&mut s);
        assert_eq!(s.pending_frames(), 1);
    }

    #[test]
    fn completed_clock_stops_requesting_frames() {
        let mut s = ManualScheduler::new();
        let mut c = PhaseClock::new(PhaseDurations::default(), 1);
        c.start(&mut s);
        for i in 0..=400 {
            let t = f64::from(i) * 10.0;
            for wake in s.advance_to(t) {
                if let crate::Wake::Frame(h) = wake {
                    let _ = c.on_frame(h, t, &mut s);
                }
            }
        }
        assert!(c.state().is_complete);
        assert_eq!(s.pending_frames(), 0);
        c.start(&mut s);
        assert_eq!(s.pending_frames(), 0);
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let mut s = ManualScheduler::new();
        let mut c = clock();
        c.start(&mut s);
        step_until(&mut c, 5000.0);
        c.reset(&mut s);
        let once = c.state();
        c.reset(&mut s);
        assert_eq!(c.state(), once);
        assert_eq!(once, AnimationState::INITIAL);
        assert!(!c.is_running());
    }
}
