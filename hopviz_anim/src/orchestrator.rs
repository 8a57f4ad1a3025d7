// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback lifecycle around the [`PhaseClock`].

use crate::clock::{AnimationState, PhaseClock, Step};
use crate::config::AnimationConfig;
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle, Wake};

/// Owns one animation instance and its scheduler.
///
/// Inputs arrive as method calls (`set_in_view`, `set_playing`, `reset`, `replay`) and
/// as [`Wake`]s delivered by the host. All mutation happens inside these calls; the
/// state handed to surfaces is a copy.
///
/// Dropping the orchestrator cancels its outstanding frame and timers.
#[derive(Debug)]
pub struct Orchestrator<S: Scheduler> {
    config: AnimationConfig,
    clock: PhaseClock,
    scheduler: S,
    is_playing: bool,
    in_view: bool,
    settle_timer: Option<TimerHandle>,
    replay_timer: Option<TimerHandle>,
}

impl<S: Scheduler> Orchestrator<S> {
    /// Creates a paused orchestrator at the initial state.
    pub fn new(config: AnimationConfig, scheduler: S) -> Self {
        let clock = PhaseClock::new(*config.durations(), config.total_hops());
        Self {
            config,
            clock,
            scheduler,
            is_playing: false,
            in_view: false,
            settle_timer: None,
            replay_timer: None,
        }
    }

    /// Current animation state.
    pub fn state(&self) -> AnimationState {
        self.clock.state()
    }

    /// Playback configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Whether playback is armed.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the replay control should be enabled.
    pub fn can_replay(&self) -> bool {
        self.clock.state().is_complete
    }

    /// Whether the host has reported the animation as visible.
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// The scheduler, e.g. to advance a [`ManualScheduler`].
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Reports whether the animation is scrolled into view.
    ///
    /// When visible, paused, and not complete, playback starts after the settle delay. The
    /// pending start is dropped if any of those conditions stops holding first.
    pub fn set_in_view(&mut self, in_view: bool) {
        self.in_view = in_view;
        self.sync_settle_timer();
    }

    /// Arms or disarms playback.
    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        if playing {
            self.clock.start(&mut self.scheduler);
        } else {
            self.clock.stop(&mut self.scheduler);
        }
        tracing::debug!(playing, "playback toggled");
        self.sync_settle_timer();
    }

    /// Synchronously returns to the initial state and disarms playback.
    ///
    /// Pending frames and timers are cancelled. Playback resumes only when re-armed, either
    /// by [`Orchestrator::set_playing`] or by the in-view trigger.
    pub fn reset(&mut self) {
        self.is_playing = false;
        self.clock.reset(&mut self.scheduler);
        if let Some(t) = self.replay_timer.take() {
            self.scheduler.clear_timeout(t);
        }
        if let Some(t) = self.settle_timer.take() {
            self.scheduler.clear_timeout(t);
        }
    }

    /// Restarts a completed run.
    ///
    /// Resets, then re-arms playback after the replay delay so surfaces get a frame at the
    /// initial state first. Returns `false` and does nothing unless the run is complete.
    pub fn replay(&mut self) -> bool {
        if !self.can_replay() {
            return false;
        }
        self.reset();
        let delay = self.config.replay_delay_ms();
        self.replay_timer = Some(self.scheduler.set_timeout(delay));
        tracing::debug!(delay_ms = delay, "replay scheduled");
        true
    }

    /// Delivers a host callback.
    ///
    /// Returns the clock step for frame wakes that were still current, `None` otherwise.
    pub fn wake(&mut self, wake: Wake, timestamp: f64) -> Option<Step> {
        match wake {
            Wake::Frame(handle) => self.clock.on_frame(handle, timestamp, &mut self.scheduler),
            Wake::Timer(handle) => {
                if self.settle_timer == Some(handle) {
                    self.settle_timer = None;
                    tracing::debug!("settle delay elapsed");
                    self.set_playing(true);
                } else if self.replay_timer == Some(handle) {
                    self.replay_timer = None;
                    self.set_playing(true);
                } else {
                    tracing::debug!(?handle, "ignoring stale timer callback");
                }
                None
            }
        }
    }

    fn sync_settle_timer(&mut self) {
        let wants_start = self.in_view && !self.is_playing && !self.clock.state().is_complete;
        match (wants_start, self.settle_timer) {
            (true, None) => {
                let delay = self.config.settle_delay_ms();
                self.settle_timer = Some(self.scheduler.set_timeout(delay));
            }
            (false, Some(t)) => {
                self.scheduler.clear_timeout(t);
                self.settle_timer = None;
            }
            _ => {}
        }
    }
}

impl<S: Scheduler> Drop for Orchestrator<S> {
    fn drop(&mut self) {
        self.clock.stop(&mut self.scheduler);
        for t in [self.settle_timer.take(), self.replay_timer.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.clear_timeout(t);
        }
    }
}

impl Orchestrator<ManualScheduler> {
    /// Moves the manual clock to `t` and delivers every wake that became due.
    ///
    /// Returns the last clock step observed, if any frame was current.
    pub fn advance_to(&mut self, t: f64) -> Option<Step> {
        let wakes = self.scheduler.advance_to(t);
        let now = self.scheduler.now();
        let mut last = None;
        for wake in wakes {
            if let Some(step) = self.wake(wake, now) {
                last = Some(step);
            }
        }
        last
    }

    /// Presents frames every `frame_interval` milliseconds until `end` or completion.
    ///
    /// Pending timers fire at their exact due time between frames. Calls `observe` after
    /// every presented frame with the timestamp and state.
    pub fn run_until(
        &mut self,
        end: f64,
        frame_interval: f64,
        mut observe: impl FnMut(f64, AnimationState),
    ) -> AnimationState {
        let frame_interval = frame_interval.max(f64::EPSILON);
        let mut t = self.scheduler.now();
        while t < end {
            let next_frame = (t + frame_interval).min(end);
            let next = match self.scheduler.next_timer_at() {
                Some(at) if at < next_frame => at,
                _ => next_frame,
            };
            t = next;
            if self.advance_to(t).is_some() {
                observe(t, self.state());
            }
            if self.state().is_complete {
                break;
            }
        }
        self.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::AnimationPhase;

    fn orchestrator() -> Orchestrator<ManualScheduler> {
        Orchestrator::new(AnimationConfig::default(), ManualScheduler::new())
    }

    #[test]
    fn starts_after_settle_delay_once_in_view() {
        let mut o = orchestrator();
        o.set_in_view(true);
        let _ = o.advance_to(299.0);
        assert!(!o.is_playing());
        let _ = o.advance_to(300.0);
        assert!(o.is_playing());
    }

    #[test]
    fn leaving_view_before_settle_cancels_start() {
        let mut o = orchestrator();
        o.set_in_view(true);
        let _ = o.advance_to(100.0);
        o.set_in_view(false);
        let _ = o.advance_to(1000.0);
        assert!(!o.is_playing());
        assert_eq!(o.scheduler().pending_timers(), 0);
    }

    #[test]
    fn pausing_cancels_the_pending_frame() {
        let mut o = orchestrator();
        o.set_playing(true);
        let _ = o.advance_to(0.0);
        assert_eq!(o.scheduler().pending_frames(), 1);
        o.set_playing(false);
        assert_eq!(o.scheduler().pending_frames(), 0);
        let _ = o.advance_to(500.0);
        assert_eq!(o.state().phase, AnimationPhase::Idle);
    }

    #[test]
    fn replay_is_refused_until_complete() {
        let mut o = orchestrator();
        o.set_playing(true);
        let _ = o.advance_to(0.0);
        assert!(!o.replay());
        assert!(o.is_playing());
    }

    #[test]
    fn reset_disarms_playback() {
        let mut o = orchestrator();
        o.set_playing(true);
        let _ = o.advance_to(0.0);
        let _ = o.advance_to(2000.0);
        o.reset();
        assert!(!o.is_playing());
        assert_eq!(o.state(), AnimationState::INITIAL);
        assert_eq!(o.scheduler().pending_frames(), 0);
    }

    #[test]
    fn reset_while_in_view_does_not_restart_by_itself() {
        let mut o = orchestrator();
        o.set_playing(true);
        let _ = o.advance_to(0.0);
        o.reset();
        let _ = o.advance_to(1000.0);
        assert!(!o.is_playing());
    }

    #[test]
    fn drop_cancels_outstanding_work() {
        #[derive(Debug, Default)]
        struct Counting {
            inner: ManualScheduler,
            cancelled_frames: usize,
            cleared_timers: usize,
        }

        impl Scheduler for &mut Counting {
            fn request_frame(&mut self) -> crate::FrameHandle {
                self.inner.request_frame()
            }
            fn cancel_frame(&mut self, handle: crate::FrameHandle) {
                self.cancelled_frames += 1;
                self.inner.cancel_frame(handle);
            }
            fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
                self.inner.set_timeout(delay_ms)
            }
            fn clear_timeout(&mut self, handle: TimerHandle) {
                self.cleared_timers += 1;
                self.inner.clear_timeout(handle);
            }
        }

        let mut counting = Counting::default();
        {
            let mut o = Orchestrator::new(AnimationConfig::default(), &mut counting);
            o.set_playing(true);
        }
        assert_eq!(counting.cancelled_frames, 1);
        assert_eq!(counting.inner.pending_frames(), 0);

        let mut counting = Counting::default();
        {
            let mut o = Orchestrator::new(AnimationConfig::default(), &mut counting);
            o.set_in_view(true);
        }
        assert_eq!(counting.cleared_timers, 1);
        assert_eq!(counting.inner.pending_timers(), 0);
    }
}
