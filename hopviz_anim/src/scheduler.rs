// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperative frame/timer scheduling.
//!
//! The clock never calls the host directly. It asks a [`Scheduler`] for a frame or a
//! timeout and keeps the returned handle; the host later delivers a [`Wake`] carrying
//! that handle and the current timestamp. A wake whose handle is no longer the one the
//! receiver is waiting for was cancelled or superseded and is dropped.
//!
//! [`ManualScheduler`] is an in-process implementation with an explicit clock. It backs
//! the tests and the demo, and is a reasonable host for any fixed-step driver.

extern crate alloc;

use alloc::vec::Vec;

/// Handle for a requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Handle for a pending timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// A callback delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    /// A requested frame is being presented.
    Frame(FrameHandle),
    /// A timeout elapsed.
    Timer(TimerHandle),
}

/// The host's scheduling primitives.
///
/// This mirrors the browser's `requestAnimationFrame`/`setTimeout` pair. Implementations
/// deliver each request at most once and never after it was cancelled.
pub trait Scheduler {
    /// Requests a callback on the next presented frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a frame request. Unknown or already-delivered handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Requests a callback after `delay_ms` milliseconds.
    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle;

    /// Cancels a timeout. Unknown or already-delivered handles are ignored.
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// A scheduler driven by an explicit clock.
///
/// Time only moves when [`ManualScheduler::advance_to`] is called. Frame requests made
/// before an advance are all presented at the advanced-to timestamp.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: f64,
    next_id: u64,
    frames: Vec<FrameHandle>,
    timers: Vec<(f64, TimerHandle)>,
}

impl ManualScheduler {
    /// Creates a scheduler whose clock reads `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler whose clock starts at `now`.
    pub fn starting_at(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Current clock reading in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of outstanding frame requests.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of outstanding timeouts.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Moves the clock to `t` and returns the wakes that are now due.
    ///
    /// Timers come first, ordered by due time and then creation order, followed by every
    /// frame requested so far. Times before the current reading are clamped to it.
    pub fn advance_to(&mut self, t: f64) -> Vec<Wake> {
        let t = t.max(self.now);
        self.now = t;

        let mut due: Vec<(f64, TimerHandle)> = Vec::new();
        self.timers.retain(|&(at, handle)| {
            if at <= t {
                due.push((at, handle));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut wakes: Vec<Wake> = due.into_iter().map(|(_, h)| Wake::Timer(h)).collect();
        wakes.extend(self.frames.drain(..).map(Wake::Frame));
        wakes
    }

    /// Returns the due time of the earliest pending timer.
    pub fn next_timer_at(&self) -> Option<f64> {
        self.timers
            .iter()
            .map(|&(at, _)| at)
            .min_by(f64::total_cmp)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|&h| h != handle);
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((self.now + delay_ms.max(0.0), handle));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|&(_, h)| h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_delivered_once() {
        let mut s = ManualScheduler::new();
        let h = s.request_frame();
        assert_eq!(s.advance_to(16.0), alloc::vec![Wake::Frame(h)]);
        assert!(s.advance_to(32.0).is_empty());
    }

    #[test]
    fn cancelled_requests_are_not_delivered() {
        let mut s = ManualScheduler::new();
        let f = s.request_frame();
        let t = s.set_timeout(10.0);
        s.cancel_frame(f);
        s.clear_timeout(t);
        assert!(s.advance_to(100.0).is_empty());
        assert_eq!(s.pending_frames(), 0);
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn timers_fire_in_due_order_before_frames() {
        let mut s = ManualScheduler::new();
        let late = s.set_timeout(50.0);
        let early = s.set_timeout(20.0);
        let f = s.request_frame();
        assert!(s.advance_to(10.0).iter().all(|w| matches!(w, Wake::Frame(_))));
        let _ = s.request_frame();
        let wakes = s.advance_to(60.0);
        assert_eq!(wakes[0], Wake::Timer(early));
        assert_eq!(wakes[1], Wake::Timer(late));
        assert_ne!(wakes[2], Wake::Frame(f));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut s = ManualScheduler::starting_at(100.0);
        let _ = s.advance_to(50.0);
        assert_eq!(s.now(), 100.0);
        let t = s.set_timeout(5.0);
        assert_eq!(s.next_timer_at(), Some(105.0));
        assert_eq!(s.advance_to(105.0), alloc::vec![Wake::Timer(t)]);
    }
}
