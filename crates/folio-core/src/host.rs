//! Scheduling seam between the indicator and its environment.
//!
//! The indicator asks its [`Host`] for at most one pending animation frame
//! and one timer per [`TimerSlot`]. The host later calls back into
//! `ScrollReactiveIndicator::on_frame` / `on_timer` with the handle it
//! returned. Handles the indicator no longer holds are ignored, so a
//! late-firing callback is harmless.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Label quiet period.
    Label,
    /// Ambient scrolling window.
    Ambient,
}

pub trait Host {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_timer(&mut self, slot: TimerSlot, delay: Duration) -> TimerHandle;
    fn clear_timer(&mut self, handle: TimerHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    pub handle: TimerHandle,
    pub slot: TimerSlot,
    pub due: Duration,
}

/// Deterministic host driven by hand.
///
/// Time only moves through [`ManualHost::set_now`]; frames and timers sit in
/// queues until the driver takes them and dispatches them to the indicator.
#[derive(Debug, Default)]
pub struct ManualHost {
    now: Duration,
    next_id: u32,
    frames: Vec<FrameHandle>,
    timers: Vec<PendingTimer>,
    pub frames_requested: u32,
    pub frames_cancelled: u32,
    pub timers_set: u32,
    pub timers_cleared: u32,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> &[PendingTimer] {
        &self.timers
    }

    /// Pop the oldest pending frame request.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn take_due_timers(&mut self, now: Duration) -> Vec<PendingTimer> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = rest;
        due.sort_by_key(|t| t.due);
        due
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for ManualHost {
    fn request_frame(&mut self) -> FrameHandle {
        let h = FrameHandle(self.next());
        self.frames.push(h);
        self.frames_requested += 1;
        h
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.frames.len();
        self.frames.retain(|f| *f != handle);
        if self.frames.len() != before {
            self.frames_cancelled += 1;
        }
    }

    fn set_timer(&mut self, slot: TimerSlot, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next());
        self.timers.push(PendingTimer {
            handle,
            slot,
            due: self.now + delay,
        });
        self.timers_set += 1;
        handle
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        if self.timers.len() != before {
            self.timers_cleared += 1;
        }
    }
}
