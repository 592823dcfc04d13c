//! Fixed-step frame scheduler.
//!
//! Stands in for a display-synchronized animation callback: the portal loop
//! feeds elapsed wall time with [`FrameScheduler::feed`], then polls
//! [`FrameScheduler::next_frame`] until no frame is due. Frames are only
//! produced while the scheduler is armed; [`FrameScheduler::cancel`] is the
//! only way to stop it and only [`FrameScheduler::schedule`] re-arms it.

/// Length of one physics frame in milliseconds (~60 FPS).
pub const FRAME_MS: u64 = 16;

/// Largest wall-time slice accepted per feed, so a stall never turns into a
/// burst of catch-up frames.
pub const MAX_FEED_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    /// Never armed since construction or the last [`FrameScheduler::restart`].
    Idle,
    Scheduled,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: ScheduleState,
    /// Wall time fed but not yet consumed by a frame.
    accumulated_ms: u64,
    /// Game clock: total time covered by frames run since the last restart.
    clock_ms: u64,
    /// Frames run since the last restart.
    frame_count: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: ScheduleState::Idle,
            accumulated_ms: 0,
            clock_ms: 0,
            frame_count: 0,
        }
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        self.state == ScheduleState::Scheduled
    }

    /// Arm the scheduler. Already-scheduled calls are no-ops.
    pub fn schedule(&mut self) {
        if self.state != ScheduleState::Scheduled {
            self.accumulated_ms = 0;
            self.state = ScheduleState::Scheduled;
        }
    }

    /// Stop producing frames and drop any pending time.
    pub fn cancel(&mut self) {
        self.state = ScheduleState::Cancelled;
        self.accumulated_ms = 0;
    }

    /// Cancel and zero the game clock for a fresh session.
    pub fn restart(&mut self) {
        self.state = ScheduleState::Idle;
        self.accumulated_ms = 0;
        self.clock_ms = 0;
        self.frame_count = 0;
    }

    /// Add elapsed wall time. Ignored unless scheduled.
    pub fn feed(&mut self, dt_ms: u64) {
        if self.is_scheduled() {
            self.accumulated_ms += dt_ms.min(MAX_FEED_MS);
        }
    }

    /// Consume one frame's worth of time if a frame is due. Returns the game
    /// clock at the end of that frame.
    pub fn next_frame(&mut self) -> Option<u64> {
        if !self.is_scheduled() || self.accumulated_ms < FRAME_MS {
            return None;
        }
        self.accumulated_ms -= FRAME_MS;
        self.clock_ms += FRAME_MS;
        self.frame_count += 1;
        Some(self.clock_ms)
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
