use std::time::{Duration, Instant};

/// Default refresh rate for the frame loop
pub const DEFAULT_FPS: u32 = 60;

/// Per-frame callback scheduling with explicit cancellation.
///
/// Stands in for a display refresh signal: a frame is requested, fires
/// once when its deadline passes, and must be requested again to keep
/// the loop alive. Late frames are skipped rather than queued.
#[derive(Debug)]
pub struct FrameLoop {
    interval: Duration,
    pending: Option<Instant>,
    cancelled: bool,
    last_frame: Option<Instant>,
}

impl FrameLoop {
    pub fn new(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            interval: Duration::from_secs(1) / fps,
            pending: None,
            cancelled: false,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the next frame. Ignored once the loop has been cancelled.
    /// Returns whether a frame is now pending.
    pub fn request_frame(&mut self, now: Instant) -> bool {
        if self.cancelled {
            return false;
        }
        if self.pending.is_none() {
            let deadline = match self.last_frame {
                // keep the cadence, but never schedule into the past
                Some(last) => (last + self.interval).max(now),
                None => now + self.interval,
            };
            self.pending = Some(deadline);
        }
        true
    }

    /// Fire the pending frame if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                self.last_frame = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending frame, if any
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending frame without stopping the loop (pause)
    pub fn suspend(&mut self) {
        self.pending = None;
    }

    /// Drop the pending frame and refuse further requests (teardown)
    pub fn cancel(&mut self) {
        self.pending = None;
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// One-shot deferred callback deadline, cancellable
#[derive(Debug, Default)]
pub struct Timeout {
    deadline: Option<Instant>,
}

impl Timeout {
    pub fn set(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Consume the timeout if it has expired
    pub fn take_expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_expiry(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn is_set(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }
}
