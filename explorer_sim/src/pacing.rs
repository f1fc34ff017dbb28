//! Frame pacing: how the driver waits between frames.

use std::time::{Duration, Instant};

/// Waits out the gap between two frames.
pub trait FramePacer {
    /// Blocks (or not) until the next frame is due.
    fn pace(&mut self, interval: Duration);
}

/// Holds a fixed wall-clock cadence.
///
/// Deadlines are measured from the previous deadline rather than from the
/// end of the previous frame, so slow frames do not accumulate drift.
#[derive(Debug, Default)]
pub struct RealTimePacer {
    next_deadline: Option<Instant>,
}

impl RealTimePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next deadline after `now`, or `None` if it is past what `Instant` can hold.
    fn deadline_after(&self, now: Instant, interval: Duration) -> Option<Instant> {
        self.next_deadline.unwrap_or(now).checked_add(interval)
    }
}

impl FramePacer for RealTimePacer {
    fn pace(&mut self, interval: Duration) {
        let now = Instant::now();
        match self.deadline_after(now, interval) {
            Some(deadline) if deadline > now => {
                std::thread::sleep(deadline - now);
                self.next_deadline = Some(deadline);
            }
            Some(_) => {
                // Fell behind: resynchronise instead of bursting.
                self.next_deadline = Some(now);
            }
            None => {
                std::thread::sleep(interval);
                self.next_deadline = None;
            }
        }
    }
}

/// Returns immediately; the run proceeds on virtual time only.
#[derive(Debug, Default)]
pub struct VirtualPacer {
    waited: Duration,
    waits: u64,
}

impl VirtualPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time this pacer was asked to wait.
    pub fn waited(&self) -> Duration {
        self.waited
    }

    /// Number of waits requested.
    pub fn waits(&self) -> u64 {
        self.waits
    }
}

impl FramePacer for VirtualPacer {
    fn pace(&mut self, interval: Duration) {
        self.waited += interval;
        self.waits += 1;
    }
}
