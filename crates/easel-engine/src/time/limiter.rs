use std::time::{Duration, Instant};

/// Caps the loop at a target frame rate by sleeping until the next frame slot.
///
/// Deadlines advance by a fixed period; when the loop falls more than one
/// period behind, the schedule is rebased instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Duration,
    next: Option<Instant>,
}

impl FrameLimiter {
    /// `target_fps` of 0 disables the cap.
    pub fn new(target_fps: u32) -> Self {
        let period = if target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / u64::from(target_fps))
        };
        Self { period, next: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left in the current frame slot at `now`, advancing the schedule.
    pub fn remaining_at(&mut self, now: Instant) -> Duration {
        if self.period.is_zero() {
            return Duration::ZERO;
        }

        let deadline = match self.next {
            Some(deadline) if now <= deadline + self.period => deadline,
            _ => now,
        };
        self.next = Some(deadline + self.period);
        deadline.saturating_duration_since(now)
    }

    /// Sleeps until the current frame slot ends.
    pub fn wait(&mut self) {
        let remaining = self.remaining_at(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
