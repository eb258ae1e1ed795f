use chrono::{DateTime, Duration, Utc};

/// Per-task countdown.
///
/// While active the timer owns a repeating one-second tick, expressed as the
/// deadline of the next tick. The owner drives it by calling [`Timer::poll`]
/// with the current time; dropping the timer cancels it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    total_seconds: u64,
    remaining_seconds: u64,
    next_tick: Option<DateTime<Utc>>,
}

impl Timer {
    /// Create a stopped timer starting at `seconds`
    pub fn new(seconds: u64) -> Self {
        Self {
            total_seconds: seconds,
            remaining_seconds: seconds,
            next_tick: None,
        }
    }

    /// Begin ticking once per second. Returns false if already active.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.next_tick.is_some() {
            return false;
        }
        self.next_tick = Some(now + tick_interval());
        true
    }

    /// Cancel the repeating tick (idempotent)
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Fire every tick due at or before `now`, in order.
    ///
    /// A tick decrements while time remains; the first tick that finds zero
    /// stops the timer. Returns how many decrements fired.
    pub fn poll(&mut self, now: DateTime<Utc>) -> u32 {
        let mut fired = 0;
        while let Some(deadline) = self.next_tick {
            if deadline > now {
                break;
            }
            if self.remaining_seconds > 0 {
                self.remaining_seconds -= 1;
                self.next_tick = Some(deadline + tick_interval());
                fired += 1;
            } else {
                self.stop();
            }
        }
        fired
    }

    pub fn remaining(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn total(&self) -> u64 {
        self.total_seconds
    }

    /// Format remaining time as "1h 2m 3s", or "2m 3s" under an hour
    pub fn display_string(&self) -> String {
        let hours = self.remaining_seconds / 3600;
        let minutes = (self.remaining_seconds % 3600) / 60;
        let seconds = self.remaining_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else {
            format!("{}m {}s", minutes, seconds)
        }
    }
}

fn tick_interval() -> Duration {
    Duration::seconds(1)
}
