//! Per-turn countdown.

use serde::{Deserialize, Serialize};

/// Outcome of one elapsed second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    Idle,
    Running { remaining: u32 },
    Expired,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnTimer {
    remaining: u32,
    total: u32,
    running: bool,
    seat: Option<usize>,
}

impl TurnTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the countdown for `seat`.
    pub fn start(&mut self, seat: usize, seconds: u32) {
        *self = Self {
            remaining: seconds,
            total: seconds,
            running: seconds > 0,
            seat: Some(seat),
        };
    }

    /// Pause without forgetting the remaining time.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick_second(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn seat(&self) -> Option<usize> {
        self.seat
    }
}
