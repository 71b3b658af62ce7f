//! Spin-to-select: the highlight sequence that lands on a first player.
//!
//! The highlight walks the active seats from seat 0, slowing down by a fixed
//! step each time, then pauses and lands on the last highlighted seat. The
//! number of highlights is four laps plus a random extra of up to nine.

use crate::core::GameRng;

pub const SPIN_START_INTERVAL_MS: u64 = 100;
pub const SPIN_INTERVAL_STEP_MS: u64 = 10;
pub const SPIN_FINAL_PAUSE_MS: u64 = 500;
pub const SPIN_LAPS: u32 = 4;
pub const SPIN_MAX_EXTRA: u32 = 9;

/// One step of a spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinStep {
    /// Highlight `seat`, then wait `wait_ms` before the next step.
    Highlight { seat: usize, wait_ms: u64 },
    /// The spin is over: `seat` goes first.
    Land { seat: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Spinning,
    Landing,
    Done,
}

/// A spin in progress.
#[derive(Clone, Debug)]
pub struct SpinPlan {
    seats: usize,
    remaining: u32,
    highlighted: usize,
    interval_ms: u64,
    phase: Phase,
}

impl SpinPlan {
    /// Plan a spin over `seats` active seats.
    ///
    /// # Panics
    ///
    /// Panics if `seats` is zero.
    #[must_use]
    pub fn new(seats: usize, rng: &mut GameRng) -> Self {
        let extra = rng.gen_inclusive(0, SPIN_MAX_EXTRA);
        Self::with_highlights(seats, extra + SPIN_LAPS * seats as u32)
    }

    /// Plan a spin with an exact number of highlights.
    ///
    /// # Panics
    ///
    /// Panics if `seats` or `highlights` is zero.
    #[must_use]
    pub fn with_highlights(seats: usize, highlights: u32) -> Self {
        assert!(seats > 0, "Spin needs at least one seat");
        assert!(highlights > 0, "Spin needs at least one highlight");
        Self {
            seats,
            remaining: highlights,
            highlighted: 0,
            interval_ms: SPIN_START_INTERVAL_MS,
            phase: Phase::Spinning,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Highlights left before the pause.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Produce the next step. `None` once the spin has landed.
    pub fn next_step(&mut self) -> Option<SpinStep> {
        match self.phase {
            Phase::Spinning => {
                let seat = self.highlighted % self.seats;
                self.highlighted += 1;
                self.remaining -= 1;
                let wait_ms = if self.remaining > 0 {
                    self.interval_ms += SPIN_INTERVAL_STEP_MS;
                    self.interval_ms
                } else {
                    self.phase = Phase::Landing;
                    SPIN_FINAL_PAUSE_MS
                };
                Some(SpinStep::Highlight { seat, wait_ms })
            }
            Phase::Landing => {
                self.phase = Phase::Done;
                Some(SpinStep::Land {
                    seat: (self.highlighted - 1) % self.seats,
                })
            }
            Phase::Done => None,
        }
    }
}
