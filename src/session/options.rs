//! Reset options, the confirmation prelude, and timer keys.

use crate::core::PlayerId;

/// Prompt shown before a reset that has not been confirmed yet.
pub const RESET_PROMPT: &str = "Are you sure you want to reset the game?";

/// Asks the user before a destructive operation.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What a game reset does besides restoring life, poison and status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetOptions {
    /// Skip the confirmation prompt.
    pub already_confirmed: bool,
    /// Shuffle the order of the active seats.
    pub shuffle_seats: bool,
    /// Restore default names, colors and backgrounds.
    pub clear_profiles: bool,
    /// Deal secret roles to the active seats.
    pub assign_roles: bool,
    /// Spin to select a first player afterwards.
    pub spin_for_first: bool,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            already_confirmed: false,
            shuffle_seats: false,
            clear_profiles: false,
            assign_roles: false,
            spin_for_first: true,
        }
    }
}

impl ResetOptions {
    #[must_use]
    pub fn confirmed(mut self) -> Self {
        self.already_confirmed = true;
        self
    }

    #[must_use]
    pub fn shuffled(mut self) -> Self {
        self.shuffle_seats = true;
        self
    }

    #[must_use]
    pub fn clearing_profiles(mut self) -> Self {
        self.clear_profiles = true;
        self
    }

    #[must_use]
    pub fn with_roles(mut self) -> Self {
        self.assign_roles = true;
        self
    }

    #[must_use]
    pub fn without_spin(mut self) -> Self {
        self.spin_for_first = false;
        self
    }
}

/// Delayed tasks owned by a session. One pending task per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKey {
    /// Zero a player's recent life delta.
    LifeDiff(PlayerId),
    /// Next step of the first-player spin.
    Spin,
    /// One second of the turn countdown.
    TurnTimer,
}
