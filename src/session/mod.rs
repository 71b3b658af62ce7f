//! The game session: one table's state, its timers, and its storage.

pub mod builder;
pub mod controller;
pub mod options;

pub use builder::SessionBuilder;
pub use controller::{Session, SessionSnapshot, LIFE_DIFF_RESET_MS, TURN_TIMER_TICK_MS};
pub use options::{Confirm, ResetOptions, TimerKey, RESET_PROMPT};
