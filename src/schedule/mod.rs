//! Timer-driven effects on a logical clock: keyed debounced deadlines, the
//! spin-to-select sequence, and the turn countdown.

pub mod scheduler;
pub mod spin;
pub mod timer;

pub use scheduler::Scheduler;
pub use spin::{SpinPlan, SpinStep};
pub use timer::{TimerTick, TurnTimer};
