//! Player registry and the elimination predicate.

pub mod elimination;
pub mod roster;

pub use elimination::is_eliminated;
pub use roster::{Background, PlayerRegistry};
