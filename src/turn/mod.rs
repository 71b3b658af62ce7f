//! Turn order: the cursor over the active seats.

pub mod cursor;

pub use cursor::{Direction, TurnCursor, FALLBACK_PLAYER_COUNT, MAX_TURN_COUNT};
