//! Elimination predicate.
//!
//! A player is out when any of these hold:
//! - life at or below zero while negative life is not permitted for them
//! - ten or more poison counters
//! - the knockout flag is set
//! - 21 or more commander damage from a single source
//!
//! This is always computed on demand. `PlayerRecord::is_dead` only mirrors
//! the knockout flag.

use crate::core::{PlayerRecord, COMMANDER_DAMAGE_LETHAL, POISON_LETHAL};

/// Whether `record` is out of the game.
///
/// ```
/// use life_counter::core::{PlayerId, PlayerRecord};
/// use life_counter::registry::is_eliminated;
///
/// let mut record = PlayerRecord::new(PlayerId::new(1), 40);
/// assert!(!is_eliminated(&record, false));
///
/// record.poison = 10;
/// assert!(is_eliminated(&record, false));
/// ```
#[must_use]
pub fn is_eliminated(record: &PlayerRecord, allow_negative_life: bool) -> bool {
    (record.life_total <= 0 && !record.negative_life_allowed(allow_negative_life))
        || record.poison >= POISON_LETHAL
        || record.status_effects.is_knocked_out()
        || record.max_commander_damage() >= COMMANDER_DAMAGE_LETHAL
}
