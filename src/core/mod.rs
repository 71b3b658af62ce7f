//! Core types: players, status effects, settings, RNG.
//!
//! Everything here is plain data with no knowledge of turns, timers or
//! storage. The registry and session build on top of it.

pub mod config;
pub mod player;
pub mod rng;
pub mod status;

pub use config::{Settings, DEFAULT_TURN_TIMER_SECONDS, MIN_PLAYERS};
pub use player::{
    LifeBounds, PlayerId, PlayerRecord, COMMANDER_DAMAGE_LETHAL, COMMANDER_DAMAGE_MAX,
    DEFAULT_COLOR, LIFE_MAX, LIFE_MIN_NEGATIVE, MAX_PLAYERS, POISON_LETHAL, POISON_MAX,
};
pub use rng::{GameRng, GameRngState};
pub use status::{StatusEffects, StatusKey, StatusKind, StatusValue, STATUS_COUNT_MAX};
