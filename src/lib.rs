//! # life-counter
//!
//! Player and turn state engine for a multiplayer Magic: The Gathering life
//! counter.
//!
//! ## Design Principles
//!
//! 1. **One owner**: A `Session` owns the roster, turn cursor, history and
//!    timers of a table. All changes go through it.
//!
//! 2. **Never fail on input**: Unknown player ids are no-ops and numbers are
//!    clamped into range. Only storage, configuration and spin preconditions
//!    return errors.
//!
//! 3. **Deterministic**: Timers run on a logical clock and randomness comes
//!    from a seeded `GameRng`, so a session replays exactly under test.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The roster and history live in `im`
//!   vectors. A snapshot is a cheap clone that later mutations never touch.
//!
//! - **Elimination is derived**: Whether a player is out is computed from
//!   life, poison, knockout and commander damage on every query, never
//!   cached.
//!
//! ## Modules
//!
//! - `core`: Player records, status effects, settings, RNG
//! - `registry`: The roster, its mutations, and the elimination predicate
//! - `turn`: Turn cursor with lap counting
//! - `history`: Change records and the bounded history log
//! - `random`: Dice, coins, random players, secret roles
//! - `notify`: Sound and haptic notifications
//! - `schedule`: Debounced timers, spin-to-select, turn countdown
//! - `store`: Key-value persistence
//! - `session`: The game session tying it all together
//! - `driver`: Wall-clock driver on tokio (`runtime` feature)

pub mod core;
pub mod error;
pub mod history;
pub mod notify;
pub mod random;
pub mod registry;
pub mod schedule;
pub mod session;
pub mod store;
pub mod turn;

#[cfg(feature = "runtime")]
pub mod driver;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameRngState, PlayerId, PlayerRecord, Settings, StatusEffects, StatusKey, StatusValue,
};

pub use crate::error::{Error, Result};

pub use crate::history::{Change, ChangeKind, ChangeRecord, GameHistory, HistoryEntry, HistorySink};

pub use crate::notify::{GameplaySound, HapticPattern, Notifier, NullNotifier};

pub use crate::registry::{is_eliminated, Background, PlayerRegistry};

pub use crate::session::{Confirm, ResetOptions, Session, SessionBuilder, SessionSnapshot};

pub use crate::store::{FileStore, KeyValueStore, MemoryStore};

pub use crate::turn::{Direction, TurnCursor};
