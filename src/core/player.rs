//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Stable identity assigned when the roster is created. Seat order can be
//! reshuffled, the id never changes and is never reused within a session.
//!
//! ## PlayerRecord
//!
//! Everything the counter tracks for one player: life, poison, commander
//! damage, status effects, and the transient selection flags used by the
//! first-player spin.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::status::StatusEffects;
use crate::random::roles::Role;

/// Fixed roster size. Only the first `player_count` seats take turns.
pub const MAX_PLAYERS: usize = 6;

/// Upper bound for life totals.
pub const LIFE_MAX: i32 = 9999;

/// Lower bound for life totals when negative life is permitted.
pub const LIFE_MIN_NEGATIVE: i32 = -9999;

/// Poison counter bounds.
pub const POISON_MAX: i32 = 99;

/// Poison counters that eliminate a player.
pub const POISON_LETHAL: i32 = 10;

/// Cap for a single commander damage slot.
pub const COMMANDER_DAMAGE_MAX: u32 = 999;

/// Commander damage from one source that eliminates a player.
pub const COMMANDER_DAMAGE_LETHAL: u32 = 21;

/// Stable player identifier. Ids start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Ids of a freshly created roster: `1..=MAX_PLAYERS`.
    ///
    /// ```
    /// use life_counter::core::PlayerId;
    ///
    /// let ids: Vec<_> = PlayerId::roster().collect();
    /// assert_eq!(ids.len(), 6);
    /// assert_eq!(ids[0], PlayerId::new(1));
    /// assert_eq!(ids[5], PlayerId::new(6));
    /// ```
    pub fn roster() -> impl Iterator<Item = PlayerId> {
        (1..=MAX_PLAYERS as u32).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Inclusive life bounds in force for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeBounds {
    pub min: i32,
    pub max: i32,
}

impl LifeBounds {
    /// Bounds given whether negative life is permitted.
    #[must_use]
    pub const fn new(allow_negative: bool) -> Self {
        if allow_negative {
            Self {
                min: LIFE_MIN_NEGATIVE,
                max: LIFE_MAX,
            }
        } else {
            Self {
                min: 0,
                max: LIFE_MAX,
            }
        }
    }

    /// Clamp a life total into these bounds.
    #[must_use]
    pub fn clamp(self, life: i32) -> i32 {
        life.clamp(self.min, self.max)
    }
}

/// One player's tracked state.
///
/// Serialized with camelCase keys so snapshots stay readable by the
/// application shell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub player_name: String,
    pub color: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub background_artist: Option<String>,
    #[serde(default)]
    pub background_set: Option<String>,
    pub life_total: i32,
    #[serde(default)]
    pub temp_life_diff: i32,
    #[serde(default)]
    pub poison: i32,
    /// One slot per source seat index.
    #[serde(default)]
    pub commander_damage: SmallVec<[u32; MAX_PLAYERS]>,
    /// Per slot, the damage points that cost no life because the life
    /// total was already at its floor. Lowering a slot uses these up before
    /// giving life back.
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub commander_damage_absorbed: SmallVec<[u32; MAX_PLAYERS]>,
    #[serde(default)]
    pub status_effects: StatusEffects,
    /// Per-player override of the global negative-life permission.
    #[serde(default)]
    pub allow_negative_life: Option<bool>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub is_first: bool,
    /// Mirror of the knockout flag. Not kept in sync with life, poison or
    /// commander damage; ask the elimination predicate for that.
    #[serde(default)]
    pub is_dead: bool,
}

impl PlayerRecord {
    /// Create a record with default profile and the given life total.
    #[must_use]
    pub fn new(id: PlayerId, starting_life: i32) -> Self {
        Self {
            id,
            player_name: default_name(id),
            color: DEFAULT_COLOR.to_string(),
            background_image: None,
            background_artist: None,
            background_set: None,
            life_total: starting_life,
            temp_life_diff: 0,
            poison: 0,
            commander_damage: SmallVec::new(),
            commander_damage_absorbed: SmallVec::new(),
            status_effects: StatusEffects::default(),
            allow_negative_life: None,
            role: None,
            highlighted: false,
            is_first: false,
            is_dead: false,
        }
    }

    /// Whether negative life is permitted for this player.
    #[must_use]
    pub fn negative_life_allowed(&self, globally_allowed: bool) -> bool {
        globally_allowed || self.allow_negative_life == Some(true)
    }

    /// Life bounds in force for this player.
    #[must_use]
    pub fn life_bounds(&self, globally_allowed: bool) -> LifeBounds {
        LifeBounds::new(self.negative_life_allowed(globally_allowed))
    }

    /// Commander damage recorded from a source seat (0 if never set).
    #[must_use]
    pub fn commander_damage_from(&self, source_seat: usize) -> u32 {
        self.commander_damage.get(source_seat).copied().unwrap_or(0)
    }

    /// Highest commander damage from any single source.
    #[must_use]
    pub fn max_commander_damage(&self) -> u32 {
        self.commander_damage.iter().copied().max().unwrap_or(0)
    }

    /// Restore cosmetic profile fields to their defaults.
    pub fn clear_profile(&mut self) {
        self.player_name = default_name(self.id);
        self.color = DEFAULT_COLOR.to_string();
        self.background_image = None;
        self.background_artist = None;
        self.background_set = None;
    }
}

/// Default seat color.
pub const DEFAULT_COLOR: &str = "white";

fn default_name(id: PlayerId) -> String {
    format!("Player {}", id.0)
}
