//! Change records emitted by roster mutations.
//!
//! The registry describes what changed; the session stamps each record with a
//! sequence number and timestamp before handing it to the history sink.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, StatusKey};

/// What changed, with before and after values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Life {
        from: i32,
        to: i32,
    },
    Poison {
        from: i32,
        to: i32,
    },
    StatusBoolean {
        key: StatusKey,
        from: bool,
        to: bool,
    },
    StatusNumeric {
        key: StatusKey,
        from: i64,
        to: i64,
    },
    CommanderDamage {
        from_player_id: PlayerId,
        from: u32,
        to: u32,
        /// Life actually lost (negative) or regained (positive).
        life_delta: i32,
    },
}

/// Coarse category of a change, as shown in the history list. Stored as
/// the entry `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    PositiveLife,
    NegativeLife,
    Poison,
    StatusBoolean,
    StatusNumeric,
    CommanderDamage,
}

impl Change {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Life { from, to } if to >= from => ChangeKind::PositiveLife,
            Self::Life { .. } => ChangeKind::NegativeLife,
            Self::Poison { .. } => ChangeKind::Poison,
            Self::StatusBoolean { .. } => ChangeKind::StatusBoolean,
            Self::StatusNumeric { .. } => ChangeKind::StatusNumeric,
            Self::CommanderDamage { .. } => ChangeKind::CommanderDamage,
        }
    }

    /// Net change to the life total carried by this change.
    #[must_use]
    pub fn life_delta(&self) -> i32 {
        match self {
            Self::Life { from, to } => to - from,
            Self::CommanderDamage { life_delta, .. } => *life_delta,
            _ => 0,
        }
    }
}

/// A change attributed to the player it happened to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub change: Change,
}

impl ChangeRecord {
    #[must_use]
    pub fn new(player_id: PlayerId, player_name: impl Into<String>, change: Change) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            change,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        self.change.kind()
    }
}
