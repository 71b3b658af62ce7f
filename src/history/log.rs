//! Bounded game history.
//!
//! The log is stored under `gameHistory` as a bare array of entries, each
//! `{id, timestamp, playerId, playerName, kind, payload}`. The payload
//! carries whichever of `key`, `from`, `to`, `fromPlayerId` and `lifeDelta`
//! the kind needs.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::record::{Change, ChangeKind, ChangeRecord};
use crate::core::{PlayerId, StatusKey, StatusValue, COMMANDER_DAMAGE_MAX};

/// Entries kept before the oldest are dropped.
pub const MAX_HISTORY_ENTRIES: usize = 500;

/// Write-only destination for change records.
pub trait HistorySink {
    /// Accept a change that happened at `timestamp_ms`.
    fn record(&mut self, record: ChangeRecord, timestamp_ms: u64);
}

/// A stamped change record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EntryDocument", from = "EntryDocument")]
pub struct HistoryEntry {
    /// Unique within a history. Entries written here use a running
    /// sequence number.
    pub id: String,
    pub timestamp: u64,
    pub record: ChangeRecord,
}

impl HistoryEntry {
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        self.record.kind()
    }
}

/// Persisted log of the most recent changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<HistoryEntry>", from = "Vec<HistoryEntry>")]
pub struct GameHistory {
    entries: Vector<HistoryEntry>,
    next_id: u64,
}

impl GameHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Drop every entry. The id sequence carries on.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl HistorySink for GameHistory {
    fn record(&mut self, record: ChangeRecord, timestamp_ms: u64) {
        let entry = HistoryEntry {
            id: self.next_id.to_string(),
            timestamp: timestamp_ms,
            record,
        };
        self.next_id += 1;
        self.entries.push_back(entry);
        while self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.pop_front();
        }
    }
}

impl From<Vec<HistoryEntry>> for GameHistory {
    /// Restore a saved log. Numbering resumes after the highest numeric id;
    /// ids from elsewhere (the shell writes UUIDs) are kept as they are.
    fn from(mut entries: Vec<HistoryEntry>) -> Self {
        let excess = entries.len().saturating_sub(MAX_HISTORY_ENTRIES);
        entries.drain(..excess);
        let next_id = entries
            .iter()
            .filter_map(|entry| entry.id.parse::<u64>().ok())
            .max()
            .map_or(0, |id| id + 1);
        Self {
            entries: entries.into_iter().collect(),
            next_id,
        }
    }
}

impl From<GameHistory> for Vec<HistoryEntry> {
    fn from(history: GameHistory) -> Self {
        history.entries.into_iter().collect()
    }
}

/// Stored shape of one entry.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryDocument {
    id: String,
    timestamp: u64,
    player_id: PlayerId,
    #[serde(default)]
    player_name: String,
    kind: ChangeKind,
    #[serde(default)]
    payload: Payload,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<StatusValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<StatusValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from_player_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    life_delta: Option<i32>,
}

impl Payload {
    fn count(value: Option<StatusValue>) -> i64 {
        value.map_or(0, StatusValue::as_count)
    }

    fn number(value: Option<StatusValue>) -> i32 {
        // Clamped into i32 range first.
        Self::count(value).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    fn slot(value: Option<StatusValue>) -> u32 {
        Self::count(value).clamp(0, i64::from(COMMANDER_DAMAGE_MAX)) as u32
    }

    fn flag(value: Option<StatusValue>) -> bool {
        value.is_some_and(StatusValue::as_bool)
    }

    fn status_key(&self) -> StatusKey {
        StatusKey::parse(self.key.as_deref().unwrap_or_default())
    }
}

impl From<HistoryEntry> for EntryDocument {
    fn from(entry: HistoryEntry) -> Self {
        let kind = entry.kind();
        let ChangeRecord {
            player_id,
            player_name,
            change,
        } = entry.record;

        let payload = match change {
            Change::Life { from, to } | Change::Poison { from, to } => Payload {
                from: Some(StatusValue::Count(from.into())),
                to: Some(StatusValue::Count(to.into())),
                ..Payload::default()
            },
            Change::StatusBoolean { key, from, to } => Payload {
                key: Some(key.as_str().to_string()),
                from: Some(StatusValue::Flag(from)),
                to: Some(StatusValue::Flag(to)),
                ..Payload::default()
            },
            Change::StatusNumeric { key, from, to } => Payload {
                key: Some(key.as_str().to_string()),
                from: Some(StatusValue::Count(from)),
                to: Some(StatusValue::Count(to)),
                ..Payload::default()
            },
            Change::CommanderDamage {
                from_player_id,
                from,
                to,
                life_delta,
            } => Payload {
                key: None,
                from: Some(StatusValue::Count(from.into())),
                to: Some(StatusValue::Count(to.into())),
                from_player_id: Some(from_player_id),
                life_delta: Some(life_delta),
            },
        };

        Self {
            id: entry.id,
            timestamp: entry.timestamp,
            player_id,
            player_name,
            kind,
            payload,
        }
    }
}

impl From<EntryDocument> for HistoryEntry {
    /// Missing payload fields read as zero, false or an unknown player.
    fn from(doc: EntryDocument) -> Self {
        let payload = doc.payload;
        let change = match doc.kind {
            ChangeKind::PositiveLife | ChangeKind::NegativeLife => Change::Life {
                from: Payload::number(payload.from),
                to: Payload::number(payload.to),
            },
            ChangeKind::Poison => Change::Poison {
                from: Payload::number(payload.from),
                to: Payload::number(payload.to),
            },
            ChangeKind::StatusBoolean => Change::StatusBoolean {
                key: payload.status_key(),
                from: Payload::flag(payload.from),
                to: Payload::flag(payload.to),
            },
            ChangeKind::StatusNumeric => Change::StatusNumeric {
                key: payload.status_key(),
                from: Payload::count(payload.from),
                to: Payload::count(payload.to),
            },
            ChangeKind::CommanderDamage => Change::CommanderDamage {
                from_player_id: payload.from_player_id.unwrap_or(PlayerId::new(0)),
                from: Payload::slot(payload.from),
                to: Payload::slot(payload.to),
                life_delta: payload.life_delta.unwrap_or_default(),
            },
        };

        Self {
            id: doc.id,
            timestamp: doc.timestamp,
            record: ChangeRecord::new(doc.player_id, doc.player_name, change),
        }
    }
}
