//! Status effects tracked per player.
//!
//! Known effects are typed fields. Anything else lands in `custom`, keyed by
//! the name the shell used, so unknown keys survive a save/load cycle.
//!
//! Flags: monarch, initiative, ascend, day/night, knockout.
//! Counters: energy, experience, rad, command tax, ring bearer,
//! start-your-engines speed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cap for numeric status counters.
pub const STATUS_COUNT_MAX: i64 = 999;

/// Name of a status effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKey {
    Monarch,
    Initiative,
    Ascend,
    DayNight,
    Knockout,
    Energy,
    Experience,
    Rad,
    CommandTax,
    RingBearer,
    StartYourEngineSpeed,
    Custom(String),
}

/// Whether a status holds a flag or a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Flag,
    Count,
}

impl StatusKey {
    /// Parse a shell key. Unrecognized names become `Custom`.
    ///
    /// ```
    /// use life_counter::core::StatusKey;
    ///
    /// assert_eq!(StatusKey::parse("monarch"), StatusKey::Monarch);
    /// assert_eq!(StatusKey::parse("ko"), StatusKey::Knockout);
    /// assert_eq!(StatusKey::parse("blessing"), StatusKey::Custom("blessing".into()));
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "monarch" => Self::Monarch,
            "initiative" => Self::Initiative,
            "ascend" => Self::Ascend,
            "dayNight" => Self::DayNight,
            "ko" => Self::Knockout,
            "energy" => Self::Energy,
            "experience" => Self::Experience,
            "rad" => Self::Rad,
            "commandTax" => Self::CommandTax,
            "ringBearer" => Self::RingBearer,
            "startYourEngineSpeed" => Self::StartYourEngineSpeed,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Shell key for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Monarch => "monarch",
            Self::Initiative => "initiative",
            Self::Ascend => "ascend",
            Self::DayNight => "dayNight",
            Self::Knockout => "ko",
            Self::Energy => "energy",
            Self::Experience => "experience",
            Self::Rad => "rad",
            Self::CommandTax => "commandTax",
            Self::RingBearer => "ringBearer",
            Self::StartYourEngineSpeed => "startYourEngineSpeed",
            Self::Custom(name) => name,
        }
    }

    /// Flags at most one player may hold at a time.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Monarch | Self::Initiative)
    }

    /// Kind of a known key. `None` for custom keys, which take either.
    #[must_use]
    pub fn kind(&self) -> Option<StatusKind> {
        match self {
            Self::Monarch | Self::Initiative | Self::Ascend | Self::DayNight | Self::Knockout => {
                Some(StatusKind::Flag)
            }
            Self::Custom(_) => None,
            _ => Some(StatusKind::Count),
        }
    }
}

impl std::fmt::Display for StatusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Flag(bool),
    Count(i64),
}

impl StatusValue {
    /// Truthiness: a non-zero counter counts as set.
    #[must_use]
    pub fn as_bool(self) -> bool {
        match self {
            Self::Flag(flag) => flag,
            Self::Count(count) => count != 0,
        }
    }

    /// Numeric view: a set flag counts as 1.
    #[must_use]
    pub fn as_count(self) -> i64 {
        match self {
            Self::Flag(flag) => i64::from(flag),
            Self::Count(count) => count,
        }
    }

    fn coerce(self, kind: StatusKind) -> Self {
        match kind {
            StatusKind::Flag => Self::Flag(self.as_bool()),
            StatusKind::Count => Self::Count(self.as_count().clamp(0, STATUS_COUNT_MAX)),
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::Count(count) => Self::Count(count.clamp(0, STATUS_COUNT_MAX)),
            flag => flag,
        }
    }
}

/// All status effects of one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusEffects {
    pub monarch: bool,
    pub initiative: bool,
    pub ascend: bool,
    pub day_night: bool,
    pub ko: bool,
    pub energy: i64,
    pub experience: i64,
    pub rad: i64,
    pub command_tax: i64,
    pub ring_bearer: i64,
    pub start_your_engine_speed: i64,
    #[serde(flatten)]
    pub custom: FxHashMap<String, StatusValue>,
}

impl StatusEffects {
    /// Current value. Known keys always have one; custom keys may not.
    #[must_use]
    pub fn get(&self, key: &StatusKey) -> Option<StatusValue> {
        let value = match key {
            StatusKey::Monarch => StatusValue::Flag(self.monarch),
            StatusKey::Initiative => StatusValue::Flag(self.initiative),
            StatusKey::Ascend => StatusValue::Flag(self.ascend),
            StatusKey::DayNight => StatusValue::Flag(self.day_night),
            StatusKey::Knockout => StatusValue::Flag(self.ko),
            StatusKey::Energy => StatusValue::Count(self.energy),
            StatusKey::Experience => StatusValue::Count(self.experience),
            StatusKey::Rad => StatusValue::Count(self.rad),
            StatusKey::CommandTax => StatusValue::Count(self.command_tax),
            StatusKey::RingBearer => StatusValue::Count(self.ring_bearer),
            StatusKey::StartYourEngineSpeed => StatusValue::Count(self.start_your_engine_speed),
            StatusKey::Custom(name) => return self.custom.get(name).copied(),
        };
        Some(value)
    }

    /// Whether a flag (or non-zero counter) is set.
    #[must_use]
    pub fn is_set(&self, key: &StatusKey) -> bool {
        self.get(key).is_some_and(StatusValue::as_bool)
    }

    /// Store a value, coercing it to the key's kind and clamping counters.
    ///
    /// Returns the stored value.
    pub fn set(&mut self, key: &StatusKey, value: StatusValue) -> StatusValue {
        let value = match key.kind() {
            Some(kind) => value.coerce(kind),
            None => value.normalized(),
        };

        match key {
            StatusKey::Monarch => self.monarch = value.as_bool(),
            StatusKey::Initiative => self.initiative = value.as_bool(),
            StatusKey::Ascend => self.ascend = value.as_bool(),
            StatusKey::DayNight => self.day_night = value.as_bool(),
            StatusKey::Knockout => self.ko = value.as_bool(),
            StatusKey::Energy => self.energy = value.as_count(),
            StatusKey::Experience => self.experience = value.as_count(),
            StatusKey::Rad => self.rad = value.as_count(),
            StatusKey::CommandTax => self.command_tax = value.as_count(),
            StatusKey::RingBearer => self.ring_bearer = value.as_count(),
            StatusKey::StartYourEngineSpeed => self.start_your_engine_speed = value.as_count(),
            StatusKey::Custom(name) => {
                self.custom.insert(name.clone(), value);
            }
        }
        value
    }

    /// Reset a key to its default. Custom keys are removed.
    pub fn clear(&mut self, key: &StatusKey) {
        match key {
            StatusKey::Custom(name) => {
                self.custom.remove(name);
            }
            known => {
                let cleared = match known.kind() {
                    Some(StatusKind::Flag) => StatusValue::Flag(false),
                    _ => StatusValue::Count(0),
                };
                self.set(known, cleared);
            }
        }
    }

    /// Knockout flag.
    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.ko
    }
}
