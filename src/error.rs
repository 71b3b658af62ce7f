//! Error type for the fallible surfaces: storage, encoding, settings files,
//! and spin preconditions. Roster mutations never fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings file is invalid: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("settings could not be written: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("invalid store key {0:?}")]
    InvalidKey(String),
    #[error("a first-player spin is already running")]
    SpinInProgress,
    #[error("no active game: player count is zero")]
    NoActiveGame,
}

pub type Result<T> = std::result::Result<T, Error>;
