//! Persistent key-value storage.
//!
//! The session reads each piece of state from its key at startup and writes
//! full snapshots back after every change. Values are JSON documents, the
//! same shape the application shell has always stored.

pub mod file;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const PLAYERS_KEY: &str = "players";
pub const SETTINGS_KEY: &str = "appSettings";
pub const APP_STATE_KEY: &str = "appState";
pub const HISTORY_KEY: &str = "gameHistory";
pub const RNG_KEY: &str = "rngState";

/// Byte-valued storage addressed by name.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Read and decode `key`.
///
/// Missing keys give `None`. Unreadable or undecodable values are logged
/// and also give `None`, so callers fall back to defaults.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let bytes = match store.get(key) {
        Ok(bytes) => bytes?,
        Err(error) => {
            warn!(key, %error, "failed to read stored value");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "discarding undecodable stored value");
            None
        }
    }
}

/// Encode and write `value` under `key`.
pub fn save<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let bytes = serde_json::to_vec(value)?;
    store.set(key, &bytes)
}
