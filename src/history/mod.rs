//! Game history: structured change records and the bounded log that keeps
//! them.

pub mod log;
pub mod record;

pub use log::{GameHistory, HistoryEntry, HistorySink, MAX_HISTORY_ENTRIES};
pub use record::{Change, ChangeKind, ChangeRecord};
