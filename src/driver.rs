//! Wall-clock driver for a shared session.
//!
//! A `Session` only moves forward when something calls `tick`. The driver
//! is a tokio task that does that on an interval, feeding it the time
//! elapsed since the driver started. Callers reach the session through the
//! same mutex between ticks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot::{self, Sender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::session::Session;

/// Tick period used by `SessionDriver::start`.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

pub type SharedSession = Arc<Mutex<Session>>;

/// Running driver task.
pub struct SessionDriver {
    quit_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl SessionDriver {
    /// Drive `session` every `DEFAULT_TICK_INTERVAL`.
    pub fn start(session: SharedSession) -> Self {
        Self::with_interval(session, DEFAULT_TICK_INTERVAL)
    }

    /// Drive `session` every `period`.
    pub fn with_interval(session: SharedSession, period: Duration) -> Self {
        let (quit_tx, mut quit_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let base_ms = session.lock().await.now_ms();
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut quit_rx => break,
                    _ = ticker.tick() => {
                        let elapsed =
                            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                        session.lock().await.tick(base_ms.saturating_add(elapsed));
                    }
                }
            }
            debug!("session driver stopped");
        });
        Self { quit_tx, handle }
    }

    /// Stop ticking and wait for the task to finish.
    pub async fn shutdown(self) {
        // The task may already be gone; nothing to signal then.
        let _ = self.quit_tx.send(());
        if let Err(error) = self.handle.await {
            warn!(%error, "session driver task failed");
        }
    }
}
