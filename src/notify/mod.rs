//! Haptic and audio notifications.
//!
//! The session asks a `Notifier` to play a sound or vibrate on notable
//! transitions. Notifications are fire-and-forget: nothing in the engine
//! depends on them succeeding.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// A life swing at least this large plays a "big life" sound.
pub const BIG_LIFE_SWING: i32 = 10;

/// A commander damage change at least this large plays a "big commander" sound.
pub const BIG_COMMANDER_SWING: i64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameplaySound {
    BigLifeUp,
    BigLifeDown,
    BigCommanderUp,
    BigCommanderDown,
    Ko,
    Victory,
    TimerExpired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HapticPattern {
    Tap,
    Confirm,
    Error,
    Long,
}

impl HapticPattern {
    /// Vibration pattern in milliseconds, alternating on and off.
    #[must_use]
    pub const fn pattern_ms(self) -> &'static [u32] {
        match self {
            Self::Tap => &[10],
            Self::Confirm => &[20, 10, 20],
            Self::Error => &[40, 20, 40],
            Self::Long => &[200],
        }
    }
}

/// Receives notification requests.
pub trait Notifier: Send {
    fn play(&mut self, sound: GameplaySound);
    fn vibrate(&mut self, pattern: HapticPattern);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn play(&mut self, _sound: GameplaySound) {}
    fn vibrate(&mut self, _pattern: HapticPattern) {}
}

/// A notification as seen by `NotificationLog`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    Sound(GameplaySound),
    Haptic(HapticPattern),
}

/// Shared, clonable notifier that remembers what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct NotificationLog {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Take and clear everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn contains(&self, notification: Notification) -> bool {
        self.lock().contains(&notification)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for NotificationLog {
    fn play(&mut self, sound: GameplaySound) {
        self.lock().push(Notification::Sound(sound));
    }

    fn vibrate(&mut self, pattern: HapticPattern) {
        self.lock().push(Notification::Haptic(pattern));
    }
}
