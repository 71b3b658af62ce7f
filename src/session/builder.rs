//! Session construction and restoring state from the store.

use tracing::debug;

use crate::core::{GameRng, GameRngState, Settings};
use crate::history::GameHistory;
use crate::notify::{Notifier, NullNotifier};
use crate::registry::PlayerRegistry;
use crate::schedule::{Scheduler, TurnTimer};
use crate::store::{self, KeyValueStore, MemoryStore};
use crate::turn::TurnCursor;

use super::controller::{Session, LIFE_DIFF_RESET_MS};
use super::options::TimerKey;

/// Builder for creating a Session.
///
/// State not provided here is read from the store; anything missing or
/// unreadable there falls back to defaults.
#[derive(Default)]
pub struct SessionBuilder {
    store: Option<Box<dyn KeyValueStore>>,
    notifier: Option<Box<dyn Notifier>>,
    settings: Option<Settings>,
    seed: Option<u64>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Use these settings instead of the stored ones.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Seed the RNG instead of restoring it.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the session.
    pub fn build(self) -> Session {
        let store = self.store.unwrap_or_else(|| Box::new(MemoryStore::new()));
        let notifier = self.notifier.unwrap_or_else(|| Box::new(NullNotifier));

        let mut settings = self
            .settings
            .or_else(|| store::load(store.as_ref(), store::SETTINGS_KEY))
            .unwrap_or_default();
        settings.set_player_count(settings.player_count);
        settings.set_starting_life_total(settings.starting_life_total);

        let mut players = store::load::<PlayerRegistry>(store.as_ref(), store::PLAYERS_KEY)
            .filter(|registry| !registry.is_empty())
            .unwrap_or_else(|| PlayerRegistry::new(settings.starting_life_total));
        players.fill_roster(settings.starting_life_total);
        players.clamp_life_totals(settings.allow_negative_life);

        let cursor = store::load(store.as_ref(), store::APP_STATE_KEY).unwrap_or_default();
        let history = store::load(store.as_ref(), store::HISTORY_KEY).unwrap_or_default();

        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => store::load::<GameRngState>(store.as_ref(), store::RNG_KEY)
                .map_or_else(GameRng::from_entropy, |state| GameRng::from_state(&state)),
        };

        // A restored recent delta fades like a fresh one.
        let mut scheduler = Scheduler::new();
        for player in players.iter().filter(|p| p.temp_life_diff != 0) {
            scheduler.schedule(TimerKey::LifeDiff(player.id), LIFE_DIFF_RESET_MS);
        }

        debug!(
            player_count = settings.player_count,
            roster = players.len(),
            "session restored"
        );

        Session::from_parts(Parts {
            settings,
            players,
            cursor,
            history,
            scheduler,
            turn_timer: TurnTimer::new(),
            rng,
            store,
            notifier,
        })
    }
}

/// Everything a session owns at construction.
pub(super) struct Parts {
    pub settings: Settings,
    pub players: PlayerRegistry,
    pub cursor: TurnCursor,
    pub history: GameHistory,
    pub scheduler: Scheduler<TimerKey>,
    pub turn_timer: TurnTimer,
    pub rng: GameRng,
    pub store: Box<dyn KeyValueStore>,
    pub notifier: Box<dyn Notifier>,
}
