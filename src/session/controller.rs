//! The game session.
//!
//! `Session` owns the roster, turn cursor, history, settings and timers of
//! one table, and is the only way they change. Every operation runs to
//! completion synchronously, then writes a full snapshot of each piece of
//! state to the store.
//!
//! ## Time
//!
//! The session keeps a logical millisecond clock. Delayed work (clearing the
//! recent life delta, spin steps, the turn countdown) is scheduled against
//! that clock and runs when `tick` moves it past the deadline. Nothing
//! happens between ticks, which keeps the session deterministic under test.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{GameRng, PlayerId, PlayerRecord, Settings, StatusKey, StatusValue};
use crate::error::{Error, Result};
use crate::history::{Change, ChangeRecord, GameHistory, HistorySink};
use crate::notify::{GameplaySound, HapticPattern, Notifier, BIG_COMMANDER_SWING, BIG_LIFE_SWING};
use crate::random::{self, CoinSide};
use crate::registry::{is_eliminated, Background, PlayerRegistry};
use crate::schedule::{Scheduler, SpinPlan, SpinStep, TimerTick, TurnTimer};
use crate::store::{self, KeyValueStore};
use crate::turn::{Direction, TurnCursor};

use super::builder::{Parts, SessionBuilder};
use super::options::{Confirm, ResetOptions, TimerKey, RESET_PROMPT};

/// Delay before a player's recent life delta is cleared.
pub const LIFE_DIFF_RESET_MS: u64 = 6000;

/// Turn countdown resolution.
pub const TURN_TIMER_TICK_MS: u64 = 1000;

/// Point-in-time copy of the observable state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub settings: Settings,
    pub players: PlayerRegistry,
    pub cursor: TurnCursor,
    pub history: GameHistory,
    pub now_ms: u64,
}

/// One table's game state.
pub struct Session {
    settings: Settings,
    players: PlayerRegistry,
    cursor: TurnCursor,
    history: GameHistory,
    scheduler: Scheduler<TimerKey>,
    spin: Option<SpinPlan>,
    turn_timer: TurnTimer,
    rng: GameRng,
    now_ms: u64,
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
}

impl Session {
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub(super) fn from_parts(parts: Parts) -> Self {
        Self {
            settings: parts.settings,
            players: parts.players,
            cursor: parts.cursor,
            history: parts.history,
            scheduler: parts.scheduler,
            spin: None,
            turn_timer: parts.turn_timer,
            rng: parts.rng,
            now_ms: 0,
            store: parts.store,
            notifier: parts.notifier,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(id)
    }

    #[must_use]
    pub fn cursor(&self) -> &TurnCursor {
        &self.cursor
    }

    #[must_use]
    pub fn current_turn(&self) -> Option<usize> {
        self.cursor.current_turn()
    }

    #[must_use]
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    #[must_use]
    pub fn turn_timer(&self) -> &TurnTimer {
        &self.turn_timer
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Earliest pending timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Whether `id` is out of the game. Unknown players are not.
    #[must_use]
    pub fn is_eliminated(&self, id: PlayerId) -> bool {
        self.players
            .get(id)
            .is_some_and(|p| is_eliminated(p, self.settings.allow_negative_life))
    }

    /// Active seats whose player is still in.
    #[must_use]
    pub fn living_seats(&self) -> Vec<usize> {
        self.players
            .living_seats(self.settings.player_count, self.settings.allow_negative_life)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            settings: self.settings.clone(),
            players: self.players.clone(),
            cursor: self.cursor.clone(),
            history: self.history.clone(),
            now_ms: self.now_ms,
        }
    }

    // === Settings ===

    /// Change settings. Out-of-range values are clamped, and life totals
    /// are pulled back inside the resulting bounds.
    pub fn update_settings(&mut self, apply: impl FnOnce(&mut Settings)) {
        let timer_was_enabled = self.settings.turn_timer_enabled;
        apply(&mut self.settings);
        self.settings.set_player_count(self.settings.player_count);
        self.settings.set_starting_life_total(self.settings.starting_life_total);
        self.settings
            .set_custom_starting_life_total(self.settings.custom_starting_life_total);

        self.players.clamp_life_totals(self.settings.allow_negative_life);
        match (timer_was_enabled, self.settings.turn_timer_enabled) {
            (true, false) => self.stop_turn_timer(),
            (false, true) => self.reset_turn_timer(),
            _ => {}
        }
        debug!(settings = ?self.settings, "settings updated");
        self.commit();
    }

    pub fn set_player_count(&mut self, count: usize) {
        self.update_settings(|s| s.player_count = count);
    }

    pub fn set_starting_life_total(&mut self, life: i32) {
        self.update_settings(|s| s.starting_life_total = life);
    }

    pub fn set_allow_negative_life(&mut self, allowed: bool) {
        self.update_settings(|s| s.allow_negative_life = allowed);
    }

    // === Profiles ===

    pub fn set_color(&mut self, id: PlayerId, color: impl Into<String>) -> bool {
        let changed = self.players.set_color(id, color);
        self.commit_if(changed)
    }

    pub fn set_name(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let changed = self.players.set_name(id, name);
        self.commit_if(changed)
    }

    pub fn set_background(&mut self, id: PlayerId, background: Background) -> bool {
        let changed = self.players.set_background(id, background);
        self.commit_if(changed)
    }

    /// Override the global negative-life permission for one player.
    pub fn set_negative_life_override(&mut self, id: PlayerId, allowed: Option<bool>) -> bool {
        let global = self.settings.allow_negative_life;
        let changed = self.players.set_negative_life_override(id, allowed, global);
        self.commit_if(changed)
    }

    // === Game state mutations ===

    pub fn adjust_life(&mut self, id: PlayerId, delta: i32) -> Option<ChangeRecord> {
        self.apply_change(id, |players, global| players.adjust_life(id, delta, global))
    }

    pub fn set_life(&mut self, id: PlayerId, value: i32) -> Option<ChangeRecord> {
        self.apply_change(id, |players, global| players.set_life(id, value, global))
    }

    pub fn set_poison(&mut self, id: PlayerId, value: i32) -> Option<ChangeRecord> {
        self.apply_change(id, |players, _| players.set_poison(id, value))
    }

    pub fn adjust_poison(&mut self, id: PlayerId, delta: i32) -> Option<ChangeRecord> {
        let current = self.players.get(id)?.poison;
        self.set_poison(id, current.saturating_add(delta))
    }

    pub fn set_status(
        &mut self,
        id: PlayerId,
        key: &StatusKey,
        value: StatusValue,
    ) -> Option<ChangeRecord> {
        self.apply_change(id, |players, _| players.set_status(id, key, value))
    }

    /// Flip a flag status.
    pub fn toggle_status(&mut self, id: PlayerId, key: &StatusKey) -> Option<ChangeRecord> {
        let set = self.players.get(id)?.status_effects.is_set(key);
        self.set_status(id, key, StatusValue::Flag(!set))
    }

    /// Add `delta` to a counter status.
    pub fn adjust_status(
        &mut self,
        id: PlayerId,
        key: &StatusKey,
        delta: i64,
    ) -> Option<ChangeRecord> {
        let current = self
            .players
            .get(id)?
            .status_effects
            .get(key)
            .map_or(0, StatusValue::as_count);
        self.set_status(id, key, StatusValue::Count(current.saturating_add(delta)))
    }

    pub fn clear_status(&mut self, id: PlayerId, key: &StatusKey) -> Option<ChangeRecord> {
        self.apply_change(id, |players, _| players.clear_status(id, key))
    }

    /// Set the damage `target` has taken from the commander at `source_seat`.
    pub fn set_commander_damage(
        &mut self,
        target: PlayerId,
        source_seat: usize,
        amount: i64,
    ) -> Option<ChangeRecord> {
        self.apply_change(target, |players, global| {
            players.set_commander_damage(target, source_seat, amount, global)
        })
    }

    pub fn adjust_commander_damage(
        &mut self,
        target: PlayerId,
        source_seat: usize,
        delta: i64,
    ) -> Option<ChangeRecord> {
        let current = i64::from(self.players.get(target)?.commander_damage_from(source_seat));
        self.set_commander_damage(target, source_seat, current.saturating_add(delta))
    }

    pub fn remove_first_place(&mut self) {
        self.players.remove_first_place();
        self.commit();
    }

    fn apply_change(
        &mut self,
        id: PlayerId,
        mutate: impl FnOnce(&mut PlayerRegistry, bool) -> Option<ChangeRecord>,
    ) -> Option<ChangeRecord> {
        let global = self.settings.allow_negative_life;
        let was_out = self.is_eliminated(id);
        let record = mutate(&mut self.players, global)?;
        debug!(player = %id, change = ?record.change, "player changed");

        if record.change.life_delta() != 0 {
            self.scheduler
                .schedule(TimerKey::LifeDiff(id), self.now_ms + LIFE_DIFF_RESET_MS);
        }
        if let Some(sound) = swing_sound(&record.change) {
            self.play(sound);
        }
        if !was_out && self.is_eliminated(id) {
            self.on_eliminated(id);
        }

        self.history.record(record.clone(), self.now_ms);
        self.commit();
        Some(record)
    }

    fn on_eliminated(&mut self, id: PlayerId) {
        let active = self
            .players
            .seat_of(id)
            .is_some_and(|seat| seat < self.settings.player_count);
        info!(player = %id, active, "player eliminated");
        if !active {
            return;
        }

        self.play(GameplaySound::Ko);
        self.vibrate(HapticPattern::Error);
        if let [winner] = self.living_seats().as_slice() {
            info!(seat = *winner, "one player left standing");
            self.play(GameplaySound::Victory);
            self.vibrate(HapticPattern::Confirm);
        }
    }

    // === Turns ===

    /// Pass the turn to the next living seat.
    pub fn next_turn(&mut self) -> Option<usize> {
        self.step_turn(Direction::Forward)
    }

    /// Hand the turn back to the previous living seat.
    pub fn prev_turn(&mut self) -> Option<usize> {
        self.step_turn(Direction::Backward)
    }

    fn step_turn(&mut self, direction: Direction) -> Option<usize> {
        let allow = self.settings.allow_negative_life;
        let players = &self.players;
        let seat = self.cursor.advance(direction, self.settings.player_count, |seat| {
            players.is_seat_eliminated(seat, allow)
        });
        if seat.is_none() {
            debug!(?direction, "no living player to take the turn");
        }
        self.after_cursor_move();
        seat
    }

    /// Put the turn on `seat` directly (or clear it).
    pub fn set_current_turn(&mut self, seat: Option<usize>) {
        self.cursor.set_current_turn(seat, true);
        self.after_cursor_move();
    }

    fn after_cursor_move(&mut self) {
        if self.settings.turn_timer_enabled {
            self.reset_turn_timer();
        }
        self.commit();
    }

    // === Turn timer ===

    /// Start the countdown for `seat` at the configured length.
    pub fn start_turn_timer(&mut self, seat: usize) {
        self.turn_timer.start(seat, self.settings.turn_timer_seconds());
        self.scheduler
            .schedule(TimerKey::TurnTimer, self.now_ms + TURN_TIMER_TICK_MS);
    }

    pub fn stop_turn_timer(&mut self) {
        self.turn_timer.stop();
        self.scheduler.cancel(&TimerKey::TurnTimer);
    }

    /// Restart the countdown for the current seat, or stop it if no one has
    /// the turn.
    pub fn reset_turn_timer(&mut self) {
        match self.cursor.current_turn() {
            Some(seat) => self.start_turn_timer(seat),
            None => self.stop_turn_timer(),
        }
    }

    fn on_turn_timer_tick(&mut self) {
        match self.turn_timer.tick_second() {
            TimerTick::Running { .. } => {
                self.scheduler
                    .schedule(TimerKey::TurnTimer, self.now_ms + TURN_TIMER_TICK_MS);
            }
            TimerTick::Expired => {
                info!(seat = ?self.turn_timer.seat(), "turn timer expired");
                self.vibrate(HapticPattern::Long);
                if self.settings.turn_timer_sound {
                    self.notifier.play(GameplaySound::TimerExpired);
                }
            }
            TimerTick::Idle => {}
        }
    }

    // === Spin to select ===

    /// Start spinning for a first player. The first seat is highlighted
    /// immediately; the rest of the spin runs on `tick`.
    pub fn begin_spin(&mut self) -> Result<()> {
        if self.spin.is_some() {
            return Err(Error::SpinInProgress);
        }
        let seats = self.settings.player_count.min(self.players.len());
        if seats == 0 {
            return Err(Error::NoActiveGame);
        }

        self.players.remove_first_place();
        self.spin = Some(SpinPlan::new(seats, &mut self.rng));
        debug!(seats, "spin started");
        self.step_spin();
        Ok(())
    }

    fn step_spin(&mut self) {
        let Some(step) = self.spin.as_mut().and_then(SpinPlan::next_step) else {
            self.spin = None;
            return;
        };
        match step {
            SpinStep::Highlight { seat, wait_ms } => {
                self.players.highlight_seat(Some(seat));
                self.vibrate(HapticPattern::Tap);
                self.scheduler.schedule(TimerKey::Spin, self.now_ms + wait_ms);
                self.commit();
            }
            SpinStep::Land { seat } => {
                self.spin = None;
                self.land_first_player(seat);
            }
        }
    }

    /// Make `seat` the first player and restart turn counting there.
    pub fn land_first_player(&mut self, seat: usize) {
        self.players.land_first(seat);
        self.cursor.clear();
        self.cursor.set_current_turn(Some(seat), true);
        info!(seat, "first player selected");
        self.vibrate(HapticPattern::Confirm);
        self.after_cursor_move();
    }

    // === Reset ===

    /// Start a new game.
    ///
    /// Unless the options say it is already confirmed, `confirm` is asked
    /// first; declining leaves everything as it was. Returns whether the
    /// reset happened.
    pub fn reset_game(&mut self, options: ResetOptions, mut confirm: impl Confirm) -> bool {
        if !options.already_confirmed && !confirm.confirm(RESET_PROMPT) {
            debug!("reset declined");
            return false;
        }

        self.scheduler
            .cancel_where(|key| matches!(key, TimerKey::LifeDiff(_) | TimerKey::Spin));
        self.spin = None;
        self.stop_turn_timer();

        let count = self.settings.player_count;
        self.players
            .reset(self.settings.starting_life_total, options.clear_profiles);
        if options.shuffle_seats {
            self.players.shuffle_seats(count, &mut self.rng);
        }
        self.cursor.clear();
        if options.assign_roles {
            match random::deal_roles(count, &mut self.rng) {
                Some(roles) => self.players.assign_roles(&roles),
                None => debug!(count, "no role deal for this table size"),
            }
        }
        info!(?options, starting_life = self.settings.starting_life_total, "game reset");
        self.commit();

        if options.spin_for_first {
            if let Err(error) = self.begin_spin() {
                warn!(%error, "could not spin for first player");
            }
        }
        true
    }

    // === Randomizers ===

    pub fn roll_die(&mut self, sides: u32) -> Option<u32> {
        let roll = random::roll_die(&mut self.rng, sides);
        self.commit();
        roll
    }

    pub fn flip_coin(&mut self) -> CoinSide {
        let side = random::flip_coin(&mut self.rng);
        self.commit();
        side
    }

    /// Pick one of the living active players.
    pub fn pick_random_player(&mut self) -> Option<PlayerId> {
        let seats = self.living_seats();
        let seat = random::pick_seat(&mut self.rng, &seats);
        self.commit();
        self.players.at_seat(seat?).map(|p| p.id)
    }

    /// Roll `1..=custom_random_number`. `None` when no bound is configured.
    pub fn roll_custom_number(&mut self) -> Option<u32> {
        self.roll_die(self.settings.custom_random_number)
    }

    // === History ===

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.commit();
    }

    // === Clock ===

    /// Move the clock to `now_ms`, firing every timer due by then in
    /// deadline order. The clock never moves backwards.
    pub fn tick(&mut self, now_ms: u64) {
        while let Some((key, at)) = self.scheduler.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(at);
            self.fire(key);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Move the clock forward by `elapsed_ms`.
    pub fn advance_time(&mut self, elapsed_ms: u64) {
        self.tick(self.now_ms.saturating_add(elapsed_ms));
    }

    fn fire(&mut self, key: TimerKey) {
        match key {
            TimerKey::LifeDiff(id) => {
                let cleared = self.players.clear_temp_life_diff(id);
                self.commit_if(cleared);
            }
            TimerKey::Spin => self.step_spin(),
            TimerKey::TurnTimer => self.on_turn_timer_tick(),
        }
    }

    // === Persistence ===

    /// Write every piece of state to the store.
    pub fn persist(&mut self) -> Result<()> {
        store::save(self.store.as_mut(), store::PLAYERS_KEY, &self.players)?;
        store::save(self.store.as_mut(), store::SETTINGS_KEY, &self.settings)?;
        store::save(self.store.as_mut(), store::APP_STATE_KEY, &self.cursor)?;
        store::save(self.store.as_mut(), store::HISTORY_KEY, &self.history)?;
        store::save(self.store.as_mut(), store::RNG_KEY, &self.rng.state())?;
        Ok(())
    }

    fn commit(&mut self) {
        if let Err(error) = self.persist() {
            warn!(%error, "failed to persist session");
        }
    }

    fn commit_if(&mut self, changed: bool) -> bool {
        if changed {
            self.commit();
        }
        changed
    }

    fn play(&mut self, sound: GameplaySound) {
        if self.settings.sounds_enabled {
            self.notifier.play(sound);
        }
    }

    fn vibrate(&mut self, pattern: HapticPattern) {
        if self.settings.haptics_enabled {
            self.notifier.vibrate(pattern);
        }
    }
}

/// Sound for a large swing, if the change is one.
fn swing_sound(change: &Change) -> Option<GameplaySound> {
    match *change {
        Change::Life { from, to } => {
            let delta = to - from;
            if delta >= BIG_LIFE_SWING {
                Some(GameplaySound::BigLifeUp)
            } else if delta <= -BIG_LIFE_SWING {
                Some(GameplaySound::BigLifeDown)
            } else {
                None
            }
        }
        Change::CommanderDamage { from, to, .. } => {
            let delta = i64::from(to) - i64::from(from);
            if delta >= BIG_COMMANDER_SWING {
                Some(GameplaySound::BigCommanderUp)
            } else if delta <= -BIG_COMMANDER_SWING {
                Some(GameplaySound::BigCommanderDown)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notification, NotificationLog};
    use crate::store::MemoryStore;

    fn p(id: u32) -> PlayerId {
        PlayerId::new(id)
    }

    fn session() -> Session {
        Session::builder().seed(42).build()
    }

    fn with_log() -> (Session, NotificationLog) {
        let log = NotificationLog::new();
        let session = Session::builder().seed(42).notifier(log.clone()).build();
        (session, log)
    }

    fn yes(_: &str) -> bool {
        true
    }

    #[test]
    fn test_default_session() {
        let session = session();
        assert_eq!(session.settings().player_count, 4);
        assert_eq!(session.players().len(), 6);
        assert_eq!(session.current_turn(), None);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_life_change_is_recorded() {
        let mut session = session();
        session.advance_time(250);

        let record = session.adjust_life(p(1), -3).unwrap();
        assert_eq!(record.change, Change::Life { from: 40, to: 37 });

        let entry = session.history().last().unwrap();
        assert_eq!(entry.timestamp, 250);
        assert_eq!(entry.record.player_id, p(1));
    }

    #[test]
    fn test_noop_records_nothing() {
        let mut session = session();
        assert!(session.set_poison(p(1), 0).is_none());
        assert!(session.adjust_life(p(42), 5).is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_life_diff_is_debounced() {
        let mut session = session();

        session.adjust_life(p(1), -2);
        session.advance_time(4000);
        session.adjust_life(p(1), -3);
        assert_eq!(session.player(p(1)).unwrap().temp_life_diff, -5);

        // The first deadline was replaced by the second.
        session.advance_time(3000);
        assert_eq!(session.player(p(1)).unwrap().temp_life_diff, -5);

        session.advance_time(3000);
        assert_eq!(session.player(p(1)).unwrap().temp_life_diff, 0);
    }

    #[test]
    fn test_life_diff_timers_are_per_player() {
        let mut session = session();
        session.adjust_life(p(1), -2);
        session.advance_time(3000);
        session.adjust_life(p(2), 4);

        session.advance_time(3000);
        assert_eq!(session.player(p(1)).unwrap().temp_life_diff, 0);
        assert_eq!(session.player(p(2)).unwrap().temp_life_diff, 4);
    }

    #[test]
    fn test_big_swings_play_sounds() {
        let (mut session, log) = with_log();

        session.adjust_life(p(1), -10);
        session.adjust_life(p(1), 12);
        session.adjust_life(p(1), -9);
        session.set_commander_damage(p(2), 0, 5);

        assert_eq!(
            log.drain(),
            vec![
                Notification::Sound(GameplaySound::BigLifeDown),
                Notification::Sound(GameplaySound::BigLifeUp),
                Notification::Sound(GameplaySound::BigCommanderUp),
            ]
        );
    }

    #[test]
    fn test_sounds_can_be_disabled() {
        let (mut session, log) = with_log();
        session.update_settings(|s| {
            s.sounds_enabled = false;
            s.haptics_enabled = false;
        });

        session.set_life(p(1), 0);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_elimination_and_victory() {
        let (mut session, log) = with_log();
        session.set_player_count(2);

        session.set_poison(p(2), 10);

        assert!(session.is_eliminated(p(2)));
        assert_eq!(
            log.drain(),
            vec![
                Notification::Sound(GameplaySound::Ko),
                Notification::Haptic(HapticPattern::Error),
                Notification::Sound(GameplaySound::Victory),
                Notification::Haptic(HapticPattern::Confirm),
            ]
        );

        // Already out: no second knockout.
        session.set_poison(p(2), 11);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_inactive_seat_elimination_is_quiet() {
        let (mut session, log) = with_log();
        session.set_life(p(6), 0);
        assert!(session.is_eliminated(p(6)));
        assert!(!log.contains(Notification::Sound(GameplaySound::Ko)));
    }

    #[test]
    fn test_turns_skip_eliminated() {
        let mut session = session();
        session.set_current_turn(Some(0));
        session.set_life(p(2), 0);

        assert_eq!(session.next_turn(), Some(2));
        assert_eq!(session.prev_turn(), Some(0));
        assert_eq!(session.player(p(2)).unwrap().life_total, 0);
    }

    #[test]
    fn test_everyone_out_clears_turn() {
        let mut session = session();
        session.set_current_turn(Some(1));
        for id in 1..=4 {
            session.set_status(p(id), &StatusKey::Knockout, StatusValue::Flag(true));
        }

        assert_eq!(session.next_turn(), None);
        assert_eq!(session.current_turn(), None);
    }

    #[test]
    fn test_turn_timer_follows_cursor() {
        let (mut session, log) = with_log();
        session.update_settings(|s| {
            s.turn_timer_enabled = true;
            s.turn_timer_duration = 3;
            s.turn_timer_sound = true;
        });

        session.next_turn();
        assert!(session.turn_timer().is_running());
        assert_eq!(session.turn_timer().seat(), Some(0));

        session.advance_time(2000);
        assert_eq!(session.turn_timer().remaining(), 1);

        // Passing the turn restarts the countdown.
        session.next_turn();
        assert_eq!(session.turn_timer().remaining(), 3);
        assert_eq!(session.turn_timer().seat(), Some(1));

        session.advance_time(3000);
        assert!(!session.turn_timer().is_running());
        assert!(log.contains(Notification::Haptic(HapticPattern::Long)));
        assert!(log.contains(Notification::Sound(GameplaySound::TimerExpired)));
    }

    #[test]
    fn test_timer_sound_needs_its_own_toggle() {
        let (mut session, log) = with_log();
        session.update_settings(|s| {
            s.turn_timer_enabled = true;
            s.turn_timer_duration = 1;
        });
        session.next_turn();
        session.advance_time(1000);

        assert!(log.contains(Notification::Haptic(HapticPattern::Long)));
        assert!(!log.contains(Notification::Sound(GameplaySound::TimerExpired)));
    }

    #[test]
    fn test_disabling_timer_stops_it() {
        let mut session = session();
        session.update_settings(|s| s.turn_timer_enabled = true);
        session.next_turn();
        assert!(session.turn_timer().is_running());

        session.update_settings(|s| s.turn_timer_enabled = false);
        assert!(!session.turn_timer().is_running());
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn test_spin_lands_and_seeds_cursor() {
        let mut session = session();
        session.set_current_turn(Some(3));

        session.begin_spin().unwrap();
        assert!(session.is_spinning());
        assert_eq!(session.players().at_seat(0).map(|pl| pl.highlighted), Some(true));
        assert!(matches!(session.begin_spin(), Err(Error::SpinInProgress)));

        session.advance_time(60_000);

        assert!(!session.is_spinning());
        let first: Vec<_> = session
            .players()
            .iter()
            .enumerate()
            .filter(|(_, pl)| pl.is_first)
            .map(|(seat, _)| seat)
            .collect();
        assert_eq!(first.len(), 1);
        assert_eq!(session.current_turn(), Some(first[0]));
        assert_eq!(session.cursor().starting_player_index(), Some(first[0]));
        assert_eq!(session.cursor().turn_count(), 1);
        assert!(session.players().iter().all(|pl| !pl.highlighted));
    }

    #[test]
    fn test_spin_taps_each_highlight() {
        let (mut session, log) = with_log();

        session.begin_spin().unwrap();
        session.advance_time(60_000);

        let haptics = log.drain();
        let (landing, highlights) = haptics.split_last().unwrap();
        assert_eq!(*landing, Notification::Haptic(HapticPattern::Confirm));
        assert!(highlights.len() >= 4 * session.settings().player_count);
        assert!(highlights
            .iter()
            .all(|n| *n == Notification::Haptic(HapticPattern::Tap)));
    }

    #[test]
    fn test_declined_reset_changes_nothing() {
        let mut session = session();
        session.adjust_life(p(1), -5);
        let before = session.snapshot();

        let mut asked = 0;
        let reset = session.reset_game(ResetOptions::default(), |_: &str| {
            asked += 1;
            false
        });

        assert!(!reset);
        assert_eq!(asked, 1);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_reset_restores_life_and_cancels_timers() {
        let mut session = session();
        session.set_name(p(1), "Kenrith");
        session.adjust_life(p(1), -5);
        session.set_poison(p(2), 3);
        session.set_current_turn(Some(2));

        assert!(session.reset_game(ResetOptions::default().without_spin(), yes));

        let player = session.player(p(1)).unwrap();
        assert_eq!(player.life_total, 40);
        assert_eq!(player.temp_life_diff, 0);
        assert_eq!(player.player_name, "Kenrith");
        assert_eq!(session.player(p(2)).unwrap().poison, 0);
        assert_eq!(session.current_turn(), None);
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn test_confirmed_reset_skips_prompt() {
        let mut session = session();
        let options = ResetOptions::default().confirmed().without_spin();
        let reset = session.reset_game(options, |_: &str| -> bool { panic!("should not ask") });
        assert!(reset);
    }

    #[test]
    fn test_reset_with_roles_and_spin() {
        let mut session = session();
        session.reset_game(ResetOptions::default().with_roles(), yes);

        assert!(session.is_spinning());
        let dealt = session.players().active(4).filter(|pl| pl.role.is_some()).count();
        assert_eq!(dealt, 4);
        assert!(session.players().at_seat(4).unwrap().role.is_none());
    }

    #[test]
    fn test_reset_cancels_running_spin() {
        let mut session = session();
        session.begin_spin().unwrap();
        session.reset_game(ResetOptions::default().without_spin(), yes);

        assert!(!session.is_spinning());
        assert!(session.players().iter().all(|pl| !pl.highlighted));
    }

    #[test]
    fn test_negative_life_setting_clamps() {
        let mut session = session();
        session.set_allow_negative_life(true);
        session.set_life(p(1), -7);
        assert_eq!(session.player(p(1)).unwrap().life_total, -7);

        session.set_allow_negative_life(false);
        assert_eq!(session.player(p(1)).unwrap().life_total, 0);
    }

    #[test]
    fn test_player_count_is_sanitized() {
        let mut session = session();
        session.set_player_count(0);
        assert_eq!(session.settings().player_count, 2);
        session.set_player_count(12);
        assert_eq!(session.settings().player_count, 6);
    }

    #[test]
    fn test_status_helpers() {
        let mut session = session();

        session.toggle_status(p(1), &StatusKey::Monarch);
        assert!(session.player(p(1)).unwrap().status_effects.monarch);
        session.toggle_status(p(1), &StatusKey::Monarch);
        assert!(!session.player(p(1)).unwrap().status_effects.monarch);

        session.adjust_status(p(1), &StatusKey::Energy, 3);
        session.adjust_status(p(1), &StatusKey::Energy, -1);
        assert_eq!(session.player(p(1)).unwrap().status_effects.energy, 2);
    }

    #[test]
    fn test_commander_damage_adjust() {
        let mut session = session();
        session.adjust_commander_damage(p(1), 2, 4);
        session.adjust_commander_damage(p(1), 2, 3);

        let player = session.player(p(1)).unwrap();
        assert_eq!(player.commander_damage_from(2), 7);
        assert_eq!(player.life_total, 33);
    }

    #[test]
    fn test_randomizers() {
        let mut session = session();
        assert_eq!(session.roll_custom_number(), None);

        session.update_settings(|s| s.custom_random_number = 3);
        let roll = session.roll_custom_number().unwrap();
        assert!((1..=3).contains(&roll));

        session.set_life(p(1), 0);
        for _ in 0..20 {
            let picked = session.pick_random_player().unwrap();
            assert_ne!(picked, p(1));
            assert!(picked.raw() <= 4);
        }
    }

    #[test]
    fn test_changes_are_persisted() {
        let store = MemoryStore::new();
        let mut session = Session::builder().store(store.clone()).seed(1).build();

        session.adjust_life(p(3), -4);

        let players: PlayerRegistry = store::load(&store, store::PLAYERS_KEY).unwrap();
        assert_eq!(players.get(p(3)).unwrap().life_total, 36);
        let history: GameHistory = store::load(&store, store::HISTORY_KEY).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_clear_history() {
        let mut session = session();
        session.adjust_life(p(1), 1);
        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_clock_never_goes_back() {
        let mut session = session();
        session.tick(500);
        session.tick(100);
        assert_eq!(session.now_ms(), 500);
    }
}
