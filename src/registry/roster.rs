//! Player registry.
//!
//! Ordered roster of player records. Position in the roster is the seat;
//! the first `player_count` seats take turns. Records live in an `im::Vector`,
//! so a clone taken before a mutation is a snapshot that later mutations
//! never touch.
//!
//! Every mutation addresses a player by id. Unknown ids are silent no-ops.
//! Numeric inputs are clamped, never rejected. Mutations that change life,
//! poison, status or commander damage return a `ChangeRecord` for the
//! history log; `None` means nothing changed.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    GameRng, PlayerId, PlayerRecord, StatusKey, StatusValue, COMMANDER_DAMAGE_MAX, MAX_PLAYERS,
    POISON_MAX,
};
use crate::history::{Change, ChangeRecord};
use crate::random::roles::Role;

use super::elimination::is_eliminated;

/// Cosmetic background chosen for a seat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Background {
    pub image: Option<String>,
    pub artist: Option<String>,
    pub set: Option<String>,
}

/// The roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerRegistry {
    players: Vector<PlayerRecord>,
}

impl PlayerRegistry {
    /// Full roster of `MAX_PLAYERS` records at `starting_life`.
    #[must_use]
    pub fn new(starting_life: i32) -> Self {
        Self {
            players: PlayerId::roster().map(|id| PlayerRecord::new(id, starting_life)).collect(),
        }
    }

    /// Roster restored from saved records, in seat order.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        Self {
            players: records.into_iter().collect(),
        }
    }

    /// Append a fresh record for every roster id that has none, so a
    /// partial saved roster still seats `MAX_PLAYERS` players.
    pub fn fill_roster(&mut self, starting_life: i32) {
        for id in PlayerId::roster() {
            if self.seat_of(id).is_none() {
                debug!(%id, "adding missing player to restored roster");
                self.players.push_back(PlayerRecord::new(id, starting_life));
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Records in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    /// The first `player_count` seats.
    pub fn active(&self, player_count: usize) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().take(player_count)
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn at_seat(&self, seat: usize) -> Option<&PlayerRecord> {
        self.players.get(seat)
    }

    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Whether the player at `seat` is out. Empty seats count as out.
    #[must_use]
    pub fn is_seat_eliminated(&self, seat: usize, allow_negative_life: bool) -> bool {
        self.at_seat(seat).map_or(true, |p| is_eliminated(p, allow_negative_life))
    }

    /// Seats among the first `player_count` whose player is still in.
    #[must_use]
    pub fn living_seats(&self, player_count: usize, allow_negative_life: bool) -> Vec<usize> {
        (0..player_count)
            .filter(|&seat| !self.is_seat_eliminated(seat, allow_negative_life))
            .collect()
    }

    fn update<R>(&mut self, id: PlayerId, apply: impl FnOnce(&mut PlayerRecord) -> R) -> Option<R> {
        let Some(seat) = self.seat_of(id) else {
            debug!(%id, "ignoring update for unknown player");
            return None;
        };
        self.players.get_mut(seat).map(apply)
    }

    pub fn set_color(&mut self, id: PlayerId, color: impl Into<String>) -> bool {
        let color = color.into();
        self.update(id, |p| p.color = color).is_some()
    }

    pub fn set_name(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update(id, |p| p.player_name = name).is_some()
    }

    pub fn set_background(&mut self, id: PlayerId, background: Background) -> bool {
        self.update(id, |p| {
            p.background_image = background.image;
            p.background_artist = background.artist;
            p.background_set = background.set;
        })
        .is_some()
    }

    /// Set or remove the per-player negative-life override. Life is clamped
    /// to the bounds that result.
    pub fn set_negative_life_override(
        &mut self,
        id: PlayerId,
        allowed: Option<bool>,
        globally_allowed: bool,
    ) -> bool {
        self.update(id, |p| {
            p.allow_negative_life = allowed;
            p.life_total = p.life_bounds(globally_allowed).clamp(p.life_total);
        })
        .is_some()
    }

    /// Pull every life total back inside its bounds.
    pub fn clamp_life_totals(&mut self, globally_allowed: bool) {
        for player in self.players.iter_mut() {
            player.life_total = player.life_bounds(globally_allowed).clamp(player.life_total);
        }
    }

    /// Change life by `delta`.
    pub fn adjust_life(
        &mut self,
        id: PlayerId,
        delta: i32,
        globally_allowed: bool,
    ) -> Option<ChangeRecord> {
        let current = self.get(id)?.life_total;
        self.set_life(id, current.saturating_add(delta), globally_allowed)
    }

    /// Set life to `value`, clamped. The applied delta accumulates in
    /// `temp_life_diff`.
    pub fn set_life(
        &mut self,
        id: PlayerId,
        value: i32,
        globally_allowed: bool,
    ) -> Option<ChangeRecord> {
        self.update(id, |p| {
            let from = p.life_total;
            let to = p.life_bounds(globally_allowed).clamp(value);
            if from == to {
                return None;
            }
            p.life_total = to;
            p.temp_life_diff += to - from;
            Some(ChangeRecord::new(p.id, p.player_name.clone(), Change::Life { from, to }))
        })
        .flatten()
    }

    /// Zero the recent-delta indicator.
    pub fn clear_temp_life_diff(&mut self, id: PlayerId) -> bool {
        self.update(id, |p| p.temp_life_diff = 0).is_some()
    }

    pub fn set_poison(&mut self, id: PlayerId, value: i32) -> Option<ChangeRecord> {
        self.update(id, |p| {
            let from = p.poison;
            let to = value.clamp(0, POISON_MAX);
            if from == to {
                return None;
            }
            p.poison = to;
            Some(ChangeRecord::new(p.id, p.player_name.clone(), Change::Poison { from, to }))
        })
        .flatten()
    }

    /// Set a status effect.
    ///
    /// Setting a unique flag clears it on every other player. Changing the
    /// knockout flag updates `is_dead`.
    pub fn set_status(
        &mut self,
        id: PlayerId,
        key: &StatusKey,
        value: StatusValue,
    ) -> Option<ChangeRecord> {
        let record = self
            .update(id, |p| {
                let before = p.status_effects.get(key);
                let after = p.status_effects.set(key, value);
                if key == &StatusKey::Knockout {
                    p.is_dead = after.as_bool();
                }
                (before != Some(after)).then(|| status_change(p, key, before, after))
            })
            .flatten();

        if key.is_unique() && value.as_bool() && self.get(id).is_some() {
            for other in self.players.iter_mut().filter(|p| p.id != id) {
                other.status_effects.clear(key);
            }
        }
        record
    }

    /// Reset a status effect to its default (custom keys are removed).
    pub fn clear_status(&mut self, id: PlayerId, key: &StatusKey) -> Option<ChangeRecord> {
        self.update(id, |p| {
            let before = p.status_effects.get(key);
            p.status_effects.clear(key);
            if key == &StatusKey::Knockout {
                p.is_dead = false;
            }
            let after = p.status_effects.get(key);
            match (before, after) {
                (Some(before), None) => {
                    let cleared = match before {
                        StatusValue::Flag(_) => StatusValue::Flag(false),
                        StatusValue::Count(_) => StatusValue::Count(0),
                    };
                    Some(status_change(p, key, Some(before), cleared))
                }
                (before, Some(after)) if before != Some(after) => {
                    Some(status_change(p, key, before, after))
                }
                _ => None,
            }
        })
        .flatten()
    }

    /// Record commander damage dealt to `target` by the commander at
    /// `source_seat`. The slot is clamped to `[0, 999]` and the change in
    /// the slot is taken off (or given back to) the life total.
    ///
    /// Damage that cost no life because life was already at its floor is
    /// remembered per slot, and lowering the slot gives back only the life
    /// the slot actually took.
    pub fn set_commander_damage(
        &mut self,
        target: PlayerId,
        source_seat: usize,
        amount: i64,
        globally_allowed: bool,
    ) -> Option<ChangeRecord> {
        if source_seat >= MAX_PLAYERS {
            debug!(%target, source_seat, "ignoring commander damage from invalid seat");
            return None;
        }
        let from_player_id = self.at_seat(source_seat)?.id;

        self.update(target, |p| {
            if p.commander_damage.len() <= source_seat {
                p.commander_damage.resize(source_seat + 1, 0);
            }
            let from = p.commander_damage[source_seat];
            // Clamped into 0..=999, so the cast is lossless.
            let to = amount.clamp(0, i64::from(COMMANDER_DAMAGE_MAX)) as u32;
            if from == to {
                return None;
            }
            p.commander_damage[source_seat] = to;
            if p.commander_damage_absorbed.len() <= source_seat {
                p.commander_damage_absorbed.resize(source_seat + 1, 0);
            }

            let bounds = p.life_bounds(globally_allowed);
            let life_before = p.life_total;
            let absorbed = &mut p.commander_damage_absorbed[source_seat];
            if to > from {
                let dealt = to - from;
                p.life_total = bounds.clamp(life_before.saturating_sub(dealt as i32));
                let lost = u32::try_from(life_before - p.life_total).unwrap_or(0);
                *absorbed += dealt.saturating_sub(lost);
            } else {
                let healed = from - to;
                let used = healed.min(*absorbed);
                *absorbed -= used;
                p.life_total = bounds.clamp(life_before.saturating_add((healed - used) as i32));
            }
            let life_delta = p.life_total - life_before;
            p.temp_life_diff += life_delta;

            Some(ChangeRecord::new(
                p.id,
                p.player_name.clone(),
                Change::CommanderDamage {
                    from_player_id,
                    from,
                    to,
                    life_delta,
                },
            ))
        })
        .flatten()
    }

    /// Clear `is_first` on every player.
    pub fn remove_first_place(&mut self) {
        for player in self.players.iter_mut() {
            player.is_first = false;
        }
    }

    /// Highlight exactly one seat (or none).
    pub fn highlight_seat(&mut self, seat: Option<usize>) {
        for (index, player) in self.players.iter_mut().enumerate() {
            player.highlighted = Some(index) == seat;
        }
    }

    /// Finish a first-player selection: `seat` becomes first, highlights and
    /// the cached `is_dead` flag clear everywhere.
    pub fn land_first(&mut self, seat: usize) {
        for (index, player) in self.players.iter_mut().enumerate() {
            player.is_first = index == seat;
            player.highlighted = false;
            player.is_dead = false;
        }
    }

    /// Reinitialize game state for every player. Profiles survive unless
    /// `clear_profiles` is set.
    pub fn reset(&mut self, starting_life: i32, clear_profiles: bool) {
        for player in self.players.iter_mut() {
            player.life_total = starting_life;
            player.temp_life_diff = 0;
            player.poison = 0;
            player.commander_damage = SmallVec::new();
            player.commander_damage_absorbed = SmallVec::new();
            player.status_effects = Default::default();
            player.role = None;
            player.is_first = false;
            player.highlighted = false;
            player.is_dead = false;
            if clear_profiles {
                player.clear_profile();
            }
        }
        debug!(starting_life, clear_profiles, "roster reset");
    }

    /// Shuffle the seat order of the first `player_count` seats.
    pub fn shuffle_seats(&mut self, player_count: usize, rng: &mut GameRng) {
        let count = player_count.min(self.players.len());
        let mut seats: Vec<PlayerRecord> = self.players.iter().take(count).cloned().collect();
        rng.shuffle(&mut seats);
        for (seat, record) in seats.into_iter().enumerate() {
            self.players.set(seat, record);
        }
    }

    /// Give seat `i` the role `roles[i]`.
    pub fn assign_roles(&mut self, roles: &[Role]) {
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = Some(*role);
        }
    }
}

fn status_change(
    player: &PlayerRecord,
    key: &StatusKey,
    before: Option<StatusValue>,
    after: StatusValue,
) -> ChangeRecord {
    let change = match after {
        StatusValue::Flag(to) => Change::StatusBoolean {
            key: key.clone(),
            from: before.is_some_and(StatusValue::as_bool),
            to,
        },
        StatusValue::Count(to) => Change::StatusNumeric {
            key: key.clone(),
            from: before.map_or(0, StatusValue::as_count),
            to,
        },
    };
    ChangeRecord::new(player.id, player.player_name.clone(), change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ChangeKind;

    fn p(id: u32) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_new_roster() {
        let registry = PlayerRegistry::new(40);

        assert_eq!(registry.len(), MAX_PLAYERS);
        for (seat, player) in registry.iter().enumerate() {
            assert_eq!(player.id, p(seat as u32 + 1));
            assert_eq!(player.life_total, 40);
        }
        assert_eq!(registry.seat_of(p(3)), Some(2));
    }

    #[test]
    fn test_unknown_player_is_noop() {
        let mut registry = PlayerRegistry::new(40);
        let before = registry.clone();

        assert!(!registry.set_color(p(99), "red"));
        assert!(registry.adjust_life(p(99), -5, false).is_none());
        assert!(registry.set_poison(p(99), 3).is_none());
        assert!(registry.set_status(p(99), &StatusKey::Monarch, StatusValue::Flag(true)).is_none());
        assert!(registry.set_commander_damage(p(99), 0, 5, false).is_none());

        assert_eq!(registry, before);
    }

    #[test]
    fn test_profile_updates() {
        let mut registry = PlayerRegistry::new(40);

        assert!(registry.set_color(p(1), "green"));
        assert!(registry.set_name(p(1), "Atraxa"));
        assert!(registry.set_background(
            p(1),
            Background {
                image: Some("art.jpg".into()),
                artist: Some("Someone".into()),
                set: Some("ONE".into()),
            }
        ));

        let player = registry.get(p(1)).unwrap();
        assert_eq!(player.color, "green");
        assert_eq!(player.player_name, "Atraxa");
        assert_eq!(player.background_set.as_deref(), Some("ONE"));
    }

    #[test]
    fn test_adjust_life_records_delta() {
        let mut registry = PlayerRegistry::new(40);

        let record = registry.adjust_life(p(2), -7, false).unwrap();
        assert_eq!(record.change, Change::Life { from: 40, to: 33 });
        assert_eq!(record.kind(), ChangeKind::NegativeLife);

        registry.adjust_life(p(2), 2, false);
        let player = registry.get(p(2)).unwrap();
        assert_eq!(player.life_total, 35);
        assert_eq!(player.temp_life_diff, -5);
    }

    #[test]
    fn test_life_clamped_without_negative_permission() {
        let mut registry = PlayerRegistry::new(40);

        let record = registry.adjust_life(p(2), -50, false).unwrap();
        assert_eq!(record.change, Change::Life { from: 40, to: 0 });
        assert_eq!(registry.get(p(2)).unwrap().temp_life_diff, -40);

        // Already at the floor: nothing changes, nothing recorded.
        assert!(registry.adjust_life(p(2), -1, false).is_none());
    }

    #[test]
    fn test_life_negative_with_permission() {
        let mut registry = PlayerRegistry::new(40);

        registry.set_life(p(1), -12, true);
        assert_eq!(registry.get(p(1)).unwrap().life_total, -12);

        registry.set_life(p(1), -20_000, true);
        assert_eq!(registry.get(p(1)).unwrap().life_total, -9999);

        registry.set_life(p(1), 20_000, true);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 9999);
    }

    #[test]
    fn test_negative_life_override_clamps() {
        let mut registry = PlayerRegistry::new(40);
        registry.set_negative_life_override(p(1), Some(true), false);
        registry.set_life(p(1), -5, false);
        assert_eq!(registry.get(p(1)).unwrap().life_total, -5);

        registry.set_negative_life_override(p(1), None, false);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 0);
    }

    #[test]
    fn test_clamp_life_totals() {
        let mut registry = PlayerRegistry::new(40);
        registry.set_life(p(1), -30, true);
        registry.set_life(p(2), -3, true);

        registry.clamp_life_totals(false);

        assert_eq!(registry.get(p(1)).unwrap().life_total, 0);
        assert_eq!(registry.get(p(2)).unwrap().life_total, 0);
        assert_eq!(registry.get(p(3)).unwrap().life_total, 40);
    }

    #[test]
    fn test_poison_clamped() {
        let mut registry = PlayerRegistry::new(40);

        let record = registry.set_poison(p(1), 4).unwrap();
        assert_eq!(record.change, Change::Poison { from: 0, to: 4 });

        registry.set_poison(p(1), 500);
        assert_eq!(registry.get(p(1)).unwrap().poison, POISON_MAX);

        registry.set_poison(p(1), -1);
        assert_eq!(registry.get(p(1)).unwrap().poison, 0);
    }

    #[test]
    fn test_unique_flag_moves_between_players() {
        let mut registry = PlayerRegistry::new(40);

        registry.set_status(p(1), &StatusKey::Monarch, StatusValue::Flag(true));
        registry.set_status(p(3), &StatusKey::Monarch, StatusValue::Flag(true));

        let holders: Vec<_> = registry
            .iter()
            .filter(|pl| pl.status_effects.monarch)
            .map(|pl| pl.id)
            .collect();
        assert_eq!(holders, vec![p(3)]);
    }

    #[test]
    fn test_non_unique_flags_coexist() {
        let mut registry = PlayerRegistry::new(40);

        registry.set_status(p(1), &StatusKey::Ascend, StatusValue::Flag(true));
        registry.set_status(p(2), &StatusKey::Ascend, StatusValue::Flag(true));

        assert_eq!(registry.iter().filter(|pl| pl.status_effects.ascend).count(), 2);
    }

    #[test]
    fn test_knockout_syncs_is_dead() {
        let mut registry = PlayerRegistry::new(40);

        let record = registry
            .set_status(p(2), &StatusKey::Knockout, StatusValue::Flag(true))
            .unwrap();
        assert_eq!(
            record.change,
            Change::StatusBoolean {
                key: StatusKey::Knockout,
                from: false,
                to: true
            }
        );
        assert!(registry.get(p(2)).unwrap().is_dead);

        registry.clear_status(p(2), &StatusKey::Knockout);
        assert!(!registry.get(p(2)).unwrap().is_dead);
    }

    #[test]
    fn test_is_dead_not_synced_with_life() {
        let mut registry = PlayerRegistry::new(40);
        registry.set_life(p(2), 0, false);

        let player = registry.get(p(2)).unwrap();
        assert!(!player.is_dead);
        assert!(registry.is_seat_eliminated(1, false));
    }

    #[test]
    fn test_status_numeric_record() {
        let mut registry = PlayerRegistry::new(40);

        let record = registry.set_status(p(1), &StatusKey::Energy, StatusValue::Count(3)).unwrap();
        assert_eq!(
            record.change,
            Change::StatusNumeric {
                key: StatusKey::Energy,
                from: 0,
                to: 3
            }
        );

        assert!(registry.set_status(p(1), &StatusKey::Energy, StatusValue::Count(3)).is_none());

        let cleared = registry.clear_status(p(1), &StatusKey::Energy).unwrap();
        assert_eq!(cleared.change.kind(), ChangeKind::StatusNumeric);
    }

    #[test]
    fn test_clear_custom_status_records_change() {
        let mut registry = PlayerRegistry::new(40);
        let key = StatusKey::parse("blessing");

        registry.set_status(p(1), &key, StatusValue::Flag(true));
        let record = registry.clear_status(p(1), &key).unwrap();
        assert_eq!(
            record.change,
            Change::StatusBoolean {
                key: key.clone(),
                from: true,
                to: false
            }
        );
        assert!(registry.clear_status(p(1), &key).is_none());
    }

    #[test]
    fn test_commander_damage_grows_slots_and_costs_life() {
        let mut registry = PlayerRegistry::new(40);

        let record = registry.set_commander_damage(p(1), 2, 6, false).unwrap();
        assert_eq!(
            record.change,
            Change::CommanderDamage {
                from_player_id: p(3),
                from: 0,
                to: 6,
                life_delta: -6
            }
        );

        let player = registry.get(p(1)).unwrap();
        assert_eq!(player.commander_damage.as_slice(), &[0, 0, 6]);
        assert_eq!(player.life_total, 34);

        // Lowering the slot gives life back.
        registry.set_commander_damage(p(1), 2, 4, false);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 36);
    }

    #[test]
    fn test_commander_damage_clamped() {
        let mut registry = PlayerRegistry::new(40);

        registry.set_commander_damage(p(1), 1, -8, false);
        assert!(registry.get(p(1)).unwrap().commander_damage.iter().all(|&d| d == 0));

        registry.set_commander_damage(p(1), 1, 5_000, true);
        let player = registry.get(p(1)).unwrap();
        assert_eq!(player.commander_damage_from(1), COMMANDER_DAMAGE_MAX);
        assert_eq!(player.life_total, 40 - 999);
    }

    #[test]
    fn test_commander_damage_lethal() {
        let mut registry = PlayerRegistry::new(40);

        registry.set_commander_damage(p(1), 2, 21, false);

        let player = registry.get(p(1)).unwrap();
        assert_eq!(player.life_total, 19);
        assert!(is_eliminated(player, false));
    }

    #[test]
    fn test_commander_damage_undo_at_life_floor() {
        let mut registry = PlayerRegistry::new(40);
        registry.adjust_life(p(1), -35, false);

        let hit = registry.set_commander_damage(p(1), 2, 21, false).unwrap();
        assert_eq!(hit.change.life_delta(), -5);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 0);

        // Only the 5 life the slot actually took comes back.
        registry.set_commander_damage(p(1), 2, 10, false);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 0);
        let undo = registry.set_commander_damage(p(1), 2, 0, false).unwrap();
        assert_eq!(undo.change.life_delta(), 5);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 5);
    }

    #[test]
    fn test_commander_damage_from_saved_record_refunds_fully() {
        let mut record = PlayerRecord::new(p(1), 30);
        record.commander_damage = SmallVec::from_slice(&[0, 10]);
        let mut registry = PlayerRegistry::from_records([record]);
        registry.fill_roster(40);

        registry.set_commander_damage(p(1), 1, 0, false);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 40);
    }

    #[test]
    fn test_commander_damage_invalid_seat() {
        let mut registry = PlayerRegistry::new(40);
        assert!(registry.set_commander_damage(p(1), MAX_PLAYERS, 5, false).is_none());
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut registry = PlayerRegistry::new(40);
        let snapshot = registry.clone();

        registry.adjust_life(p(1), -10, false);

        assert_eq!(snapshot.get(p(1)).unwrap().life_total, 40);
        assert_eq!(registry.get(p(1)).unwrap().life_total, 30);
    }

    #[test]
    fn test_first_place_selection() {
        let mut registry = PlayerRegistry::new(40);

        registry.highlight_seat(Some(2));
        assert_eq!(registry.iter().filter(|pl| pl.highlighted).count(), 1);

        registry.land_first(2);
        assert_eq!(registry.iter().filter(|pl| pl.is_first).count(), 1);
        assert!(registry.at_seat(2).unwrap().is_first);
        assert!(registry.iter().all(|pl| !pl.highlighted));

        registry.remove_first_place();
        assert!(registry.iter().all(|pl| !pl.is_first));
    }

    #[test]
    fn test_reset_keeps_profiles_by_default() {
        let mut registry = PlayerRegistry::new(40);
        registry.set_name(p(1), "Kenrith");
        registry.adjust_life(p(1), -15, false);
        registry.set_poison(p(1), 5);
        registry.set_commander_damage(p(1), 1, 9, false);
        registry.set_status(p(1), &StatusKey::Monarch, StatusValue::Flag(true));

        registry.reset(30, false);

        let player = registry.get(p(1)).unwrap();
        assert_eq!(player.player_name, "Kenrith");
        assert_eq!(player.life_total, 30);
        assert_eq!(player.temp_life_diff, 0);
        assert_eq!(player.poison, 0);
        assert!(player.commander_damage.is_empty());
        assert!(!player.status_effects.monarch);
    }

    #[test]
    fn test_reset_can_clear_profiles() {
        let mut registry = PlayerRegistry::new(40);
        registry.set_name(p(1), "Kenrith");
        registry.set_color(p(1), "black");

        registry.reset(40, true);

        let player = registry.get(p(1)).unwrap();
        assert_eq!(player.player_name, "Player 1");
        assert_eq!(player.color, "white");
    }

    #[test]
    fn test_shuffle_only_touches_active_seats() {
        let mut registry = PlayerRegistry::new(40);
        let mut rng = GameRng::new(9);

        registry.shuffle_seats(4, &mut rng);

        let mut active: Vec<_> = registry.active(4).map(|pl| pl.id.raw()).collect();
        active.sort_unstable();
        assert_eq!(active, vec![1, 2, 3, 4]);
        assert_eq!(registry.at_seat(4).unwrap().id, p(5));
        assert_eq!(registry.at_seat(5).unwrap().id, p(6));
    }

    #[test]
    fn test_living_seats() {
        let mut registry = PlayerRegistry::new(40);
        registry.set_poison(p(2), 10);

        assert_eq!(registry.living_seats(4, false), vec![0, 2, 3]);
        assert!(registry.is_seat_eliminated(17, false));
    }

    #[test]
    fn test_fill_roster_keeps_saved_order() {
        let mut registry = PlayerRegistry::from_records([
            PlayerRecord::new(p(4), 12),
            PlayerRecord::new(p(1), 30),
        ]);

        registry.fill_roster(40);

        let ids: Vec<_> = registry.iter().map(|pl| pl.id.raw()).collect();
        assert_eq!(ids, vec![4, 1, 2, 3, 5, 6]);
        assert_eq!(registry.get(p(4)).unwrap().life_total, 12);
        assert_eq!(registry.get(p(5)).unwrap().life_total, 40);
    }

    #[test]
    fn test_serialization_is_a_plain_list() {
        let registry = PlayerRegistry::new(20);
        let json = serde_json::to_string(&registry).unwrap();
        assert!(json.starts_with('['));

        let restored: PlayerRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, registry);
    }
}
