//! Turn cursor.
//!
//! Tracks whose turn it is (a seat index, or none), the lap anchor, and the
//! turn count. Moving the cursor skips eliminated seats with a search bounded
//! by the player count, so it terminates even when everyone is out.
//!
//! ## Turn counting
//!
//! The first seat the cursor lands on becomes the anchor and starts turn 1.
//! Every later landing on the anchor adds one when moving forward and takes
//! one away when moving backward, so stepping back undoes an accidental
//! advance. The count stays within `0..=MAX_TURN_COUNT`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Highest turn count.
pub const MAX_TURN_COUNT: u32 = 99;

/// Player count used when none is configured.
pub const FALLBACK_PLAYER_COUNT: usize = 4;

/// Direction of travel around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Whose turn it is and how many turns have passed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TurnCursor {
    #[serde(serialize_with = "seat_to_index", deserialize_with = "seat_from_index")]
    current_turn: Option<usize>,
    #[serde(serialize_with = "seat_to_index", deserialize_with = "seat_from_index")]
    starting_player_index: Option<usize>,
    turn_count: u32,
}

impl TurnCursor {
    /// Cursor with no active turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_turn(&self) -> Option<usize> {
        self.current_turn
    }

    #[must_use]
    pub fn starting_player_index(&self) -> Option<usize> {
        self.starting_player_index
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Forget the current turn, the anchor, and the count.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Move the cursor and update lap counting.
    ///
    /// `None` only clears the current turn; lap state is left alone.
    pub fn set_current_turn(&mut self, seat: Option<usize>, moving_forward: bool) {
        self.current_turn = seat;
        let Some(seat) = seat else {
            return;
        };

        match self.starting_player_index {
            None => {
                self.starting_player_index = Some(seat);
                self.turn_count = 1;
            }
            Some(anchor) if anchor == seat => {
                self.turn_count = if moving_forward {
                    (self.turn_count + 1).min(MAX_TURN_COUNT)
                } else {
                    self.turn_count.saturating_sub(1)
                };
            }
            Some(_) => {}
        }
    }

    /// Move to the next living seat in `direction`.
    ///
    /// `player_count` of zero falls back to four seats. `is_eliminated`
    /// answers for a seat index; seats with no player must answer `true`.
    /// At most `player_count` seats are examined. If none is alive the
    /// cursor is cleared to no active turn.
    ///
    /// ```
    /// use life_counter::turn::{Direction, TurnCursor};
    ///
    /// let mut cursor = TurnCursor::new();
    /// cursor.set_current_turn(Some(0), true);
    ///
    /// // Seat 1 is out.
    /// let landed = cursor.advance(Direction::Forward, 4, |seat| seat == 1);
    /// assert_eq!(landed, Some(2));
    /// ```
    pub fn advance(
        &mut self,
        direction: Direction,
        player_count: usize,
        is_eliminated: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let total = if player_count == 0 {
            FALLBACK_PLAYER_COUNT
        } else {
            player_count
        } as isize;
        let step = direction.step();
        let current = self.current_turn.map_or(-1, |seat| seat as isize);

        let mut candidate = (current + step + total).rem_euclid(total);
        for _ in 0..total {
            // rem_euclid keeps candidate in 0..total.
            let seat = candidate as usize;
            if !is_eliminated(seat) {
                self.set_current_turn(Some(seat), direction.is_forward());
                return Some(seat);
            }
            candidate = (candidate + step + total).rem_euclid(total);
        }

        self.set_current_turn(None, direction.is_forward());
        None
    }
}

fn seat_to_index<S: Serializer>(seat: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
    match seat {
        Some(seat) => serializer.serialize_i64(*seat as i64),
        None => serializer.serialize_i64(-1),
    }
}

fn seat_from_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let index = Option::<i64>::deserialize(deserializer)?;
    Ok(index.and_then(|i| usize::try_from(i).ok()))
}
