//! Table randomizers: dice, coins, and picking a player.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinSide {
    Heads,
    Tails,
}

/// Roll a die with `sides` faces. `None` for a zero-sided die.
pub fn roll_die(rng: &mut GameRng, sides: u32) -> Option<u32> {
    (sides > 0).then(|| rng.gen_inclusive(1, sides))
}

pub fn flip_coin(rng: &mut GameRng) -> CoinSide {
    if rng.gen_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

/// Pick one of `seats` uniformly.
pub fn pick_seat(rng: &mut GameRng, seats: &[usize]) -> Option<usize> {
    rng.choose(seats).copied()
}
