//! Secret role deals for Treachery-style games.
//!
//! Role counts depend on the table size. Only 4, 5 and 6 player games have a
//! deal; other sizes get none.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Leader,
    Guardian,
    Assassin,
    Traitor,
}

/// How many of each role a deal contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleCounts {
    pub leader: usize,
    pub guardian: usize,
    pub assassin: usize,
    pub traitor: usize,
}

impl RoleCounts {
    /// Counts for a table of `player_count`, if that size has a deal.
    #[must_use]
    pub const fn for_players(player_count: usize) -> Option<Self> {
        match player_count {
            4 => Some(Self {
                leader: 1,
                guardian: 0,
                assassin: 2,
                traitor: 1,
            }),
            5 => Some(Self {
                leader: 1,
                guardian: 1,
                assassin: 2,
                traitor: 1,
            }),
            6 => Some(Self {
                leader: 1,
                guardian: 1,
                assassin: 3,
                traitor: 1,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.leader + self.guardian + self.assassin + self.traitor
    }

    fn roles(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(self.total());
        roles.extend(std::iter::repeat(Role::Leader).take(self.leader));
        roles.extend(std::iter::repeat(Role::Guardian).take(self.guardian));
        roles.extend(std::iter::repeat(Role::Assassin).take(self.assassin));
        roles.extend(std::iter::repeat(Role::Traitor).take(self.traitor));
        roles
    }
}

/// Shuffle a deal for `player_count` seats. `roles[i]` goes to seat `i`.
#[must_use]
pub fn deal_roles(player_count: usize, rng: &mut GameRng) -> Option<Vec<Role>> {
    let mut roles = RoleCounts::for_players(player_count)?.roles();
    rng.shuffle(&mut roles);
    Some(roles)
}
