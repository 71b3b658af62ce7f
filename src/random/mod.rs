//! Randomizers and secret-role deals. All draw from the session's `GameRng`.

pub mod randomizer;
pub mod roles;

pub use randomizer::{flip_coin, pick_seat, roll_die, CoinSide};
pub use roles::{deal_roles, Role, RoleCounts};
