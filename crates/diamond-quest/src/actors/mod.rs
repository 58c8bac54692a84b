pub mod boss;
pub mod diamond;
pub mod player;
pub mod robot;

use serde::{Deserialize, Serialize};

pub use boss::{Boss, BossMode};
pub use diamond::Diamond;
pub use player::{AttackWindow, Player};
pub use robot::{Robot, RobotKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1.0 when facing right, -1.0 when facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// -1.0 or +1.0: which way `to` lies from `from` along x.
/// Ties resolve to the left, matching the chase rule "right only when strictly
/// to the right".
pub(crate) fn toward(from: f32, to: f32) -> f32 {
    if to > from {
        1.0
    } else {
        -1.0
    }
}
