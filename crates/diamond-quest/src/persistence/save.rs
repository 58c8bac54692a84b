use serde::{Deserialize, Serialize};

use crate::persistence::error::{check_finite, check_range, ValidationError};

pub const MAX_SAVED_LEVEL: i64 = 10;
pub const MAX_SAVED_DIAMONDS: i64 = 1000;
pub const MAX_SAVED_LIVES: i64 = 10;
pub const MAX_SAVED_SCORE: i64 = 1_000_000;

/// A snapshot of one run, in the JSON shape the browser client posts.
///
/// Numbers are kept wide so an out-of-range value parses and is then
/// rejected by [`SaveState::validate`] with a precise error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    pub level: i64,
    pub diamonds: i64,
    pub lives: i64,
    pub score: i64,
    pub player_x: f32,
    pub player_y: f32,
    #[serde(default)]
    pub robots_defeated: Vec<u32>,
    #[serde(default)]
    pub diamonds_collected: Vec<u32>,
    #[serde(default)]
    pub boss_defeated: bool,
    #[serde(default)]
    pub level_completed: bool,
}

impl Default for SaveState {
    fn default() -> Self {
        Self {
            level: 1,
            diamonds: 50,
            lives: 3,
            score: 0,
            player_x: 100.0,
            player_y: 500.0,
            robots_defeated: Vec::new(),
            diamonds_collected: Vec::new(),
            boss_defeated: false,
            level_completed: false,
        }
    }
}

impl SaveState {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check every field against its allowed range. The first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("level", self.level, 1, MAX_SAVED_LEVEL)?;
        check_range("diamonds", self.diamonds, 0, MAX_SAVED_DIAMONDS)?;
        check_range("lives", self.lives, 0, MAX_SAVED_LIVES)?;
        check_range("score", self.score, 0, MAX_SAVED_SCORE)?;
        check_finite("playerX", self.player_x)?;
        check_finite("playerY", self.player_y)?;
        Ok(())
    }
}
