use serde::{Deserialize, Serialize};

use crate::persistence::error::{check_range, ValidationError};
use crate::persistence::save::MAX_SAVED_SCORE;

pub const MAX_NAME_LEN: usize = 50;
pub const ANONYMOUS: &str = "Anonymous";
const MAX_LEVEL_REACHED: i64 = 10;

/// A finished run offered to the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default = "first_level")]
    pub level_reached: i64,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
}

fn first_level() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub player_name: String,
    pub score: u32,
    pub level_reached: u32,
    pub created_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub success: bool,
    pub rank: usize,
}

/// Leaderboard ordered by score, newest first among equal scores.
#[derive(Debug, Clone)]
pub struct HighScoreTable {
    entries: Vec<HighScore>,
    capacity: usize,
    page: usize,
}

impl HighScoreTable {
    pub fn new(capacity: usize, page: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            page,
        }
    }

    /// Validate and insert a submission. The rank counts retained scores
    /// strictly greater than this one.
    pub fn submit(
        &mut self,
        submission: ScoreSubmission,
    ) -> Result<SubmitReceipt, ValidationError> {
        let entry = Self::validate(submission)?;
        let rank = self.rank(entry.score);

        let at = self
            .entries
            .iter()
            .position(|e| (e.score, e.created_at) <= (entry.score, entry.created_at))
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
        self.entries.truncate(self.capacity);

        Ok(SubmitReceipt {
            success: true,
            rank,
        })
    }

    /// 1 + the number of retained scores strictly above `score`.
    pub fn rank(&self, score: u32) -> usize {
        1 + self.entries.iter().filter(|e| e.score > score).count()
    }

    /// The first page of the leaderboard.
    pub fn top(&self) -> Vec<HighScore> {
        self.entries.iter().take(self.page).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(submission: ScoreSubmission) -> Result<HighScore, ValidationError> {
        let name = submission.player_name.trim();
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }
        check_range("score", submission.score, 0, MAX_SAVED_SCORE)?;
        check_range("level_reached", submission.level_reached, 1, MAX_LEVEL_REACHED)?;

        let player_name = if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name.to_string()
        };
        Ok(HighScore {
            player_name,
            score: submission.score as u32,
            level_reached: submission.level_reached as u32,
            created_at: submission.created_at,
        })
    }
}
