//! Save states and the high-score leaderboard.
//!
//! The simulation never depends on a store to run; it hands a [`SaveState`]
//! or [`ScoreSubmission`] to whatever [`Persistence`] implementation the host
//! provides.

pub mod error;
pub mod save;
pub mod scores;

pub use error::ValidationError;
pub use save::SaveState;
pub use scores::{HighScore, HighScoreTable, ScoreSubmission, SubmitReceipt};

use crate::api::game::GameConfig;

pub trait Persistence {
    fn save_state(&mut self, state: &SaveState) -> Result<(), ValidationError>;
    fn load_state(&self) -> Option<SaveState>;
    fn submit_score(
        &mut self,
        submission: ScoreSubmission,
    ) -> Result<SubmitReceipt, ValidationError>;
    /// Leaderboard page, best first.
    fn high_scores(&self) -> Vec<HighScore>;
    /// Forget the saved run. High scores are kept.
    fn reset(&mut self);
}

/// In-process store for a single session.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Option<SaveState>,
    scores: HighScoreTable,
}

impl MemoryStore {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: None,
            scores: HighScoreTable::new(config.max_high_scores, config.high_score_page),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl Persistence for MemoryStore {
    fn save_state(&mut self, state: &SaveState) -> Result<(), ValidationError> {
        if let Err(err) = state.validate() {
            log::warn!("refusing save state: {err}");
            return Err(err);
        }
        self.state = Some(state.clone());
        Ok(())
    }

    fn load_state(&self) -> Option<SaveState> {
        self.state.clone()
    }

    fn submit_score(
        &mut self,
        submission: ScoreSubmission,
    ) -> Result<SubmitReceipt, ValidationError> {
        self.scores.submit(submission).map_err(|err| {
            log::warn!("refusing high score: {err}");
            err
        })
    }

    fn high_scores(&self) -> Vec<HighScore> {
        self.scores.top()
    }

    fn reset(&mut self) {
        self.state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_and_reset() {
        let mut store = MemoryStore::default();
        assert!(store.load_state().is_none());
        let state = SaveState {
            level: 3,
            score: 1200,
            ..SaveState::default()
        };
        store.save_state(&state).unwrap();
        assert_eq!(store.load_state(), Some(state));
        store.reset();
        assert!(store.load_state().is_none());
    }

    #[test]
    fn invalid_save_leaves_previous_state() {
        let mut store = MemoryStore::default();
        store.save_state(&SaveState::default()).unwrap();
        let bad = SaveState {
            score: 1_000_001,
            ..SaveState::default()
        };
        assert!(store.save_state(&bad).is_err());
        assert_eq!(store.load_state(), Some(SaveState::default()));
    }

    #[test]
    fn scores_survive_reset() {
        let mut store = MemoryStore::default();
        let receipt = store
            .submit_score(ScoreSubmission {
                player_name: "Ada".into(),
                score: 1500,
                level_reached: 3,
                created_at: 10,
            })
            .unwrap();
        assert_eq!(receipt.rank, 1);
        store.reset();
        assert_eq!(store.high_scores().len(), 1);
    }

    #[test]
    fn page_size_comes_from_config() {
        let config = GameConfig {
            high_score_page: 2,
            ..GameConfig::default()
        };
        let mut store = MemoryStore::new(&config);
        for i in 0..5 {
            store
                .submit_score(ScoreSubmission {
                    player_name: String::new(),
                    score: i,
                    level_reached: 1,
                    created_at: i as u64,
                })
                .unwrap();
        }
        assert_eq!(store.high_scores().len(), 2);
    }
}
