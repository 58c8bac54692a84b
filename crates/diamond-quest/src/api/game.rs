use serde::{Deserialize, Serialize};

use crate::api::types::{GameEvent, SoundCue};
use crate::input::InputState;
use crate::systems::effects::EffectsState;

/// Runtime configuration, provided by the game.
/// Every field has a default, so a partial JSON document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Camera smoothing (0.0 = instant snap). 0.9 at 60 Hz closes 10% of the
    /// gap to the target per tick.
    pub camera_smoothing: f32,
    /// Maximum number of sound cues per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// High scores retained by a score table (default: 100).
    pub max_high_scores: usize,
    /// High scores returned by a leaderboard query (default: 10).
    pub high_score_page: usize,
    /// Salt mixed into each level's diamond scatter seed.
    pub diamond_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            camera_smoothing: 0.9,
            max_sounds: 32,
            max_events: 32,
            max_high_scores: 100,
            high_score_page: 10,
            diamond_seed: 0,
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The contract between a game and its runner.
pub trait Game {
    /// Read-only view handed to the renderer after each frame.
    type Snapshot: Serialize;

    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. `input` carries held actions and this tick's presses.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputState);

    /// Build the render view of the current state.
    fn snapshot(&self, ctx: &EngineContext) -> Self::Snapshot;

    /// Whether the player asked to leave. Runners stop ticking once true.
    fn wants_quit(&self) -> bool {
        false
    }
}

/// Mutable access to per-frame outputs, passed to Game::init and Game::update.
/// Gameplay writes cues, events and cosmetic effects here and never reads
/// them back.
pub struct EngineContext {
    pub effects: EffectsState,
    pub sounds: Vec<SoundCue>,
    pub events: Vec<GameEvent>,
    max_sounds: usize,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            effects: EffectsState::new(config.diamond_seed),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            max_sounds: config.max_sounds,
            max_events: config.max_events,
        }
    }

    /// Queue a sound cue for this frame. Cues past the frame cap are dropped.
    pub fn emit_sound(&mut self, cue: SoundCue) {
        if self.sounds.len() < self.max_sounds {
            self.sounds.push(cue);
        }
    }

    /// Queue a game event for this frame. Events past the frame cap are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::debug!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
