pub mod actors;
pub mod api;
pub mod core;
pub mod game;
pub mod input;
pub mod level;
pub mod persistence;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use actors::{Boss, BossMode, Diamond, Facing, Player, Robot, RobotKind};
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{AudioSink, EntityId, GameEvent, NullAudio, SoundCue};
pub use core::physics::{Body, Rect, WORLD_WIDTH, SCREEN_WIDTH, SCREEN_HEIGHT};
pub use core::time::FixedTimestep;
pub use game::{DiamondQuest, GameState, Phase};
pub use input::{Action, InputEvent, InputQueue, InputState, KeyMap};
pub use level::{build_level, Level};
pub use persistence::{
    HighScore, MemoryStore, Persistence, SaveState, ScoreSubmission, SubmitReceipt,
    ValidationError,
};
pub use renderer::{Camera2D, FrameSnapshot};
pub use systems::effects::EffectsState;
