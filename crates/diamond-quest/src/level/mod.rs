pub mod director;
pub mod layouts;

pub use director::{
    arena_locked, build_level, enforce_arena_gate, level_cleared, Level, BOSS_REGION_X, MAX_LEVEL,
};
