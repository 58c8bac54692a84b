//! Read-only frame views handed to a renderer. Everything is in world
//! coordinates; subtract `camera_x` to get screen space.

use glam::Vec2;
use serde::Serialize;

use crate::actors::{Boss, BossMode, Diamond, Facing, Player, Robot, RobotKind};
use crate::core::physics::Rect;
use crate::game::GameState;
use crate::systems::effects::{ImpactFlash, Spark};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub diamonds: u32,
    pub lives: u32,
    pub invulnerable: u32,
    pub punching: bool,
    pub kicking: bool,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            pos: p.body.pos,
            size: p.body.size,
            facing: p.facing,
            diamonds: p.diamonds,
            lives: p.lives,
            invulnerable: p.invulnerable,
            punching: p.punch.active,
            kicking: p.kick.active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RobotView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: RobotKind,
    pub health: i32,
    pub max_health: i32,
    /// Heading, for sprite flipping.
    pub moving_right: bool,
}

impl From<&Robot> for RobotView {
    fn from(r: &Robot) -> Self {
        Self {
            id: r.id.0,
            pos: r.body.pos,
            size: r.body.size,
            kind: r.kind,
            health: r.health,
            max_health: r.max_health,
            moving_right: r.body.vel.x > 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: Vec2,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub mode: BossMode,
    pub enraged: bool,
    pub charging: bool,
}

impl From<&Boss> for BossView {
    fn from(b: &Boss) -> Self {
        Self {
            pos: b.body.pos,
            size: b.body.size,
            level: b.level,
            health: b.health,
            max_health: b.max_health,
            mode: b.mode,
            enraged: b.enraged(),
            charging: b.is_charging,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiamondView {
    pub id: u32,
    pub pos: Vec2,
}

impl From<&Diamond> for DiamondView {
    fn from(d: &Diamond) -> Self {
        Self {
            id: d.id.0,
            pos: d.pos,
        }
    }
}

/// Everything needed to draw one frame. Platforms, robots and diamonds are
/// culled to the viewport; the `*_remaining` counts cover the whole level.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub state: GameState,
    pub level: u32,
    pub score: u32,
    pub camera_x: f32,
    pub player: PlayerView,
    pub robots: Vec<RobotView>,
    pub boss: Option<BossView>,
    pub diamonds: Vec<DiamondView>,
    pub platforms: Vec<Rect>,
    pub flashes: Vec<ImpactFlash>,
    pub sparks: Vec<Spark>,
    pub robots_remaining: usize,
    pub diamonds_remaining: usize,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
