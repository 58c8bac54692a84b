use glam::Vec2;
use serde::Serialize;

use crate::actors::Facing;
use crate::api::game::EngineContext;
use crate::api::types::{event_kinds, GameEvent, SoundCue};
use crate::core::physics::{Body, Rect, SCREEN_HEIGHT};
use crate::input::{Action, InputState};
use crate::systems::effects::FlashKind;

pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);
pub const PLAYER_SPEED: f32 = 6.0;
pub const JUMP_STRENGTH: f32 = -16.0;
pub const SPAWN: Vec2 = Vec2::new(100.0, SCREEN_HEIGHT - 200.0);

pub const START_DIAMONDS: u32 = 50;
pub const START_LIVES: u32 = 3;
pub const RESPAWN_INVULNERABILITY: u32 = 120;
/// Diamonds lost for falling out of the level.
pub const FALL_PENALTY: u32 = 10;

pub const PUNCH_TICKS: u32 = 20;
pub const KICK_TICKS: u32 = 25;

/// A punch or kick. `active` stays true while `timer` runs down from its
/// start value; `serial` identifies the window so a target is hit at most
/// once per swing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttackWindow {
    pub timer: u32,
    pub active: bool,
    pub serial: u32,
}

impl AttackWindow {
    pub fn ready(&self) -> bool {
        self.timer == 0
    }

    fn open(&mut self, ticks: u32) {
        self.timer = ticks;
        self.active = true;
        self.serial = self.serial.wrapping_add(1);
    }

    fn tick(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.active = false;
        }
    }
}

/// The user-controlled fighter.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub diamonds: u32,
    pub lives: u32,
    /// Ticks of immunity left. Hostile hits are ignored while non-zero.
    pub invulnerable: u32,
    pub punch: AttackWindow,
    pub kick: AttackWindow,
    /// Ticks before another stomp can register.
    pub jump_cooldown: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(SPAWN, PLAYER_SIZE),
            facing: Facing::Right,
            diamonds: START_DIAMONDS,
            lives: START_LIVES,
            invulnerable: 0,
            punch: AttackWindow::default(),
            kick: AttackWindow::default(),
            jump_cooldown: 0,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.punch.active || self.kick.active
    }

    /// Whether an enemy's contact attack can land right now.
    pub fn can_be_hit(&self) -> bool {
        self.invulnerable == 0 && !self.is_attacking()
    }

    /// One tick of input handling, timers and physics.
    pub fn update(&mut self, input: &InputState, platforms: &[Rect], ctx: &mut EngineContext) {
        self.body.vel.x = 0.0;
        if input.held(Action::Left) {
            self.body.vel.x = -PLAYER_SPEED;
            self.facing = Facing::Left;
        }
        if input.held(Action::Right) {
            self.body.vel.x = PLAYER_SPEED;
            self.facing = Facing::Right;
        }

        if input.pressed(Action::Jump) && self.body.on_ground {
            self.body.vel.y = JUMP_STRENGTH;
            self.body.on_ground = false;
            ctx.emit_sound(SoundCue::Jump);
        }

        let reach = self.facing.sign();
        if input.pressed(Action::Punch) && self.punch.ready() {
            self.punch.open(PUNCH_TICKS);
            ctx.emit_sound(SoundCue::Punch);
            let at = self.body.pos + Vec2::new(40.0 * reach, 20.0);
            ctx.effects.add_flash(FlashKind::Punch, at, 15, 20.0);
        }
        if input.pressed(Action::Kick) && self.kick.ready() {
            self.kick.open(KICK_TICKS);
            ctx.emit_sound(SoundCue::Kick);
            let at = self.body.pos + Vec2::new(50.0 * reach, 30.0);
            ctx.effects.add_flash(FlashKind::Kick, at, 20, 25.0);
        }

        self.punch.tick();
        self.kick.tick();
        self.invulnerable = self.invulnerable.saturating_sub(1);
        self.jump_cooldown = self.jump_cooldown.saturating_sub(1);

        self.body.step(platforms);
        self.body.clamp_to_world();

        if self.body.fell_out() {
            log::debug!("player fell out at x={:.0}", self.body.pos.x);
            self.lose_diamonds(FALL_PENALTY, ctx);
            self.respawn();
        }
    }

    /// Subtract diamonds, flooring at zero. Hitting zero costs a life.
    /// Returns true when a life was lost.
    pub fn lose_diamonds(&mut self, amount: u32, ctx: &mut EngineContext) -> bool {
        self.diamonds = self.diamonds.saturating_sub(amount);
        ctx.emit_sound(SoundCue::DiamondLost);
        if self.diamonds == 0 {
            self.lose_life(ctx);
            true
        } else {
            false
        }
    }

    pub fn lose_life(&mut self, ctx: &mut EngineContext) {
        self.lives = self.lives.saturating_sub(1);
        self.diamonds = START_DIAMONDS;
        ctx.emit_sound(SoundCue::LifeLost);
        ctx.emit_event(GameEvent::new(
            event_kinds::LIFE_LOST,
            self.lives as f32,
            self.diamonds as f32,
            0.0,
        ));
        log::info!("life lost, {} remaining", self.lives);
        self.respawn();
    }

    /// Back to the spawn point with respawn immunity.
    pub fn respawn(&mut self) {
        self.body.pos = SPAWN;
        self.body.vel = Vec2::ZERO;
        self.invulnerable = RESPAWN_INVULNERABILITY;
    }

    /// A hostile hit: lose `amount` diamonds and become immune for at least
    /// `immunity` ticks. A respawn triggered by the hit keeps its longer
    /// immunity. Ignored while already immune.
    pub fn take_hit(&mut self, amount: u32, immunity: u32, ctx: &mut EngineContext) -> bool {
        if self.invulnerable > 0 {
            return false;
        }
        self.lose_diamonds(amount, ctx);
        self.invulnerable = self.invulnerable.max(immunity);
        true
    }

    /// Bounce off a stomped enemy.
    pub fn bounce(&mut self, vel_y: f32, cooldown: u32) {
        self.body.vel.y = vel_y;
        self.jump_cooldown = cooldown;
    }

    /// Level-start state: spawn position, fresh diamonds and timers. Lives
    /// carry over for the whole run.
    pub fn reset_for_level(&mut self) {
        let lives = self.lives;
        *self = Player::new();
        self.lives = lives;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
