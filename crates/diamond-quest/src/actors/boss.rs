use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actors::{toward, Player};
use crate::api::game::EngineContext;
use crate::api::types::SoundCue;
use crate::core::physics::{Body, Rect, SCREEN_HEIGHT, WORLD_WIDTH};
use crate::systems::combat::{self, HitLedger, BOSS_STRIKES};

pub const BOSS_SIZE: Vec2 = Vec2::new(60.0, 80.0);
pub const BOSS_SPAWN: Vec2 = Vec2::new(WORLD_WIDTH - 250.0, SCREEN_HEIGHT - 160.0);
/// The boss never leaves [ARENA_MIN_X, ARENA_MAX_X].
pub const ARENA_MIN_X: f32 = WORLD_WIDTH - 600.0;
pub const ARENA_MAX_X: f32 = WORLD_WIDTH - 100.0;

const ENRAGE_RATIO: f32 = 0.3;
const ENRAGE_SPEED: f32 = 1.5;

/// Attack pattern of a level 3+ boss. Patterns rotate in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossMode {
    #[default]
    Aggressive,
    JumpAttack,
    Charge,
    Defensive,
}

impl BossMode {
    pub fn next(self) -> Self {
        match self {
            BossMode::Aggressive => BossMode::JumpAttack,
            BossMode::JumpAttack => BossMode::Charge,
            BossMode::Charge => BossMode::Defensive,
            BossMode::Defensive => BossMode::Aggressive,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub alive: bool,
    pub mode: BossMode,
    pub attack_timer: u32,
    pub move_timer: u32,
    pub jump_timer: u32,
    pub charge_timer: u32,
    pub rage_timer: u32,
    pub is_charging: bool,
    /// Airborne from a jump attack; the slam resolves on landing.
    pub leaping: bool,
    pub ledger: HitLedger,
}

impl Boss {
    pub fn new(level: u32) -> Self {
        let health = 100 + 50 * level as i32;
        Self {
            body: Body::new(BOSS_SPAWN, BOSS_SIZE),
            health,
            max_health: health,
            level,
            alive: true,
            mode: BossMode::Aggressive,
            attack_timer: 0,
            move_timer: 0,
            jump_timer: 0,
            charge_timer: 0,
            rage_timer: 0,
            is_charging: false,
            leaping: false,
            ledger: HitLedger::default(),
        }
    }

    pub fn enraged(&self) -> bool {
        (self.health as f32) < self.max_health as f32 * ENRAGE_RATIO
    }

    /// Multiplier applied to every horizontal speed the boss chooses.
    pub fn speed_scale(&self) -> f32 {
        if self.enraged() {
            ENRAGE_SPEED
        } else {
            1.0
        }
    }

    /// One AI tick against the already-updated player. Returns true on the
    /// tick the boss dies.
    pub fn update(
        &mut self,
        player: &mut Player,
        platforms: &[Rect],
        ctx: &mut EngineContext,
    ) -> bool {
        if !self.alive {
            return false;
        }

        let distance = self.body.distance_x(&player.body);
        self.attack_timer += 1;
        self.move_timer += 1;
        self.jump_timer += 1;
        self.rage_timer += 1;

        if self.level <= 2 {
            self.brawl(player, distance, ctx);
        } else {
            self.run_pattern(player, distance, ctx);
        }

        if self.is_charging {
            self.charge_timer = self.charge_timer.saturating_sub(1);
            if self.charge_timer == 0 {
                self.is_charging = false;
                self.body.vel.x *= 0.5;
            }
        }

        if self.enraged()
            && self.rage_timer > 45
            && distance < 90.0
            && strike(player, 6, 30, true, ctx)
        {
            self.rage_timer = 0;
        }

        self.body.step(platforms);
        if self.leaping && self.body.on_ground {
            self.leaping = false;
            let impact = self.body.distance_x(&player.body) < 50.0
                && (self.body.bottom() - player.body.bottom()).abs() < 30.0;
            if impact {
                strike(player, 15, 90, false, ctx);
            }
        }
        self.confine();

        let hits = combat::resolve_strikes(
            player,
            &mut self.body,
            &mut self.health,
            &mut self.ledger,
            &BOSS_STRIKES,
            distance,
        );
        for _ in &hits.strikes {
            ctx.emit_sound(SoundCue::BossHit);
        }
        if hits.any() {
            ctx.effects
                .spawn_sparks(self.body.pos + self.body.size / 2.0, 10, 6.0);
        }

        if self.health <= 0 {
            self.alive = false;
            log::info!("level {} boss defeated", self.level);
            return true;
        }
        false
    }

    /// Levels 1 and 2: close strikes, short charges and slow advances.
    fn brawl(&mut self, player: &mut Player, distance: f32, ctx: &mut EngineContext) {
        let dir = toward(self.body.pos.x, player.body.pos.x);
        if self.attack_timer > 60 {
            if distance < 80.0 {
                strike(player, 8, 60, true, ctx);
                self.attack_timer = 0;
            } else if distance < 150.0 {
                self.is_charging = true;
                self.charge_timer = 30;
                self.body.vel.x = 4.0 * dir * self.speed_scale();
                self.attack_timer = 0;
            }
        }
        if !self.is_charging && self.move_timer > 120 {
            self.body.vel.x = 2.0 * dir * self.speed_scale();
            self.move_timer = 0;
        }
    }

    /// Levels 3 and up: rotate through the four attack patterns.
    fn run_pattern(&mut self, player: &mut Player, distance: f32, ctx: &mut EngineContext) {
        if self.attack_timer > 90 {
            self.mode = self.mode.next();
            self.attack_timer = 0;
        }
        let dir = toward(self.body.pos.x, player.body.pos.x);
        let level = self.level as f32;

        match self.mode {
            BossMode::Aggressive => {
                self.body.vel.x = (3.0 + 0.5 * level) * dir * self.speed_scale();
                if distance < 70.0 {
                    strike(player, 10 + 2 * self.level, 45, true, ctx);
                }
            }
            BossMode::JumpAttack => {
                if self.jump_timer > 60 && distance < 200.0 && self.body.on_ground {
                    self.body.vel.y = -15.0;
                    self.body.on_ground = false;
                    self.leaping = true;
                    self.jump_timer = 0;
                }
            }
            BossMode::Charge => {
                if !self.is_charging {
                    self.is_charging = true;
                    self.charge_timer = 45;
                    self.body.vel.x = (5.0 + level) * dir * self.speed_scale();
                }
                if distance < 60.0 {
                    strike(player, 12 + self.level, 60, true, ctx);
                }
            }
            BossMode::Defensive => {
                self.body.vel.x *= 0.8;
                if distance < 100.0 && self.move_timer > 30 {
                    strike(player, 8, 75, false, ctx);
                    self.move_timer = 0;
                }
            }
        }
    }

    fn confine(&mut self) {
        if self.body.pos.x < ARENA_MIN_X {
            self.body.pos.x = ARENA_MIN_X;
            self.body.vel.x = self.body.vel.x.abs();
        } else if self.body.pos.x > ARENA_MAX_X {
            self.body.pos.x = ARENA_MAX_X;
            self.body.vel.x = -self.body.vel.x.abs();
        }
    }
}

/// Land a boss attack if the player is open to it. `guarded` attacks are
/// also blocked while the player is mid punch or kick.
fn strike(
    player: &mut Player,
    amount: u32,
    immunity: u32,
    guarded: bool,
    ctx: &mut EngineContext,
) -> bool {
    if player.invulnerable > 0 || (guarded && player.is_attacking()) {
        return false;
    }
    player.take_hit(amount, immunity, ctx);
    ctx.emit_sound(SoundCue::RobotHit);
    true
}
