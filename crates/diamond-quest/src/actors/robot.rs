use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actors::{toward, Player};
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, SoundCue};
use crate::core::physics::{Body, Rect};
use crate::core::rng::Rng;
use crate::systems::combat::{self, HitLedger, ROBOT_STRIKES};

pub const ROBOT_SIZE: Vec2 = Vec2::new(28.0, 40.0);
pub const PATROL_DISTANCE: f32 = 100.0;
pub const CHASE_RANGE: f32 = 200.0;
const INITIAL_SPEED: f32 = 2.0;

const CONTACT_RANGE: f32 = 40.0;
const CONTACT_HEIGHT: f32 = 50.0;
/// Ticks of sustained contact before a robot lands a blow.
const CONTACT_WINDUP: u32 = 60;
const CONTACT_DAMAGE: u32 = 5;
const CONTACT_IMMUNITY: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotKind {
    #[default]
    Normal,
    Tough,
}

impl RobotKind {
    pub fn health(self) -> i32 {
        match self {
            RobotKind::Normal => 30,
            RobotKind::Tough => 60,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            RobotKind::Normal => 1.5,
            RobotKind::Tough => 2.5,
        }
    }
}

/// A patrolling enemy that chases the player when near.
#[derive(Debug, Clone)]
pub struct Robot {
    pub id: EntityId,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub patrol_distance: f32,
    pub start_x: f32,
    pub kind: RobotKind,
    pub speed: f32,
    /// Ticks of continuous contact with the player.
    pub attack_timer: u32,
    pub ledger: HitLedger,
}

impl Robot {
    /// Spawn at `pos` heading left or right at random.
    pub fn new(id: EntityId, pos: Vec2, kind: RobotKind, rng: &mut Rng) -> Self {
        let heading = if rng.coin() { 1.0 } else { -1.0 };
        Self {
            id,
            body: Body::new(pos, ROBOT_SIZE).with_velocity(Vec2::new(INITIAL_SPEED * heading, 0.0)),
            health: kind.health(),
            max_health: kind.health(),
            alive: true,
            patrol_distance: PATROL_DISTANCE,
            start_x: pos.x,
            kind,
            speed: kind.speed(),
            attack_timer: 0,
            ledger: HitLedger::default(),
        }
    }

    /// One AI tick against the already-updated player. Returns true on the
    /// tick the robot dies. Dead robots are inert.
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
        if distance < CHASE_RANGE {
            self.body.vel.x = self.speed * toward(self.body.pos.x, player.body.pos.x);
        } else if (self.body.pos.x - self.start_x).abs() > self.patrol_distance {
            self.body.vel.x = -self.body.vel.x;
        }

        self.body.step(platforms);
        if !self.body.on_ground && self.body.vel.y >= 0.0 {
            self.body.vel.x = -self.body.vel.x;
        }

        if distance < CONTACT_RANGE
            && (self.body.pos.y - player.body.pos.y).abs() < CONTACT_HEIGHT
            && player.can_be_hit()
        {
            self.attack_timer += 1;
            if self.attack_timer > CONTACT_WINDUP {
                player.take_hit(CONTACT_DAMAGE, CONTACT_IMMUNITY, ctx);
                self.attack_timer = 0;
            }
        }

        let hits = combat::resolve_strikes(
            player,
            &mut self.body,
            &mut self.health,
            &mut self.ledger,
            &ROBOT_STRIKES,
            distance,
        );
        for _ in &hits.strikes {
            ctx.emit_sound(SoundCue::RobotHit);
        }
        if hits.any() {
            ctx.effects.spawn_sparks(self.center(), 6, 4.0);
        }

        if self.health <= 0 {
            self.alive = false;
            log::debug!("robot {} destroyed", self.id.0);
            return true;
        }
        false
    }

    pub fn center(&self) -> Vec2 {
        self.body.pos + self.body.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::WORLD_WIDTH;

    const FLOOR_Y: f32 = 728.0;

    fn floor() -> Vec<Rect> {
        vec![Rect::new(0.0, FLOOR_Y, WORLD_WIDTH, 40.0)]
    }

    fn robot_at(x: f32, kind: RobotKind) -> Robot {
        let mut rng = Rng::new(1);
        let mut r = Robot::new(EntityId(1), Vec2::new(x, FLOOR_Y - 40.0), kind, &mut rng);
        r.body.on_ground = true;
        r
    }

    fn player_at(x: f32) -> Player {
        let mut p = Player::new();
        p.body.pos = Vec2::new(x, FLOOR_Y - 48.0);
        p.body.on_ground = true;
        p
    }

    #[test]
    fn kinds_set_health_and_speed() {
        let normal = robot_at(500.0, RobotKind::Normal);
        let tough = robot_at(500.0, RobotKind::Tough);
        assert_eq!((normal.health, normal.speed), (30, 1.5));
        assert_eq!((tough.health, tough.speed), (60, 2.5));
        assert_eq!(normal.body.vel.x.abs(), 2.0);
    }

    #[test]
    fn chases_nearby_player() {
        let mut ctx = EngineContext::new();
        let mut robot = robot_at(500.0, RobotKind::Normal);
        let mut player = player_at(400.0);
        robot.update(&mut player, &floor(), &mut ctx);
        assert_eq!(robot.body.vel.x, -1.5);
        assert_eq!(robot.body.pos.x, 498.5);
    }

    #[test]
    fn patrol_reverses_past_range() {
        let mut ctx = EngineContext::new();
        let mut robot = robot_at(500.0, RobotKind::Normal);
        robot.body.vel.x = 2.0;
        robot.body.pos.x = 601.0;
        let mut player = player_at(100.0);
        robot.update(&mut player, &floor(), &mut ctx);
        assert_eq!(robot.body.vel.x, -2.0);
    }

    #[test]
    fn contact_needs_sustained_presence() {
        let mut ctx = EngineContext::new();
        let mut robot = robot_at(500.0, RobotKind::Normal);
        let mut player = player_at(500.0);
        for _ in 0..CONTACT_WINDUP {
            player.body.pos.x = robot.body.pos.x;
            robot.update(&mut player, &floor(), &mut ctx);
        }
        assert_eq!(player.diamonds, 50);
        player.body.pos.x = robot.body.pos.x;
        robot.update(&mut player, &floor(), &mut ctx);
        assert_eq!(player.diamonds, 45);
        assert_eq!(player.invulnerable, 60);
        assert_eq!(robot.attack_timer, 0);
    }

    #[test]
    fn contact_with_five_diamonds_costs_a_life() {
        let mut ctx = EngineContext::new();
        let mut robot = robot_at(500.0, RobotKind::Normal);
        robot.attack_timer = CONTACT_WINDUP;
        let mut player = player_at(510.0);
        player.diamonds = 5;
        robot.update(&mut player, &floor(), &mut ctx);
        assert_eq!(player.lives, 2);
        assert_eq!(player.diamonds, 50);
        assert_eq!(player.body.pos, Vec2::new(100.0, 568.0));
        assert_eq!(player.invulnerable, 120);
    }

    #[test]
    fn attacking_player_is_not_hit_by_contact() {
        let mut ctx = EngineContext::new();
        let mut robot = robot_at(500.0, RobotKind::Tough);
        robot.attack_timer = CONTACT_WINDUP;
        let mut player = player_at(510.0);
        player.kick.active = true;
        player.kick.serial = 1;
        robot.update(&mut player, &floor(), &mut ctx);
        assert_eq!(player.diamonds, 50);
        assert_eq!(robot.health, 35);
        assert_eq!(ctx.sounds, vec![SoundCue::RobotHit]);
        assert!(!ctx.effects.sparks.is_empty());
    }

    #[test]
    fn dies_exactly_once_and_goes_inert() {
        let mut ctx = EngineContext::new();
        let mut robot = robot_at(500.0, RobotKind::Normal);
        let mut player = player_at(480.0);
        player.kick.active = true;
        player.kick.serial = 1;
        assert!(!robot.update(&mut player, &floor(), &mut ctx));
        player.kick.serial = 2;
        assert!(robot.update(&mut player, &floor(), &mut ctx));
        assert!(!robot.alive);
        let frozen = robot.body;
        player.kick.serial = 3;
        assert!(!robot.update(&mut player, &floor(), &mut ctx));
        assert_eq!(robot.body, frozen);
        assert_eq!(robot.health, -20);
    }
}
