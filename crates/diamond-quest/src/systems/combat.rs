//! Player-on-enemy hit detection shared by robots and the boss.
//!
//! Punches and kicks are proximity checks on horizontal distance, ignoring
//! facing. A stomp is a falling player whose feet are near the target's top.
//! Each attack window lands on a given target at most once; the target's
//! [`HitLedger`] remembers the serial of the last window that hit it.

use glam::Vec2;

use crate::actors::Player;
use crate::core::physics::Body;

pub const PUNCH_RANGE: f32 = 45.0;
pub const KICK_RANGE: f32 = 55.0;
/// How far above a target's top a falling player's feet may be and still
/// count as a stomp. One tick of fall at terminal jump speed.
pub const STOMP_REACH: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Punch,
    Kick,
    Stomp,
}

/// Per-target damage and reaction numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeTable {
    pub punch_damage: i32,
    pub punch_knockback: f32,
    pub kick_damage: i32,
    pub kick_knockback: f32,
    pub kick_lift: f32,
    pub stomp_damage: i32,
    /// Maximum |dx| between left edges for a stomp.
    pub stomp_width: f32,
    /// How far below the target's top the player's feet may sink.
    pub stomp_depth: f32,
    pub stomp_bounce: f32,
    pub stomp_cooldown: u32,
}

pub const ROBOT_STRIKES: StrikeTable = StrikeTable {
    punch_damage: 15,
    punch_knockback: 5.0,
    kick_damage: 25,
    kick_knockback: 8.0,
    kick_lift: -5.0,
    stomp_damage: 20,
    stomp_width: 30.0,
    stomp_depth: 10.0,
    stomp_bounce: -8.0,
    stomp_cooldown: 10,
};

pub const BOSS_STRIKES: StrikeTable = StrikeTable {
    punch_damage: 10,
    punch_knockback: 3.0,
    kick_damage: 20,
    kick_knockback: 5.0,
    kick_lift: -3.0,
    stomp_damage: 15,
    stomp_width: 40.0,
    stomp_depth: 15.0,
    stomp_bounce: -10.0,
    stomp_cooldown: 15,
};

/// Serials of the last punch and kick windows that landed on one target.
/// Zero means never; player windows are numbered from one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitLedger {
    pub punch_serial: u32,
    pub kick_serial: u32,
}

/// What landed on a target this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hits {
    pub strikes: Vec<Strike>,
    pub damage: i32,
}

impl Hits {
    pub fn any(&self) -> bool {
        !self.strikes.is_empty()
    }
}

/// Apply every strike the player currently lands on `target`.
///
/// `distance` is the horizontal gap the target measured at the start of its
/// own update; punches and kicks use it. Stomps use the bodies as they are
/// now. Knockback pushes the target the way the player faces.
pub fn resolve_strikes(
    player: &mut Player,
    target: &mut Body,
    health: &mut i32,
    ledger: &mut HitLedger,
    table: &StrikeTable,
    distance: f32,
) -> Hits {
    let mut hits = Hits::default();
    let push = player.facing.sign();

    if player.punch.active && distance < PUNCH_RANGE && ledger.punch_serial != player.punch.serial
    {
        ledger.punch_serial = player.punch.serial;
        target.vel.x = table.punch_knockback * push;
        hits.strikes.push(Strike::Punch);
        hits.damage += table.punch_damage;
    }

    if player.kick.active && distance < KICK_RANGE && ledger.kick_serial != player.kick.serial {
        ledger.kick_serial = player.kick.serial;
        target.vel = Vec2::new(table.kick_knockback * push, table.kick_lift);
        hits.strikes.push(Strike::Kick);
        hits.damage += table.kick_damage;
    }

    if is_stomp(&player.body, player.jump_cooldown, target, table) {
        player.bounce(table.stomp_bounce, table.stomp_cooldown);
        hits.strikes.push(Strike::Stomp);
        hits.damage += table.stomp_damage;
    }

    *health -= hits.damage;
    hits
}

fn is_stomp(player: &Body, jump_cooldown: u32, target: &Body, table: &StrikeTable) -> bool {
    let feet = player.bottom();
    let top = target.pos.y;
    jump_cooldown == 0
        && player.vel.y > 0.0
        && (player.pos.x - target.pos.x).abs() < table.stomp_width
        && feet > top - STOMP_REACH
        && feet < top + table.stomp_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::Facing;

    /// Something to hit: a body with health and its own ledger.
    struct Dummy {
        body: Body,
        health: i32,
        ledger: HitLedger,
        table: &'static StrikeTable,
    }

    impl Dummy {
        fn robot(x: f32, health: i32) -> Self {
            Self {
                body: Body::new(Vec2::new(x, 688.0), Vec2::new(28.0, 40.0)),
                health,
                ledger: HitLedger::default(),
                table: &ROBOT_STRIKES,
            }
        }

        fn boss(x: f32, y: f32) -> Self {
            Self {
                body: Body::new(Vec2::new(x, y), Vec2::new(60.0, 80.0)),
                health: 150,
                ledger: HitLedger::default(),
                table: &BOSS_STRIKES,
            }
        }

        fn take(&mut self, player: &mut Player, distance: f32) -> Hits {
            resolve_strikes(
                player,
                &mut self.body,
                &mut self.health,
                &mut self.ledger,
                self.table,
                distance,
            )
        }
    }

    fn player_at(x: f32) -> Player {
        let mut p = Player::new();
        p.body.pos = Vec2::new(x, 680.0);
        p
    }

    #[test]
    fn punch_lands_once_per_window() {
        let mut player = player_at(100.0);
        player.punch.active = true;
        player.punch.serial = 1;
        let mut target = Dummy::robot(130.0, 30);

        let hits = target.take(&mut player, 30.0);
        assert_eq!(hits.strikes, vec![Strike::Punch]);
        assert_eq!(target.health, 15);
        assert_eq!(target.body.vel.x, 5.0);

        assert!(!target.take(&mut player, 30.0).any());
        assert_eq!(target.health, 15);

        // A fresh window lands again.
        player.punch.serial = 2;
        target.take(&mut player, 30.0);
        assert_eq!(target.health, 0);
    }

    #[test]
    fn strikes_ignore_facing_but_knockback_follows_it() {
        let mut player = player_at(100.0);
        player.facing = Facing::Left;
        player.kick.active = true;
        player.kick.serial = 1;
        let mut target = Dummy::robot(150.0, 60);
        target.take(&mut player, 50.0);
        assert_eq!(target.health, 35);
        assert_eq!(target.body.vel, Vec2::new(-8.0, -5.0));
    }

    #[test]
    fn out_of_range_misses() {
        let mut player = player_at(100.0);
        player.punch.active = true;
        player.punch.serial = 1;
        let mut target = Dummy::robot(150.0, 30);
        assert!(!target.take(&mut player, 50.0).any());
        assert_eq!(target.health, 30);
    }

    #[test]
    fn stomp_bounces_and_sets_cooldown() {
        let mut player = Player::new();
        player.body.pos = Vec2::new(105.0, 688.0 - 48.0 - 5.0);
        player.body.vel.y = 6.0;
        let mut target = Dummy::robot(100.0, 30);
        let hits = target.take(&mut player, 5.0);
        assert_eq!(hits.strikes, vec![Strike::Stomp]);
        assert_eq!(target.health, 10);
        assert_eq!(player.body.vel.y, -8.0);
        assert_eq!(player.jump_cooldown, 10);

        // Cooldown blocks an immediate second stomp.
        player.body.vel.y = 6.0;
        assert!(!target.take(&mut player, 5.0).any());
    }

    #[test]
    fn rising_player_does_not_stomp() {
        let mut player = Player::new();
        player.body.pos = Vec2::new(100.0, 688.0 - 48.0);
        player.body.vel.y = -4.0;
        let mut target = Dummy::robot(100.0, 30);
        assert!(!target.take(&mut player, 0.0).any());
    }

    #[test]
    fn player_far_above_does_not_stomp() {
        let mut player = Player::new();
        player.body.pos = Vec2::new(100.0, 400.0);
        player.body.vel.y = 5.0;
        let mut target = Dummy::robot(100.0, 30);
        assert!(!target.take(&mut player, 0.0).any());
    }

    #[test]
    fn boss_table_is_wider_and_softer() {
        let mut player = Player::new();
        player.body.pos = Vec2::new(135.0, 600.0 - 48.0 + 10.0);
        player.body.vel.y = 3.0;
        let mut boss = Dummy::boss(100.0, 600.0);
        let hits = boss.take(&mut player, 35.0);
        assert_eq!(hits.strikes, vec![Strike::Stomp]);
        assert_eq!(boss.health, 135);
        assert_eq!(player.body.vel.y, -10.0);
        assert_eq!(player.jump_cooldown, 15);
    }
}
