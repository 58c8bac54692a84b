//! Builds levels and answers progression questions. Holds no state.

use glam::Vec2;

use crate::actors::{Boss, Diamond, Robot};
use crate::api::types::EntityId;
use crate::core::physics::{Body, Rect, SCREEN_HEIGHT, WORLD_WIDTH};
use crate::core::rng::Rng;
use crate::level::layouts;

pub const MAX_LEVEL: u32 = 5;
/// Past this x the player is in the boss arena.
pub const BOSS_REGION_X: f32 = WORLD_WIDTH - 500.0;
pub const BOSS_PLATFORM: Rect = Rect::new(WORLD_WIDTH - 300.0, SCREEN_HEIGHT - 100.0, 250.0, 60.0);

const GROUND_SPACING: usize = 200;
const GROUND_WIDTH: f32 = 180.0;
const GROUND_HEIGHT: f32 = 40.0;
const DIAMONDS_PER_LEDGE: usize = 2;
const FLOATING_PER_LEVEL: u32 = 5;

/// Everything a level starts with.
#[derive(Debug, Clone)]
pub struct Level {
    pub number: u32,
    pub platforms: Vec<Rect>,
    pub robots: Vec<Robot>,
    pub diamonds: Vec<Diamond>,
    pub boss: Option<Boss>,
}

/// Build level `number` (clamped into 1..=MAX_LEVEL). The same number and
/// seed always produce the same level.
pub fn build_level(number: u32, seed: u64) -> Level {
    let number = number.clamp(1, MAX_LEVEL);
    let layout = layouts::layout(number);
    let mut rng = Rng::new(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ number as u64);

    let mut platforms: Vec<Rect> = (0..WORLD_WIDTH as usize)
        .step_by(GROUND_SPACING)
        .map(|x| Rect::new(x as f32, SCREEN_HEIGHT - GROUND_HEIGHT, GROUND_WIDTH, GROUND_HEIGHT))
        .collect();
    platforms.push(BOSS_PLATFORM);
    let ledges: Vec<Rect> = layout.ledges.iter().map(|l| l.rect()).collect();
    platforms.extend_from_slice(&ledges);

    let robots: Vec<Robot> = layout
        .robots
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let pos = Vec2::new(spec.x, SCREEN_HEIGHT - spec.rise);
            Robot::new(EntityId(i as u32), pos, spec.kind, &mut rng)
        })
        .collect();

    let mut spots = Vec::new();
    for ledge in ledges.iter().filter(|l| l.x < BOSS_REGION_X) {
        for _ in 0..DIAMONDS_PER_LEDGE {
            let dx = rng.range_inclusive(10, ledge.w as i32 - 20);
            spots.push(Vec2::new(ledge.x + dx as f32, ledge.y - 20.0));
        }
    }
    for _ in 0..FLOATING_PER_LEVEL * number {
        let x = rng.range_inclusive(100, (WORLD_WIDTH - 600.0) as i32);
        let y = rng.range_inclusive(200, (SCREEN_HEIGHT - 200.0) as i32);
        spots.push(Vec2::new(x as f32, y as f32));
    }
    let diamonds = spots
        .into_iter()
        .enumerate()
        .map(|(i, pos)| Diamond::new(EntityId(i as u32), pos))
        .collect();

    log::debug!(
        "built level {number}: {} platforms, {} robots",
        platforms.len(),
        robots.len()
    );

    Level {
        number,
        platforms,
        robots,
        diamonds,
        boss: Some(Boss::new(number)),
    }
}

/// All robots down and the boss either down or absent.
pub fn level_cleared(robots: &[Robot], boss: Option<&Boss>) -> bool {
    robots.iter().all(|r| !r.alive) && boss.map_or(true, |b| !b.alive)
}

/// The arena stays closed while any robot is alive.
pub fn arena_locked(robots: &[Robot]) -> bool {
    robots.iter().any(|r| r.alive)
}

/// Push the player back out of the arena while it is locked. Returns true
/// if the player was moved.
pub fn enforce_arena_gate(player: &mut Body, robots: &[Robot]) -> bool {
    if arena_locked(robots) && player.pos.x > BOSS_REGION_X {
        player.pos.x = BOSS_REGION_X;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::RobotKind;

    #[test]
    fn robot_counts_per_level() {
        let counts: Vec<usize> = (1..=5).map(|n| build_level(n, 0).robots.len()).collect();
        assert_eq!(counts, vec![6, 9, 11, 12, 16]);
    }

    #[test]
    fn ground_and_boss_platform() {
        let level = build_level(1, 0);
        // 15 ground segments, the boss platform, 7 ledges.
        assert_eq!(level.platforms.len(), 23);
        assert_eq!(level.platforms[0], Rect::new(0.0, 728.0, 180.0, 40.0));
        assert_eq!(level.platforms[14], Rect::new(2800.0, 728.0, 180.0, 40.0));
        assert_eq!(level.platforms[15], Rect::new(2700.0, 668.0, 250.0, 60.0));
    }

    #[test]
    fn boss_scales_with_level() {
        assert_eq!(build_level(1, 0).boss.map(|b| b.health), Some(150));
        assert_eq!(build_level(5, 0).boss.map(|b| b.health), Some(350));
    }

    #[test]
    fn diamond_counts() {
        // Two per ledge plus five floating per level number.
        assert_eq!(build_level(1, 0).diamonds.len(), 7 * 2 + 5);
        assert_eq!(build_level(5, 0).diamonds.len(), 17 * 2 + 25);
    }

    #[test]
    fn diamonds_stay_out_of_the_arena() {
        for n in 1..=5 {
            let level = build_level(n, 0);
            for d in &level.diamonds {
                assert!(d.pos.x + 16.0 < BOSS_REGION_X, "level {n} diamond at {}", d.pos.x);
                assert!(!d.rect().overlaps(&BOSS_PLATFORM));
            }
        }
    }

    #[test]
    fn ledge_diamonds_sit_above_their_ledge() {
        let level = build_level(2, 0);
        let first = &level.diamonds[0];
        assert_eq!(first.pos.y, SCREEN_HEIGHT - 120.0 - 20.0);
        assert!(first.pos.x >= 210.0 && first.pos.x <= 280.0);
    }

    #[test]
    fn deterministic_per_level_and_seed() {
        let a = build_level(3, 7);
        let b = build_level(3, 7);
        let pos_a: Vec<Vec2> = a.diamonds.iter().map(|d| d.pos).collect();
        let pos_b: Vec<Vec2> = b.diamonds.iter().map(|d| d.pos).collect();
        assert_eq!(pos_a, pos_b);
        let vel_a: Vec<f32> = a.robots.iter().map(|r| r.body.vel.x).collect();
        let vel_b: Vec<f32> = b.robots.iter().map(|r| r.body.vel.x).collect();
        assert_eq!(vel_a, vel_b);
    }

    #[test]
    fn out_of_range_level_clamps() {
        assert_eq!(build_level(0, 0).number, 1);
        assert_eq!(build_level(12, 0).number, 5);
        assert!(build_level(5, 0).robots.iter().all(|r| r.kind == RobotKind::Tough));
    }

    #[test]
    fn clear_requires_robots_and_boss() {
        let mut level = build_level(1, 0);
        assert!(!level_cleared(&level.robots, level.boss.as_ref()));
        for r in &mut level.robots {
            r.alive = false;
        }
        assert!(!level_cleared(&level.robots, level.boss.as_ref()));
        if let Some(boss) = level.boss.as_mut() {
            boss.alive = false;
        }
        assert!(level_cleared(&level.robots, level.boss.as_ref()));
        // A missing boss counts as defeated.
        assert!(level_cleared(&[], None));
    }

    #[test]
    fn arena_gate_holds_until_robots_fall() {
        let mut level = build_level(1, 0);
        let mut body = Body::new(Vec2::new(2600.0, 600.0), Vec2::new(32.0, 48.0));
        assert!(enforce_arena_gate(&mut body, &level.robots));
        assert_eq!(body.pos.x, BOSS_REGION_X);

        level.robots.clear();
        body.pos.x = 2600.0;
        assert!(!enforce_arena_gate(&mut body, &level.robots));
        assert_eq!(body.pos.x, 2600.0);
    }
}
