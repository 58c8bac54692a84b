//! Cosmetic effects: punch/kick impact flashes and hit sparks.
//!
//! This is a side output channel. Gameplay code pushes into it and never reads
//! it back, so clearing or ignoring it cannot change a simulation result.

use glam::Vec2;
use serde::Serialize;

use crate::core::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Punch,
    Kick,
}

/// An expanding ring drawn where a punch or kick lands.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactFlash {
    pub kind: FlashKind,
    pub pos: Vec2,
    /// Ticks left to display.
    pub timer: u32,
    /// Radius; grows by one every tick.
    pub size: f32,
}

impl ImpactFlash {
    /// Advance one tick. Returns false when expired.
    fn tick(&mut self) -> bool {
        self.timer = self.timer.saturating_sub(1);
        self.size += 1.0;
        self.timer > 0
    }
}

/// A short-lived particle thrown off a struck robot or boss.
#[derive(Debug, Clone, Serialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub timer: u32,
}

impl Spark {
    const DRAG: f32 = 0.9;

    fn tick(&mut self) -> bool {
        self.timer = self.timer.saturating_sub(1);
        self.pos += self.vel;
        self.vel *= Self::DRAG;
        self.timer > 0
    }
}

/// Container for all cosmetic effects.
pub struct EffectsState {
    pub flashes: Vec<ImpactFlash>,
    pub sparks: Vec<Spark>,
    rng: Rng,
}

impl EffectsState {
    pub const SPARK_TICKS: u32 = 18;

    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            flashes: Vec::new(),
            sparks: Vec::new(),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    pub fn add_flash(&mut self, kind: FlashKind, pos: Vec2, timer: u32, size: f32) {
        self.flashes.push(ImpactFlash {
            kind,
            pos,
            timer,
            size,
        });
    }

    /// Throw `count` sparks from `center` with random velocities up to `speed_limit`.
    pub fn spawn_sparks(&mut self, center: Vec2, count: usize, speed_limit: f32) {
        for _ in 0..count {
            let angle = self.rng.next_unit() * std::f32::consts::TAU;
            let speed = (0.3 + 0.7 * self.rng.next_unit()) * speed_limit;
            self.sparks.push(Spark {
                pos: center,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                timer: Self::SPARK_TICKS,
            });
        }
    }

    /// Advance every effect one tick and drop expired ones.
    pub fn tick(&mut self) {
        self.flashes.retain_mut(ImpactFlash::tick);
        self.sparks.retain_mut(Spark::tick);
    }

    pub fn clear(&mut self) {
        self.flashes.clear();
        self.sparks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.flashes.is_empty() && self.sparks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_expands_and_expires() {
        let mut effects = EffectsState::new(42);
        effects.add_flash(FlashKind::Punch, Vec2::new(140.0, 588.0), 15, 20.0);
        effects.tick();
        assert_eq!(effects.flashes[0].timer, 14);
        assert_eq!(effects.flashes[0].size, 21.0);
        for _ in 0..14 {
            effects.tick();
        }
        assert!(effects.flashes.is_empty());
    }

    #[test]
    fn sparks_expire() {
        let mut effects = EffectsState::new(42);
        effects.spawn_sparks(Vec2::new(50.0, 50.0), 6, 4.0);
        assert_eq!(effects.sparks.len(), 6);
        for _ in 0..EffectsState::SPARK_TICKS {
            effects.tick();
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn sparks_are_deterministic_per_seed() {
        let mut a = EffectsState::new(3);
        let mut b = EffectsState::new(3);
        a.spawn_sparks(Vec2::ZERO, 4, 5.0);
        b.spawn_sparks(Vec2::ZERO, 4, 5.0);
        for (x, y) in a.sparks.iter().zip(&b.sparks) {
            assert_eq!(x.vel, y.vel);
        }
    }

    #[test]
    fn clear_empties_everything() {
        let mut effects = EffectsState::new(1);
        effects.add_flash(FlashKind::Kick, Vec2::ZERO, 20, 25.0);
        effects.spawn_sparks(Vec2::ZERO, 3, 2.0);
        effects.clear();
        assert!(effects.is_empty());
    }
}
