//! Per-tick platformer physics: gravity, integration and axis-aligned
//! resolution against static platforms. All quantities are in pixels and
//! pixels per tick, with y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Downward acceleration added to `vel.y` every tick.
pub const GRAVITY: f32 = 0.8;
/// Horizontal extent of every level.
pub const WORLD_WIDTH: f32 = 3000.0;
/// Visible viewport size. Level layouts are authored against this height.
pub const SCREEN_WIDTH: f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;
/// A body whose top passes this line has fallen out of the level.
pub const FALL_LIMIT: f32 = SCREEN_HEIGHT + 100.0;

/// An axis-aligned rectangle. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Position, velocity and extent shared by every dynamic actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal distance between the left edges of two bodies.
    pub fn distance_x(&self, other: &Body) -> f32 {
        (self.pos.x - other.pos.x).abs()
    }

    /// Apply gravity, integrate, then resolve against `platforms`.
    ///
    /// Each platform is tested against the body's current rectangle, so a
    /// correction made for one platform is visible to the next. Vertical
    /// cases are checked before horizontal ones.
    pub fn step(&mut self, platforms: &[Rect]) {
        let prev_top = self.pos.y;
        self.vel.y += GRAVITY;
        self.pos += self.vel;
        self.on_ground = false;

        for platform in platforms {
            if !self.rect().overlaps(platform) {
                continue;
            }
            if self.vel.y > 0.0 && prev_top < platform.top() {
                self.pos.y = platform.top() - self.size.y;
                self.vel.y = 0.0;
                self.on_ground = true;
            } else if self.vel.y < 0.0 && prev_top >= platform.bottom() {
                self.pos.y = platform.bottom();
                self.vel.y = 0.0;
            } else if self.vel.x > 0.0 {
                self.pos.x = platform.left() - self.size.x;
            } else if self.vel.x < 0.0 {
                self.pos.x = platform.right();
            }
        }
    }

    /// Keep the body inside [0, WORLD_WIDTH - width].
    pub fn clamp_to_world(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - self.size.x);
    }

    pub fn fell_out(&self) -> bool {
        self.pos.y > FALL_LIMIT
    }
}
