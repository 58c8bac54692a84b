use glam::Vec2;

use crate::actors::Player;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, SoundCue};
use crate::core::physics::Rect;

pub const DIAMOND_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// A one-shot pickup worth one diamond.
#[derive(Debug, Clone, PartialEq)]
pub struct Diamond {
    pub id: EntityId,
    pub pos: Vec2,
    /// Flips to true once and never back.
    pub collected: bool,
}

impl Diamond {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, DIAMOND_SIZE.x, DIAMOND_SIZE.y)
    }

    /// Collect when the player overlaps. Returns true on the collecting tick.
    pub fn update(&mut self, player: &mut Player, ctx: &mut EngineContext) -> bool {
        if self.collected || !self.rect().overlaps(&player.body.rect()) {
            return false;
        }
        self.collected = true;
        player.diamonds += 1;
        ctx.emit_sound(SoundCue::DiamondCollect);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_once_on_overlap() {
        let mut ctx = EngineContext::new();
        let mut player = Player::new();
        let mut diamond = Diamond::new(EntityId(0), player.body.pos + Vec2::new(8.0, 8.0));
        assert!(diamond.update(&mut player, &mut ctx));
        assert!(diamond.collected);
        assert_eq!(player.diamonds, 51);
        assert!(!diamond.update(&mut player, &mut ctx));
        assert_eq!(player.diamonds, 51);
        assert_eq!(ctx.sounds, vec![SoundCue::DiamondCollect]);
    }

    #[test]
    fn ignores_distant_player() {
        let mut ctx = EngineContext::new();
        let mut player = Player::new();
        let mut diamond = Diamond::new(EntityId(0), Vec2::new(900.0, 100.0));
        assert!(!diamond.update(&mut player, &mut ctx));
        assert!(!diamond.collected);
    }

    #[test]
    fn touching_edge_does_not_collect() {
        let mut ctx = EngineContext::new();
        let mut player = Player::new();
        let pos = player.body.pos + Vec2::new(player.body.size.x, 0.0);
        let mut diamond = Diamond::new(EntityId(0), pos);
        assert!(!diamond.update(&mut player, &mut ctx));
    }
}
