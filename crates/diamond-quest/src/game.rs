//! The top-level state machine: levels, scoring and the ordered per-tick
//! update of every actor.

use glam::Vec2;
use serde::Serialize;

use crate::actors::Player;
use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::{event_kinds, EntityId, GameEvent, SoundCue};
use crate::core::physics::{SCREEN_HEIGHT, SCREEN_WIDTH, WORLD_WIDTH};
use crate::input::{Action, InputState};
use crate::level::{self, Level, MAX_LEVEL};
use crate::persistence::{SaveState, ScoreSubmission, ValidationError};
use crate::renderer::{Camera2D, DiamondView, FrameSnapshot, PlayerView, RobotView};

/// Ticks the "level complete" banner stays up before the next level starts.
pub const LEVEL_COMPLETE_TICKS: u32 = 180;
pub const DIAMOND_POINTS: u32 = 10;
pub const ROBOT_POINTS: u32 = 100;
pub const BOSS_POINTS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameState {
    Playing,
    /// Frozen mid-level; only resumes to `Playing`.
    Paused,
    LevelComplete { countdown: u32 },
    GameOver,
    Victory,
}

impl GameState {
    /// Numeric code carried in `STATE_CHANGED` events.
    pub fn code(&self) -> f32 {
        match self {
            GameState::Playing => 0.0,
            GameState::LevelComplete { .. } => 1.0,
            GameState::GameOver => 2.0,
            GameState::Victory => 3.0,
            GameState::Paused => 4.0,
        }
    }
}

/// One step of a `Playing` tick. Phases run in `Phase::ORDER`; later phases
/// see the mutations of earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Camera,
    LifeCheck,
    Player,
    Collectibles,
    Enemies,
    Boss,
    ArenaGate,
    LevelClear,
}

impl Phase {
    pub const ORDER: [Phase; 8] = [
        Phase::Camera,
        Phase::LifeCheck,
        Phase::Player,
        Phase::Collectibles,
        Phase::Enemies,
        Phase::Boss,
        Phase::ArenaGate,
        Phase::LevelClear,
    ];
}

pub struct DiamondQuest {
    config: GameConfig,
    state: GameState,
    level: Level,
    player: Player,
    score: u32,
    camera: Camera2D,
    tick: u64,
    quit: bool,
    defeated_robots: Vec<EntityId>,
    collected_diamonds: Vec<EntityId>,
    boss_defeated: bool,
    /// Phases executed during the most recent tick.
    last_phases: Vec<Phase>,
}

impl DiamondQuest {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut camera = Camera2D::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        camera.set_bounds(0.0, 0.0, WORLD_WIDTH, SCREEN_HEIGHT);
        camera.set_smoothing(config.camera_smoothing);
        let level = level::build_level(1, config.diamond_seed);
        Self {
            config,
            state: GameState::Playing,
            level,
            player: Player::new(),
            score: 0,
            camera,
            tick: 0,
            quit: false,
            defeated_robots: Vec::new(),
            collected_diamonds: Vec::new(),
            boss_defeated: false,
            last_phases: Vec::with_capacity(Phase::ORDER.len()),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera_x(&self) -> f32 {
        self.camera.offset_x()
    }

    pub fn last_phases(&self) -> &[Phase] {
        &self.last_phases
    }

    /// The current run as a leaderboard entry.
    pub fn score_submission(&self, player_name: &str, created_at: u64) -> ScoreSubmission {
        ScoreSubmission {
            player_name: player_name.to_string(),
            score: self.score as i64,
            level_reached: self.level.number as i64,
            created_at,
        }
    }

    fn set_state(&mut self, state: GameState, ctx: &mut EngineContext) {
        log::info!("state {:?} -> {:?} (level {})", self.state, state, self.level.number);
        self.state = state;
        ctx.emit_event(GameEvent::new(
            event_kinds::STATE_CHANGED,
            state.code(),
            self.level.number as f32,
            0.0,
        ));
    }

    fn award(&mut self, points: u32, ctx: &mut EngineContext) {
        self.score = self.score.saturating_add(points);
        ctx.emit_event(GameEvent::new(
            event_kinds::SCORE_CHANGED,
            self.score as f32,
            points as f32,
            0.0,
        ));
    }

    fn load_level(&mut self, number: u32, ctx: &mut EngineContext) {
        self.level = level::build_level(number, self.config.diamond_seed);
        self.defeated_robots.clear();
        self.collected_diamonds.clear();
        self.boss_defeated = false;
        self.camera.look_at(Vec2::new(0.0, SCREEN_HEIGHT / 2.0));
        ctx.effects.clear();
        ctx.emit_event(GameEvent::new(
            event_kinds::LEVEL_STARTED,
            self.level.number as f32,
            0.0,
            0.0,
        ));
        log::info!("level {} started", self.level.number);
    }

    fn restart(&mut self, ctx: &mut EngineContext) {
        self.player = Player::new();
        self.score = 0;
        self.load_level(1, ctx);
        self.set_state(GameState::Playing, ctx);
    }

    fn advance_level(&mut self, ctx: &mut EngineContext) {
        let next = self.level.number + 1;
        if next > MAX_LEVEL {
            self.set_state(GameState::Victory, ctx);
            return;
        }
        self.load_level(next, ctx);
        self.player.reset_for_level();
        self.set_state(GameState::Playing, ctx);
    }

    fn play(&mut self, ctx: &mut EngineContext, input: &InputState) {
        self.last_phases.clear();
        for phase in Phase::ORDER {
            self.last_phases.push(phase);
            match phase {
                Phase::Camera => self.follow_player(),
                Phase::LifeCheck => {
                    if self.player.lives == 0 {
                        self.set_state(GameState::GameOver, ctx);
                        return;
                    }
                }
                Phase::Player => self.player.update(input, &self.level.platforms, ctx),
                Phase::Collectibles => self.update_diamonds(ctx),
                Phase::Enemies => self.update_robots(ctx),
                Phase::Boss => self.update_boss(ctx),
                Phase::ArenaGate => {
                    level::enforce_arena_gate(&mut self.player.body, &self.level.robots);
                }
                Phase::LevelClear => {
                    if level::level_cleared(&self.level.robots, self.level.boss.as_ref()) {
                        ctx.emit_sound(SoundCue::LevelComplete);
                        self.set_state(
                            GameState::LevelComplete {
                                countdown: LEVEL_COMPLETE_TICKS,
                            },
                            ctx,
                        );
                    }
                }
            }
        }
    }

    fn follow_player(&mut self) {
        let target = Vec2::new(self.player.body.pos.x, SCREEN_HEIGHT / 2.0);
        self.camera.follow(target, self.config.fixed_dt);
    }

    fn update_diamonds(&mut self, ctx: &mut EngineContext) {
        let mut collected = 0;
        for diamond in &mut self.level.diamonds {
            if diamond.update(&mut self.player, ctx) {
                self.collected_diamonds.push(diamond.id);
                collected += 1;
            }
        }
        if collected > 0 {
            self.level.diamonds.retain(|d| !d.collected);
            self.award(collected * DIAMOND_POINTS, ctx);
        }
    }

    fn update_robots(&mut self, ctx: &mut EngineContext) {
        let mut destroyed = Vec::new();
        for robot in &mut self.level.robots {
            if robot.update(&mut self.player, &self.level.platforms, ctx) {
                destroyed.push(robot.id);
            }
        }
        if destroyed.is_empty() {
            return;
        }
        self.level.robots.retain(|r| r.alive);
        for id in destroyed {
            self.defeated_robots.push(id);
            ctx.emit_event(GameEvent::new(
                event_kinds::ROBOT_DEFEATED,
                id.0 as f32,
                self.level.robots.len() as f32,
                0.0,
            ));
            self.award(ROBOT_POINTS, ctx);
        }
    }

    fn update_boss(&mut self, ctx: &mut EngineContext) {
        let Some(boss) = self.level.boss.as_mut() else {
            return;
        };
        if boss.update(&mut self.player, &self.level.platforms, ctx) {
            let level = boss.level;
            self.level.boss = None;
            self.boss_defeated = true;
            ctx.emit_event(GameEvent::new(event_kinds::BOSS_DEFEATED, level as f32, 0.0, 0.0));
            self.award(BOSS_POINTS, ctx);
        }
    }

    /// Export the current run.
    pub fn save_state(&self) -> SaveState {
        SaveState {
            level: self.level.number as i64,
            diamonds: self.player.diamonds as i64,
            lives: self.player.lives as i64,
            score: self.score as i64,
            player_x: self.player.body.pos.x,
            player_y: self.player.body.pos.y,
            robots_defeated: self.defeated_robots.iter().map(|id| id.0).collect(),
            diamonds_collected: self.collected_diamonds.iter().map(|id| id.0).collect(),
            boss_defeated: self.boss_defeated,
            level_completed: matches!(self.state, GameState::LevelComplete { .. }),
        }
    }

    /// Validate `save` and restore it. On error nothing changes.
    ///
    /// A saved level past the last one restores as a won run.
    pub fn apply_save(
        &mut self,
        save: &SaveState,
        ctx: &mut EngineContext,
    ) -> Result<(), ValidationError> {
        if let Err(err) = self.check_save(save) {
            log::warn!("rejected save state: {err}");
            return Err(err);
        }

        let number = save.level as u32;
        self.load_level(number.min(MAX_LEVEL), ctx);
        self.level.robots.retain(|r| !save.robots_defeated.contains(&r.id.0));
        self.level
            .diamonds
            .retain(|d| !save.diamonds_collected.contains(&d.id.0));
        self.defeated_robots = save.robots_defeated.iter().map(|&id| EntityId(id)).collect();
        self.collected_diamonds = save.diamonds_collected.iter().map(|&id| EntityId(id)).collect();
        if save.boss_defeated {
            self.level.boss = None;
            self.boss_defeated = true;
        }

        self.player = Player::new();
        self.player.diamonds = save.diamonds as u32;
        self.player.lives = save.lives as u32;
        let max = Vec2::new(WORLD_WIDTH, SCREEN_HEIGHT) - self.player.body.size;
        self.player.body.pos = Vec2::new(save.player_x, save.player_y).clamp(Vec2::ZERO, max);
        self.score = save.score as u32;
        if self.player.diamonds == 0 && self.player.lives > 0 {
            self.player.lose_life(ctx);
        }

        let state = if number > MAX_LEVEL {
            GameState::Victory
        } else if self.player.lives == 0 {
            GameState::GameOver
        } else if save.level_completed {
            GameState::LevelComplete {
                countdown: LEVEL_COMPLETE_TICKS,
            }
        } else {
            GameState::Playing
        };
        self.set_state(state, ctx);
        Ok(())
    }

    fn check_save(&self, save: &SaveState) -> Result<(), ValidationError> {
        save.validate()?;
        let number = (save.level as u32).min(MAX_LEVEL);
        let layout = level::build_level(number, self.config.diamond_seed);
        if let Some(&id) = save
            .robots_defeated
            .iter()
            .find(|&&id| id as usize >= layout.robots.len())
        {
            return Err(ValidationError::UnknownId {
                field: "robotsDefeated",
                id,
            });
        }
        if let Some(&id) = save
            .diamonds_collected
            .iter()
            .find(|&&id| id as usize >= layout.diamonds.len())
        {
            return Err(ValidationError::UnknownId {
                field: "diamondsCollected",
                id,
            });
        }
        Ok(())
    }
}

impl Default for DiamondQuest {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for DiamondQuest {
    type Snapshot = FrameSnapshot;

    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.restart(ctx);
        log::info!("diamond quest: initialized");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
        self.tick += 1;
        if input.pressed(Action::Quit) {
            log::info!("quit requested");
            self.quit = true;
            return;
        }

        match self.state {
            GameState::Playing if input.pressed(Action::Pause) => {
                self.last_phases.clear();
                self.set_state(GameState::Paused, ctx);
            }
            GameState::Playing => self.play(ctx, input),
            GameState::Paused => {
                self.last_phases.clear();
                if input.pressed(Action::Pause) {
                    self.set_state(GameState::Playing, ctx);
                }
            }
            GameState::LevelComplete { countdown } => {
                let remaining = countdown.saturating_sub(1);
                if remaining == 0 || input.pressed(Action::Continue) {
                    self.advance_level(ctx);
                } else {
                    self.state = GameState::LevelComplete {
                        countdown: remaining,
                    };
                }
            }
            GameState::GameOver | GameState::Victory => {
                if input.pressed(Action::Restart) {
                    self.restart(ctx);
                }
            }
        }
    }

    fn snapshot(&self, ctx: &EngineContext) -> FrameSnapshot {
        let cam = &self.camera;
        FrameSnapshot {
            tick: self.tick,
            state: self.state,
            level: self.level.number,
            score: self.score,
            camera_x: cam.offset_x(),
            player: PlayerView::from(&self.player),
            robots: self
                .level
                .robots
                .iter()
                .filter(|r| cam.is_rect_visible(r.body.pos, r.body.size))
                .map(RobotView::from)
                .collect(),
            boss: self.level.boss.as_ref().map(Into::into),
            diamonds: self
                .level
                .diamonds
                .iter()
                .filter(|d| cam.is_rect_visible(d.pos, crate::actors::diamond::DIAMOND_SIZE))
                .map(DiamondView::from)
                .collect(),
            platforms: self
                .level
                .platforms
                .iter()
                .filter(|p| cam.is_rect_visible(Vec2::new(p.x, p.y), Vec2::new(p.w, p.h)))
                .copied()
                .collect(),
            flashes: ctx.effects.flashes.clone(),
            sparks: ctx.effects.sparks.clone(),
            robots_remaining: self.level.robots.len(),
            diamonds_remaining: self.level.diamonds.len(),
        }
    }

    fn wants_quit(&self) -> bool {
        self.quit
    }
}
