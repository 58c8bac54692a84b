use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable identifier of a robot or diamond within its level.
/// Assigned in build order by the level director, so a saved id refers to the
/// same entity after the level is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

/// A named sound cue emitted by the simulation.
/// The numeric value (`id`) maps to a sound in the page's audio manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Jump,
    Punch,
    Kick,
    DiamondCollect,
    DiamondLost,
    LifeLost,
    RobotHit,
    BossHit,
    LevelComplete,
}

impl SoundCue {
    pub const ALL: [SoundCue; 9] = [
        SoundCue::Jump,
        SoundCue::Punch,
        SoundCue::Kick,
        SoundCue::DiamondCollect,
        SoundCue::DiamondLost,
        SoundCue::LifeLost,
        SoundCue::RobotHit,
        SoundCue::BossHit,
        SoundCue::LevelComplete,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Punch => "punch",
            SoundCue::Kick => "kick",
            SoundCue::DiamondCollect => "diamond_collect",
            SoundCue::DiamondLost => "diamond_lost",
            SoundCue::LifeLost => "life_lost",
            SoundCue::RobotHit => "robot_hit",
            SoundCue::BossHit => "boss_hit",
            SoundCue::LevelComplete => "level_complete",
        }
    }
}

/// Receives sound cues once per frame. Playback must never block the loop.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue. Used for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in order.
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// A game event communicated from Rust to the page through a flat f32 buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Event kinds carried in `GameEvent::kind`.
pub mod event_kinds {
    /// a = new state code (see `GameState::code`).
    pub const STATE_CHANGED: f32 = 1.0;
    /// a = level number.
    pub const LEVEL_STARTED: f32 = 2.0;
    /// a = new score, b = points just awarded.
    pub const SCORE_CHANGED: f32 = 3.0;
    /// a = lives remaining, b = diamonds after reset.
    pub const LIFE_LOST: f32 = 4.0;
    /// a = robot id, b = robots still alive.
    pub const ROBOT_DEFEATED: f32 = 5.0;
    /// a = boss level.
    pub const BOSS_DEFEATED: f32 = 6.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_ids_are_unique_and_dense() {
        for (i, cue) in SoundCue::ALL.iter().enumerate() {
            assert_eq!(cue.id() as usize, i);
        }
    }

    #[test]
    fn cue_names_match_serde() {
        for cue in SoundCue::ALL {
            let json = serde_json::to_string(&cue).unwrap();
            assert_eq!(json, format!("\"{}\"", cue.name()));
        }
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<SoundCue> = Vec::new();
        sink.play(SoundCue::Jump);
        sink.play(SoundCue::Kick);
        assert_eq!(sink, vec![SoundCue::Jump, SoundCue::Kick]);
    }

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
        let events = [GameEvent::new(1.0, 2.0, 3.0, 4.0)];
        let flat: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }
}
