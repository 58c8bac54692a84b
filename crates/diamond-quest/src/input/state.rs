//! Per-tick action sampling: which actions are held, and which went down
//! during the current frame (edges).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::queue::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Left,
    Right,
    Jump,
    Punch,
    Kick,
    Quit,
    Restart,
    Continue,
    Pause,
}

impl Action {
    /// Indexed by the web bridge's numeric action ids; append only.
    pub const ALL: [Action; 9] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Punch,
        Action::Kick,
        Action::Quit,
        Action::Restart,
        Action::Continue,
        Action::Pause,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Decode the numeric action ids used by the web bridge.
    pub fn from_id(id: u32) -> Option<Action> {
        Action::ALL.get(id as usize).copied()
    }
}

/// Maps DOM key codes to actions.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<u32, Action>,
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(mut self, key_code: u32, action: Action) -> Self {
        self.bindings.insert(key_code, action);
        self
    }

    pub fn action(&self, key_code: u32) -> Option<Action> {
        self.bindings.get(&key_code).copied()
    }
}

impl Default for KeyMap {
    /// Arrows/WASD move and jump, X punches, Z kicks, Esc or P pauses,
    /// Q quits, R restarts, Enter continues.
    fn default() -> Self {
        KeyMap::empty()
            .bind(37, Action::Left)
            .bind(65, Action::Left)
            .bind(39, Action::Right)
            .bind(68, Action::Right)
            .bind(32, Action::Jump)
            .bind(38, Action::Jump)
            .bind(87, Action::Jump)
            .bind(88, Action::Punch)
            .bind(90, Action::Kick)
            .bind(27, Action::Pause)
            .bind(80, Action::Pause)
            .bind(81, Action::Quit)
            .bind(82, Action::Restart)
            .bind(13, Action::Continue)
    }
}

/// Snapshot of the input device for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: u16,
    pressed: u16,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the action is currently held down.
    pub fn held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    /// Whether the action went down since the last `clear_edges`.
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    pub fn press(&mut self, action: Action) {
        if !self.held(action) {
            self.pressed |= action.bit();
        }
        self.held |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.held &= !action.bit();
    }

    /// Fold a frame's raw events into the state. Key repeat does not
    /// produce new edges while a key stays down.
    pub fn apply<I>(&mut self, events: I, keymap: &KeyMap)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            match event {
                InputEvent::KeyDown { key_code } => {
                    if let Some(action) = keymap.action(key_code) {
                        self.press(action);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    if let Some(action) = keymap.action(key_code) {
                        self.release(action);
                    }
                }
                InputEvent::ActionDown(action) => self.press(action),
                InputEvent::ActionUp(action) => self.release(action),
            }
        }
    }

    /// Forget this frame's edges; held actions persist.
    pub fn clear_edges(&mut self) {
        self.pressed = 0;
    }

    /// Build a state with the given actions held and freshly pressed.
    pub fn with_pressed(actions: &[Action]) -> Self {
        let mut state = Self::new();
        for &action in actions {
            state.press(action);
        }
        state
    }

    /// Build a state with the given actions held but no edges.
    pub fn with_held(actions: &[Action]) -> Self {
        let mut state = Self::with_pressed(actions);
        state.clear_edges();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_pressed() {
        let mut state = InputState::new();
        state.apply([InputEvent::KeyDown { key_code: 88 }], &KeyMap::default());
        assert!(state.held(Action::Punch));
        assert!(state.pressed(Action::Punch));
        state.clear_edges();
        assert!(state.held(Action::Punch));
        assert!(!state.pressed(Action::Punch));
    }

    #[test]
    fn key_repeat_does_not_retrigger() {
        let keymap = KeyMap::default();
        let mut state = InputState::new();
        state.apply([InputEvent::KeyDown { key_code: 32 }], &keymap);
        state.clear_edges();
        state.apply([InputEvent::KeyDown { key_code: 32 }], &keymap);
        assert!(!state.pressed(Action::Jump));
    }

    #[test]
    fn tap_within_one_frame_still_registers_edge() {
        let mut state = InputState::new();
        state.apply(
            [
                InputEvent::KeyDown { key_code: 90 },
                InputEvent::KeyUp { key_code: 90 },
            ],
            &KeyMap::default(),
        );
        assert!(state.pressed(Action::Kick));
        assert!(!state.held(Action::Kick));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut state = InputState::new();
        state.apply([InputEvent::KeyDown { key_code: 999 }], &KeyMap::default());
        assert_eq!(state, InputState::new());
    }

    #[test]
    fn escape_pauses_and_q_quits() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.action(27), Some(Action::Pause));
        assert_eq!(keymap.action(80), Some(Action::Pause));
        assert_eq!(keymap.action(81), Some(Action::Quit));
    }

    #[test]
    fn action_ids_round_trip() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(Action::from_id(i as u32), Some(*action));
        }
        assert_eq!(Action::from_id(8), Some(Action::Pause));
        assert_eq!(Action::from_id(42), None);
    }
}
