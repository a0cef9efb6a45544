//! Logical input events and macroquad key polling.

use macroquad::prelude::*;

/// Logical keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move left.
    Left,
    /// Move right.
    Right,
    /// Jump.
    Jump,
    /// Dash.
    Dash,
}

/// Discrete input delivered to [`crate::World::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key pressed this frame.
    KeyDown(Key),
    /// Key released this frame.
    KeyUp(Key),
    /// Window close or Escape.
    Quit,
}

/// Held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Left is held.
    pub left: bool,
    /// Right is held.
    pub right: bool,
}

impl InputState {
    /// Applies a held/released key. Jump and dash are edge-triggered and
    /// leave the state alone.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.left = true,
            InputEvent::KeyDown(Key::Right) => self.right = true,
            InputEvent::KeyUp(Key::Left) => self.left = false,
            InputEvent::KeyUp(Key::Right) => self.right = false,
            _ => {}
        }
    }

    /// Horizontal intent in {-1, 0, 1}.
    pub fn horizontal(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }
}

const BINDINGS: [(KeyCode, Key); 4] = [
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
    (KeyCode::Up, Key::Jump),
    (KeyCode::X, Key::Dash),
];

/// Collects this frame's key transitions from macroquad.
pub fn poll_macroquad_input() -> Vec<InputEvent> {
    let mut events = Vec::new();
    for (code, key) in BINDINGS {
        if is_key_pressed(code) {
            events.push(InputEvent::KeyDown(key));
        }
        if is_key_released(code) {
            events.push(InputEvent::KeyUp(key));
        }
    }
    if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
        events.push(InputEvent::Quit);
    }
    events
}
