// Input state tracking for the keyboard
// Abstracts winit events into a queryable per-frame snapshot and the
// simulation's movement/attack intent.

use std::collections::HashSet;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::game::Intent;

pub struct InputState {
    keys_held: HashSet<KeyCode>,
    /// Keys that went down since the last end_frame().
    keys_pressed: HashSet<KeyCode>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: HashSet::new(),
        }
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the game's own event handling.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
            }
            _ => {}
        }
    }

    fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            if self.keys_held.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_held.remove(&key);
        }
    }

    /// Call once per frame after update() and render() have consumed input.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// True only on the frame the key went down.
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Arrows or WASD to move and turn; Space (held) requests attacks.
    pub fn intent(&self) -> Intent {
        let any = |a: KeyCode, b: KeyCode| self.is_key_held(a) || self.is_key_held(b);
        Intent {
            turn_left: any(KeyCode::ArrowLeft, KeyCode::KeyA),
            turn_right: any(KeyCode::ArrowRight, KeyCode::KeyD),
            move_forward: any(KeyCode::ArrowUp, KeyCode::KeyW),
            move_backward: any(KeyCode::ArrowDown, KeyCode::KeyS),
            attack_requested: self.is_key_held(KeyCode::Space),
        }
    }
}
