//! Input state tracking

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::types::Vec2;

/// Tracks keyboard and mouse input state across window events
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
    /// Current cursor position in physical pixels
    cursor_position: (f32, f32),
    /// Cursor movement accumulated since the last drain
    cursor_delta: (f32, f32),
    /// Wheel scroll accumulated since the last drain, in lines
    scroll_delta: f32,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            mouse_buttons: HashSet::new(),
            cursor_position: (0.0, 0.0),
            cursor_delta: (0.0, 0.0),
            scroll_delta: 0.0,
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        self.keys_pressed.insert(*key_code);
                    }
                    ElementState::Released => {
                        self.keys_pressed.remove(key_code);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                self.cursor_delta.0 += new_pos.0 - self.cursor_position.0;
                self.cursor_delta.1 += new_pos.1 - self.cursor_position.1;
                self.cursor_position = new_pos;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match state {
                    ElementState::Pressed => {
                        self.mouse_buttons.insert(*button);
                    }
                    ElementState::Released => {
                        self.mouse_buttons.remove(button);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
            }
            _ => {}
        }
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Get current cursor position in physical pixels
    pub fn cursor_position(&self) -> (f32, f32) {
        self.cursor_position
    }

    /// Cursor position as normalized device coordinates for a window size.
    /// X and Y are in [-1, 1] with Y up.
    pub fn pointer_ndc(&self, width: u32, height: u32) -> Vec2 {
        Vec2::new(
            (self.cursor_position.0 / width as f32) * 2.0 - 1.0,
            -(self.cursor_position.1 / height as f32) * 2.0 + 1.0,
        )
    }

    /// Drain the cursor movement accumulated since the last call
    pub fn take_cursor_delta(&mut self) -> Vec2 {
        let delta = Vec2::new(self.cursor_delta.0, self.cursor_delta.1);
        self.cursor_delta = (0.0, 0.0);
        delta
    }

    /// Drain the wheel scroll accumulated since the last call
    pub fn take_scroll(&mut self) -> f32 {
        let scroll = self.scroll_delta;
        self.scroll_delta = 0.0;
        scroll
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press() {
        let mut input = InputState::new();

        assert!(!input.is_key_pressed(KeyCode::ShiftLeft));

        input.keys_pressed.insert(KeyCode::ShiftLeft);
        assert!(input.is_key_pressed(KeyCode::ShiftLeft));

        input.keys_pressed.remove(&KeyCode::ShiftLeft);
        assert!(!input.is_key_pressed(KeyCode::ShiftLeft));
    }

    #[test]
    fn test_pointer_ndc_corners() {
        let mut input = InputState::new();

        input.cursor_position = (0.0, 0.0);
        assert_eq!(input.pointer_ndc(800, 600), Vec2::new(-1.0, 1.0));

        input.cursor_position = (800.0, 600.0);
        assert_eq!(input.pointer_ndc(800, 600), Vec2::new(1.0, -1.0));

        input.cursor_position = (400.0, 300.0);
        assert_eq!(input.pointer_ndc(800, 600), Vec2::ZERO);
    }

    #[test]
    fn test_cursor_delta_drains() {
        let mut input = InputState::new();
        input.cursor_position = (10.0, 10.0);
        input.cursor_delta = (0.0, 0.0);

        input.cursor_delta.0 += 5.0;
        input.cursor_delta.1 -= 3.0;

        assert_eq!(input.take_cursor_delta(), Vec2::new(5.0, -3.0));
        assert_eq!(input.take_cursor_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_scroll_drains() {
        let mut input = InputState::new();
        input.scroll_delta = 2.0;
        assert_eq!(input.take_scroll(), 2.0);
        assert_eq!(input.take_scroll(), 0.0);
    }
}
