//! Per-frame input.
//!
//! The board reads input through [`InputSource`], once per frame. Front ends
//! usually only know whether a button is currently held; [`InputTracker`]
//! turns those raw samples into the pressed/released edges the game logic
//! relies on.

use crate::slot::Vector2D;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
}

/// Read-only view of the input state for the current frame
pub trait InputSource {
    /// Cursor position in pixels
    fn mouse_position(&self) -> Vector2D;
    /// Button is held this frame
    fn is_down(&self, button: MouseButton) -> bool;
    /// Button went down this frame
    fn is_pressed(&self, button: MouseButton) -> bool;
    /// Button went up this frame
    fn is_released(&self, button: MouseButton) -> bool;
    /// Key went down this frame
    fn key_pressed(&self, key: Key) -> bool;
}

/// Held state and edges of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonState {
    pub down: bool,
    pub pressed: bool,
    pub released: bool,
}

impl ButtonState {
    fn advance(was_down: bool, down: bool) -> Self {
        Self {
            down,
            pressed: down && !was_down,
            released: !down && was_down,
        }
    }
}

/// Immutable input snapshot of a single frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub mouse: Vector2D,
    pub left: ButtonState,
    pub right: ButtonState,
    pub escape_pressed: bool,
}

impl InputSnapshot {
    /// Cursor at `mouse`, no button activity
    pub fn at(mouse: Vector2D) -> Self {
        Self {
            mouse,
            ..Self::default()
        }
    }

    fn button(&self, button: MouseButton) -> &ButtonState {
        match button {
            MouseButton::Left => &self.left,
            MouseButton::Right => &self.right,
        }
    }
}

impl InputSource for InputSnapshot {
    fn mouse_position(&self) -> Vector2D {
        self.mouse
    }

    fn is_down(&self, button: MouseButton) -> bool {
        self.button(button).down
    }

    fn is_pressed(&self, button: MouseButton) -> bool {
        self.button(button).pressed
    }

    fn is_released(&self, button: MouseButton) -> bool {
        self.button(button).released
    }

    fn key_pressed(&self, key: Key) -> bool {
        match key {
            Key::Escape => self.escape_pressed,
        }
    }
}

/// Raw device sample, as sent by a front end
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawInput {
    pub mouse_x: f32,
    pub mouse_y: f32,
    #[serde(default)]
    pub left_down: bool,
    #[serde(default)]
    pub right_down: bool,
    #[serde(default)]
    pub escape_down: bool,
}

/// Derives button edges from consecutive raw samples
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: RawInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for the frame described by `raw`
    pub fn advance(&mut self, raw: RawInput) -> InputSnapshot {
        let previous = std::mem::replace(&mut self.previous, raw);
        InputSnapshot {
            mouse: Vector2D::new(raw.mouse_x, raw.mouse_y),
            left: ButtonState::advance(previous.left_down, raw.left_down),
            right: ButtonState::advance(previous.right_down, raw.right_down),
            escape_pressed: raw.escape_down && !previous.escape_down,
        }
    }
}
