//! Clickable buttons.
//!
//! A button carries an action value of any type instead of a callback; the
//! owner decides what to do with the value when the button fires.

use crate::render::{Align, ButtonLook, RenderSink, Visual};
use crate::slot::Vector2D;

/// Offset from the button's top-left corner to its draw position
pub const BUTTON_HOTSPOT: Vector2D = Vector2D::new(128.0, 64.0);

/// Clickable area in sprite-local coordinates (top-left, bottom-right)
pub const BUTTON_HIT_BOX: (Vector2D, Vector2D) = (Vector2D::new(15.0, 37.0), Vector2D::new(241.0, 91.0));

const CAPTION_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Pushed,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Button<A> {
    position: Vector2D,
    caption: String,
    action: A,
    state: ButtonState,
    mouse_over: bool,
    /// Highlight pulse clock, wraps in `[0, 1)`
    time: f32,
    highlight_alpha: u8,
}

impl<A: Clone> Button<A> {
    pub fn new(position: Vector2D, caption: impl Into<String>, action: A) -> Self {
        Self {
            position,
            caption: caption.into(),
            action,
            state: ButtonState::Normal,
            mouse_over: false,
            time: 0.0,
            highlight_alpha: 255,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != ButtonState::Disabled
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn enable(&mut self) {
        self.state = ButtonState::Normal;
    }

    pub fn disable(&mut self) {
        self.state = ButtonState::Disabled;
        self.mouse_over = false;
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
    }

    /// Whether a screen point falls on the clickable area
    pub fn contains(&self, point: Vector2D) -> bool {
        let local = point - self.position + BUTTON_HOTSPOT;
        let (min, max) = BUTTON_HIT_BOX;
        (min.x..=max.x).contains(&local.x) && (min.y..=max.y).contains(&local.y)
    }

    /// Feed the frame's mouse state; returns the action when a click ends on
    /// the button. Disabled buttons ignore input entirely.
    pub fn update(&mut self, delta: f32, mouse: Vector2D, mouse_down: bool, mouse_released: bool) -> Option<A> {
        if self.state == ButtonState::Disabled {
            return None;
        }

        self.mouse_over = self.contains(mouse);
        let mut fired = None;
        if self.mouse_over {
            self.state = if mouse_down {
                ButtonState::Pushed
            } else {
                ButtonState::Normal
            };
            if mouse_released {
                fired = Some(self.action.clone());
            }
        } else {
            self.state = ButtonState::Normal;
        }

        self.time += delta;
        while self.time > 1.0 {
            self.time -= 1.0;
        }
        self.highlight_alpha = (127.5 * (self.time.cos() + 1.0)) as u8;

        fired
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        let look = match self.state {
            ButtonState::Normal => ButtonLook::Normal,
            ButtonState::Pushed => ButtonLook::Pushed,
            ButtonState::Disabled => ButtonLook::Disabled,
        };
        sink.draw(Visual::Button { look }, self.position);
        sink.draw(
            Visual::Text {
                content: self.caption.clone(),
                size: CAPTION_SIZE,
                align: Align::Center,
            },
            self.position,
        );

        if self.mouse_over {
            sink.draw(Visual::ButtonHighlight { alpha: self.highlight_alpha }, self.position);
            sink.draw(Visual::ButtonHighlight { alpha: 255 }, self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    const CENTER: Vector2D = Vector2D::new(130.0, 80.0);

    fn button() -> Button<u8> {
        Button::new(CENTER, "End turn", 7)
    }

    #[test]
    fn test_hit_box() {
        let b = button();
        assert!(b.contains(CENTER));
        // Left edge of the hit box: 130 - 128 + 15
        assert!(b.contains(Vector2D::new(17.0, 80.0)));
        assert!(!b.contains(Vector2D::new(16.0, 80.0)));
        // Vertical extent: 80 - 64 + 37 ..= 80 - 64 + 91
        assert!(b.contains(Vector2D::new(130.0, 53.0)));
        assert!(!b.contains(Vector2D::new(130.0, 108.0)));
    }

    #[test]
    fn test_fires_on_release_over_button() {
        let mut b = button();
        assert_eq!(b.update(0.016, CENTER, true, false), None);
        assert_eq!(b.state(), ButtonState::Pushed);
        assert_eq!(b.update(0.016, CENTER, false, true), Some(7));
        assert_eq!(b.state(), ButtonState::Normal);
    }

    #[test]
    fn test_release_elsewhere_does_not_fire() {
        let mut b = button();
        assert_eq!(b.update(0.016, Vector2D::new(600.0, 600.0), false, true), None);
        assert!(!b.is_mouse_over());
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut b = button();
        b.update(0.016, CENTER, false, false);
        assert!(b.is_mouse_over());

        b.disable();
        assert!(!b.is_mouse_over());
        assert_eq!(b.update(0.016, CENTER, false, true), None);
        assert_eq!(b.state(), ButtonState::Disabled);

        b.enable();
        assert_eq!(b.update(0.016, CENTER, false, true), Some(7));
    }

    #[test]
    fn test_render_highlight_when_hovered() {
        let mut b = button();
        let mut list = DrawList::new();
        b.render(&mut list);
        assert_eq!(list.len(), 2);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["End turn"]);

        b.update(0.0, CENTER, false, false);
        let mut list = DrawList::new();
        b.render(&mut list);
        assert_eq!(list.len(), 4);
        assert_eq!(list.commands()[2].visual, Visual::ButtonHighlight { alpha: 255 });
    }
}
