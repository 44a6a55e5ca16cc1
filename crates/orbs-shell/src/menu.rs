//! Main menu: a title and a column of buttons ordered by item id.

use orbs_core::{Align, Button, InputSource, MouseButton, RenderSink, Vector2D, Visual};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TITLE_SIZE: u32 = 24;
const TITLE_Y: f32 = 160.0;
const ITEM_SPACING: f32 = 70.0;
const ITEM_OFFSET: f32 = 84.0;

/// Menu entries, declared in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MenuAction {
    NewGame,
    Continue,
    SaveGame,
    LoadGame,
    Exit,
}

impl MenuAction {
    pub fn caption(&self) -> &'static str {
        match self {
            MenuAction::NewGame => "New game",
            MenuAction::Continue => "Continue",
            MenuAction::SaveGame => "Save game",
            MenuAction::LoadGame => "Load game",
            MenuAction::Exit => "Exit",
        }
    }
}

pub struct Menu {
    title: String,
    screen_width: f32,
    screen_height: f32,
    items: BTreeMap<MenuAction, Button<MenuAction>>,
}

impl Menu {
    pub fn new(title: impl Into<String>, screen_width: f32, screen_height: f32) -> Self {
        Self {
            title: title.into(),
            screen_width,
            screen_height,
            items: BTreeMap::new(),
        }
    }

    /// Add or replace an item; the column is laid out again
    pub fn add_item(&mut self, action: MenuAction) {
        self.items
            .insert(action, Button::new(Vector2D::ZERO, action.caption(), action));
        self.layout();
    }

    pub fn has_item(&self, action: MenuAction) -> bool {
        self.items.contains_key(&action)
    }

    pub fn items(&self) -> impl Iterator<Item = &Button<MenuAction>> {
        self.items.values()
    }

    fn layout(&mut self) {
        let count = self.items.len().saturating_sub(1) as f32;
        let start = (self.screen_height - ITEM_SPACING * count) / 2.0 + ITEM_OFFSET;
        let x = self.screen_width / 2.0;
        for (i, button) in self.items.values_mut().enumerate() {
            button.set_position(Vector2D::new(x, start + ITEM_SPACING * i as f32));
        }
    }

    /// Returns the action of the item clicked this frame, if any
    pub fn update(&mut self, delta: f32, input: &impl InputSource) -> Option<MenuAction> {
        let mouse = input.mouse_position();
        let down = input.is_down(MouseButton::Left);
        let released = input.is_released(MouseButton::Left);

        let mut clicked = None;
        for button in self.items.values_mut() {
            if let Some(action) = button.update(delta, mouse, down, released) {
                clicked = Some(action);
            }
        }
        clicked
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        sink.draw(
            Visual::Text {
                content: self.title.clone(),
                size: TITLE_SIZE,
                align: Align::Center,
            },
            Vector2D::new(self.screen_width / 2.0, TITLE_Y),
        );
        for button in self.items.values() {
            button.render(sink);
        }
    }
}
