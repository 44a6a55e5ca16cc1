//! Rendering sink abstraction.
//!
//! The core never touches a frame buffer. Each frame it issues stateless
//! "draw this visual here" calls on a [`RenderSink`]; [`DrawList`] records
//! them so a front end (browser canvas, test) can replay or inspect them.

use crate::orb::OrbColor;
use crate::slot::Vector2D;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment relative to the draw position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Which sprite a button is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonLook {
    Normal,
    Pushed,
    Disabled,
}

/// Everything the game knows how to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Visual {
    /// Board cell; home cells use a distinct sprite
    GridCell { home: bool },
    /// An orb sprite
    Orb { color: OrbColor },
    /// Cross marking a legal destination, tinted with the orb color
    MovementMarker { color: OrbColor, rgb: (u8, u8, u8) },
    /// Button body (hotspot at its center)
    Button { look: ButtonLook },
    /// Pulsing highlight drawn over a hovered button
    ButtonHighlight { alpha: u8 },
    /// A line of text
    Text {
        content: String,
        size: u32,
        align: Align,
    },
    /// Black rectangle covering `width` x `height` from the draw position
    Overlay { width: f32, height: f32, alpha: u8 },
    /// Mouse cursor
    Cursor,
}

/// Consumer of draw calls
pub trait RenderSink {
    fn draw(&mut self, visual: Visual, position: Vector2D);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub visual: Visual,
    pub position: Vector2D,
}

/// Draw calls of one frame, in painting order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text contents drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match &c.visual {
            Visual::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

impl RenderSink for DrawList {
    fn draw(&mut self, visual: Visual, position: Vector2D) {
        self.commands.push(DrawCommand { visual, position });
    }
}
