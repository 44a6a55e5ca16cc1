//! Orbs (game pieces) and the players owning them.

use crate::render::{RenderSink, Visual};
use crate::slot::{Slot, Vector2D};
use serde::{Deserialize, Serialize};

/// Index of an orb in the board's orb arena
pub type OrbId = usize;

/// Half the side of an orb's square hit box, in pixels
pub const ORB_HIT_RADIUS: f32 = 32.0;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// 1-based number shown to humans
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn other(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The two colors this player moves
    pub fn colors(&self) -> [OrbColor; 2] {
        match self {
            Player::One => [OrbColor::Blue, OrbColor::Red],
            Player::Two => [OrbColor::Green, OrbColor::Pink],
        }
    }
}

/// Orb colors. Each color has a home band of the same name on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbColor {
    Blue,
    Red,
    Green,
    Pink,
}

impl OrbColor {
    /// All colors, in counting order
    pub const ALL: [OrbColor; 4] = [OrbColor::Blue, OrbColor::Red, OrbColor::Green, OrbColor::Pink];

    /// Player moving orbs of this color
    pub fn owner(&self) -> Player {
        match self {
            OrbColor::Blue | OrbColor::Red => Player::One,
            OrbColor::Green | OrbColor::Pink => Player::Two,
        }
    }

    /// Position of this color in [`OrbColor::ALL`]
    pub fn index(&self) -> usize {
        match self {
            OrbColor::Blue => 0,
            OrbColor::Red => 1,
            OrbColor::Green => 2,
            OrbColor::Pink => 3,
        }
    }

    /// RGB tint of the movement markers drawn for this color
    pub fn marker_rgb(&self) -> (u8, u8, u8) {
        match self {
            OrbColor::Blue => (0, 150, 255),
            OrbColor::Red => (255, 90, 0),
            OrbColor::Green => (0, 255, 0),
            OrbColor::Pink => (255, 0, 255),
        }
    }
}

/// A game piece bound to a slot.
///
/// The orb keeps two render positions: `position` always matches `slot`,
/// while `temp_position` follows the cursor during a drag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    color: OrbColor,
    slot: Slot,
    position: Vector2D,
    temp_position: Vector2D,
    /// Copy of the owning tile's movements, pushed by the board
    available_movements: Vec<Slot>,
    mouse_over: bool,
    dragged: bool,
    well_placed: bool,
}

impl Orb {
    pub fn new(position: Vector2D, slot: Slot, color: OrbColor) -> Self {
        Self {
            color,
            slot,
            position,
            temp_position: position,
            available_movements: Vec::new(),
            mouse_over: false,
            dragged: false,
            well_placed: false,
        }
    }

    pub fn color(&self) -> OrbColor {
        self.color
    }

    pub fn owner(&self) -> Player {
        self.color.owner()
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn is_on_slot(&self, slot: Slot) -> bool {
        self.slot == slot
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn temp_position(&self) -> Vector2D {
        self.temp_position
    }

    /// Move the rendered orb only; the logical slot is untouched
    pub fn set_temp_position(&mut self, position: Vector2D) {
        self.temp_position = position;
    }

    /// Move the orb to a new slot and snap both render positions to it
    pub fn set_position(&mut self, position: Vector2D, slot: Slot) {
        self.position = position;
        self.temp_position = position;
        self.slot = slot;
    }

    /// Whether `point` falls inside the orb's hit box, measured from its
    /// resting position
    pub fn contains(&self, point: Vector2D) -> bool {
        (point.x - self.position.x).abs() < ORB_HIT_RADIUS
            && (point.y - self.position.y).abs() < ORB_HIT_RADIUS
    }

    pub fn can_move_to(&self, slot: Slot) -> bool {
        self.available_movements.contains(&slot)
    }

    pub fn available_movements(&self) -> &[Slot] {
        &self.available_movements
    }

    pub fn is_well_placed(&self) -> bool {
        self.well_placed
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub fn is_dragged(&self) -> bool {
        self.dragged
    }

    pub fn notify_available_movements(&mut self, movements: &[Slot]) {
        self.available_movements = movements.to_vec();
    }

    pub fn notify_mouse_over(&mut self, mouse_over: bool) {
        self.mouse_over = mouse_over;
    }

    pub fn notify_dragged(&mut self, dragged: bool) {
        self.dragged = dragged;
    }

    pub fn notify_well_placed(&mut self, well_placed: bool) {
        self.well_placed = well_placed;
    }

    /// Draw the orb, preceded by its destination markers while hovered.
    ///
    /// Markers are placed relative to the resting position so they stay on
    /// the grid while the orb itself is being dragged around.
    pub fn render(&self, sink: &mut impl RenderSink, cell_size: f32) {
        if self.mouse_over {
            for slot in &self.available_movements {
                if self.is_on_slot(*slot) {
                    continue;
                }
                let offset = Vector2D::new(
                    (slot.col - self.slot.col) as f32,
                    (slot.row - self.slot.row) as f32,
                ) * cell_size;
                sink.draw(
                    Visual::MovementMarker {
                        color: self.color,
                        rgb: self.color.marker_rgb(),
                    },
                    self.position + offset,
                );
            }
        }

        sink.draw(Visual::Orb { color: self.color }, self.temp_position);
    }
}
