//! Board coordinates.
//!
//! This module provides the two coordinate types the game works with:
//! - `Slot`: integer (column, row) cell on the cross-shaped board
//! - `Vector2D`: floating pixel position used for rendering and the cursor
//!
//! It also defines the eight compass `Direction`s used by the tile graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Number of cells along each side of the board
pub const BOARD_SIZE: i32 = 10;

/// Depth of each home band (the 2 outermost rows/columns of an arm)
pub const HOME_DEPTH: i32 = 2;

/// One of the eight directions between Chebyshev neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting from North
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Column/row step for this direction (rows grow downwards)
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Direction matching a unit offset, if any
    pub fn from_offset(dcol: i32, drow: i32) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.offset() == (dcol, drow))
    }

    pub fn opposite(&self) -> Direction {
        let (dc, dr) = self.offset();
        match Direction::from_offset(-dc, -dr) {
            Some(dir) => dir,
            None => unreachable!("every direction has an opposite"),
        }
    }
}

/// Integer board coordinate.
///
/// - `col` increases going east (right)
/// - `row` increases going south (down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Slot {
    /// Column (increases going east)
    pub col: i32,
    /// Row (increases going south)
    pub row: i32,
}

impl Slot {
    /// Create a new slot
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Whether this slot lies on the cross-shaped board.
    ///
    /// Both coordinates must be in `[0, 9]` and at least one of them in
    /// `[2, 7]`; the 2x2 blocks in the four corners are not part of the board.
    pub fn is_on_board(&self) -> bool {
        let in_grid = in_range(self.col, 0, BOARD_SIZE - 1) && in_range(self.row, 0, BOARD_SIZE - 1);
        in_grid && (in_arm(self.col) || in_arm(self.row))
    }

    /// The slot one step away in `direction`
    pub fn step(&self, direction: Direction) -> Slot {
        let (dc, dr) = direction.offset();
        Slot::new(self.col + dc, self.row + dr)
    }

    /// Chessboard distance to another slot
    pub fn chebyshev_distance(&self, other: &Slot) -> u32 {
        let dc = (self.col - other.col).unsigned_abs();
        let dr = (self.row - other.row).unsigned_abs();
        dc.max(dr)
    }

    /// Direction from `self` to an adjacent slot, if they are neighbors
    pub fn direction_to(&self, other: &Slot) -> Option<Direction> {
        Direction::from_offset(other.col - self.col, other.row - self.row)
    }

    /// Top-left anchored pixel position of this slot for a board drawn at
    /// `origin` with square cells of `cell_size` pixels.
    pub fn to_pixel(&self, origin: Vector2D, cell_size: f32) -> Vector2D {
        origin + Vector2D::new(self.col as f32, self.row as f32) * cell_size
    }

    /// Snap a pixel position to the nearest slot.
    ///
    /// The point is shifted by half a cell before the floor division so that
    /// anything within half a cell of a slot position maps to that slot.
    /// The result may be off the board.
    pub fn from_pixel(point: Vector2D, origin: Vector2D, cell_size: f32) -> Self {
        let half = Vector2D::new(cell_size / 2.0, cell_size / 2.0);
        let normalized = ((point - origin + half) / cell_size).floor();
        Self::new(normalized.x as i32, normalized.y as i32)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

fn in_range(value: i32, min: i32, max: i32) -> bool {
    (min..=max).contains(&value)
}

fn in_arm(value: i32) -> bool {
    in_range(value, HOME_DEPTH, BOARD_SIZE - 1 - HOME_DEPTH)
}

/// Pixel position or offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f32) -> Vector2D {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2D {
    type Output = Vector2D;

    fn div(self, rhs: f32) -> Vector2D {
        Vector2D::new(self.x / rhs, self.y / rhs)
    }
}
