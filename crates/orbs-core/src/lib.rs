//! Orbs - a two-player hopping game on a cross-shaped board
//!
//! This crate provides the core game logic for Orbs, including:
//! - Slot coordinates and pixel conversion for the 10x10 cross board
//! - The tile graph and its move-legality engine (steps and chained leaps)
//! - Orbs, their owners and their cached destinations
//! - The board controller: turn state machine and drag-and-drop handling
//!
//! # Architecture
//!
//! The engine never talks to a window or a GPU. Input arrives once per frame
//! through [`InputSource`] and output leaves as draw calls on a
//! [`RenderSink`], so the same code runs natively behind the shell server and
//! in the browser through WebAssembly.
//!
//! # Modules
//!
//! - [`slot`]: Grid coordinates, directions and pixel vectors
//! - [`board`]: Tile graph and reachable-slot search
//! - [`orb`]: Game pieces and players
//! - [`game`]: Board controller and turn state machine
//! - [`button`]: Clickable buttons carrying an action value
//! - [`input`]: Per-frame input and edge detection
//! - [`render`]: Draw-call sink and recorded draw lists
//! - [`config`]: Board geometry, leap rule and captions

pub mod actions;
pub mod board;
pub mod button;
pub mod config;
pub mod game;
pub mod input;
pub mod orb;
pub mod render;
pub mod slot;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{BoardEvent, MoveRejection, TurnAction};
pub use board::{LeapRule, Tile, TileGraph, TileId, TileType};
pub use button::{Button, ButtonState};
pub use config::{BoardConfig, Captions, ConfigError};
pub use game::{standard_layout, BoardController, BoardError, BoardSnapshot, OrbSnapshot, TurnState, ORBS_PER_COLOR};
pub use input::{InputSnapshot, InputSource, InputTracker, Key, MouseButton, RawInput};
pub use orb::{Orb, OrbColor, OrbId, Player};
pub use render::{Align, ButtonLook, DrawCommand, DrawList, RenderSink, Visual};
pub use slot::{Direction, Slot, Vector2D, BOARD_SIZE, HOME_DEPTH};
