//! WebAssembly bindings for the Orbs engine.
//!
//! The browser drives the board frame by frame: it samples the mouse, calls
//! `update`, then replays the JSON draw list returned by `render` on a canvas.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::config::BoardConfig;
#[cfg(feature = "wasm")]
use crate::game::BoardController;
#[cfg(feature = "wasm")]
use crate::input::{InputTracker, RawInput};
#[cfg(feature = "wasm")]
use crate::render::DrawList;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed board wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmBoard {
    board: BoardController,
    input: InputTracker,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmBoard {
    /// Create a board; `config_json` may be empty for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmBoard, JsValue> {
        let config = if config_json.trim().is_empty() {
            BoardConfig::default()
        } else {
            BoardConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let board = BoardController::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmBoard {
            board,
            input: InputTracker::new(),
        })
    }

    /// Advance one frame, returns the frame's events as JSON
    pub fn update(&mut self, delta: f32, mouse_x: f32, mouse_y: f32, left_down: bool, right_down: bool) -> String {
        let snapshot = self.input.advance(RawInput {
            mouse_x,
            mouse_y,
            left_down,
            right_down,
            escape_down: false,
        });
        let events = self.board.update(delta, &snapshot);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Draw calls of the current frame as JSON
    pub fn render(&self) -> String {
        let mut list = DrawList::new();
        self.board.render(&mut list);
        serde_json::to_string(list.commands()).unwrap_or_else(|_| "[]".to_string())
    }

    /// End the active player's turn without clicking the button
    #[wasm_bindgen(js_name = endTurn)]
    pub fn end_turn(&mut self) -> Result<(), JsValue> {
        let player = self
            .board
            .active_player()
            .ok_or_else(|| JsValue::from_str("Game is over"))?;
        self.board
            .set_state(crate::game::TurnState::turn_of(player.other()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the current board state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.board.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.board.state().is_victory()
    }

    /// Winning player's number (if game is finished)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.board.state().winner().map(|p| p.number())
    }
}
