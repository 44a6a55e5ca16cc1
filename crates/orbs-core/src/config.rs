//! Board configuration and UI captions.

use crate::board::LeapRule;
use crate::orb::Player;
use crate::slot::Vector2D;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board placement on a 1024x768 screen
pub const DEFAULT_ORIGIN: Vector2D = Vector2D::new(354.0, 96.0);

/// Default side of a board cell in pixels
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cell size must be positive, got {0}")]
    InvalidCellSize(f32),

    #[error("Screen size must be positive, got {0}x{1}")]
    InvalidScreenSize(f32, f32),

    #[error("Invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Text shown by the board. `[PLAYER]` is replaced by the player number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Captions {
    /// Label left of each player's turn button
    pub player_label: String,
    /// Caption of the active player's button
    pub end_turn: String,
    /// Caption of the idle player's button
    pub wait_for_player: String,
    /// Banner shown when a player wins
    pub victory: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            player_label: "Player [PLAYER] : ".to_string(),
            end_turn: "End turn".to_string(),
            wait_for_player: "Wait for player [PLAYER]".to_string(),
            victory: "Player [PLAYER] won the game!".to_string(),
        }
    }
}

impl Captions {
    pub fn player_label(&self, player: Player) -> String {
        fill(&self.player_label, player)
    }

    pub fn wait_for(&self, player: Player) -> String {
        fill(&self.wait_for_player, player)
    }

    pub fn victory(&self, player: Player) -> String {
        fill(&self.victory, player)
    }
}

fn fill(template: &str, player: Player) -> String {
    template.replace("[PLAYER]", &player.number().to_string())
}

/// Layout and rule settings of a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pixel position of slot (0, 0)
    pub origin: Vector2D,
    /// Side of a cell in pixels
    pub cell_size: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub leap_rule: LeapRule,
    pub captions: Captions,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            cell_size: DEFAULT_CELL_SIZE,
            screen_width: 1024.0,
            screen_height: 768.0,
            leap_rule: LeapRule::default(),
            captions: Captions::default(),
        }
    }
}

impl BoardConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::InvalidScreenSize(self.screen_width, self.screen_height));
        }
        Ok(())
    }

    /// Center of the screen, where the victory banner goes
    pub fn screen_center(&self) -> Vector2D {
        Vector2D::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}
