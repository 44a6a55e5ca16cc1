//! Commands the UI can issue and events the board reports back.

use crate::game::TurnState;
use crate::orb::{OrbColor, OrbId, Player};
use crate::slot::Slot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Action carried by a board button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// The player confirms their move and hands over
    EndTurn(Player),
}

impl TurnAction {
    /// State the board switches to when this action fires
    pub fn next_state(&self) -> TurnState {
        match self {
            TurnAction::EndTurn(player) => TurnState::turn_of(player.other()),
        }
    }
}

/// Why a dropped orb went back to where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveRejection {
    #[error("{0} is not on the board")]
    OffBoard(Slot),

    #[error("{0} is already occupied")]
    Occupied(Slot),

    #[error("{0} cannot be reached this move")]
    Unreachable(Slot),
}

/// Things that happened during a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// An orb was picked up
    DragStarted { orb: OrbId, from: Slot },

    /// A dropped orb landed on a new slot
    OrbMoved {
        orb: OrbId,
        color: OrbColor,
        from: Slot,
        to: Slot,
    },

    /// A dropped orb snapped back
    MoveRejected {
        orb: OrbId,
        reason: MoveRejection,
    },

    /// The pending move was taken back
    MoveUndone { orb: OrbId, from: Slot, to: Slot },

    /// The board entered a new state
    StateChanged { state: TurnState },

    /// A player brought all their orbs home
    GameWon { player: Player },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_turn_hands_over() {
        assert_eq!(TurnAction::EndTurn(Player::One).next_state(), TurnState::Player2Turn);
        assert_eq!(TurnAction::EndTurn(Player::Two).next_state(), TurnState::Player1Turn);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            MoveRejection::Occupied(Slot::new(3, 4)).to_string(),
            "(3, 4) is already occupied"
        );
        assert_eq!(
            MoveRejection::OffBoard(Slot::new(0, 0)).to_string(),
            "(0, 0) is not on the board"
        );
    }
}
