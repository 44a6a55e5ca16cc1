//! WebSocket protocol messages for the Orbs shell.

use crate::app::Screen;
use orbs_core::{DrawCommand, RawInput, TurnState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Advance the session by one frame
    Frame { delta: f32, input: RawInput },

    /// Request the list of running sessions
    ListSessions,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with the assigned session ID
    Welcome { session_id: Uuid },

    /// Draw calls of the frame just run
    Frame { commands: Vec<DrawCommand> },

    /// List of running sessions
    SessionList { sessions: Vec<SessionInfo> },

    /// The application was closed from the menu
    Exited,

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}

/// Session information for clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub screen: Screen,
    /// Turn state of the session's board, once a game was started
    pub board: Option<TurnState>,
    pub frames: u64,
}
