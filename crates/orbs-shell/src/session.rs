//! One connected client running its own application.

use crate::app::Application;
use crate::protocol::SessionInfo;
use orbs_core::{BoardConfig, DrawCommand, DrawList, InputTracker, RawInput};
use thiserror::Error;
use uuid::Uuid;

/// Longest frame step accepted from a client, in seconds
pub const MAX_FRAME_DELTA: f32 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Invalid frame delta {0}")]
    InvalidDelta(f32),

    #[error("Session has exited")]
    Exited,
}

pub struct Session {
    pub id: Uuid,
    app: Application,
    input: InputTracker,
    frames: u64,
}

impl Session {
    pub fn new(id: Uuid, board_config: BoardConfig) -> Self {
        Self {
            id,
            app: Application::new(board_config),
            input: InputTracker::new(),
            frames: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.app.is_running()
    }

    /// Run one frame from a raw client sample and return its draw calls
    pub fn frame(&mut self, delta: f32, raw: RawInput) -> Result<Vec<DrawCommand>, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Exited);
        }
        if !(0.0..=MAX_FRAME_DELTA).contains(&delta) {
            return Err(SessionError::InvalidDelta(delta));
        }

        let snapshot = self.input.advance(raw);
        let mut list = DrawList::new();
        self.app.frame(delta, &snapshot, &mut list);
        self.frames += 1;
        Ok(list.into_commands())
    }

    pub fn to_info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            screen: self.app.screen(),
            board: self.app.board_state(),
            frames: self.frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use orbs_core::Visual;

    fn session() -> Session {
        Session::new(Uuid::new_v4(), BoardConfig::default())
    }

    #[test]
    fn test_frame_returns_draw_calls() {
        let mut s = session();
        let commands = s.frame(0.016, RawInput::default()).unwrap();
        assert_eq!(commands.last().map(|c| &c.visual), Some(&Visual::Cursor));
        assert_eq!(s.to_info().frames, 1);
        assert_eq!(s.to_info().screen, Screen::Menu);
        assert_eq!(s.to_info().board, None);
    }

    #[test]
    fn test_rejects_bad_delta() {
        let mut s = session();
        assert_eq!(s.frame(-1.0, RawInput::default()), Err(SessionError::InvalidDelta(-1.0)));
        assert!(s.frame(f32::NAN, RawInput::default()).is_err());
        assert_eq!(s.to_info().frames, 0);
    }

    #[test]
    fn test_escape_ends_session() {
        let mut s = session();
        let escape = RawInput {
            escape_down: true,
            ..RawInput::default()
        };
        s.frame(0.016, escape).unwrap();
        assert!(s.is_finished());
        assert_eq!(s.frame(0.016, RawInput::default()), Err(SessionError::Exited));
    }
}
