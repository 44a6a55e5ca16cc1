//! Screen flow of one running application: menu, game, save/load overlays.

use crate::menu::{Menu, MenuAction};
use orbs_core::{
    Align, BoardConfig, BoardController, InputSource, Key, RenderSink, TurnState, Vector2D, Visual,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const MAIN_MENU_TITLE: &str = "Main menu";
const GAME_TITLE: &str = "ORB";
const GAME_TITLE_SIZE: u32 = 42;
const GAME_TITLE_Y: f32 = 90.0;
const HELP_TEXT: &str = "Press [Escape] to go back to the main menu.";
const HELP_TEXT_SIZE: u32 = 14;
const HELP_TEXT_Y: f32 = 730.0;
/// Side of the board sprite block, used to center the board
const BOARD_EXTENT: f32 = 576.0;
/// Horizontal shift leaving room for the turn buttons
const BOARD_SHIFT: f32 = 130.0;
const MENU_OVERLAY_ALPHA: u8 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    NewGame,
    Save,
    Load,
    Game,
    Exit,
}

pub struct Application {
    screen: Screen,
    board_config: BoardConfig,
    menu: Menu,
    board: Option<BoardController>,
}

impl Application {
    pub fn new(board_config: BoardConfig) -> Self {
        let mut menu = Menu::new(
            MAIN_MENU_TITLE,
            board_config.screen_width,
            board_config.screen_height,
        );
        menu.add_item(MenuAction::NewGame);
        menu.add_item(MenuAction::LoadGame);
        menu.add_item(MenuAction::Exit);

        Self {
            screen: Screen::Menu,
            board_config,
            menu,
            board: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            info!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }

    pub fn is_running(&self) -> bool {
        self.screen != Screen::Exit
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn board(&self) -> Option<&BoardController> {
        self.board.as_ref()
    }

    pub fn board_state(&self) -> Option<TurnState> {
        self.board.as_ref().map(|b| b.state())
    }

    /// Board placement centered in the screen, shifted right of the buttons
    fn board_origin(&self) -> Vector2D {
        Vector2D::new(
            (self.board_config.screen_width - BOARD_EXTENT) / 2.0 + BOARD_SHIFT,
            (self.board_config.screen_height - BOARD_EXTENT) / 2.0,
        )
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        let screen = match action {
            MenuAction::NewGame => Screen::NewGame,
            MenuAction::Continue => Screen::Game,
            MenuAction::SaveGame => Screen::Save,
            MenuAction::LoadGame => Screen::Load,
            MenuAction::Exit => Screen::Exit,
        };
        self.set_screen(screen);
    }

    /// Run one frame of the current screen and draw it
    pub fn frame(&mut self, delta: f32, input: &impl InputSource, sink: &mut impl RenderSink) {
        let escape = input.key_pressed(Key::Escape);

        match self.screen {
            Screen::Save | Screen::Load => {
                self.render_title(sink);
                self.menu.render(sink);
                sink.draw(
                    Visual::Overlay {
                        width: self.board_config.screen_width,
                        height: self.board_config.screen_height,
                        alpha: MENU_OVERLAY_ALPHA,
                    },
                    Vector2D::ZERO,
                );
                if escape {
                    self.set_screen(Screen::Menu);
                }
            }
            Screen::Menu => {
                self.render_title(sink);
                if let Some(action) = self.menu.update(delta, input) {
                    self.apply_menu_action(action);
                }
                self.menu.render(sink);
                if escape {
                    self.set_screen(Screen::Exit);
                }
            }
            Screen::NewGame => {
                let config = BoardConfig {
                    origin: self.board_origin(),
                    ..self.board_config.clone()
                };
                let board = match BoardController::new(config) {
                    Ok(board) => board,
                    Err(e) => {
                        warn!("Cannot start a game: {}", e);
                        self.set_screen(Screen::Menu);
                        return;
                    }
                };
                if !self.menu.has_item(MenuAction::Continue) {
                    self.menu.add_item(MenuAction::Continue);
                    self.menu.add_item(MenuAction::SaveGame);
                }

                board.render(sink);
                self.render_help(sink);
                self.board = Some(board);
                self.set_screen(Screen::Game);
            }
            Screen::Game => {
                if escape {
                    self.set_screen(Screen::Menu);
                } else if let Some(board) = self.board.as_mut() {
                    board.update(delta, input);
                    board.render(sink);
                    self.render_help(sink);
                } else {
                    warn!("Game screen without a board, back to the menu");
                    self.set_screen(Screen::Menu);
                }
            }
            Screen::Exit => {}
        }

        sink.draw(Visual::Cursor, input.mouse_position());
    }

    fn render_title(&self, sink: &mut impl RenderSink) {
        sink.draw(
            Visual::Text {
                content: GAME_TITLE.to_string(),
                size: GAME_TITLE_SIZE,
                align: Align::Center,
            },
            Vector2D::new(self.board_config.screen_width / 2.0, GAME_TITLE_Y),
        );
    }

    fn render_help(&self, sink: &mut impl RenderSink) {
        sink.draw(
            Visual::Text {
                content: HELP_TEXT.to_string(),
                size: HELP_TEXT_SIZE,
                align: Align::Center,
            },
            Vector2D::new(self.board_config.screen_width / 2.0 + BOARD_SHIFT, HELP_TEXT_Y),
        );
    }
}
