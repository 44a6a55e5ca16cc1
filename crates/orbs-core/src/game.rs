//! Board controller: turn state machine and drag-and-drop interaction.
//!
//! This module contains the `BoardController`, which owns the tile graph, the
//! orbs, the two end-turn buttons and the transient drag state, and turns a
//! stream of per-frame input snapshots into discrete moves.

use crate::actions::{BoardEvent, MoveRejection, TurnAction};
use crate::board::{TileGraph, TileId};
use crate::button::Button;
use crate::config::BoardConfig;
use crate::input::{InputSource, MouseButton};
use crate::orb::{Orb, OrbColor, OrbId, Player};
use crate::render::{Align, RenderSink, Visual};
use crate::slot::{Slot, Vector2D, BOARD_SIZE, HOME_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Orbs of each color in the standard layout, and home tiles per color
pub const ORBS_PER_COLOR: usize = 12;

const PLAYER1_LABEL_POSITION: Vector2D = Vector2D::new(10.0, 30.0);
const PLAYER2_LABEL_POSITION: Vector2D = Vector2D::new(10.0, 130.0);
const PLAYER1_BUTTON_POSITION: Vector2D = Vector2D::new(130.0, 80.0);
const PLAYER2_BUTTON_POSITION: Vector2D = Vector2D::new(130.0, 180.0);
const LABEL_SIZE: u32 = 24;
const VICTORY_TEXT_SIZE: u32 = 36;
const VICTORY_OVERLAY_ALPHA: u8 = 128;

/// Turn state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    Player1Turn,
    Player2Turn,
    /// Player 1 won; terminal
    Victory1,
    /// Player 2 won; terminal
    Victory2,
}

impl TurnState {
    pub fn turn_of(player: Player) -> Self {
        match player {
            Player::One => TurnState::Player1Turn,
            Player::Two => TurnState::Player2Turn,
        }
    }

    pub fn victory_of(player: Player) -> Self {
        match player {
            Player::One => TurnState::Victory1,
            Player::Two => TurnState::Victory2,
        }
    }

    /// Player allowed to move, if the game is still running
    pub fn active_player(&self) -> Option<Player> {
        match self {
            TurnState::Player1Turn => Some(Player::One),
            TurnState::Player2Turn => Some(Player::Two),
            TurnState::Victory1 | TurnState::Victory2 => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            TurnState::Victory1 => Some(Player::One),
            TurnState::Victory2 => Some(Player::Two),
            TurnState::Player1Turn | TurnState::Player2Turn => None,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.winner().is_some()
    }
}

/// Errors returned by board operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Game is over")]
    GameOver,

    #[error("Cannot place an orb on {0}")]
    InvalidPlacement(Slot),

    #[error("{0}")]
    InvalidConfig(String),
}

/// Starting positions: every color begins on the band opposite its home
pub fn standard_layout() -> Vec<(Slot, OrbColor)> {
    let last = BOARD_SIZE - HOME_DEPTH;
    let mut layout = Vec::with_capacity(4 * ORBS_PER_COLOR);

    for col in HOME_DEPTH..last {
        for row in 0..HOME_DEPTH {
            layout.push((Slot::new(col, row), OrbColor::Blue));
        }
        for row in last..BOARD_SIZE {
            layout.push((Slot::new(col, row), OrbColor::Red));
        }
    }

    for row in HOME_DEPTH..last {
        for col in 0..HOME_DEPTH {
            layout.push((Slot::new(col, row), OrbColor::Green));
        }
        for col in last..BOARD_SIZE {
            layout.push((Slot::new(col, row), OrbColor::Pink));
        }
    }

    layout
}

/// An orb being dragged and where it was picked up
#[derive(Debug, Clone, Copy)]
struct Drag {
    orb: OrbId,
    start_position: Vector2D,
    start_slot: Slot,
}

/// Serializable summary of a board, for front ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub state: TurnState,
    pub orbs: Vec<OrbSnapshot>,
    pub pending_orb: Option<OrbId>,
    pub well_placed: [usize; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbSnapshot {
    pub color: OrbColor,
    pub slot: Slot,
    pub well_placed: bool,
    pub movements: Vec<Slot>,
}

/// The game board and its interaction state
pub struct BoardController {
    config: BoardConfig,
    state: TurnState,
    graph: TileGraph,
    orbs: Vec<Orb>,
    player1_button: Button<TurnAction>,
    player2_button: Button<TurnAction>,
    win_text: Option<String>,
    /// Orb under the cursor (never the dragged one)
    mouse_over: Option<OrbId>,
    drag: Option<Drag>,
    /// Orb moved this turn and not yet confirmed
    pending: Option<OrbId>,
    /// Where the pending orb started this turn
    anchor_slot: Option<Slot>,
    movements_stale: bool,
}

impl BoardController {
    /// A fresh game with the standard layout
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        Self::with_layout(config, &standard_layout())
    }

    /// A game with custom orb placements. The config must pass
    /// [`BoardConfig::validate`] and every slot must be a free tile.
    pub fn with_layout(config: BoardConfig, layout: &[(Slot, OrbColor)]) -> Result<Self, BoardError> {
        config
            .validate()
            .map_err(|e| BoardError::InvalidConfig(e.to_string()))?;

        let mut board = Self::empty(config);
        for &(slot, color) in layout {
            board.add_orb(slot, color)?;
        }
        board.refresh_movements();
        Ok(board)
    }

    fn empty(config: BoardConfig) -> Self {
        let graph = TileGraph::cross().with_leap_rule(config.leap_rule);
        let captions = &config.captions;
        let player1_button = Button::new(
            PLAYER1_BUTTON_POSITION,
            captions.end_turn.clone(),
            TurnAction::EndTurn(Player::One),
        );
        let player2_button = Button::new(
            PLAYER2_BUTTON_POSITION,
            captions.wait_for(Player::One),
            TurnAction::EndTurn(Player::Two),
        );

        let mut board = Self {
            config,
            state: TurnState::Player1Turn,
            graph,
            orbs: Vec::new(),
            player1_button,
            player2_button,
            win_text: None,
            mouse_over: None,
            drag: None,
            pending: None,
            anchor_slot: None,
            movements_stale: false,
        };
        board.enter_state(TurnState::Player1Turn);
        board
    }

    fn add_orb(&mut self, slot: Slot, color: OrbColor) -> Result<OrbId, BoardError> {
        let tile = self
            .graph
            .tile_at(slot)
            .filter(|&t| !self.graph.is_occupied(t))
            .ok_or(BoardError::InvalidPlacement(slot))?;

        let id = self.orbs.len();
        let position = self.slot_position(slot);
        self.orbs.push(Orb::new(position, slot, color));
        self.occupy(tile, id);
        Ok(id)
    }

    // ==================== Queries ====================

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Player whose turn it is, `None` once the game is won
    pub fn active_player(&self) -> Option<Player> {
        self.state.active_player()
    }

    pub fn graph(&self) -> &TileGraph {
        &self.graph
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn orb(&self, id: OrbId) -> Option<&Orb> {
        self.orbs.get(id)
    }

    pub fn orb_at(&self, slot: Slot) -> Option<OrbId> {
        self.graph.tile_at(slot).and_then(|t| self.graph.occupant(t))
    }

    pub fn pending_orb(&self) -> Option<OrbId> {
        self.pending
    }

    pub fn anchor_slot(&self) -> Option<Slot> {
        self.anchor_slot
    }

    pub fn dragged_orb(&self) -> Option<OrbId> {
        self.drag.map(|d| d.orb)
    }

    pub fn mouse_over_orb(&self) -> Option<OrbId> {
        self.mouse_over
    }

    pub fn player_button(&self, player: Player) -> &Button<TurnAction> {
        match player {
            Player::One => &self.player1_button,
            Player::Two => &self.player2_button,
        }
    }

    pub fn win_text(&self) -> Option<&str> {
        self.win_text.as_deref()
    }

    /// Pixel position of an orb resting on `slot`
    pub fn slot_position(&self, slot: Slot) -> Vector2D {
        slot.to_pixel(self.config.origin, self.config.cell_size)
    }

    /// Slot nearest to a pixel position (may be off the board)
    pub fn slot_at(&self, point: Vector2D) -> Slot {
        Slot::from_pixel(point, self.config.origin, self.config.cell_size)
    }

    /// Well-placed orbs per color, indexed by [`OrbColor::index`]
    pub fn well_placed_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for orb in self.orbs.iter().filter(|o| o.is_well_placed()) {
            counts[orb.color().index()] += 1;
        }
        counts
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            state: self.state,
            orbs: self
                .orbs
                .iter()
                .map(|orb| OrbSnapshot {
                    color: orb.color(),
                    slot: orb.slot(),
                    well_placed: orb.is_well_placed(),
                    movements: orb.available_movements().to_vec(),
                })
                .collect(),
            pending_orb: self.pending,
            well_placed: self.well_placed_counts(),
        }
    }

    // ==================== State machine ====================

    /// Switch turn state. Victory states are final.
    pub fn set_state(&mut self, state: TurnState) -> Result<(), BoardError> {
        if self.state.is_victory() {
            warn!("Ignoring switch to {:?}: game already won", state);
            return Err(BoardError::GameOver);
        }
        self.enter_state(state);
        Ok(())
    }

    fn enter_state(&mut self, state: TurnState) {
        self.state = state;

        if state.active_player().is_some() {
            if let Some(orb) = self.pending.take() {
                self.push_movements_of(orb);
            }
        }

        let captions = &self.config.captions;
        match state {
            TurnState::Player1Turn => {
                self.player1_button.set_caption(captions.end_turn.clone());
                self.player1_button.enable();
                self.player2_button.set_caption(captions.wait_for(Player::One));
                self.player2_button.disable();
            }
            TurnState::Player2Turn => {
                self.player1_button.set_caption(captions.wait_for(Player::Two));
                self.player1_button.disable();
                self.player2_button.set_caption(captions.end_turn.clone());
                self.player2_button.enable();
            }
            TurnState::Victory1 | TurnState::Victory2 => {
                if let Some(winner) = state.winner() {
                    self.win_text = Some(captions.victory(winner));
                }
                self.player1_button.disable();
                self.player2_button.disable();
            }
        }

        info!("Board entered {:?}", state);
    }

    fn apply_turn_action(&mut self, action: TurnAction, events: &mut Vec<BoardEvent>) {
        let state = action.next_state();
        match self.set_state(state) {
            Ok(()) => events.push(BoardEvent::StateChanged { state }),
            Err(e) => warn!("Turn action {:?} rejected: {}", action, e),
        }
    }

    // ==================== Frame update ====================

    /// Advance one frame
    pub fn update(&mut self, delta: f32, input: &impl InputSource) -> Vec<BoardEvent> {
        let mut events = Vec::new();
        let mouse = input.mouse_position();
        let left_down = input.is_down(MouseButton::Left);
        let left_released = input.is_released(MouseButton::Left);

        if let Some(action) = self.player1_button.update(delta, mouse, left_down, left_released) {
            self.apply_turn_action(action, &mut events);
        }
        if let Some(action) = self.player2_button.update(delta, mouse, left_down, left_released) {
            self.apply_turn_action(action, &mut events);
        }

        self.update_mouse_over(mouse);

        if input.is_pressed(MouseButton::Left) {
            self.begin_drag(&mut events);
        }

        if input.is_pressed(MouseButton::Right) && self.mouse_over.is_some() && self.mouse_over == self.pending {
            self.undo_pending(&mut events);
        }

        if let Some(drag) = self.drag {
            self.orbs[drag.orb].set_temp_position(mouse);
        }

        if left_released {
            if let Some(drag) = self.drag.take() {
                self.drop_orb(drag, mouse, &mut events);
            }
        }

        if self.movements_stale {
            self.refresh_movements();
        }

        events
    }

    fn update_mouse_over(&mut self, mouse: Vector2D) {
        let dragged = self.dragged_orb();
        self.mouse_over = None;
        for (id, orb) in self.orbs.iter_mut().enumerate() {
            if Some(id) == dragged {
                continue;
            }
            let over = orb.contains(mouse);
            orb.notify_mouse_over(over);
            if over {
                self.mouse_over = Some(id);
            }
        }
    }

    fn begin_drag(&mut self, events: &mut Vec<BoardEvent>) {
        if self.drag.is_some() {
            return;
        }
        let Some(id) = self.mouse_over else {
            return;
        };
        if self.pending.is_some_and(|pending| pending != id) {
            return;
        }
        let Some(player) = self.state.active_player() else {
            return;
        };

        let orb = &mut self.orbs[id];
        if orb.owner() != player {
            return;
        }

        orb.notify_dragged(true);
        let from = orb.slot();
        self.drag = Some(Drag {
            orb: id,
            start_position: orb.position(),
            start_slot: from,
        });
        if self.pending.is_none() {
            self.anchor_slot = Some(from);
        }

        debug!("Player {} picked up orb {} at {}", player.number(), id, from);
        events.push(BoardEvent::DragStarted { orb: id, from });
    }

    fn undo_pending(&mut self, events: &mut Vec<BoardEvent>) {
        let (Some(id), Some(anchor)) = (self.pending, self.anchor_slot) else {
            return;
        };
        let from = self.orbs[id].slot();
        self.relocate(id, anchor);
        self.pending = None;
        self.movements_stale = true;

        debug!("Orb {} moved back from {} to {}", id, from, anchor);
        events.push(BoardEvent::MoveUndone { orb: id, from, to: anchor });
    }

    fn drop_orb(&mut self, drag: Drag, mouse: Vector2D, events: &mut Vec<BoardEvent>) {
        let target = self.slot_at(mouse);

        // Released where it was picked up: nothing moved
        if target == self.orbs[drag.orb].slot() {
            debug!("Orb {} dropped back on {}", drag.orb, target);
            self.orbs[drag.orb].set_position(drag.start_position, drag.start_slot);
            self.orbs[drag.orb].notify_dragged(false);
            return;
        }

        match self.validate_drop(drag.orb, target) {
            Err(reason) => {
                debug!("Drop of orb {} rejected: {}", drag.orb, reason);
                self.orbs[drag.orb].set_position(drag.start_position, drag.start_slot);
                events.push(BoardEvent::MoveRejected { orb: drag.orb, reason });
            }
            Ok(()) => {
                let from = drag.start_slot;
                self.relocate(drag.orb, target);
                self.pending = if Some(target) == self.anchor_slot {
                    None
                } else {
                    Some(drag.orb)
                };

                let color = self.orbs[drag.orb].color();
                info!("Orb {} ({:?}) moved from {} to {}", drag.orb, color, from, target);
                events.push(BoardEvent::OrbMoved {
                    orb: drag.orb,
                    color,
                    from,
                    to: target,
                });

                self.check_victory(events);
                self.movements_stale = true;
            }
        }

        self.orbs[drag.orb].notify_dragged(false);
    }

    /// Rule check for dropping `orb` on `slot`
    pub fn validate_drop(&self, orb: OrbId, slot: Slot) -> Result<(), MoveRejection> {
        if !slot.is_on_board() {
            return Err(MoveRejection::OffBoard(slot));
        }
        let tile = self.graph.tile_at(slot).ok_or(MoveRejection::OffBoard(slot))?;
        if self.graph.occupant(tile).is_some_and(|other| other != orb) {
            return Err(MoveRejection::Occupied(slot));
        }
        let reachable = self.orbs.get(orb).is_some_and(|o| o.can_move_to(slot));
        if !reachable {
            return Err(MoveRejection::Unreachable(slot));
        }
        Ok(())
    }

    /// A player wins once every orb of both their colors is home. When both
    /// players complete at once the one who just moved takes the game.
    fn check_victory(&mut self, events: &mut Vec<BoardEvent>) {
        let counts = self.well_placed_counts();
        let complete = |player: Player| {
            player
                .colors()
                .iter()
                .all(|color| counts[color.index()] == ORBS_PER_COLOR)
        };

        let Some(mover) = self.state.active_player() else {
            return;
        };
        let Some(winner) = [mover, mover.other()].into_iter().find(|&p| complete(p)) else {
            return;
        };

        self.enter_state(TurnState::victory_of(winner));
        for orb in &mut self.orbs {
            orb.notify_mouse_over(false);
        }
        self.mouse_over = None;

        info!("Player {} won the game", winner.number());
        events.push(BoardEvent::StateChanged { state: self.state });
        events.push(BoardEvent::GameWon { player: winner });
    }

    // ==================== Bookkeeping ====================

    /// Put `orb` on `tile` and update its well-placed flag
    fn occupy(&mut self, tile: TileId, orb: OrbId) {
        self.graph.set_occupant(tile, Some(orb));
        let color = self.orbs[orb].color();
        let home = self.graph.tile(tile).is_some_and(|t| t.is_home_of(color));
        self.orbs[orb].notify_well_placed(home);
    }

    /// Move an orb to another slot, keeping tiles and orb in agreement
    fn relocate(&mut self, orb: OrbId, to: Slot) {
        let from = self.orbs[orb].slot();
        if let Some(tile) = self.graph.tile_at(from) {
            if self.graph.occupant(tile) == Some(orb) {
                self.graph.set_occupant(tile, None);
            }
        }
        if let Some(tile) = self.graph.tile_at(to) {
            self.occupy(tile, orb);
        }
        let position = self.slot_position(to);
        self.orbs[orb].set_position(position, to);
    }

    /// Recompute movements of every occupant except the pending orb, whose
    /// highlighted options stay those from before its move
    fn refresh_movements(&mut self) {
        for tile in 0..self.graph.len() {
            let Some(orb) = self.graph.occupant(tile) else {
                continue;
            };
            if Some(orb) == self.pending {
                continue;
            }
            let movements = self.graph.compute_available_movements(tile);
            self.orbs[orb].notify_available_movements(movements);
        }
        self.movements_stale = false;
    }

    fn push_movements_of(&mut self, orb: OrbId) {
        let slot = self.orbs[orb].slot();
        if let Some(tile) = self.graph.tile_at(slot) {
            let movements = self.graph.compute_available_movements(tile);
            self.orbs[orb].notify_available_movements(movements);
        }
    }

    // ==================== Rendering ====================

    pub fn render(&self, sink: &mut impl RenderSink) {
        for tile in self.graph.tiles() {
            sink.draw(
                Visual::GridCell {
                    home: tile.tile_type().is_home(),
                },
                self.slot_position(tile.slot()),
            );
        }

        for orb in &self.orbs {
            orb.render(sink, self.config.cell_size);
        }

        let captions = &self.config.captions;
        for (player, position) in [
            (Player::One, PLAYER1_LABEL_POSITION),
            (Player::Two, PLAYER2_LABEL_POSITION),
        ] {
            sink.draw(
                Visual::Text {
                    content: captions.player_label(player),
                    size: LABEL_SIZE,
                    align: Align::Left,
                },
                position,
            );
        }

        self.player1_button.render(sink);
        self.player2_button.render(sink);

        if self.state.is_victory() {
            sink.draw(
                Visual::Overlay {
                    width: self.config.screen_width,
                    height: self.config.screen_height,
                    alpha: VICTORY_OVERLAY_ALPHA,
                },
                Vector2D::ZERO,
            );
            if let Some(text) = &self.win_text {
                sink.draw(
                    Visual::Text {
                        content: text.clone(),
                        size: VICTORY_TEXT_SIZE,
                        align: Align::Center,
                    },
                    self.config.screen_center(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonState, InputSnapshot};
    use crate::render::DrawList;
    use std::collections::HashSet;

    const DT: f32 = 1.0 / 60.0;

    fn left_press(at: Vector2D) -> InputSnapshot {
        InputSnapshot {
            mouse: at,
            left: ButtonState {
                down: true,
                pressed: true,
                released: false,
            },
            ..InputSnapshot::default()
        }
    }

    fn left_held(at: Vector2D) -> InputSnapshot {
        InputSnapshot {
            mouse: at,
            left: ButtonState {
                down: true,
                pressed: false,
                released: false,
            },
            ..InputSnapshot::default()
        }
    }

    fn left_release(at: Vector2D) -> InputSnapshot {
        InputSnapshot {
            mouse: at,
            left: ButtonState {
                down: false,
                pressed: false,
                released: true,
            },
            ..InputSnapshot::default()
        }
    }

    fn right_press(at: Vector2D) -> InputSnapshot {
        InputSnapshot {
            mouse: at,
            right: ButtonState {
                down: true,
                pressed: true,
                released: false,
            },
            ..InputSnapshot::default()
        }
    }

    fn drag(board: &mut BoardController, from: Slot, to: Slot) -> Vec<BoardEvent> {
        let start = board.slot_position(from);
        let end = board.slot_position(to);
        let mut events = board.update(DT, &left_press(start));
        events.extend(board.update(DT, &left_held(end)));
        events.extend(board.update(DT, &left_release(end)));
        events
    }

    fn click(board: &mut BoardController, at: Vector2D) -> Vec<BoardEvent> {
        let mut events = board.update(DT, &left_press(at));
        events.extend(board.update(DT, &left_release(at)));
        events
    }

    fn slots(list: &[(i32, i32)]) -> HashSet<Slot> {
        list.iter().map(|&(c, r)| Slot::new(c, r)).collect()
    }

    fn movements_of(board: &BoardController, slot: Slot) -> HashSet<Slot> {
        let id = board.orb_at(slot).unwrap();
        board.orb(id).unwrap().available_movements().iter().copied().collect()
    }

    #[test]
    fn test_standard_layout() {
        let layout = standard_layout();
        assert_eq!(layout.len(), 48);
        for color in OrbColor::ALL {
            assert_eq!(layout.iter().filter(|(_, c)| *c == color).count(), ORBS_PER_COLOR);
        }

        let board = BoardController::new(BoardConfig::default()).unwrap();
        assert_eq!(board.orbs().len(), 48);
        assert_eq!(board.well_placed_counts(), [0, 0, 0, 0]);
        assert_eq!(board.orb(board.orb_at(Slot::new(2, 0)).unwrap()).unwrap().color(), OrbColor::Blue);
        assert_eq!(board.orb(board.orb_at(Slot::new(9, 4)).unwrap()).unwrap().color(), OrbColor::Pink);
    }

    #[test]
    fn test_initial_state_and_buttons() {
        let board = BoardController::new(BoardConfig::default()).unwrap();
        assert_eq!(board.state(), TurnState::Player1Turn);
        assert_eq!(board.active_player(), Some(Player::One));

        let b1 = board.player_button(Player::One);
        let b2 = board.player_button(Player::Two);
        assert!(b1.is_enabled());
        assert_eq!(b1.caption(), "End turn");
        assert!(!b2.is_enabled());
        assert_eq!(b2.caption(), "Wait for player 1");
    }

    #[test]
    fn test_initial_movements() {
        let board = BoardController::new(BoardConfig::default()).unwrap();
        assert_eq!(movements_of(&board, Slot::new(3, 1)), slots(&[(3, 1), (2, 2), (3, 2), (4, 2)]));
        // Back row orbs can only leap over the front row
        assert_eq!(movements_of(&board, Slot::new(3, 0)), slots(&[(3, 0), (3, 2), (5, 2)]));
    }

    #[test]
    fn test_simple_move_becomes_pending() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 1)).unwrap();

        let events = drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));
        assert!(events.contains(&BoardEvent::OrbMoved {
            orb: id,
            color: OrbColor::Blue,
            from: Slot::new(3, 1),
            to: Slot::new(3, 2),
        }));
        assert_eq!(board.orb_at(Slot::new(3, 2)), Some(id));
        assert_eq!(board.orb_at(Slot::new(3, 1)), None);
        assert_eq!(board.pending_orb(), Some(id));
        assert_eq!(board.anchor_slot(), Some(Slot::new(3, 1)));
        assert_eq!(board.orb(id).unwrap().position(), board.slot_position(Slot::new(3, 2)));
    }

    #[test]
    fn test_drop_on_own_slot_moves_nothing() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 1)).unwrap();

        let events = drag(&mut board, Slot::new(3, 1), Slot::new(3, 1));
        assert_eq!(events, vec![BoardEvent::DragStarted { orb: id, from: Slot::new(3, 1) }]);
        assert_eq!(board.orb_at(Slot::new(3, 1)), Some(id));
        assert_eq!(board.pending_orb(), None);
        assert_eq!(board.dragged_orb(), None);
        assert_eq!(board.orb(id).unwrap().temp_position(), board.slot_position(Slot::new(3, 1)));

        // A pending orb dropped back where it stands stays pending
        drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));
        let events = drag(&mut board, Slot::new(3, 2), Slot::new(3, 2));
        assert_eq!(events, vec![BoardEvent::DragStarted { orb: id, from: Slot::new(3, 2) }]);
        assert_eq!(board.pending_orb(), Some(id));
        assert_eq!(board.anchor_slot(), Some(Slot::new(3, 1)));
    }

    #[test]
    fn test_leap_move() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 0)).unwrap();
        drag(&mut board, Slot::new(3, 0), Slot::new(5, 2));
        assert_eq!(board.orb_at(Slot::new(5, 2)), Some(id));
    }

    #[test]
    fn test_only_pending_orb_can_move_again() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));

        let events = drag(&mut board, Slot::new(4, 1), Slot::new(4, 2));
        assert!(events.is_empty());
        assert!(board.orb_at(Slot::new(4, 2)).is_none());
    }

    #[test]
    fn test_cannot_move_opponent_orbs() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let events = drag(&mut board, Slot::new(1, 4), Slot::new(2, 4));
        assert!(events.is_empty());
        assert!(board.orb_at(Slot::new(2, 4)).is_none());
        assert!(board.dragged_orb().is_none());
    }

    #[test]
    fn test_pending_orb_keeps_pre_move_options() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 1)).unwrap();
        drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));

        let expected = slots(&[(3, 1), (2, 2), (3, 2), (4, 2)]);
        let cached: HashSet<Slot> = board.orb(id).unwrap().available_movements().iter().copied().collect();
        assert_eq!(cached, expected);

        // Moving again within the pre-move options keeps it pending
        drag(&mut board, Slot::new(3, 2), Slot::new(4, 2));
        assert_eq!(board.orb_at(Slot::new(4, 2)), Some(id));
        assert_eq!(board.pending_orb(), Some(id));

        // Ending the turn refreshes it from its new slot
        click(&mut board, PLAYER1_BUTTON_POSITION);
        assert_eq!(board.state(), TurnState::Player2Turn);
        assert_eq!(board.pending_orb(), None);
        let refreshed: HashSet<Slot> = board.orb(id).unwrap().available_movements().iter().copied().collect();
        assert_ne!(refreshed, expected);
        assert!(refreshed.contains(&Slot::new(4, 2)));
        assert!(refreshed.contains(&Slot::new(4, 3)));
    }

    #[test]
    fn test_round_trip_clears_pending() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));
        assert!(board.pending_orb().is_some());

        drag(&mut board, Slot::new(3, 2), Slot::new(3, 1));
        assert_eq!(board.pending_orb(), None);

        // Free choice again
        let id = board.orb_at(Slot::new(4, 1)).unwrap();
        drag(&mut board, Slot::new(4, 1), Slot::new(4, 2));
        assert_eq!(board.pending_orb(), Some(id));
    }

    #[test]
    fn test_right_click_undo() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 1)).unwrap();
        drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));

        let events = board.update(DT, &right_press(board.slot_position(Slot::new(3, 2))));
        assert_eq!(
            events,
            vec![BoardEvent::MoveUndone {
                orb: id,
                from: Slot::new(3, 2),
                to: Slot::new(3, 1),
            }]
        );
        assert_eq!(board.orb_at(Slot::new(3, 1)), Some(id));
        assert_eq!(board.orb_at(Slot::new(3, 2)), None);
        assert_eq!(board.pending_orb(), None);
    }

    #[test]
    fn test_right_click_on_other_orb_does_nothing() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        drag(&mut board, Slot::new(3, 1), Slot::new(3, 2));
        let events = board.update(DT, &right_press(board.slot_position(Slot::new(4, 1))));
        assert!(events.is_empty());
        assert!(board.pending_orb().is_some());
    }

    #[test]
    fn test_drop_rejections() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 1)).unwrap();

        let events = drag(&mut board, Slot::new(3, 1), Slot::new(4, 1));
        assert_eq!(
            events.last(),
            Some(&BoardEvent::MoveRejected {
                orb: id,
                reason: MoveRejection::Occupied(Slot::new(4, 1)),
            })
        );

        let events = drag(&mut board, Slot::new(3, 1), Slot::new(3, 5));
        assert_eq!(
            events.last(),
            Some(&BoardEvent::MoveRejected {
                orb: id,
                reason: MoveRejection::Unreachable(Slot::new(3, 5)),
            })
        );

        let events = drag(&mut board, Slot::new(3, 1), Slot::new(1, 1));
        assert_eq!(
            events.last(),
            Some(&BoardEvent::MoveRejected {
                orb: id,
                reason: MoveRejection::OffBoard(Slot::new(1, 1)),
            })
        );

        let orb = board.orb(id).unwrap();
        assert_eq!(orb.slot(), Slot::new(3, 1));
        assert_eq!(orb.temp_position(), board.slot_position(Slot::new(3, 1)));
        assert!(!orb.is_dragged());
        assert_eq!(board.pending_orb(), None);
    }

    #[test]
    fn test_drag_follows_mouse() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        let id = board.orb_at(Slot::new(3, 1)).unwrap();
        board.update(DT, &left_press(board.slot_position(Slot::new(3, 1))));
        assert_eq!(board.dragged_orb(), Some(id));

        let cursor = Vector2D::new(700.0, 500.0);
        board.update(DT, &left_held(cursor));
        let orb = board.orb(id).unwrap();
        assert_eq!(orb.temp_position(), cursor);
        assert_eq!(orb.slot(), Slot::new(3, 1));
        assert!(orb.is_dragged());
    }

    #[test]
    fn test_end_turn_buttons() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();

        // Player 2's button is disabled during player 1's turn
        click(&mut board, PLAYER2_BUTTON_POSITION);
        assert_eq!(board.state(), TurnState::Player1Turn);

        let events = click(&mut board, PLAYER1_BUTTON_POSITION);
        assert_eq!(events, vec![BoardEvent::StateChanged { state: TurnState::Player2Turn }]);
        assert_eq!(board.player_button(Player::One).caption(), "Wait for player 2");
        assert_eq!(board.player_button(Player::Two).caption(), "End turn");
        assert!(board.player_button(Player::Two).is_enabled());

        click(&mut board, PLAYER2_BUTTON_POSITION);
        assert_eq!(board.state(), TurnState::Player1Turn);
    }

    fn almost_won_layout() -> Vec<(Slot, OrbColor)> {
        let mut layout = Vec::new();
        for col in 2..8 {
            for row in 0..2 {
                layout.push((Slot::new(col, row), OrbColor::Red));
            }
            for row in 8..10 {
                if (col, row) != (7, 8) {
                    layout.push((Slot::new(col, row), OrbColor::Blue));
                }
            }
        }
        layout.push((Slot::new(7, 7), OrbColor::Blue));
        layout
    }

    #[test]
    fn test_victory_player1() {
        let mut board = BoardController::with_layout(BoardConfig::default(), &almost_won_layout()).unwrap();
        assert_eq!(board.well_placed_counts(), [11, 12, 0, 0]);

        let events = drag(&mut board, Slot::new(7, 7), Slot::new(7, 8));
        assert!(events.contains(&BoardEvent::GameWon { player: Player::One }));
        assert_eq!(board.state(), TurnState::Victory1);
        assert_eq!(board.win_text(), Some("Player 1 won the game!"));
        assert!(!board.player_button(Player::One).is_enabled());
        assert!(!board.player_button(Player::Two).is_enabled());
    }

    #[test]
    fn test_double_victory_goes_to_mover() {
        let mut layout = almost_won_layout();
        for row in 2..8 {
            for col in 0..2 {
                layout.push((Slot::new(col, row), OrbColor::Pink));
            }
            for col in 8..10 {
                layout.push((Slot::new(col, row), OrbColor::Green));
            }
        }
        let mut board = BoardController::with_layout(BoardConfig::default(), &layout).unwrap();
        assert_eq!(board.well_placed_counts(), [11, 12, 12, 12]);
        assert_eq!(board.state(), TurnState::Player1Turn);

        let events = drag(&mut board, Slot::new(7, 7), Slot::new(7, 8));
        assert!(events.contains(&BoardEvent::GameWon { player: Player::One }));
        assert!(!events.contains(&BoardEvent::GameWon { player: Player::Two }));
        assert_eq!(board.state(), TurnState::Victory1);
    }

    #[test]
    fn test_victory_is_terminal() {
        let mut board = BoardController::with_layout(BoardConfig::default(), &almost_won_layout()).unwrap();
        drag(&mut board, Slot::new(7, 7), Slot::new(7, 8));

        assert_eq!(board.set_state(TurnState::Player2Turn), Err(BoardError::GameOver));
        click(&mut board, PLAYER1_BUTTON_POSITION);
        click(&mut board, PLAYER2_BUTTON_POSITION);
        let events = drag(&mut board, Slot::new(7, 8), Slot::new(7, 7));

        assert!(events.is_empty());
        assert_eq!(board.state(), TurnState::Victory1);
        assert!(!board.player_button(Player::One).is_enabled());
    }

    #[test]
    fn test_invalid_layout() {
        let duplicate = [(Slot::new(4, 4), OrbColor::Red), (Slot::new(4, 4), OrbColor::Blue)];
        assert_eq!(
            BoardController::with_layout(BoardConfig::default(), &duplicate).err(),
            Some(BoardError::InvalidPlacement(Slot::new(4, 4)))
        );
        let corner = [(Slot::new(0, 0), OrbColor::Red)];
        assert!(BoardController::with_layout(BoardConfig::default(), &corner).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BoardConfig {
            cell_size: 0.0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            BoardController::new(config.clone()),
            Err(BoardError::InvalidConfig(_))
        ));
        assert!(matches!(
            BoardController::with_layout(config, &[]),
            Err(BoardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_render_layers() {
        let board = BoardController::new(BoardConfig::default()).unwrap();
        let mut list = DrawList::new();
        board.render(&mut list);

        let cells = list
            .commands()
            .iter()
            .filter(|c| matches!(c.visual, Visual::GridCell { .. }))
            .count();
        let orbs = list
            .commands()
            .iter()
            .filter(|c| matches!(c.visual, Visual::Orb { .. }))
            .count();
        assert_eq!(cells, 84);
        assert_eq!(orbs, 48);
        assert!(!list.commands().iter().any(|c| matches!(c.visual, Visual::Overlay { .. })));

        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Player 1 : "));
        assert!(texts.contains(&"Player 2 : "));
        assert!(texts.contains(&"End turn"));
    }

    #[test]
    fn test_hover_shows_markers() {
        let mut board = BoardController::new(BoardConfig::default()).unwrap();
        board.update(DT, &InputSnapshot::at(board.slot_position(Slot::new(3, 1))));
        assert_eq!(board.mouse_over_orb(), board.orb_at(Slot::new(3, 1)));

        let mut list = DrawList::new();
        board.render(&mut list);
        let markers = list
            .commands()
            .iter()
            .filter(|c| matches!(c.visual, Visual::MovementMarker { .. }))
            .count();
        assert_eq!(markers, 3);
    }
}
