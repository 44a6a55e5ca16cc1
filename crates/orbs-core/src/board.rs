//! Tile graph: board cells, their adjacency and reachable-move computation.
//!
//! This module contains:
//! - Tile types (normal cells and the four home bands)
//! - The `TileGraph` arena holding every tile and its neighbor links
//! - Leap rules and the flood fill computing where an orb may move
//!
//! Tiles reference each other and their occupant by index (`TileId`,
//! `OrbId`) into arenas owned by the board.

use crate::orb::{OrbColor, OrbId};
use crate::slot::{Direction, Slot, BOARD_SIZE, HOME_DEPTH};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Index of a tile in the graph arena
pub type TileId = usize;

/// Type of board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Plain playing cell
    Normal,
    /// Destination band of the blue orbs
    HomeBlue,
    /// Destination band of the red orbs
    HomeRed,
    /// Destination band of the green orbs
    HomeGreen,
    /// Destination band of the pink orbs
    HomePink,
}

impl TileType {
    /// Home type of the standard cross board at a given slot
    pub fn for_slot(slot: Slot) -> Self {
        let last = BOARD_SIZE - HOME_DEPTH;
        let in_arm = |v: i32| (HOME_DEPTH..last).contains(&v);

        if in_arm(slot.col) {
            if slot.row < HOME_DEPTH {
                TileType::HomeRed
            } else if slot.row >= last {
                TileType::HomeBlue
            } else {
                TileType::Normal
            }
        } else if in_arm(slot.row) {
            if slot.col < HOME_DEPTH {
                TileType::HomePink
            } else {
                TileType::HomeGreen
            }
        } else {
            TileType::Normal
        }
    }

    /// The home tile type of an orb color
    pub fn home_of(color: OrbColor) -> Self {
        match color {
            OrbColor::Blue => TileType::HomeBlue,
            OrbColor::Red => TileType::HomeRed,
            OrbColor::Green => TileType::HomeGreen,
            OrbColor::Pink => TileType::HomePink,
        }
    }

    pub fn is_home(&self) -> bool {
        !matches!(self, TileType::Normal)
    }
}

/// How a leap over occupied tiles is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeapRule {
    /// Jump over a contiguous run of occupied tiles and land on the first
    /// empty tile behind it
    #[default]
    Run,
    /// Jump over a single pivot at distance `k`, landing `k` tiles past it;
    /// every tile between origin, pivot and landing must be empty
    Mirror,
}

/// A single board cell
#[derive(Debug, Clone)]
pub struct Tile {
    slot: Slot,
    tile_type: TileType,
    occupant: Option<OrbId>,
    neighbors: Vec<TileId>,
    available_movements: Vec<Slot>,
}

impl Tile {
    fn new(slot: Slot, tile_type: TileType) -> Self {
        Self {
            slot,
            tile_type,
            occupant: None,
            neighbors: Vec::with_capacity(8),
            available_movements: Vec::new(),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn is_on_slot(&self, slot: Slot) -> bool {
        self.slot == slot
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn occupant(&self) -> Option<OrbId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Adjacent tiles (at most 8)
    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    /// Result of the last [`TileGraph::compute_available_movements`]
    pub fn available_movements(&self) -> &[Slot] {
        &self.available_movements
    }

    /// Whether an orb of `color` standing here counts as well placed
    pub fn is_home_of(&self, color: OrbColor) -> bool {
        self.tile_type == TileType::home_of(color)
    }
}

/// All tiles of a board and their adjacency
#[derive(Debug, Clone)]
pub struct TileGraph {
    tiles: Vec<Tile>,
    /// Slot lookup
    index: HashMap<Slot, TileId>,
    leap_rule: LeapRule,
}

impl TileGraph {
    /// The standard 84-tile cross board
    pub fn cross() -> Self {
        let slots = (0..BOARD_SIZE)
            .flat_map(|col| (0..BOARD_SIZE).map(move |row| Slot::new(col, row)))
            .filter(Slot::is_on_board)
            .map(|slot| (slot, TileType::for_slot(slot)));
        Self::from_tiles(slots)
    }

    /// Build a graph from arbitrary tiles. Duplicate slots keep the first
    /// entry. Neighbor links connect every pair at Chebyshev distance 1.
    pub fn from_tiles(tiles: impl IntoIterator<Item = (Slot, TileType)>) -> Self {
        let mut graph = Self {
            tiles: Vec::new(),
            index: HashMap::new(),
            leap_rule: LeapRule::default(),
        };

        for (slot, tile_type) in tiles {
            if graph.index.contains_key(&slot) {
                continue;
            }
            graph.index.insert(slot, graph.tiles.len());
            graph.tiles.push(Tile::new(slot, tile_type));
        }

        for id in 0..graph.tiles.len() {
            let slot = graph.tiles[id].slot;
            for dir in Direction::ALL {
                if let Some(&other) = graph.index.get(&slot.step(dir)) {
                    graph.link(id, other);
                }
            }
        }

        graph
    }

    pub fn with_leap_rule(mut self, leap_rule: LeapRule) -> Self {
        self.leap_rule = leap_rule;
        self
    }

    pub fn leap_rule(&self) -> LeapRule {
        self.leap_rule
    }

    fn link(&mut self, a: TileId, b: TileId) {
        if !self.tiles[a].neighbors.contains(&b) {
            self.tiles[a].neighbors.push(b);
        }
        if !self.tiles[b].neighbors.contains(&a) {
            self.tiles[b].neighbors.push(a);
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn tile_at(&self, slot: Slot) -> Option<TileId> {
        self.index.get(&slot).copied()
    }

    pub fn neighbors(&self, id: TileId) -> &[TileId] {
        self.tiles.get(id).map(|t| t.neighbors.as_slice()).unwrap_or(&[])
    }

    /// The adjacent tile in `direction`, if it exists
    pub fn neighbor(&self, id: TileId, direction: Direction) -> Option<TileId> {
        let tile = self.tiles.get(id)?;
        tile.neighbors
            .iter()
            .copied()
            .find(|&n| tile.slot.direction_to(&self.tiles[n].slot) == Some(direction))
    }

    pub fn is_occupied(&self, id: TileId) -> bool {
        self.tiles.get(id).is_some_and(Tile::is_occupied)
    }

    pub fn occupant(&self, id: TileId) -> Option<OrbId> {
        self.tiles.get(id).and_then(|t| t.occupant)
    }

    pub fn set_occupant(&mut self, id: TileId, orb: Option<OrbId>) {
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.occupant = orb;
        }
    }

    /// Recompute and cache everything an orb on `id` could reach this move.
    ///
    /// The origin slot is always first. Empty neighbors are direct steps;
    /// leap landings are chained breadth-first until no new tile appears.
    pub fn compute_available_movements(&mut self, id: TileId) -> &[Slot] {
        let movements = self.reachable_slots(id);
        match self.tiles.get_mut(id) {
            Some(tile) => {
                tile.available_movements = movements;
                tile.available_movements.as_slice()
            }
            None => &[],
        }
    }

    /// Reachable slots without touching the cache
    pub fn reachable_slots(&self, origin: TileId) -> Vec<Slot> {
        let Some(tile) = self.tiles.get(origin) else {
            return Vec::new();
        };

        let mut movements = vec![tile.slot];
        if !tile.is_occupied() {
            return movements;
        }

        let mut visited = vec![false; self.tiles.len()];
        visited[origin] = true;

        for &n in &tile.neighbors {
            if !self.tiles[n].is_occupied() {
                movements.push(self.tiles[n].slot);
                visited[n] = true;
            }
        }

        let mut frontier = VecDeque::from([origin]);
        while let Some(from) = frontier.pop_front() {
            for dir in Direction::ALL {
                let Some(landing) = self.leap(from, dir, origin) else {
                    continue;
                };
                if visited[landing] {
                    continue;
                }
                visited[landing] = true;
                movements.push(self.tiles[landing].slot);
                frontier.push_back(landing);
            }
        }

        movements
    }

    /// Landing tile of a single leap from `from` towards `direction`
    fn leap(&self, from: TileId, direction: Direction, origin: TileId) -> Option<TileId> {
        match self.leap_rule {
            LeapRule::Run => self.leap_over_run(from, direction, origin),
            LeapRule::Mirror => self.leap_mirrored(from, direction, origin),
        }
    }

    fn leap_over_run(&self, from: TileId, direction: Direction, origin: TileId) -> Option<TileId> {
        let mut current = self.neighbor(from, direction)?;
        if !self.is_occupied(current) {
            return None;
        }

        while self.is_occupied(current) {
            // The moving orb never jumps over itself
            if current == origin {
                return None;
            }
            current = self.neighbor(current, direction)?;
        }

        Some(current)
    }

    fn leap_mirrored(&self, from: TileId, direction: Direction, origin: TileId) -> Option<TileId> {
        let mut pivot = self.neighbor(from, direction)?;
        let mut distance = 1;
        while !self.is_occupied(pivot) {
            pivot = self.neighbor(pivot, direction)?;
            distance += 1;
        }
        if pivot == origin {
            return None;
        }

        let mut landing = self.neighbor(pivot, direction)?;
        for _ in 1..distance {
            if self.is_occupied(landing) {
                return None;
            }
            landing = self.neighbor(landing, direction)?;
        }

        (!self.is_occupied(landing)).then_some(landing)
    }
}
