//! Board graph: numbered cells, their display positions, and directed links.
//!
//! This module contains:
//! - Cell kinds and the prime marker used for shortcut eligibility
//! - The arena-backed `BoardGraph` with start/terminal derivation
//! - Validation of board definitions (dangling edges, duplicates, loops)
//! - Reward placement and collection
//! - Built-in boards (the trail map and zigzag grids, with or without ladders)

use crate::rules::RewardConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Cell identifier as printed on the board
pub type CellId = u32;

/// Upper bound on any walk over the graph. Guards against malformed boards.
pub const MAX_TRAVERSAL: usize = 200;

/// Reward always placed on the terminal cell
pub const TERMINAL_REWARD: u32 = 100;

/// Cell size and padding used for grid display positions
const GRID_CELL_SIZE: i32 = 60;
const GRID_PADDING: i32 = 20;

/// Minimum rise of a generated ladder
const MIN_LADDER_RISE: CellId = 5;

/// Errors detected while building a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Board has no cells")]
    Empty,

    #[error("Cell {0} is defined more than once")]
    DuplicateCell(CellId),

    #[error("Edge {from} -> {to} references an unknown cell")]
    DanglingEdge { from: CellId, to: CellId },

    #[error("Cell {0} links to itself")]
    SelfLoop(CellId),

    #[error("Edge {from} -> {to} is declared twice")]
    DuplicateEdge { from: CellId, to: CellId },

    #[error("Main line from the start cell never reaches a terminal cell within {limit} steps")]
    TraversalLimit { limit: usize },

    #[error("Terminal cell {0} is the start cell")]
    TerminalIsStart(CellId),

    #[error("Unknown cell {0}")]
    UnknownCell(CellId),

    #[error("Invalid board definition: {0}")]
    InvalidDefinition(String),
}

/// Display position of a cell, carried through but never interpreted here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Marker shown on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Normal,
    /// Where every token begins
    Start,
    /// Reaching this cell ends the game
    End,
    /// Positive multiple of 5 - landing here grants another turn
    Bonus,
}

/// Check whether `n` is prime by trial division up to its square root
pub fn is_prime(n: CellId) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let n = u64::from(n);
    let mut divisor = 3u64;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// A single stopping position on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub position: Position,
    pub kind: CellKind,
    pub is_prime: bool,
    reward_points: u32,
    /// Outgoing links. Index 0 is the primary path.
    neighbors: Vec<CellId>,
}

impl Cell {
    fn new(id: CellId, position: Position) -> Self {
        Self {
            id,
            position,
            kind: CellKind::Normal,
            is_prime: is_prime(id),
            reward_points: 0,
            neighbors: Vec::new(),
        }
    }

    /// Outgoing neighbors in declaration order
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// The default successor, if any
    pub fn primary_neighbor(&self) -> Option<CellId> {
        self.neighbors.first().copied()
    }

    /// A cell with more than one way forward
    pub fn is_intersection(&self) -> bool {
        self.neighbors.len() > 1
    }

    /// Points waiting to be collected here
    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }
}

/// One cell of a serialized board definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDefinition {
    pub id: CellId,
    pub x: i32,
    pub y: i32,
}

/// A board as data: cells plus directed `(from, to)` edges.
///
/// Edge order matters: the first edge leaving a cell becomes its primary path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardDefinition {
    pub cells: Vec<CellDefinition>,
    pub edges: Vec<(CellId, CellId)>,
}

impl BoardDefinition {
    /// Parse a definition from JSON
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        serde_json::from_str(json).map_err(|e| BoardError::InvalidDefinition(e.to_string()))
    }

    /// A straight chain `first -> first+1 -> ... -> last`
    pub fn linear(first: CellId, last: CellId) -> Self {
        let cells = (first..=last)
            .map(|id| CellDefinition { id, x: 0, y: 0 })
            .collect();
        let edges = (first..last).map(|id| (id, id + 1)).collect();
        Self { cells, edges }
    }

    /// Zigzag grid numbered from 1 at the bottom-left, linked `id -> id+1`.
    ///
    /// The main line may not be longer than the traversal bound.
    pub fn grid(rows: u32, cols: u32) -> Result<Self, BoardError> {
        let total = rows
            .checked_mul(cols)
            .filter(|&total| total as usize <= MAX_TRAVERSAL + 1)
            .ok_or_else(|| {
                BoardError::InvalidDefinition(format!(
                    "a {rows}x{cols} grid exceeds the {} cell limit",
                    MAX_TRAVERSAL + 1
                ))
            })?;
        let mut cells = Vec::with_capacity(total as usize);
        let mut id: CellId = 1;

        for row in (0..rows).rev() {
            let left_to_right = (rows - 1 - row) % 2 == 0;
            let y = GRID_PADDING + row as i32 * GRID_CELL_SIZE;
            for step in 0..cols {
                let col = if left_to_right { step } else { cols - 1 - step };
                let x = GRID_PADDING + col as i32 * GRID_CELL_SIZE;
                cells.push(CellDefinition { id, x, y });
                id += 1;
            }
        }

        let edges = (1..total).map(|id| (id, id + 1)).collect();
        Ok(Self { cells, edges })
    }
}

/// Immutable-topology board graph. Cells live in an arena addressed by id.
///
/// Only built through `from_definition`, which validates the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardGraph {
    cells: Vec<Cell>,
    index: HashMap<CellId, usize>,
    start: CellId,
    end: CellId,
}

impl BoardGraph {
    /// Build a board from cell and edge tuples
    pub fn from_parts(cells: &[(CellId, i32, i32)], edges: &[(CellId, CellId)]) -> Result<Self, BoardError> {
        Self::from_definition(BoardDefinition {
            cells: cells
                .iter()
                .map(|&(id, x, y)| CellDefinition { id, x, y })
                .collect(),
            edges: edges.to_vec(),
        })
    }

    /// Build and validate a board from its definition
    pub fn from_definition(definition: BoardDefinition) -> Result<Self, BoardError> {
        if definition.cells.is_empty() {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(definition.cells.len());
        let mut index = HashMap::with_capacity(definition.cells.len());
        for def in &definition.cells {
            if index.insert(def.id, cells.len()).is_some() {
                return Err(BoardError::DuplicateCell(def.id));
            }
            cells.push(Cell::new(def.id, Position::new(def.x, def.y)));
        }

        let mut seen_edges = HashSet::with_capacity(definition.edges.len());
        for &(from, to) in &definition.edges {
            if from == to {
                return Err(BoardError::SelfLoop(from));
            }
            let (Some(&from_idx), true) = (index.get(&from), index.contains_key(&to)) else {
                return Err(BoardError::DanglingEdge { from, to });
            };
            if !seen_edges.insert((from, to)) {
                return Err(BoardError::DuplicateEdge { from, to });
            }
            cells[from_idx].neighbors.push(to);
        }

        // Lowest id is the start
        let start = cells.iter().map(|c| c.id).min().ok_or(BoardError::Empty)?;

        let mut board = Self {
            cells,
            index,
            start,
            end: start,
        };
        board.end = board.find_terminal()?;
        if board.end == board.start {
            return Err(BoardError::TerminalIsStart(board.end));
        }
        board.assign_kinds();

        Ok(board)
    }

    /// Follow primary links from the start until a cell with nowhere to go
    fn find_terminal(&self) -> Result<CellId, BoardError> {
        let mut current = self.start;
        for _ in 0..=MAX_TRAVERSAL {
            match self.cell(current).and_then(Cell::primary_neighbor) {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
        Err(BoardError::TraversalLimit {
            limit: MAX_TRAVERSAL,
        })
    }

    fn assign_kinds(&mut self) {
        let (start, end) = (self.start, self.end);
        for cell in &mut self.cells {
            cell.kind = if cell.id == start {
                CellKind::Start
            } else if cell.id == end {
                CellKind::End
            } else if cell.id % 5 == 0 {
                CellKind::Bonus
            } else {
                CellKind::Normal
            };
        }
    }

    /// The 73-cell trail map: a main line 0..=42 with three shortcuts.
    ///
    /// - Shortcut 1 leaves 8 through 43..=56 and rejoins at 35
    /// - Shortcut 2 leaves 19 through 57..=61 and rejoins at 49
    /// - Shortcut 3 leaves 23 through 62..=72 and rejoins at 33
    pub fn trail() -> Self {
        const POSITIONS: [(i32, i32); 73] = [
            // Main line 0..=42
            (637, 803), (629, 752), (589, 748), (542, 738), (492, 711),
            (444, 682), (391, 644), (340, 620), (299, 615), (210, 543),
            (168, 523), (157, 474), (78, 446), (101, 394), (80, 337),
            (114, 318), (165, 313), (205, 352), (221, 384), (259, 384),
            (276, 331), (318, 243), (353, 251), (383, 247), (471, 241),
            (500, 248), (541, 258), (579, 262), (617, 257), (657, 246),
            (709, 237), (731, 266), (762, 273), (798, 276), (838, 335),
            (899, 407), (937, 409), (975, 413), (1031, 403), (1054, 347),
            (1031, 300), (991, 257), (957, 232),
            // Shortcut 1: 43..=56
            (301, 543), (336, 523), (376, 518), (409, 514), (455, 495),
            (494, 483), (533, 476), (573, 476), (609, 477), (647, 474),
            (688, 481), (761, 471), (830, 514), (872, 426),
            // Shortcut 2: 57..=61
            (311, 361), (363, 397), (423, 403), (492, 420), (531, 424),
            // Shortcut 3: 62..=72
            (412, 207), (433, 139), (481, 108), (497, 140), (529, 147),
            (563, 145), (604, 143), (635, 129), (644, 80), (826, 214),
            (825, 256),
        ];

        let cells = POSITIONS
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| CellDefinition { id: id as CellId, x, y })
            .collect();

        // Main line first so that every primary link stays on it
        let mut edges: Vec<(CellId, CellId)> = (0..42).map(|id| (id, id + 1)).collect();
        for (branch, first, last, merge) in [(8, 43, 56, 35), (19, 57, 61, 49), (23, 62, 72, 33)] {
            edges.push((branch, first));
            edges.extend((first..last).map(|id| (id, id + 1)));
            edges.push((last, merge));
        }

        Self::from_definition(BoardDefinition { cells, edges })
            .unwrap_or_else(|e| unreachable!("built-in trail map is valid: {e}"))
    }

    /// A zigzag grid of `rows * cols` cells linked only to the next id
    pub fn grid(rows: u32, cols: u32) -> Result<Self, BoardError> {
        Self::from_definition(BoardDefinition::grid(rows, cols)?)
    }

    /// A zigzag grid with up to `ladder_count` randomly placed ladders.
    ///
    /// A ladder is a second outgoing link from its bottom cell to its top cell.
    /// Neither end sits on the first or last cell, no cell hosts two ladder
    /// ends, and every ladder rises at least 5 cells.
    pub fn grid_with_ladders<R: Rng>(
        rows: u32,
        cols: u32,
        ladder_count: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut definition = BoardDefinition::grid(rows, cols)?;
        let total = rows * cols;
        let mut available: Vec<CellId> = (2..total).collect();

        for _ in 0..ladder_count {
            if available.len() < 2 {
                break;
            }
            let bottom = available.remove(rng.gen_range(0..available.len()));

            let tops: Vec<CellId> = available
                .iter()
                .copied()
                .filter(|&pos| pos >= bottom + MIN_LADDER_RISE)
                .collect();
            if tops.is_empty() {
                continue;
            }
            let top = tops[rng.gen_range(0..tops.len())];
            available.retain(|&pos| pos != top);
            definition.edges.push((bottom, top));
        }

        Self::from_definition(definition)
    }

    /// Look up a cell by id
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.index.get(&id).map(|&i| &self.cells[i])
    }

    fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        match self.index.get(&id) {
            Some(&i) => self.cells.get_mut(i),
            None => None,
        }
    }

    /// Look up a cell by id, failing with `UnknownCell`
    pub fn cell_by_id(&self, id: CellId) -> Result<&Cell, BoardError> {
        self.cell(id).ok_or(BoardError::UnknownCell(id))
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn start_cell(&self) -> &Cell {
        &self.cells[self.index[&self.start]]
    }

    pub fn end_cell(&self) -> &Cell {
        &self.cells[self.index[&self.end]]
    }

    pub fn start_id(&self) -> CellId {
        self.start
    }

    pub fn end_id(&self) -> CellId {
        self.end
    }

    pub fn is_end(&self, id: CellId) -> bool {
        id == self.end
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// All cells in definition order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Outgoing neighbors of a cell. The terminal cell is absorbing.
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        if id == self.end {
            return &[];
        }
        self.cell(id).map(Cell::neighbors).unwrap_or(&[])
    }

    pub fn is_intersection(&self, id: CellId) -> bool {
        self.neighbors(id).len() > 1
    }

    /// First cell, in definition order, that links to `id`
    pub fn predecessor(&self, id: CellId) -> Option<CellId> {
        self.cells
            .iter()
            .find(|cell| cell.id != self.end && cell.neighbors.contains(&id))
            .map(|cell| cell.id)
    }

    /// Every non-primary link, e.g. shortcut entries and ladders
    pub fn ladders(&self) -> Vec<(CellId, CellId)> {
        self.cells
            .iter()
            .flat_map(|cell| cell.neighbors.iter().skip(1).map(move |&to| (cell.id, to)))
            .collect()
    }

    /// Points waiting on a cell (0 for unknown cells)
    pub fn reward(&self, id: CellId) -> u32 {
        self.cell(id).map_or(0, Cell::reward_points)
    }

    /// Set the reward on a single cell
    pub fn set_reward(&mut self, id: CellId, points: u32) -> Result<(), BoardError> {
        let cell = self.cell_mut(id).ok_or(BoardError::UnknownCell(id))?;
        cell.reward_points = points;
        Ok(())
    }

    /// Take whatever reward sits on a cell, leaving zero behind
    pub fn collect_reward(&mut self, id: CellId) -> u32 {
        self.cell_mut(id)
            .map_or(0, |cell| std::mem::take(&mut cell.reward_points))
    }

    /// Zero every reward on the board
    pub fn clear_rewards(&mut self) {
        for cell in &mut self.cells {
            cell.reward_points = 0;
        }
    }

    /// Total points still on the board
    pub fn total_rewards(&self) -> u32 {
        self.cells.iter().map(|c| c.reward_points).sum()
    }

    /// Place rewards: the terminal gets `TERMINAL_REWARD`, then a sampled
    /// subset of the other cells (never the start) each gets an independent
    /// point value. Cells are sampled without replacement.
    ///
    /// Existing rewards are cleared first.
    pub fn generate_rewards<R: Rng>(&mut self, rng: &mut R, config: &RewardConfig) {
        self.clear_rewards();
        let end = self.end;
        if let Some(cell) = self.cell_mut(end) {
            cell.reward_points = TERMINAL_REWARD;
        }

        let mut available: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.id != self.start && c.id != self.end)
            .map(|(i, _)| i)
            .collect();

        let (count_lo, count_hi) = config.count_range;
        let (points_lo, points_hi) = config.points_range;
        let count = if count_lo < count_hi {
            rng.gen_range(count_lo..count_hi)
        } else {
            count_lo
        };

        for _ in 0..count {
            if available.is_empty() {
                break;
            }
            let slot = available.remove(rng.gen_range(0..available.len()));
            self.cells[slot].reward_points = if points_lo < points_hi {
                rng.gen_range(points_lo..points_hi)
            } else {
                points_lo
            };
        }
    }

    /// Place rewards from a seed
    pub fn generate_rewards_seeded(&mut self, seed: u64, config: &RewardConfig) {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        self.generate_rewards(&mut rng, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_is_prime() {
        let primes: Vec<CellId> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(!is_prime(49));
        assert!(is_prime(97));
    }

    #[test]
    fn test_trail_layout() {
        let board = BoardGraph::trail();
        assert_eq!(board.total_cells(), 73);
        assert_eq!(board.start_id(), 0);
        assert_eq!(board.end_id(), 42);
        assert_eq!(board.neighbors(8), &[9, 43]);
        assert_eq!(board.neighbors(19), &[20, 57]);
        assert_eq!(board.neighbors(23), &[24, 62]);
        assert_eq!(board.neighbors(56), &[35]);
        assert_eq!(board.neighbors(61), &[49]);
        assert_eq!(board.neighbors(72), &[33]);
        assert!(board.neighbors(42).is_empty());
        assert_eq!(board.ladders(), vec![(8, 43), (19, 57), (23, 62)]);
    }

    #[test]
    fn test_cell_kinds() {
        let board = BoardGraph::trail();
        assert_eq!(board.start_cell().kind, CellKind::Start);
        assert_eq!(board.end_cell().kind, CellKind::End);
        assert_eq!(board.cell(45).unwrap().kind, CellKind::Bonus);
        assert_eq!(board.cell(7).unwrap().kind, CellKind::Normal);
        assert!(board.cell(7).unwrap().is_prime);
        assert!(!board.cell(8).unwrap().is_prime);
    }

    #[test]
    fn test_grid_numbering_zigzags() {
        let board = BoardGraph::grid(8, 8).unwrap();
        assert_eq!(board.total_cells(), 64);
        assert_eq!(board.start_id(), 1);
        assert_eq!(board.end_id(), 64);

        // Bottom row runs left to right, the next row back again
        assert_eq!(board.cell(1).unwrap().position, Position::new(20, 440));
        assert_eq!(board.cell(8).unwrap().position, Position::new(440, 440));
        assert_eq!(board.cell(9).unwrap().position, Position::new(440, 380));
        assert!(board.cells().all(|c| !c.is_intersection()));
    }

    #[test]
    fn test_grid_size_is_bounded() {
        assert_eq!(BoardGraph::grid(1, 201).unwrap().end_id(), 201);
        assert!(matches!(BoardGraph::grid(15, 15), Err(BoardError::InvalidDefinition(_))));
        assert!(matches!(
            BoardDefinition::grid(u32::MAX, 2),
            Err(BoardError::InvalidDefinition(_))
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            BoardGraph::grid_with_ladders(70_000, 70_000, 3, &mut rng),
            Err(BoardError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_serialized_board_reloads_through_definition() {
        let board = BoardGraph::grid(2, 3).unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["end"], 6);

        // Boards are only read back as definitions, which are validated
        let broken = BoardDefinition::from_json(r#"{"cells": [], "edges": []}"#).unwrap();
        assert_eq!(BoardGraph::from_definition(broken), Err(BoardError::Empty));
        let unlinked = BoardDefinition::from_json(r#"{"cells": [{"id": 0, "x": 0, "y": 0}, {"id": 1, "x": 0, "y": 0}], "edges": []}"#).unwrap();
        assert_eq!(BoardGraph::from_definition(unlinked), Err(BoardError::TerminalIsStart(0)));
    }

    #[test]
    fn test_rejects_dangling_edge() {
        let result = BoardGraph::from_parts(&[(0, 0, 0), (1, 0, 0)], &[(0, 1), (1, 7)]);
        assert_eq!(result, Err(BoardError::DanglingEdge { from: 1, to: 7 }));
    }

    #[test]
    fn test_rejects_duplicates_and_loops() {
        assert_eq!(
            BoardGraph::from_parts(&[(0, 0, 0), (0, 1, 1)], &[]),
            Err(BoardError::DuplicateCell(0))
        );
        assert_eq!(
            BoardGraph::from_parts(&[(0, 0, 0), (1, 0, 0)], &[(0, 1), (0, 1)]),
            Err(BoardError::DuplicateEdge { from: 0, to: 1 })
        );
        assert_eq!(
            BoardGraph::from_parts(&[(0, 0, 0), (1, 0, 0)], &[(1, 1)]),
            Err(BoardError::SelfLoop(1))
        );
        assert_eq!(BoardGraph::from_definition(BoardDefinition::default()), Err(BoardError::Empty));
    }

    #[test]
    fn test_rejects_isolated_start() {
        assert_eq!(
            BoardGraph::from_parts(&[(0, 0, 0), (1, 0, 0)], &[]),
            Err(BoardError::TerminalIsStart(0))
        );
    }

    #[test]
    fn test_rejects_cyclic_main_line() {
        let result = BoardGraph::from_parts(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)], &[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(result, Err(BoardError::TraversalLimit { limit: MAX_TRAVERSAL }));
    }

    #[test]
    fn test_predecessor_uses_definition_order() {
        let board = BoardGraph::trail();
        // 35 is reached from both 34 and 56; 34 is defined first
        assert_eq!(board.predecessor(35), Some(34));
        assert_eq!(board.predecessor(43), Some(8));
        assert_eq!(board.predecessor(0), None);
    }

    #[test]
    fn test_generate_rewards() {
        let mut board = BoardGraph::trail();
        let config = RewardConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        board.generate_rewards(&mut rng, &config);

        assert_eq!(board.reward(42), TERMINAL_REWARD);
        assert_eq!(board.reward(0), 0);

        let rewarded: Vec<&Cell> = board
            .cells()
            .filter(|c| c.reward_points() > 0 && c.id != 42)
            .collect();
        assert!((10..16).contains(&rewarded.len()));
        assert!(rewarded.iter().all(|c| (1..11).contains(&c.reward_points())));
    }

    #[test]
    fn test_generate_rewards_is_deterministic() {
        let config = RewardConfig::default();
        let mut a = BoardGraph::trail();
        let mut b = BoardGraph::trail();
        a.generate_rewards_seeded(99, &config);
        b.generate_rewards_seeded(99, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_collect_reward_once() {
        let mut board = BoardGraph::grid(8, 8).unwrap();
        board.set_reward(12, 7).unwrap();
        assert_eq!(board.collect_reward(12), 7);
        assert_eq!(board.collect_reward(12), 0);
        assert_eq!(board.collect_reward(999), 0);
    }

    #[test]
    fn test_ladders_rise_and_do_not_share_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = BoardGraph::grid_with_ladders(8, 8, 5, &mut rng).unwrap();
        let ladders = board.ladders();
        assert!(!ladders.is_empty() && ladders.len() <= 5);

        let mut used = HashSet::new();
        for (bottom, top) in ladders {
            assert!(top >= bottom + MIN_LADDER_RISE);
            assert!(bottom > 1 && top < 64);
            assert!(used.insert(bottom));
            assert!(used.insert(top));
        }
        assert_eq!(board.end_id(), 64);
    }

    #[test]
    fn test_definition_from_json() {
        let json = r#"{"cells":[{"id":0,"x":1,"y":2},{"id":1,"x":3,"y":4}],"edges":[[0,1]]}"#;
        let board = BoardGraph::from_definition(BoardDefinition::from_json(json).unwrap()).unwrap();
        assert_eq!(board.end_id(), 1);
        assert_eq!(board.cell(1).unwrap().position, Position::new(3, 4));
        assert!(matches!(
            BoardDefinition::from_json("{"),
            Err(BoardError::InvalidDefinition(_))
        ));
    }
}
