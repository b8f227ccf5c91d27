//! Movement planning: which cells a token visits for one roll.
//!
//! A plan is computed up front and never suspends; the presentation layer
//! can replay `MovementPlan::path` at whatever pace it likes.
//!
//! Rules applied, in order:
//! 1. Exact landing. Moving forward from a cell whose walk reaches the
//!    terminal in fewer hops than the window, a roll larger than that hop
//!    count is blocked and a roll equal to it is flagged as a perfect landing.
//! 2. Backward rolls walk to predecessors and stop at the start.
//! 3. Forward rolls walk primary links. When the turn is eligible (started on
//!    a prime cell) the first intersection met with hops left is resolved by
//!    shortest distance to the terminal.
//! 4. Forward walks never pass the terminal.

use crate::board::{BoardGraph, CellId, MAX_TRAVERSAL};
use crate::pathfinding::ShortestPathResolver;
use crate::rules::DEFAULT_EXACT_LANDING_WINDOW;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that abort planning
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovementError {
    #[error("Unknown start cell {0}")]
    UnknownCell(CellId),

    #[error("Planned path would exceed {limit} cells")]
    TraversalLimit { limit: usize },
}

/// Which way a roll moves the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Forward)
    }
}

/// Outcome of planning one roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPlan {
    /// Cells visited in order; the first is the start cell
    pub path: Vec<CellId>,
    /// An intersection was resolved by shortest distance
    pub used_shortcut: bool,
    /// The intersection that was resolved
    pub shortcut_at: Option<CellId>,
    /// Distance to the terminal when the exact-landing window applied
    pub exact_distance: Option<u32>,
    /// The roll overshot the terminal inside the exact-landing window
    pub overshoot_blocked: bool,
    /// The roll matches the distance to the terminal exactly
    pub perfect_landing: bool,
}

impl MovementPlan {
    fn stay(start: CellId) -> Self {
        Self {
            path: vec![start],
            used_shortcut: false,
            shortcut_at: None,
            exact_distance: None,
            overshoot_blocked: false,
            perfect_landing: false,
        }
    }

    /// Where the token ends up
    pub fn destination(&self) -> CellId {
        // Plans always hold at least the start cell
        self.path[self.path.len() - 1]
    }

    pub fn start(&self) -> CellId {
        self.path[0]
    }

    /// Number of cells actually moved
    pub fn hops(&self) -> usize {
        self.path.len() - 1
    }
}

/// Plans movement over a board
#[derive(Debug, Clone, Copy)]
pub struct MovementPlanner<'a> {
    board: &'a BoardGraph,
    resolver: ShortestPathResolver<'a>,
    exact_landing_window: u32,
    max_path_len: usize,
}

impl<'a> MovementPlanner<'a> {
    pub fn new(board: &'a BoardGraph) -> Self {
        Self {
            board,
            resolver: ShortestPathResolver::new(board),
            exact_landing_window: DEFAULT_EXACT_LANDING_WINDOW,
            max_path_len: MAX_TRAVERSAL,
        }
    }

    /// Exact landing applies when `0 < distance < window`. 0 disables it.
    pub fn with_exact_landing_window(mut self, window: u32) -> Self {
        self.exact_landing_window = window;
        self
    }

    pub fn with_max_path_len(mut self, limit: usize) -> Self {
        self.max_path_len = limit;
        self
    }

    pub fn resolver(&self) -> &ShortestPathResolver<'a> {
        &self.resolver
    }

    /// Plan a roll of `roll` cells from `start`.
    ///
    /// `eligible_for_shortcut` should be true when the turn began on a
    /// prime cell.
    pub fn plan(
        &self,
        start: CellId,
        roll: u32,
        direction: Direction,
        eligible_for_shortcut: bool,
    ) -> Result<MovementPlan, MovementError> {
        if !self.board.contains(start) {
            return Err(MovementError::UnknownCell(start));
        }
        if roll as usize >= self.max_path_len {
            warn!(start, roll, limit = self.max_path_len, "Roll exceeds traversal bound");
            return Err(MovementError::TraversalLimit {
                limit: self.max_path_len,
            });
        }

        match direction {
            Direction::Backward => Ok(self.walk_backward(start, roll)),
            Direction::Forward => {
                let exact_distance = self.exact_landing_distance(start, eligible_for_shortcut);
                if let Some(distance) = exact_distance {
                    if roll > distance {
                        debug!(start, roll, distance, "Exact landing required, movement blocked");
                        return Ok(MovementPlan {
                            overshoot_blocked: true,
                            exact_distance,
                            ..MovementPlan::stay(start)
                        });
                    }
                }

                let mut plan = self.walk_forward(start, roll, eligible_for_shortcut);
                plan.exact_distance = exact_distance;
                plan.perfect_landing = exact_distance == Some(roll);
                Ok(plan)
            }
        }
    }

    /// Hops the token would need to reach the terminal, when that falls
    /// inside the exact-landing window.
    ///
    /// Measured along the walk this turn would actually take, so a branch the
    /// token cannot follow never shortens the distance.
    fn exact_landing_distance(&self, start: CellId, eligible: bool) -> Option<u32> {
        if self.exact_landing_window == 0 {
            return None;
        }
        let reach = (self.exact_landing_window - 1).min(self.max_path_len as u32);
        let walk = self.walk_forward(start, reach, eligible);
        let hops = walk.hops() as u32;
        (hops > 0 && self.board.is_end(walk.destination())).then_some(hops)
    }

    fn walk_forward(&self, start: CellId, roll: u32, eligible: bool) -> MovementPlan {
        let mut plan = MovementPlan::stay(start);
        let mut current = start;

        for _ in 0..roll {
            if self.board.is_end(current) {
                break;
            }
            let neighbors = self.board.neighbors(current);
            let Some(&primary) = neighbors.first() else {
                break;
            };

            let next = if eligible && !plan.used_shortcut && neighbors.len() > 1 {
                plan.used_shortcut = true;
                plan.shortcut_at = Some(current);
                self.resolver
                    .choose_path_at_intersection(current)
                    .unwrap_or(primary)
            } else {
                primary
            };

            plan.path.push(next);
            current = next;
        }

        plan
    }

    fn walk_backward(&self, start: CellId, roll: u32) -> MovementPlan {
        let mut plan = MovementPlan::stay(start);
        let mut current = start;

        for _ in 0..roll {
            match self.board.predecessor(current) {
                Some(previous) => {
                    plan.path.push(previous);
                    current = previous;
                }
                None => break,
            }
        }

        plan
    }
}
