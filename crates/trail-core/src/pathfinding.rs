//! Hop-count distances to the terminal cell.
//!
//! Every link costs one hop, so breadth-first search gives exact shortest
//! distances. Searches keep a visited set and always terminate, even on
//! boards where the terminal cannot be reached.

use crate::board::{BoardGraph, CellId};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Shortest-path queries over a board
#[derive(Debug, Clone, Copy)]
pub struct ShortestPathResolver<'a> {
    board: &'a BoardGraph,
}

impl<'a> ShortestPathResolver<'a> {
    pub fn new(board: &'a BoardGraph) -> Self {
        Self { board }
    }

    /// Minimum number of hops from `from` to the terminal cell.
    ///
    /// `None` when the terminal is unreachable or `from` is not on the board.
    pub fn distance_to_end(&self, from: CellId) -> Option<u32> {
        if !self.board.contains(from) {
            return None;
        }
        let end = self.board.end_id();
        if from == end {
            return Some(0);
        }

        let mut distances: HashMap<CellId, u32> = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(from, 0);
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            let dist = distances[&cell];
            if cell == end {
                return Some(dist);
            }
            for &next in self.board.neighbors(cell) {
                if !distances.contains_key(&next) {
                    distances.insert(next, dist + 1);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Pick the neighbor of `intersection` closest to the terminal.
    ///
    /// Ties go to the neighbor declared first. Unreachable neighbors rank
    /// last; if none can reach the terminal the primary neighbor is returned.
    /// `None` only for a cell with no outgoing links.
    pub fn choose_path_at_intersection(&self, intersection: CellId) -> Option<CellId> {
        let neighbors = self.board.neighbors(intersection);
        let mut best = *neighbors.first()?;
        let mut best_distance: Option<u32> = None;

        for &neighbor in neighbors {
            let distance = self.distance_to_end(neighbor);
            let closer = match (distance, best_distance) {
                (Some(d), Some(b)) => d < b,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if closer {
                best = neighbor;
                best_distance = distance;
            }
        }

        debug!(
            intersection,
            chosen = best,
            distance = ?best_distance,
            "Shortest path chosen at intersection"
        );
        Some(best)
    }

    /// Full minimum-hop route from `from` to the terminal, both ends included
    pub fn shortest_path(&self, from: CellId) -> Option<Vec<CellId>> {
        if !self.board.contains(from) {
            return None;
        }
        let end = self.board.end_id();

        let mut previous: HashMap<CellId, Option<CellId>> = HashMap::new();
        let mut queue = VecDeque::new();
        previous.insert(from, None);
        queue.push_back(from);

        while let Some(cell) = queue.pop_front() {
            if cell == end {
                let mut path = vec![cell];
                let mut current = cell;
                while let Some(&Some(prev)) = previous.get(&current) {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }
            for &next in self.board.neighbors(cell) {
                previous.entry(next).or_insert_with(|| {
                    queue.push_back(next);
                    Some(cell)
                });
            }
        }

        None
    }
}
