//! Player state: token position, score and move counter.

use crate::board::CellId;
use serde::{Deserialize, Serialize};

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PlayerColor {
    /// Get color for a player index
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Green,
            _ => PlayerColor::Yellow,
        }
    }

    /// Get hex color code for rendering
    pub fn hex_code(&self) -> u32 {
        match self {
            PlayerColor::Red => 0xFF0000,
            PlayerColor::Blue => 0x0000FF,
            PlayerColor::Green => 0x00FF00,
            PlayerColor::Yellow => 0xFFFF00,
        }
    }
}

/// A player's token and tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    /// Authoritative position of the token
    pub current_cell: CellId,
    pub score: u32,
    /// Completed moves, including moves of zero cells
    pub total_moves: u32,
}

impl Player {
    /// Create a player standing on `start`
    pub fn new(id: PlayerId, name: String, start: CellId) -> Self {
        Self {
            id,
            name,
            color: PlayerColor::for_player(id),
            current_cell: start,
            score: 0,
            total_moves: 0,
        }
    }

    /// Move the token and count the move
    pub fn move_to(&mut self, cell: CellId) {
        self.current_cell = cell;
        self.total_moves += 1;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Back to the start, keeping the score
    pub fn return_to(&mut self, start: CellId) {
        self.current_cell = start;
        self.total_moves = 0;
    }

    /// Back to the start with a clean slate
    pub fn reset(&mut self, start: CellId) {
        self.return_to(start);
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_starts_clean() {
        let player = Player::new(2, "Test".to_string(), 1);
        assert_eq!(player.current_cell, 1);
        assert_eq!(player.score, 0);
        assert_eq!(player.total_moves, 0);
        assert_eq!(player.color, PlayerColor::Green);
    }

    #[test]
    fn test_move_counts_moves() {
        let mut player = Player::new(0, "Test".to_string(), 0);
        player.move_to(4);
        player.move_to(9);
        assert_eq!(player.current_cell, 9);
        assert_eq!(player.total_moves, 2);
    }

    #[test]
    fn test_return_keeps_score_reset_clears_it() {
        let mut player = Player::new(0, "Test".to_string(), 0);
        player.move_to(12);
        player.add_score(7);

        player.return_to(0);
        assert_eq!((player.current_cell, player.score, player.total_moves), (0, 7, 0));

        player.move_to(3);
        player.reset(0);
        assert_eq!((player.current_cell, player.score, player.total_moves), (0, 0, 0));
    }

    #[test]
    fn test_colors_cycle() {
        assert_eq!(PlayerColor::for_player(0), PlayerColor::Red);
        assert_eq!(PlayerColor::for_player(4), PlayerColor::Red);
        assert_eq!(PlayerColor::Yellow.hex_code(), 0xFFFF00);
    }
}
