//! Match-level state machine.
//!
//! A `GameSession` owns the board, the roster and the dice. Each call to
//! `take_turn` resolves exactly one turn for the current player and either
//! passes play on, keeps it with the same player (bonus turn), or finishes
//! the match when the terminal cell is reached.

use crate::board::{BoardError, BoardGraph, CellId, CellKind, Position};
use crate::dice::{Dice, DiceRoll};
use crate::movement::MovementError;
use crate::player::{Player, PlayerColor, PlayerId};
use crate::rules::{ConfigError, GameConfig};
use crate::turn::{TurnEngine, TurnResult, TurnStage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Fewest players a match accepts
pub const MIN_PLAYERS: usize = 2;

/// Most players a match accepts
pub const MAX_PLAYERS: usize = 4;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No turn taken yet; players may still join
    NotStarted,
    InProgress,
    /// Game is over
    Finished { winner: PlayerId },
}

/// Errors that can occur when driving a session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("A match needs 2-4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Players can only join before the first turn")]
    AlreadyStarted,

    #[error("Game is over")]
    GameOver,

    #[error("Game is not finished yet")]
    NotFinished,

    #[error("Unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Movement(#[from] MovementError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A complete match
#[derive(Debug, Clone)]
pub struct GameSession {
    board: BoardGraph,
    players: Vec<Player>,
    current_player: PlayerId,
    phase: GamePhase,
    /// Turns resolved so far
    turn_number: u32,
    engine: TurnEngine,
    dice: Dice,
    rng: StdRng,
    config: GameConfig,
    last_turn: Option<TurnResult>,
}

impl GameSession {
    /// Create a match with default rules and OS-seeded dice
    pub fn create(board: BoardGraph, player_names: Vec<String>) -> Result<Self, GameError> {
        Self::with_config(board, player_names, GameConfig::default())
    }

    /// Create a match with the given rules
    pub fn with_config(
        board: BoardGraph,
        player_names: Vec<String>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_names.len()) {
            return Err(GameError::InvalidPlayerCount(player_names.len()));
        }
        config.validate()?;

        let start = board.start_id();
        let players = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name, start))
            .collect();

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            board,
            players,
            current_player: 0,
            phase: GamePhase::NotStarted,
            turn_number: 0,
            engine: TurnEngine::new(&config),
            dice: Dice::new(config.forward_probability),
            rng,
            config,
            last_turn: None,
        })
    }

    /// Add a player before the first turn
    pub fn add_player(&mut self, name: String) -> Result<PlayerId, GameError> {
        if self.phase != GamePhase::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(self.players.len() + 1));
        }

        let id = self.players.len() as PlayerId;
        self.players.push(Player::new(id, name, self.board.start_id()));
        Ok(id)
    }

    /// Scatter fresh rewards over the board using the session's RNG
    pub fn generate_rewards(&mut self) {
        self.board.generate_rewards(&mut self.rng, &self.config.rewards);
    }

    /// Roll the dice and resolve the current player's turn
    pub fn take_turn(&mut self) -> Result<TurnResult, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        let roll = self.dice.roll(&mut self.rng);
        self.take_turn_with(roll)
    }

    /// Resolve the current player's turn with a roll made elsewhere
    pub fn take_turn_with(&mut self, roll: DiceRoll) -> Result<TurnResult, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.dice.record(roll);

        let index = self.current_player as usize;
        let player = self
            .players
            .get_mut(index)
            .ok_or(GameError::UnknownPlayer(self.current_player))?;
        let mut result = self.engine.resolve(&mut self.board, player, roll)?;

        self.turn_number += 1;
        if result.game_over {
            self.phase = GamePhase::Finished {
                winner: result.player,
            };
            info!(
                winner = %self.players[index].name,
                score = self.players[index].score,
                turns = self.turn_number,
                "Game won"
            );
        } else {
            self.phase = GamePhase::InProgress;
            if !result.bonus_turn {
                self.current_player = ((index + 1) % self.players.len()) as PlayerId;
            }
            result.next_player = Some(self.current_player);
        }

        debug!(
            turn = self.turn_number,
            player = result.player,
            roll = result.roll_value,
            forward = result.forward_direction,
            path = ?result.path,
            "Turn resolved"
        );

        self.last_turn = Some(result.clone());
        Ok(result)
    }

    /// Keep the scores, send every token home and lay out new rewards
    pub fn continue_game(&mut self) {
        let start = self.board.start_id();
        for player in &mut self.players {
            player.return_to(start);
        }
        self.restart();
        info!("Continuing with current scores");
    }

    /// Start over from nothing: positions, scores and rewards
    pub fn reset_game(&mut self) {
        let start = self.board.start_id();
        for player in &mut self.players {
            player.reset(start);
        }
        self.restart();
        info!("Game restarted, scores reset");
    }

    fn restart(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.current_player = 0;
        self.turn_number = 0;
        self.last_turn = None;
        self.engine.reset();
        self.generate_rewards();
    }

    pub fn board(&self) -> &BoardGraph {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// The player whose turn it is
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player as usize]
    }

    pub fn current_player_id(&self) -> PlayerId {
        self.current_player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// The player standing on the terminal cell, once the game is over
    pub fn winner(&self) -> Result<&Player, GameError> {
        match self.phase {
            GamePhase::Finished { winner } => {
                self.player(winner).ok_or(GameError::UnknownPlayer(winner))
            }
            _ => Err(GameError::NotFinished),
        }
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn turn_stage(&self) -> TurnStage {
        self.engine.stage()
    }

    pub fn last_turn(&self) -> Option<&TurnResult> {
        self.last_turn.as_ref()
    }

    pub fn last_roll(&self) -> Option<DiceRoll> {
        self.dice.last_roll()
    }

    /// Players ordered by score, highest first; ties keep seating order
    pub fn standings(&self) -> Vec<&Player> {
        let mut standings: Vec<&Player> = self.players.iter().collect();
        standings.sort_by(|a, b| b.score.cmp(&a.score));
        standings
    }

    /// Convert to a JSON-friendly representation for renderers
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            current_player: self.current_player,
            turn_number: self.turn_number,
            start: self.board.start_id(),
            end: self.board.end_id(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    color: p.color,
                    cell: p.current_cell,
                    score: p.score,
                    total_moves: p.total_moves,
                })
                .collect(),
            cells: self
                .board
                .cells()
                .map(|c| CellSnapshot {
                    id: c.id,
                    position: c.position,
                    kind: c.kind,
                    is_prime: c.is_prime,
                    reward: c.reward_points(),
                    neighbors: c.neighbors().to_vec(),
                })
                .collect(),
            last_turn: self.last_turn.clone(),
        }
    }
}

/// JSON-friendly session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub start: CellId,
    pub end: CellId,
    pub players: Vec<PlayerSnapshot>,
    pub cells: Vec<CellSnapshot>,
    pub last_turn: Option<TurnResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub cell: CellId,
    pub score: u32,
    pub total_moves: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: CellId,
    pub position: Position,
    pub kind: CellKind,
    pub is_prime: bool,
    pub reward: u32,
    pub neighbors: Vec<CellId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardDefinition;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Player {i}")).collect()
    }

    fn seeded(board: BoardGraph, players: usize) -> GameSession {
        GameSession::with_config(board, names(players), GameConfig::seeded(5)).unwrap()
    }

    #[test]
    fn test_new_session_not_started() {
        let game = seeded(BoardGraph::trail(), 3);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.current_player_id(), 0);
        assert!(game.players().iter().all(|p| p.current_cell == 0));
        assert_eq!(game.winner().unwrap_err(), GameError::NotFinished);
    }

    #[test]
    fn test_player_count_enforced() {
        assert_eq!(
            GameSession::create(BoardGraph::trail(), names(1)).unwrap_err(),
            GameError::InvalidPlayerCount(1)
        );
        assert_eq!(
            GameSession::create(BoardGraph::trail(), names(5)).unwrap_err(),
            GameError::InvalidPlayerCount(5)
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            forward_probability: 2.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameSession::with_config(BoardGraph::trail(), names(2), config),
            Err(GameError::Config(ConfigError::InvalidProbability(_)))
        ));
    }

    #[test]
    fn test_add_player_only_before_first_turn() {
        let mut game = seeded(BoardGraph::trail(), 2);
        assert_eq!(game.add_player("C".to_string()), Ok(2));
        assert_eq!(game.add_player("D".to_string()), Ok(3));
        assert_eq!(game.add_player("E".to_string()), Err(GameError::InvalidPlayerCount(5)));
        assert_eq!(game.players()[3].color, PlayerColor::Yellow);

        let mut game = seeded(BoardGraph::trail(), 2);
        game.take_turn_with(DiceRoll::forward(1)).unwrap();
        assert_eq!(game.add_player("C".to_string()), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn test_turn_passes_to_next_player() {
        let mut game = seeded(BoardGraph::trail(), 3);
        let result = game.take_turn_with(DiceRoll::forward(1)).unwrap();
        assert_eq!(result.path, vec![0, 1]);
        assert_eq!(result.next_player, Some(1));
        assert_eq!(game.current_player_id(), 1);
        assert_eq!(game.phase(), GamePhase::InProgress);
        assert_eq!(game.turn_stage(), TurnStage::Resolved);

        game.take_turn_with(DiceRoll::forward(2)).unwrap();
        game.take_turn_with(DiceRoll::forward(3)).unwrap();
        assert_eq!(game.current_player_id(), 0);
        assert_eq!(game.turn_number(), 3);
    }

    #[test]
    fn test_bonus_turn_keeps_player() {
        let mut game = seeded(BoardGraph::trail(), 2);
        let result = game.take_turn_with(DiceRoll::forward(5)).unwrap();
        assert!(result.bonus_turn);
        assert_eq!(game.current_player_id(), 0);
        assert_eq!(result.next_player, Some(0));
    }

    #[test]
    fn test_finished_session_rejects_turns() {
        let board = BoardGraph::from_definition(BoardDefinition::linear(0, 3)).unwrap();
        let mut game = seeded(board, 2);
        let result = game.take_turn_with(DiceRoll::forward(3)).unwrap();
        assert!(result.game_over);
        assert!(result.perfect_landing);
        assert_eq!(result.next_player, None);
        assert_eq!(game.phase(), GamePhase::Finished { winner: 0 });
        assert_eq!(game.winner().unwrap().id, 0);

        let players_before = game.players().to_vec();
        assert_eq!(game.take_turn(), Err(GameError::GameOver));
        assert_eq!(game.take_turn_with(DiceRoll::forward(1)), Err(GameError::GameOver));
        assert_eq!(game.players(), players_before.as_slice());
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_continue_keeps_scores() {
        let board = BoardGraph::from_definition(BoardDefinition::linear(0, 3)).unwrap();
        let mut game = seeded(board, 2);
        game.generate_rewards();
        game.take_turn_with(DiceRoll::forward(3)).unwrap();
        let score = game.players()[0].score;
        assert!(score >= 100);

        game.continue_game();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.players()[0].score, score);
        assert!(game.players().iter().all(|p| p.current_cell == 0));
        assert_eq!(game.board().reward(3), 100);
        assert!(game.last_turn().is_none());

        game.reset_game();
        assert!(game.players().iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_standings_order() {
        let mut game = seeded(BoardGraph::trail(), 3);
        game.board.set_reward(2, 4).unwrap();
        game.board.set_reward(3, 9).unwrap();
        game.take_turn_with(DiceRoll::forward(2)).unwrap();
        game.take_turn_with(DiceRoll::forward(3)).unwrap();

        let order: Vec<PlayerId> = game.standings().iter().map(|p| p.id).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut game = seeded(BoardGraph::trail(), 2);
        game.generate_rewards();
        game.take_turn().unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cells.len(), 73);
        assert_eq!(snapshot.end, 42);
        assert!(snapshot.last_turn.is_some());

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_seeded_sessions_replay_identically() {
        let mut a = seeded(BoardGraph::trail(), 2);
        let mut b = seeded(BoardGraph::trail(), 2);
        for _ in 0..20 {
            match (a.take_turn(), b.take_turn()) {
                (Ok(x), Ok(y)) => assert_eq!(x, y),
                (Err(x), Err(y)) => assert_eq!(x, y),
                _ => panic!("sessions diverged"),
            }
        }
    }
}
