//! Trail - a board-game movement engine
//!
//! This crate provides the core game logic for trail-style race games, including:
//! - Directed board graphs with branching shortcuts and ladders
//! - Shortest-path resolution at intersections
//! - Movement planning with exact-landing and shortcut rules
//! - Per-turn rule resolution and a multi-player session state machine
//!
//! # Architecture
//!
//! The engine is platform-agnostic and free of I/O. Randomness is injected
//! through seeded RNGs so that whole matches can be replayed.
//!
//! # Modules
//!
//! - [`board`]: Cells, links, start/terminal derivation and rewards
//! - [`pathfinding`]: Distances to the terminal and intersection choice
//! - [`movement`]: Turning a roll into a concrete path
//! - [`dice`]: The die and its direction coin
//! - [`player`]: Player tokens and scores
//! - [`rules`]: Tunable rules and configuration
//! - [`turn`]: Single-turn resolution
//! - [`events`]: Presentation events derived from a turn
//! - [`game`]: Session state machine

pub mod board;
pub mod dice;
pub mod events;
pub mod game;
pub mod movement;
pub mod pathfinding;
pub mod player;
pub mod rules;
pub mod turn;

// Re-export commonly used types
pub use board::{BoardDefinition, BoardError, BoardGraph, Cell, CellDefinition, CellId, CellKind, Position};
pub use dice::{Dice, DiceRoll};
pub use events::GameEvent;
pub use game::{GameError, GamePhase, GameSession, SessionSnapshot};
pub use movement::{Direction, MovementError, MovementPlan, MovementPlanner};
pub use pathfinding::ShortestPathResolver;
pub use player::{Player, PlayerColor, PlayerId};
pub use rules::{BonusTurnPolicy, ConfigError, GameConfig, RewardConfig};
pub use turn::{TurnEngine, TurnResult, TurnStage};
