//! Command-line options.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Built-in boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoardKind {
    /// The 73-cell trail map with three shortcuts
    Trail,
    /// A plain zigzag grid
    Grid,
    /// A zigzag grid with random ladders
    Ladders,
}

/// Play a head-less trail match and report the result
#[derive(Debug, Parser)]
#[command(name = "trail-cli", version)]
pub struct Args {
    /// Board to play on
    #[arg(short, long, value_enum, default_value_t = BoardKind::Trail)]
    pub board: BoardKind,

    /// Load the board from a JSON definition instead
    #[arg(long, value_name = "FILE", conflicts_with = "board")]
    pub board_file: Option<PathBuf>,

    /// Grid rows
    #[arg(long, default_value_t = 8)]
    pub rows: u32,

    /// Grid columns
    #[arg(long, default_value_t = 8)]
    pub cols: u32,

    /// Number of ladders to place on a ladder board
    #[arg(long, default_value_t = 4)]
    pub ladders: usize,

    /// JSON rules file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for dice, rewards and ladders
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Player names, 2 to 4
    #[arg(short, long, num_args = 1.., default_values_t = ["Player 1".to_string(), "Player 2".to_string()])]
    pub players: Vec<String>,

    /// Chance that a roll moves forward
    #[arg(long)]
    pub forward_probability: Option<f64>,

    /// Stop after this many turns even without a winner
    #[arg(long, default_value_t = 10_000)]
    pub max_turns: usize,

    /// Print the final session snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["trail-cli"]).unwrap();
        assert_eq!(args.board, BoardKind::Trail);
        assert_eq!(args.players, vec!["Player 1", "Player 2"]);
        assert_eq!(args.max_turns, 10_000);
        assert!(args.seed.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_full_flags() {
        let args = Args::try_parse_from([
            "trail-cli",
            "--board",
            "ladders",
            "--rows",
            "6",
            "--seed",
            "42",
            "--players",
            "Ana",
            "Ben",
            "Cy",
            "--forward-probability",
            "0.75",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.board, BoardKind::Ladders);
        assert_eq!(args.rows, 6);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.players, vec!["Ana", "Ben", "Cy"]);
        assert_eq!(args.forward_probability, Some(0.75));
        assert!(args.json);
    }

    #[test]
    fn test_board_file_conflicts_with_board() {
        let result = Args::try_parse_from(["trail-cli", "--board", "grid", "--board-file", "b.json"]);
        assert!(result.is_err());
    }
}
