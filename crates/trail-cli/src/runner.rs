//! Match setup and the head-less game loop.

use crate::cli::{Args, BoardKind};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use trail_core::{
    BoardDefinition, BoardGraph, GameConfig, GameEvent, GameSession, Player, SessionSnapshot,
};

/// How a match ended
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub turns: usize,
    pub finished: bool,
    pub snapshot: SessionSnapshot,
    /// Players by score, highest first
    pub standings: Vec<Player>,
}

/// Read the rules file (if any) and apply command-line overrides
pub fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json(&read(path)?)
            .with_context(|| format!("invalid rules in {}", path.display()))?,
        None => GameConfig::default(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(p) = args.forward_probability {
        config.forward_probability = p;
    }
    config.validate()?;
    Ok(config)
}

/// Build the board named on the command line
pub fn build_board(args: &Args, rng: &mut StdRng) -> anyhow::Result<BoardGraph> {
    if let Some(path) = &args.board_file {
        let definition = BoardDefinition::from_json(&read(path)?)
            .with_context(|| format!("invalid board definition in {}", path.display()))?;
        return Ok(BoardGraph::from_definition(definition)?);
    }

    let board = match args.board {
        BoardKind::Trail => BoardGraph::trail(),
        BoardKind::Grid => BoardGraph::grid(args.rows, args.cols)?,
        BoardKind::Ladders => BoardGraph::grid_with_ladders(args.rows, args.cols, args.ladders, rng)?,
    };
    Ok(board)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Set up a session and play until someone wins or the turn limit is hit
pub fn run(args: &Args) -> anyhow::Result<MatchReport> {
    let config = load_config(args)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let board = build_board(args, &mut rng)?;
    info!(
        cells = board.total_cells(),
        start = board.start_id(),
        end = board.end_id(),
        ladders = board.ladders().len(),
        "Board ready"
    );

    let mut game = GameSession::with_config(board, args.players.clone(), config)?;
    game.generate_rewards();

    let mut turns = 0;
    while !game.is_finished() && turns < args.max_turns {
        let result = game.take_turn()?;
        turns += 1;
        for event in result.events() {
            log_event(&game, &event);
        }
    }

    if !game.is_finished() {
        warn!(turns, "Turn limit reached without a winner");
    }

    Ok(MatchReport {
        turns,
        finished: game.is_finished(),
        snapshot: game.snapshot(),
        standings: game.standings().into_iter().cloned().collect(),
    })
}

fn log_event(game: &GameSession, event: &GameEvent) {
    let name = |id| game.player(id).map_or("?", |p| p.name.as_str());
    match event {
        GameEvent::Moved { player, path, .. } => {
            info!(player = name(*player), path = ?path, "Moved");
        }
        GameEvent::ShortcutTaken { player, at, to } => {
            info!(player = name(*player), at, to, "Shortcut taken");
        }
        GameEvent::OvershootBlocked { player, needed, rolled } => {
            info!(player = name(*player), needed, rolled, "Exact roll needed");
        }
        GameEvent::PointsCollected { player, points, .. } => {
            info!(player = name(*player), points, "Points");
        }
        GameEvent::GameWon { player } => {
            info!(player = name(*player), "Winner");
        }
        other => debug!(event = ?other),
    }
}

/// Plain-text summary of a finished run
pub fn render_standings(report: &MatchReport) -> String {
    let mut out = if report.finished {
        format!("Game over after {} turns\n", report.turns)
    } else {
        format!("No winner after {} turns\n", report.turns)
    };
    for (rank, player) in report.standings.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - {} points (cell {})\n",
            rank + 1,
            player.name,
            player.score,
            player.current_cell
        ));
    }
    out
}
