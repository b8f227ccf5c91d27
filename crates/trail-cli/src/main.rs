//! Head-less trail game driver.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod runner;

use cli::Args;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    info!(board = ?args.board, players = args.players.len(), "Starting match");

    let report = runner::run(&args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
    } else {
        print!("{}", runner::render_standings(&report));
    }
    Ok(())
}
