//! Chess CLI - plays a scripted game through the rules engine.
//!
//! Moves come from a TOML script (`--script`) or from the command line, in
//! coordinate notation (`e2e4`, `e7e8q`) or as castling tokens (`O-O`).

mod config;
mod runner;

use anyhow::Context;
use clap::Parser;
use config::ScriptConfig;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Play a chess game from a script or a list of moves")]
struct Cli {
    /// TOML script describing the game
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Starting position, overriding the script's
    #[arg(long)]
    fen: Option<String>,

    /// Print a JSON summary instead of the board
    #[arg(long)]
    json: bool,

    /// Log every move
    #[arg(short, long)]
    verbose: bool,

    /// Moves to play after the script's own
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut script = match &cli.script {
        Some(path) => ScriptConfig::load(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => ScriptConfig::default(),
    };
    if cli.fen.is_some() {
        script.fen = cli.fen;
    }
    script.moves.extend(cli.moves);

    tracing::info!(
        "Playing game {}: {} vs {}, {} moves",
        script.game_id,
        script.white,
        script.black,
        script.moves.len()
    );

    let (game, summary) = runner::play_script(&script)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", game.board());
    println!();
    for entry in &summary.log {
        println!("{}", entry);
    }
    println!();
    println!("State: {}", summary.state);
    if let Some(winner) = &summary.winner {
        println!("Winner: {}", winner);
    }
    println!("FEN: {}", summary.fen);
    Ok(())
}
