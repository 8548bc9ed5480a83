use std::fs;
use std::path::PathBuf;

use chessboard::board::Board;
use chessboard::codec;
use chessboard::config::{BoardConfig, PositionSetting, ValidatedConfig};
use chessboard::diff::{self, Animation};
use chessboard::geometry::Point;
use chessboard::host::BoardHost;
use chessboard::position::Move;
use chessboard::render::RecordingRenderer;
use chessboard::{BoardError, Position};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chessboard", about = "Board-diagram, diff and move tool")]
struct Cli {
    /// JSON board configuration used by `moves`.
    #[arg(long, global = true, env = "CHESSBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a diagram and print it in canonical form.
    Fen { diagram: String },
    /// Print the animations that turn one diagram into another.
    Diff {
        before: String,
        after: String,
        #[arg(long)]
        json: bool,
    },
    /// Apply `from-to` moves and print the resulting diagram.
    Moves {
        #[arg(required = true)]
        moves: Vec<String>,
        /// Starting diagram; defaults to the configured position, else the
        /// standard start.
        #[arg(long)]
        from: Option<String>,
        /// Animate the change and settle it before printing.
        #[arg(long)]
        animate: bool,
        /// Print the result and every recorded render call as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Host that logs what the board reports.
struct LoggingHost;

impl BoardHost for LoggingHost {
    fn on_change(&mut self, old: &Position, new: &Position) {
        tracing::info!(from = %codec::encode(old), to = %codec::encode(new), "position changed");
    }

    fn on_move_end(&mut self, old: &Position, new: &Position) {
        tracing::info!(from = %codec::encode(old), to = %codec::encode(new), "move animation settled");
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Fen { diagram } => run_fen(&diagram),
        Command::Diff { before, after, json } => run_diff(&before, &after, json),
        Command::Moves { moves, from, animate, json } => run_moves(cli.config, &moves, from, animate, json),
    }
}

fn run_fen(diagram: &str) -> Result<(), CliError> {
    let position = codec::decode(diagram)?;
    println!("{}", codec::encode(&position));
    println!("{position}");
    Ok(())
}

fn run_diff(before: &str, after: &str, as_json: bool) -> Result<(), CliError> {
    let before = codec::decode(before)?;
    let after = codec::decode(after)?;
    let animations = diff::diff(&before, &after);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&animations)?);
        return Ok(());
    }
    for animation in &animations {
        match animation {
            Animation::Move { source, destination, piece } => println!("move  {piece} {source} -> {destination}"),
            Animation::Add { square, piece } => println!("add   {piece} {square}"),
            Animation::Clear { square, piece } => println!("clear {piece} {square}"),
        }
    }
    if animations.is_empty() {
        println!("(no changes)");
    }
    Ok(())
}

fn run_moves(
    config_path: Option<PathBuf>,
    moves: &[String],
    from: Option<String>,
    animate: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let moves = moves.iter().map(|m| m.parse::<Move>()).collect::<Result<Vec<_>, _>>()?;

    let mut validated = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|source| CliError::Io { path, source })?;
            BoardConfig::from_json(&text)?
        }
        None => ValidatedConfig { config: BoardConfig::default(), issues: Vec::new() },
    };
    if let Some(diagram) = from {
        validated.config.position = PositionSetting::Diagram(diagram);
    } else if validated.config.position == PositionSetting::Empty {
        validated.config.position = PositionSetting::Start;
    }

    let renderer = RecordingRenderer::new(401.0, Point::default());
    let mut board = Board::from_validated(validated, renderer, LoggingHost);
    let result = board.apply_moves(&moves, animate)?;

    if animate {
        for ticket in board.renderer().tickets() {
            board.animation_complete(ticket);
        }
    }

    if as_json {
        let report = json!({
            "fen": codec::encode(&result),
            "position": result,
            "ops": board.renderer().ops,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", board.fen());
        println!("{}", board.position());
    }
    Ok(())
}
