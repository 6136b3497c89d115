//! Interactive text front-end for the rules engine.
//!
//! Reads commands from stdin and answers on stdout; logs go to stderr.

use std::process::ExitCode;

use chessboard_rules::chess_errors::ChessResult;
use chessboard_rules::frontend::text_protocol::run_stdio_loop;
use chessboard_rules::session::game_session::GameSession;
use chessboard_rules::session::session_config::SessionConfig;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Play a chess game over a line-based text protocol")]
struct Args {
    /// Start from this FEN position instead of the initial layout.
    #[arg(long)]
    fen: Option<String>,

    /// Occurrences of one position that draw the game.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..))]
    repetition_limit: u8,

    /// Half-moves without a pawn move or capture that draw the game.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..))]
    fifty_move_halfmoves: u16,

    /// Do not end the game on insufficient material.
    #[arg(long)]
    no_insufficient_material: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let session = match start_session(&args) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "cannot start the session");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_stdio_loop(session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "i/o failure on the command loop");
            ExitCode::FAILURE
        }
    }
}

fn start_session(args: &Args) -> ChessResult<GameSession> {
    let config = SessionConfig::new(
        args.repetition_limit,
        args.fifty_move_halfmoves,
        !args.no_insufficient_material,
    )?;
    match args.fen.as_deref() {
        Some(fen) => GameSession::from_fen(fen, config),
        None => Ok(GameSession::new(config)),
    }
}
