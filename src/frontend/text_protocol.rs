//! Line-oriented text front-end over a [`GameSession`].
//!
//! One command per line, one or more response lines per command. Failures are
//! answered with a single `error: ...` line and leave the session untouched.
//!
//! ```text
//! new                     start a new game from the initial position
//! fen <FEN>               start a new game from a FEN position
//! position                print the current FEN
//! moves [square]          list legal moves, optionally from one square
//! move <move>             play a move in coordinate notation or SAN
//! undo                    take back the last move
//! status                  print the game status
//! show                    draw the board
//! pgn                     export the game as PGN
//! set <name> <value>      change a draw-rule option
//! quit                    leave the loop
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::chess_errors::ChessError;
use crate::game_state::position::Position;
use crate::session::game_session::GameSession;
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::pgn::write_pgn;
use crate::utils::render_game_state::render_position;
use crate::utils::san::move_to_san;

pub fn run_stdio_loop(session: GameSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut frontend = TextFrontend::new(session);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = frontend.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct TextFrontend {
    session: GameSession,
}

impl TextFrontend {
    pub fn new(session: GameSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Handle one input line. Returns `Ok(true)` when the loop should stop;
    /// `Err` only for I/O failures on `out`.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let (cmd, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(cmd, rest)| (cmd, rest.trim()));
        debug!(cmd, args = rest, "front-end command");

        let outcome = match cmd {
            "quit" => return Ok(true),
            "new" => {
                self.session = GameSession::new(*self.session.config());
                writeln!(out, "ok")?;
                Ok(())
            }
            "fen" => self.load_fen(rest, out),
            "position" => {
                writeln!(out, "{}", self.session.fen())?;
                Ok(())
            }
            "moves" => self.list_moves(rest, out),
            "move" => self.play(rest, out),
            "undo" => self.undo(out),
            "status" => {
                self.write_status(out)?;
                Ok(())
            }
            "show" => {
                writeln!(out, "{}", render_position(self.session.current_position()))?;
                Ok(())
            }
            "pgn" => self.export_pgn(out),
            "set" => self.set_option(rest, out),
            _ => Err(CommandError::Chess(ChessError::InvalidNotation(format!(
                "unknown command {cmd:?}"
            )))),
        };

        match outcome {
            Ok(()) => Ok(false),
            Err(CommandError::Io(err)) => Err(err),
            Err(CommandError::Chess(err)) => {
                writeln!(out, "error: {err}")?;
                Ok(false)
            }
        }
    }

    fn load_fen(&mut self, fen: &str, out: &mut impl Write) -> CommandResult {
        let position = Position::from_fen(fen)?;
        self.session = GameSession::from_position(position, *self.session.config());
        writeln!(out, "ok")?;
        Ok(())
    }

    fn list_moves(&self, square: &str, out: &mut impl Write) -> CommandResult {
        let moves = if square.is_empty() {
            self.session.legal_moves()
        } else {
            self.session.legal_moves_from(algebraic_to_square(square)?)
        };

        let mut names: Vec<String> = moves.iter().map(ToString::to_string).collect();
        names.sort();
        if names.is_empty() {
            writeln!(out, "(none)")?;
        } else {
            writeln!(out, "{}", names.join(" "))?;
        }
        Ok(())
    }

    fn play(&mut self, notation: &str, out: &mut impl Write) -> CommandResult {
        if notation.is_empty() {
            return Err(ChessError::InvalidNotation("move needs an argument".to_owned()).into());
        }
        let before = self.session.current_position().clone();
        self.session.play_notation(notation)?;

        let mv = self
            .session
            .moves_played()
            .last()
            .copied()
            .ok_or(ChessError::EmptyHistory)?;
        writeln!(out, "ok {mv} {}", move_to_san(mv, &before)?)?;
        if !self.session.status().is_ongoing() {
            self.write_status(out)?;
        }
        Ok(())
    }

    fn export_pgn(&self, out: &mut impl Write) -> CommandResult {
        let pgn = write_pgn(&self.session)?;
        write!(out, "{pgn}")?;
        Ok(())
    }

    fn undo(&mut self, out: &mut impl Write) -> CommandResult {
        let mv = self.session.undo()?;
        writeln!(out, "undone {mv}")?;
        Ok(())
    }

    fn set_option(&mut self, args: &str, out: &mut impl Write) -> CommandResult {
        let (name, value) = args.split_once(char::is_whitespace).ok_or_else(|| {
            ChessError::InvalidNotation("usage: set <name> <value>".to_owned())
        })?;
        self.session.set_option(name, value.trim())?;
        writeln!(out, "ok")?;
        Ok(())
    }

    fn write_status(&self, out: &mut impl Write) -> io::Result<()> {
        let status = self.session.status();
        if status.is_ongoing() {
            let check = if self.session.is_in_check() { ", in check" } else { "" };
            writeln!(out, "{status}, {} to move{check}", self.session.side_to_move())
        } else {
            writeln!(out, "{status} {}", status.result_token())
        }
    }
}

enum CommandError {
    Io(io::Error),
    Chess(ChessError),
}

type CommandResult = Result<(), CommandError>;

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<ChessError> for CommandError {
    fn from(err: ChessError) -> Self {
        CommandError::Chess(err)
    }
}

/// Run a whole script of commands and collect the output.
pub fn run_script(session: GameSession, script: &str) -> io::Result<String> {
    let mut frontend = TextFrontend::new(session);
    let mut out = Vec::<u8>::new();
    for line in script.lines() {
        if frontend.handle_command(line, &mut out)? {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}
