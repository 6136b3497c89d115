//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by board construction,
//! notation parsing, move validation and session control. Every variant is
//! recoverable at the caller boundary: a rejected operation never leaves a
//! position or session partially updated.

use crate::game_status::game_status::GameStatus;

/// Unified error type for the rules engine.
///
/// Input-related variants (`InvalidSquare`, `InvalidNotation`,
/// `MalformedPosition`) are suitable for showing to end users. Rule
/// violations (`IllegalMove`, `AmbiguousPromotion`, `GameFinished`) are the
/// kind of thing a UI answers by snapping the piece back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// The move is not in the legal-move set of the position it was played in.
    #[error("illegal move {notation}: {reason}")]
    IllegalMove { notation: String, reason: String },

    /// A pawn reaches the last rank but no promotion piece was given.
    #[error("move {from}{to} promotes a pawn and needs a promotion piece")]
    AmbiguousPromotion { from: String, to: String },

    /// Imported position text failed a structural or invariant check.
    #[error("malformed position: {0}")]
    MalformedPosition(String),

    /// File or rank outside `0..=7`.
    #[error("invalid square: file {file}, rank {rank}")]
    InvalidSquare { file: i16, rank: i16 },

    /// Text that should be a square, move or notation token did not parse.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// A move was requested after the game had already ended.
    #[error("game is already finished: {0}")]
    GameFinished(GameStatus),

    /// Undo was requested with no moves played.
    #[error("no moves to undo")]
    EmptyHistory,

    /// A configuration option name that the session does not know.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A configuration option value that is out of range or unparsable.
    #[error("invalid value {value:?} for option {name}")]
    InvalidOptionValue { name: String, value: String },
}

pub type ChessResult<T> = Result<T, ChessError>;

impl ChessError {
    pub(crate) fn illegal(notation: impl Into<String>, reason: impl Into<String>) -> Self {
        ChessError::IllegalMove {
            notation: notation.into(),
            reason: reason.into(),
        }
    }
}
