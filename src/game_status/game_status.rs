//! Check and game-termination detection.
//!
//! Precedence when several conditions hold at once: checkmate and stalemate
//! (the side to move has no legal move) first, then insufficient material,
//! then the fifty-move rule, then repetition. A mate delivered on the
//! hundredth half-move therefore still counts as mate.

use std::fmt;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::game_status::insufficient_material::is_insufficient_material;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::session::session_config::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate { loser: Color },
    Stalemate,
    DrawInsufficientMaterial,
    DrawFiftyMove,
    DrawRepetition,
}

impl GameStatus {
    #[inline]
    pub fn is_ongoing(self) -> bool {
        self == GameStatus::Ongoing
    }

    #[inline]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawInsufficientMaterial
                | GameStatus::DrawFiftyMove
                | GameStatus::DrawRepetition
        )
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { loser } => Some(loser.opposite()),
            _ => None,
        }
    }

    /// PGN result token: `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub fn result_token(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None if self.is_draw() => "1/2-1/2",
            None => "*",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Checkmate { loser } => {
                write!(f, "checkmate, {} wins", loser.opposite())
            }
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::DrawInsufficientMaterial => write!(f, "draw by insufficient material"),
            GameStatus::DrawFiftyMove => write!(f, "draw by fifty-move rule"),
            GameStatus::DrawRepetition => write!(f, "draw by repetition"),
        }
    }
}

/// Status of a position on its own, with default draw thresholds. Repetition
/// needs history and is never reported here; see [`status_with_history`].
pub fn status(position: &Position) -> GameStatus {
    status_with_history(position, &[], &SessionConfig::default())
}

/// Status of `position` reached after `earlier` positions of the same game
/// (oldest first, not including `position` itself).
pub fn status_with_history(
    position: &Position,
    earlier: &[Position],
    config: &SessionConfig,
) -> GameStatus {
    if !has_legal_move(position) {
        return if is_in_check(position, position.side_to_move()) {
            GameStatus::Checkmate {
                loser: position.side_to_move(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if config.detect_insufficient_material() && is_insufficient_material(position.board()) {
        return GameStatus::DrawInsufficientMaterial;
    }

    if position.halfmove_clock() >= config.fifty_move_halfmoves() {
        return GameStatus::DrawFiftyMove;
    }

    if repetition_count(position, earlier) >= usize::from(config.repetition_limit()) {
        return GameStatus::DrawRepetition;
    }

    GameStatus::Ongoing
}

/// Occurrences of `position` in `earlier` plus the current one.
pub fn repetition_count(position: &Position, earlier: &[Position]) -> usize {
    1 + earlier
        .iter()
        .filter(|previous| previous.is_repetition_of(position))
        .count()
}
