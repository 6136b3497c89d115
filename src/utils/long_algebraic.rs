//! Coordinate ("long algebraic") move notation: `e2e4`, `e1g1`, `e7e8q`.
//!
//! Text is resolved against the legal moves of the given position, so a
//! parsed move always carries the correct piece, capture and special flags.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Coordinate notation for `mv`, checked against the position it is played in.
pub fn move_to_long_algebraic(mv: Move, position: &Position) -> ChessResult<String> {
    match position.piece_at(mv.from) {
        Some(piece) if piece.color == position.side_to_move() && piece.kind == mv.piece => {
            Ok(mv.to_string())
        }
        _ => Err(ChessError::illegal(
            mv.to_string(),
            format!("no {} {:?} on {}", position.side_to_move(), mv.piece, mv.from),
        )),
    }
}

pub fn long_algebraic_to_move(text: &str, position: &Position) -> ChessResult<Move> {
    let (from, to, promotion) = parse_coordinates(text)?;

    let mut candidates = legal_moves(position)
        .into_iter()
        .filter(|mv| mv.from == from && mv.to == to)
        .peekable();

    let needs_promotion = candidates.peek().is_some_and(Move::is_promotion);
    if needs_promotion && promotion.is_none() {
        return Err(ChessError::AmbiguousPromotion {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    candidates
        .find(|mv| mv.promotion == promotion)
        .ok_or_else(|| {
            ChessError::illegal(
                text,
                format!("not a legal move for {}", position.side_to_move()),
            )
        })
}

/// Split `e7e8q` into squares and optional promotion kind without looking at
/// any position.
pub fn parse_coordinates(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidNotation(format!(
            "bad coordinate move {text:?}"
        )));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(
            PieceKind::from_fen_char(ch.to_ascii_lowercase())
                .filter(|kind| kind.is_promotion_target())
                .ok_or_else(|| {
                    ChessError::InvalidNotation(format!("bad promotion piece '{ch}' in {text:?}"))
                })?,
        ),
    };
    Ok((from, to, promotion))
}
