//! Move execution.
//!
//! `make_move` is the raw executor used by the generator's legality filter:
//! it trusts that the move came from pseudo-legal generation for this
//! position. `apply_move` is the public entry point and refuses any move
//! outside the position's legal-move set.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_lanes_for, CASTLING_LANES};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;

/// Apply a move that is known to be in `legal_moves(position)`.
///
/// Fails with `IllegalMove` (and changes nothing) otherwise.
pub fn apply_move(position: &Position, mv: Move) -> ChessResult<Position> {
    if !legal_moves(position).contains(&mv) {
        return Err(ChessError::illegal(
            mv.to_string(),
            format!(
                "not a legal move for {} in {}",
                position.side_to_move,
                position.to_fen()
            ),
        ));
    }
    Ok(make_move(position, mv))
}

/// Produce the position after `mv` without checking legality.
pub(crate) fn make_move(position: &Position, mv: Move) -> Position {
    let mover = position.side_to_move;
    let mut board = position.board;

    board.clear(mv.from);
    if mv.is_en_passant() {
        // The captured pawn sits beside the mover, on the from-rank.
        board.clear(Square::from_index(mv.from.rank() * 8 + mv.to.file()));
    } else {
        board.clear(mv.to);
    }
    board.set(mv.to, Piece::new(mover, mv.promotion.unwrap_or(mv.piece)));

    if mv.is_castle() {
        if let Some(lane) = castling_lanes_for(mover)
            .iter()
            .find(|lane| lane.king_to == mv.to.index())
        {
            board.clear(Square::from_index(lane.rook_from));
            board.set(Square::from_index(lane.rook_to), Piece::new(mover, PieceKind::Rook));
        }
    }

    let castling_rights = updated_castling_rights(position.castling_rights, mover, &mv);

    let en_passant = if mv.is_double_pawn_push() {
        Some(Square::from_index((mv.from.index() + mv.to.index()) / 2))
    } else {
        None
    };

    let halfmove_clock = if mv.is_irreversible() {
        0
    } else {
        position.halfmove_clock.saturating_add(1)
    };
    let fullmove_number = if mover == Color::Black {
        position.fullmove_number.saturating_add(1)
    } else {
        position.fullmove_number
    };

    Position::assemble(
        board,
        mover.opposite(),
        castling_rights,
        en_passant,
        halfmove_clock,
        fullmove_number,
    )
}

/// Rights are lost when the king moves, or when a rook leaves or is captured
/// on its home square.
fn updated_castling_rights(rights: CastlingRights, mover: Color, mv: &Move) -> CastlingRights {
    let mut rights = rights;

    if mv.piece == PieceKind::King {
        rights = rights
            .without(CastlingRights::kingside_flag(mover))
            .without(CastlingRights::queenside_flag(mover));
    }

    for lane in CASTLING_LANES {
        if mv.from.index() == lane.rook_from || mv.to.index() == lane.rook_from {
            rights = rights.without(lane.right);
        }
    }

    rights
}
