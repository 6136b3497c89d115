//! Helpers shared by the piece-wise pseudo-legal generators.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::{Move, MoveFlags};

/// Emit one move per set bit of `targets`, flagging captures of enemy
/// pieces. `targets` must already exclude squares held by the mover.
pub fn push_target_moves(
    position: &Position,
    from: Square,
    piece: PieceKind,
    targets: u64,
    out: &mut Vec<Move>,
) {
    let enemy_occ = position.board.occupancy(position.side_to_move.opposite());

    for to in squares_of(targets) {
        if to.mask() & enemy_occ != 0 {
            let captured = position.board.piece_at(to).map(|p| p.kind);
            out.push(Move::new(from, to, piece, captured, None, MoveFlags::CAPTURE));
        } else {
            out.push(Move::new(from, to, piece, None, None, MoveFlags::QUIET));
        }
    }
}

/// Squares holding `kind` pieces of the side to move.
#[inline]
pub fn own_pieces(position: &Position, kind: PieceKind) -> impl Iterator<Item = Square> {
    squares_of(position.board.pieces(position.side_to_move, kind))
}

/// Squares the side to move may land on (anything not holding its own piece).
#[inline]
pub fn not_own(position: &Position) -> u64 {
    !position.board.occupancy(position.side_to_move)
}
