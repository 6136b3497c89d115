//! Dead-position detection by material count.
//!
//! Only the cases where no sequence of legal moves can produce mate are
//! covered:
//! - king vs king
//! - king and one knight vs king
//! - king and bishops vs king and bishops, every bishop on one square color
//!   (this includes king and bishop vs king)
//!
//! K+N+N vs K, K+B vs K+N and similar are left to the fifty-move rule since a
//! mate is still constructible.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn is_insufficient_material(board: &Board) -> bool {
    let heavy_or_pawns = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
        .into_iter()
        .any(|kind| board.pieces(Color::White, kind) | board.pieces(Color::Black, kind) != 0);
    if heavy_or_pawns {
        return false;
    }

    let knights = board.pieces(Color::White, PieceKind::Knight)
        | board.pieces(Color::Black, PieceKind::Knight);
    let bishops = board.pieces(Color::White, PieceKind::Bishop)
        | board.pieces(Color::Black, PieceKind::Bishop);

    match (knights.count_ones(), bishops.count_ones()) {
        (0, 0) => true,
        (1, 0) => true,
        (0, _) => bishops_share_one_color(bishops),
        _ => false,
    }
}

fn bishops_share_one_color(bishops: u64) -> bool {
    let mut squares = squares_of(bishops);
    match squares.next() {
        Some(first) => squares.all(|sq| sq.is_dark() == first.is_dark()),
        None => true,
    }
}
