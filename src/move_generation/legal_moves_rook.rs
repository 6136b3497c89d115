//! Pseudo-legal rook moves along files and ranks.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{not_own, own_pieces, push_target_moves};
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::rook_attacks;

pub fn generate_rook_moves(position: &Position, out: &mut Vec<Move>) {
    let allowed = not_own(position);
    let occupancy = position.board.occupancy_all();
    for from in own_pieces(position, PieceKind::Rook) {
        let targets = rook_attacks(from, occupancy) & allowed;
        push_target_moves(position, from, PieceKind::Rook, targets, out);
    }
}

#[cfg(test)]
mod tests {
    use super::generate_rook_moves;
    use crate::game_state::position::Position;

    #[test]
    fn lone_rook_covers_fourteen_squares_minus_blockers() {
        let position =
            Position::from_fen("4k3/8/8/8/3R4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_moves(&position, &mut out);
        assert_eq!(out.len(), 14);
    }
}
