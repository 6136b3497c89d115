use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{not_own, own_pieces, push_target_moves};
use crate::moves::chess_move::Move;
use crate::moves::slider_moves::queen_attacks;

pub fn generate_queen_moves(position: &Position, out: &mut Vec<Move>) {
    let allowed = not_own(position);
    let occupancy = position.board.occupancy_all();
    for from in own_pieces(position, PieceKind::Queen) {
        let targets = queen_attacks(from, occupancy) & allowed;
        push_target_moves(position, from, PieceKind::Queen, targets, out);
    }
}
