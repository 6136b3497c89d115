//! Pseudo-legal knight moves: the eight L-shaped jumps, clipped at the edges.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::{not_own, own_pieces, push_target_moves};
use crate::moves::chess_move::Move;
use crate::moves::leaper_moves::knight_attacks;

pub fn generate_knight_moves(position: &Position, out: &mut Vec<Move>) {
    let allowed = not_own(position);
    for from in own_pieces(position, PieceKind::Knight) {
        push_target_moves(position, from, PieceKind::Knight, knight_attacks(from) & allowed, out);
    }
}
