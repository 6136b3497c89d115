//! Full legal move generation pipeline.
//!
//! Runs every piece-wise pseudo-legal generator, plays each candidate on a
//! copy of the position, and drops those that leave the mover's king
//! attacked. En-passant captures and castling go through the same filter;
//! there is no shortcut for pinned pieces.

use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::chess_move::Move;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove> {
        let mover = position.side_to_move();
        pseudo_legal_moves(position)
            .into_iter()
            .filter_map(|mv| {
                let next = make_move(position, mv);
                if is_in_check(&next, mover) {
                    return None;
                }
                let gives_check = is_in_check(&next, next.side_to_move());
                Some(GeneratedMove {
                    mv,
                    position_after: next,
                    gives_check,
                })
            })
            .collect()
    }
}

/// Moves that obey piece movement and occupancy, before the king-safety filter.
pub fn pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);

    generate_pawn_moves(position, &mut pseudo);
    generate_knight_moves(position, &mut pseudo);
    generate_bishop_moves(position, &mut pseudo);
    generate_rook_moves(position, &mut pseudo);
    generate_queen_moves(position, &mut pseudo);
    generate_king_moves(position, &mut pseudo);

    pseudo
}

/// Legal moves for the side to move.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mover = position.side_to_move();
    pseudo_legal_moves(position)
        .into_iter()
        .filter(|&mv| !is_in_check(&make_move(position, mv), mover))
        .collect()
}

/// Cheaper than `legal_moves(..).is_empty()` when only existence matters.
pub fn has_legal_move(position: &Position) -> bool {
    let mover = position.side_to_move();
    pseudo_legal_moves(position)
        .into_iter()
        .any(|mv| !is_in_check(&make_move(position, mv), mover))
}
