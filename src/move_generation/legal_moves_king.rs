//! King steps and castling.
//!
//! Castling is only emitted when the right is still held, the lane between
//! king and rook is empty, and no square the king stands on, crosses or lands
//! on is attacked.

use crate::game_state::chess_rules::castling_lanes_for;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{not_own, push_target_moves};
use crate::moves::chess_move::{Move, MoveFlags};
use crate::moves::leaper_moves::king_attacks;

pub fn generate_king_moves(position: &Position, out: &mut Vec<Move>) {
    let Some(from) = position.board.king_square(position.side_to_move) else {
        return;
    };

    let targets = king_attacks(from) & not_own(position);
    push_target_moves(position, from, PieceKind::King, targets, out);

    generate_castling_moves(position, from, out);
}

fn generate_castling_moves(position: &Position, king_from: Square, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    let enemy = side.opposite();
    let rook = Piece::new(side, PieceKind::Rook);

    for lane in castling_lanes_for(side) {
        if !position.castling_rights.has(lane.right) || king_from.index() != lane.king_from {
            continue;
        }
        if position.board.piece_at(Square::from_index(lane.rook_from)) != Some(rook) {
            continue;
        }
        if position.board.occupancy_all() & lane.must_be_empty != 0 {
            continue;
        }
        // Includes the king's own square: no castling out of check.
        let path_attacked = lane
            .king_path
            .iter()
            .any(|&sq| is_square_attacked(position, Square::from_index(sq), enemy));
        if path_attacked {
            continue;
        }

        out.push(Move::new(
            king_from,
            Square::from_index(lane.king_to),
            PieceKind::King,
            None,
            None,
            MoveFlags::CASTLING,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::position::Position;

    fn castles(fen: &str) -> Vec<String> {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&position, &mut out);
        out.iter()
            .filter(|m| m.is_castle())
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"),
            vec!["e1g1".to_owned(), "e1c1".to_owned()]
        );
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"),
            vec!["e8g8".to_owned(), "e8c8".to_owned()]
        );
    }

    #[test]
    fn no_castling_out_of_check() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").len(), 2);
        assert!(castles("4k3/8/8/8/4r3/8/8/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn no_castling_through_an_attacked_square() {
        // Rook on f8 covers f1; queenside is still fine.
        assert_eq!(
            castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1"),
            vec!["e1c1".to_owned()]
        );
    }

    #[test]
    fn attacked_b1_does_not_stop_queenside_castling() {
        assert_eq!(
            castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1"),
            vec!["e1c1".to_owned()]
        );
    }

    #[test]
    fn occupied_lane_blocks_castling() {
        assert!(castles("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").is_empty());
    }

    #[test]
    fn revoked_right_blocks_castling() {
        assert_eq!(
            castles("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1"),
            vec!["e1c1".to_owned()]
        );
    }
}
