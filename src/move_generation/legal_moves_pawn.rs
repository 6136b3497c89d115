//! Pseudo-legal pawn moves: single and double pushes, diagonal captures,
//! en-passant and promotions (one move per promotion piece).

use crate::game_state::chess_rules::{pawn_direction, pawn_start_rank, promotion_rank};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::own_pieces;
use crate::moves::chess_move::{Move, MoveFlags};
use crate::moves::leaper_moves::pawn_attacks;

pub fn generate_pawn_moves(position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move;
    let direction = pawn_direction(side);
    let last_rank = promotion_rank(side);
    let empty = !position.board.occupancy_all();
    let enemy_occ = position.board.occupancy(side.opposite());

    for from in own_pieces(position, PieceKind::Pawn) {
        if let Some(one_step) = from.offset(0, direction) {
            if one_step.mask() & empty != 0 {
                push_pawn_move(out, from, one_step, None, MoveFlags::QUIET, last_rank);

                if from.rank() == pawn_start_rank(side) {
                    if let Some(two_step) = one_step.offset(0, direction) {
                        if two_step.mask() & empty != 0 {
                            out.push(Move::new(
                                from,
                                two_step,
                                PieceKind::Pawn,
                                None,
                                None,
                                MoveFlags::DOUBLE_PAWN_PUSH,
                            ));
                        }
                    }
                }
            }
        }

        for to in squares_of(pawn_attacks(side, from)) {
            if to.mask() & enemy_occ != 0 {
                let captured = position.board.piece_at(to).map(|p| p.kind);
                push_pawn_move(out, from, to, captured, MoveFlags::CAPTURE, last_rank);
            } else if position.en_passant == Some(to) {
                out.push(Move::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
                ));
            }
        }
    }
}

fn push_pawn_move(
    out: &mut Vec<Move>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: MoveFlags,
    last_rank: u8,
) {
    if to.rank() == last_rank {
        for promotion in PROMOTION_KINDS {
            out.push(Move::new(from, to, PieceKind::Pawn, captured, Some(promotion), flags));
        }
    } else {
        out.push(Move::new(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::position::Position;
    use crate::moves::chess_move::Move;

    fn pawn_moves(fen: &str) -> Vec<Move> {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&position, &mut out);
        out
    }

    #[test]
    fn starting_pawns_have_sixteen_pushes() {
        let out = pawn_moves(crate::game_state::chess_rules::STARTING_POSITION_FEN);
        assert_eq!(out.len(), 16);
        assert_eq!(out.iter().filter(|m| m.is_double_pawn_push()).count(), 8);
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        // Knight on e3 blocks e2 entirely; knight on d4 blocks only d2d4.
        let out = pawn_moves("4k3/8/8/8/3n4/4n3/3PP3/4K3 w - - 0 1");
        let names: Vec<String> = out.iter().map(|m| m.to_string()).collect();
        assert!(names.contains(&"d2d3".to_owned()));
        assert!(!names.contains(&"d2d4".to_owned()));
        assert!(!names.iter().any(|n| n.starts_with("e2e")));
        assert!(names.contains(&"d2e3".to_owned()));
    }

    #[test]
    fn promotion_generates_four_choices() {
        let out = pawn_moves("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        // a7a8 x4 and a7xb8 x4.
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|m| m.promotion.is_some()));
        assert_eq!(out.iter().filter(|m| m.is_capture()).count(), 4);
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let out = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep: Vec<_> = out.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_string(), "e5d6");
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let out = pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1");
        let names: Vec<String> = out.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["e7e6".to_owned(), "e7e5".to_owned()]);
    }
}
