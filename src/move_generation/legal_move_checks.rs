//! Attack detection.
//!
//! "Is square S attacked by side X" is answered by looking outward from S
//! with each piece's attack pattern and testing for a matching enemy piece.
//! Attackers' own legality (pins, checks) is ignored, as the rules require.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_moves::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_moves::{bishop_attacks, rook_attacks};

pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    let board = &position.board;
    let occupancy = board.occupancy_all();

    // A pawn of `attacker` attacks `square` iff a defender pawn on `square`
    // would attack the pawn's square.
    if pawn_attacks(attacker.opposite(), square) & board.pieces(attacker, PieceKind::Pawn) != 0 {
        return true;
    }
    if knight_attacks(square) & board.pieces(attacker, PieceKind::Knight) != 0 {
        return true;
    }
    if king_attacks(square) & board.pieces(attacker, PieceKind::King) != 0 {
        return true;
    }

    let queens = board.pieces(attacker, PieceKind::Queen);
    let diagonal = board.pieces(attacker, PieceKind::Bishop) | queens;
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }
    let orthogonal = board.pieces(attacker, PieceKind::Rook) | queens;
    rook_attacks(square, occupancy) & orthogonal != 0
}

/// True when `color`'s king stands on a square attacked by the opponent.
#[inline]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.board.king_square(color) {
        Some(king) => is_square_attacked(position, king, color.opposite()),
        None => false,
    }
}

/// Every `attacker` piece hitting `square`, with its kind.
pub fn attackers_to_square(
    position: &Position,
    square: Square,
    attacker: Color,
) -> Vec<(Square, PieceKind)> {
    let board = &position.board;
    let occupancy = board.occupancy_all();

    let lines = [
        (PieceKind::Pawn, pawn_attacks(attacker.opposite(), square)),
        (PieceKind::Knight, knight_attacks(square)),
        (PieceKind::Bishop, bishop_attacks(square, occupancy)),
        (PieceKind::Rook, rook_attacks(square, occupancy)),
        (
            PieceKind::Queen,
            bishop_attacks(square, occupancy) | rook_attacks(square, occupancy),
        ),
        (PieceKind::King, king_attacks(square)),
    ];

    lines
        .into_iter()
        .flat_map(|(kind, reach)| {
            squares_of(reach & board.pieces(attacker, kind)).map(move |from| (from, kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn starting_position_has_no_checks() {
        let game = Position::new_game();
        assert!(!is_in_check(&game, Color::White));
        assert!(!is_in_check(&game, Color::Black));
        assert!(is_square_attacked(&game, sq("f3"), Color::White));
        assert!(!is_square_attacked(&game, sq("e4"), Color::White));
        assert!(is_square_attacked(&game, sq("f6"), Color::Black));
    }

    #[test]
    fn pawn_attacks_only_diagonally_forward() {
        let position =
            Position::from_fen("4k3/8/8/8/4p3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&position, sq("d3"), Color::Black));
        assert!(is_square_attacked(&position, sq("f3"), Color::Black));
        assert!(!is_square_attacked(&position, sq("e3"), Color::Black));
        assert!(!is_square_attacked(&position, sq("d5"), Color::Black));
    }

    #[test]
    fn slider_attack_is_blocked() {
        let position =
            Position::from_fen("4k3/8/8/8/8/8/4P3/r3K3 w - - 0 1").expect("FEN should parse");
        assert!(is_in_check(&position, Color::White));

        let blocked =
            Position::from_fen("4k3/8/8/8/8/8/8/r1N1K3 w - - 0 1").expect("FEN should parse");
        assert!(!is_in_check(&blocked, Color::White));
    }

    #[test]
    fn double_check_lists_both_attackers() {
        let position =
            Position::from_fen("4k3/8/8/8/1b6/8/3N4/r3K3 w - - 0 1").expect("FEN should parse");
        let mut attackers = attackers_to_square(&position, sq("e1"), Color::Black);
        attackers.sort_by_key(|(square, _)| square.index());
        assert_eq!(attackers, vec![(sq("a1"), PieceKind::Rook)]);

        let double =
            Position::from_fen("4k3/8/8/8/1b6/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(attackers_to_square(&double, sq("e1"), Color::Black).len(), 2);
    }
}
