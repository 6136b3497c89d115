//! Square and bitboard conversions for algebraic coordinates (`e4`).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Parse a coordinate such as `"e4"` into a square.
#[inline]
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(format!("bad square {text:?}")));
    }

    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(format!("bad square {text:?}")));
    }

    Square::new(i16::from(file - b'a'), i16::from(rank - b'1'))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Convert a one-hot bitboard to its coordinate.
pub fn bitboard_to_algebraic(bitboard: u64) -> ChessResult<String> {
    if bitboard.count_ones() != 1 {
        return Err(ChessError::InvalidNotation(format!(
            "bitboard {bitboard:#018x} must have exactly one square set"
        )));
    }
    let index = bitboard.trailing_zeros() as i16;
    Ok(Square::new(index % 8, index / 8)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_squares() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse").index(), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse").index(), 63);
        assert_eq!(square_to_algebraic(Square::new(4, 3).expect("on board")), "e4");
    }

    #[test]
    fn rejects_off_board_text() {
        for bad in ["", "e", "i1", "a9", "e44", "E4"] {
            assert!(
                matches!(algebraic_to_square(bad), Err(ChessError::InvalidNotation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn bitboard_conversion() {
        assert_eq!(bitboard_to_algebraic(1u64 << 28).expect("one-hot"), "e4");
        assert!(bitboard_to_algebraic(0).is_err());
        assert!(bitboard_to_algebraic(0b11).is_err());
    }
}
