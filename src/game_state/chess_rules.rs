//! Canonical chess-rule constants.
//!
//! Starting layout, castling geometry and the draw thresholds used when a
//! session is created without explicit configuration.

use crate::game_state::chess_types::{CastlingRights, Color};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of the same position that draw the game.
pub const REPETITION_LIMIT: u8 = 3;

/// Square indices describing one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: u8,
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
    /// Squares that must be empty between king and rook.
    pub must_be_empty: u64,
    /// Squares the king stands on, crosses or lands on; none may be attacked.
    pub king_path: [u8; 3],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        right: CastlingRights::WHITE_KINGSIDE,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        must_be_empty: (1 << 5) | (1 << 6),
        king_path: [4, 5, 6],
    },
    CastlingLane {
        right: CastlingRights::WHITE_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        king_path: [4, 3, 2],
    },
    CastlingLane {
        right: CastlingRights::BLACK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        must_be_empty: (1 << 61) | (1 << 62),
        king_path: [60, 61, 62],
    },
    CastlingLane {
        right: CastlingRights::BLACK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        king_path: [60, 59, 58],
    },
];

/// The two lanes available to `color`, kingside first.
pub fn castling_lanes_for(color: Color) -> &'static [CastlingLane] {
    match color {
        Color::White => &CASTLING_LANES[0..2],
        Color::Black => &CASTLING_LANES[2..4],
    }
}

/// Rank a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Rank a pawn of `color` may double-step from.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

/// Rank direction a pawn of `color` advances in.
#[inline]
pub const fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
