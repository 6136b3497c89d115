//! Zobrist hashing for fast position identity and repetition tracking.
//!
//! Keys come from a fixed-seed generator so hashes are identical across
//! runs, which keeps tests and exported diagnostics reproducible.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Key over everything that makes two positions repetitions of each other:
/// placement, side to move, castling rights and en-passant file. Clocks are
/// not hashed.
pub fn compute_zobrist_key(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for color in [Color::White, Color::Black] {
        for kind in ALL_PIECE_KINDS {
            for square in squares_of(board.pieces(color, kind)) {
                key ^= tables.piece_square[color.index()][kind.index()][square.index() as usize];
            }
        }
    }

    if side_to_move == Color::Black {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[castling_rights.bits() as usize];

    if let Some(square) = en_passant {
        key ^= tables.en_passant_file[square.file() as usize];
    }

    key
}
