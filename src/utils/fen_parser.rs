//! FEN-to-Position parser.
//!
//! Reads all six Forsyth-Edwards fields and hands the result to
//! [`Position::from_parts`], so any structurally valid but impossible position
//! (two white kings, pawns on the back rank, stale castling rights) is
//! rejected as well.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

fn malformed(message: impl Into<String>) -> ChessError {
    ChessError::MalformedPosition(message.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| malformed("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| malformed("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| malformed("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| malformed("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| malformed("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(malformed("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant = parse_en_passant_square(en_passant_part)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid halfmove clock {halfmove_part:?}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| malformed(format!("invalid fullmove number {fullmove_part:?}")))?;

    Position::from_parts(
        board,
        side_to_move,
        castling_rights,
        en_passant,
        halfmove_clock,
        fullmove_number,
    )
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed(format!(
            "board layout has {} ranks, expected 8",
            ranks.len()
        )));
    }

    let mut board = Board::empty();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as i16;
        let mut file: i16 = 0;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as i16;
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| malformed(format!("invalid piece character '{ch}'")))?;
            if file >= 8 {
                return Err(malformed(format!("rank {} has too many files", rank + 1)));
            }
            board.set(Square::new(file, rank)?, piece);
            file += 1;
        }

        if file != 8 {
            return Err(malformed(format!(
                "rank {} covers {file} files, expected 8",
                rank + 1
            )));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(malformed(format!("invalid side to move {side_part:?}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => return Err(malformed(format!("invalid castling character '{ch}'"))),
        };
        if rights.has(flag) {
            return Err(malformed(format!("repeated castling character '{ch}'")));
        }
        rights = rights.with(flag);
    }
    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| malformed(format!("invalid en-passant square {en_passant_part:?}")))
}
