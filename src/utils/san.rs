//! Standard Algebraic Notation (`Nf3`, `exd5`, `O-O`, `e8=Q#`).
//!
//! Both directions work against the legal moves of a position: writing needs
//! them for disambiguation and the check suffix, reading resolves the token to
//! exactly one legal move.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves};
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_san(mv: Move, position: &Position) -> ChessResult<String> {
    let legal = legal_moves(position);
    if !legal.contains(&mv) {
        return Err(ChessError::illegal(
            mv.to_string(),
            format!("not a legal move for {}", position.side_to_move()),
        ));
    }

    let mut san = if mv.is_castle() {
        if mv.to.file() > mv.from.file() {
            "O-O".to_owned()
        } else {
            "O-O-O".to_owned()
        }
    } else {
        let mut out = String::with_capacity(8);
        if mv.piece == PieceKind::Pawn {
            if mv.is_capture() {
                out.push(file_char(mv.from));
            }
        } else {
            out.push(mv.piece.fen_char().to_ascii_uppercase());
            out.push_str(&disambiguation(mv, &legal));
        }
        if mv.is_capture() {
            out.push('x');
        }
        out.push_str(&mv.to.to_string());
        if let Some(kind) = mv.promotion {
            out.push('=');
            out.push(kind.fen_char().to_ascii_uppercase());
        }
        out
    };

    let after = make_move(position, mv);
    if is_in_check(&after, after.side_to_move()) {
        san.push(if has_legal_move(&after) { '+' } else { '#' });
    }
    Ok(san)
}

fn file_char(square: Square) -> char {
    char::from(b'a' + square.file())
}

fn rank_char(square: Square) -> char {
    char::from(b'1' + square.rank())
}

/// Origin hint for a piece move when another piece of the same kind can reach
/// the same square: file if that is unique, else rank, else both.
fn disambiguation(mv: Move, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        file_char(mv.from).to_string()
    } else if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        rank_char(mv.from).to_string()
    } else {
        mv.from.to_string()
    }
}

/// Pieces of a parsed SAN token, before matching against legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SanToken {
    piece: PieceKind,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    to: Square,
    promotion: Option<PieceKind>,
    capture: bool,
}

pub fn san_to_move(text: &str, position: &Position) -> ChessResult<Move> {
    let trimmed = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));

    let legal = legal_moves(position);

    if let Some(kingside) = castle_side(trimmed) {
        return legal
            .into_iter()
            .find(|mv| mv.is_castle() && (mv.to.file() > mv.from.file()) == kingside)
            .ok_or_else(|| {
                ChessError::illegal(text, format!("{} cannot castle", position.side_to_move()))
            });
    }

    let token = parse_san_token(trimmed)
        .ok_or_else(|| ChessError::InvalidNotation(format!("bad SAN move {text:?}")))?;

    // A pawn token without an origin file is a push along the target file.
    let pawn_file = match token.piece {
        PieceKind::Pawn => Some(token.from_file.unwrap_or(token.to.file())),
        _ => token.from_file,
    };
    let matches_origin = |mv: &Move| {
        mv.piece == token.piece
            && mv.to == token.to
            && pawn_file.is_none_or(|file| mv.from.file() == file)
            && token.from_rank.is_none_or(|rank| mv.from.rank() == rank)
            && (!token.capture || mv.is_capture())
    };

    let candidates: Vec<Move> = legal
        .into_iter()
        .filter(|mv| matches_origin(mv) && mv.promotion == token.promotion)
        .collect();

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => {
            let needs_promotion = token.promotion.is_none()
                && legal_moves(position)
                    .iter()
                    .any(|mv| matches_origin(mv) && mv.is_promotion());
            if needs_promotion {
                Err(ChessError::AmbiguousPromotion {
                    from: token
                        .from_file
                        .map(|file| char::from(b'a' + file).to_string())
                        .unwrap_or_default(),
                    to: token.to.to_string(),
                })
            } else {
                Err(ChessError::illegal(
                    text,
                    format!("not a legal move for {}", position.side_to_move()),
                ))
            }
        }
        _ => Err(ChessError::InvalidNotation(format!(
            "{text:?} matches {} legal moves",
            candidates.len()
        ))),
    }
}

fn castle_side(text: &str) -> Option<bool> {
    match text {
        "O-O" | "0-0" => Some(true),
        "O-O-O" | "0-0-0" => Some(false),
        _ => None,
    }
}

fn parse_san_token(text: &str) -> Option<SanToken> {
    if !text.is_ascii() || text.len() < 2 {
        return None;
    }

    let (piece, rest) = match text.chars().next()? {
        'N' => (PieceKind::Knight, &text[1..]),
        'B' => (PieceKind::Bishop, &text[1..]),
        'R' => (PieceKind::Rook, &text[1..]),
        'Q' => (PieceKind::Queen, &text[1..]),
        'K' => (PieceKind::King, &text[1..]),
        _ => (PieceKind::Pawn, text),
    };

    // Promotion suffix: "=Q" or a bare trailing piece letter.
    let (body, promotion) = match rest.char_indices().last()? {
        (idx, ch @ ('N' | 'B' | 'R' | 'Q')) if piece == PieceKind::Pawn => {
            let kind = PieceKind::from_fen_char(ch.to_ascii_lowercase())?;
            (rest[..idx].trim_end_matches('='), Some(kind))
        }
        _ => (rest, None),
    };

    if body.len() < 2 {
        return None;
    }
    let (prefix, target) = body.split_at(body.len() - 2);
    let to = algebraic_to_square(target).ok()?;

    let mut from_file = None;
    let mut from_rank = None;
    let mut capture = false;
    for ch in prefix.chars() {
        match ch {
            'a'..='h' if from_file.is_none() && from_rank.is_none() => {
                from_file = Some(ch as u8 - b'a')
            }
            '1'..='8' if from_rank.is_none() => from_rank = Some(ch as u8 - b'1'),
            'x' | ':' if !capture => capture = true,
            _ => return None,
        }
    }

    Some(SanToken {
        piece,
        from_file,
        from_rank,
        to,
        promotion,
        capture,
    })
}
