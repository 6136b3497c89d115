//! Full game state: board plus side to move, rights, en-passant target and
//! clocks.
//!
//! Positions are values. Move application produces a fresh `Position`, so a
//! history of earlier positions stays valid without defensive copies.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    castling_lanes_for, pawn_direction, promotion_rank, STARTING_POSITION_FEN,
};
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::game_status::game_status::{status, GameStatus};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_in_check;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) zobrist_key: u64,
}

/// The part of a position that decides repetition: everything but clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
}

impl Position {
    /// Standard initial layout.
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Assemble a position from its parts, rejecting anything that could not
    /// arise in play (see [`Position::validate`]).
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> ChessResult<Self> {
        let position = Self::assemble(
            board,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        position.validate()?;
        Ok(position)
    }

    /// Unvalidated constructor; refreshes the hash.
    pub(crate) fn assemble(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let zobrist_key = compute_zobrist_key(&board, side_to_move, castling_rights, en_passant);
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
            zobrist_key,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        }
    }

    /// Same placement, side, rights and en-passant target (clocks ignored).
    pub fn is_repetition_of(&self, other: &Position) -> bool {
        self.zobrist_key == other.zobrist_key && self.repetition_key() == other.repetition_key()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(self, color)
    }

    pub fn status(&self) -> GameStatus {
        status(self)
    }

    pub fn apply_move(&self, mv: Move) -> ChessResult<Position> {
        apply_move(self, mv)
    }

    /// Structural and invariant checks for imported positions.
    ///
    /// Rejects: king count other than one per side, pawns on the first or
    /// last rank, a side not to move that is in check, castling rights
    /// without king and rook on their home squares, and en-passant targets
    /// that no double step could have produced.
    pub fn validate(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self.board.pieces(color, PieceKind::King).count_ones();
            if kings != 1 {
                return Err(ChessError::MalformedPosition(format!(
                    "{color} has {kings} kings, expected exactly one"
                )));
            }

            let pawns = self.board.pieces(color, PieceKind::Pawn);
            if let Some(square) = squares_of(pawns).find(|sq| sq.rank() == 0 || sq.rank() == 7) {
                return Err(ChessError::MalformedPosition(format!(
                    "{color} pawn on back rank square {square}"
                )));
            }
        }

        if is_in_check(self, self.side_to_move.opposite()) {
            return Err(ChessError::MalformedPosition(format!(
                "{} is in check but it is {} to move",
                self.side_to_move.opposite(),
                self.side_to_move
            )));
        }

        self.validate_castling_rights()?;
        self.validate_en_passant()
    }

    fn validate_castling_rights(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            for lane in castling_lanes_for(color) {
                if !self.castling_rights.has(lane.right) {
                    continue;
                }
                let king_home = self.board.piece_at(Square::from_index(lane.king_from))
                    == Some(Piece::new(color, PieceKind::King));
                let rook_home = self.board.piece_at(Square::from_index(lane.rook_from))
                    == Some(Piece::new(color, PieceKind::Rook));
                if !king_home || !rook_home {
                    return Err(ChessError::MalformedPosition(format!(
                        "{color} castling right towards {} without king and rook on home squares",
                        Square::from_index(lane.rook_from)
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_en_passant(&self) -> ChessResult<()> {
        let Some(target) = self.en_passant else {
            return Ok(());
        };

        // The side that just moved is the one whose pawn double-stepped.
        let mover = self.side_to_move.opposite();
        let direction = pawn_direction(mover);
        let expected_rank = (promotion_rank(mover.opposite()) as i8 + 2 * direction) as u8;
        let malformed = || {
            ChessError::MalformedPosition(format!(
                "impossible en-passant target {target} with {} to move",
                mover.opposite()
            ))
        };

        if target.rank() != expected_rank {
            return Err(malformed());
        }
        let pawn_square = target.offset(0, direction).ok_or_else(malformed)?;
        let origin_square = target.offset(0, -direction).ok_or_else(malformed)?;

        if self.board.piece_at(target).is_some()
            || self.board.piece_at(origin_square).is_some()
            || self.board.piece_at(pawn_square) != Some(Piece::new(mover, PieceKind::Pawn))
        {
            return Err(malformed());
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_has_standard_fields() {
        let game = Position::new_game();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert_eq!(game.en_passant(), None);
        assert_eq!(game.halfmove_clock(), 0);
        assert_eq!(game.fullmove_number(), 1);
        assert_eq!(game.board().occupancy_all().count_ones(), 32);
    }

    #[test]
    fn missing_king_is_malformed() {
        let err = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").expect_err("no black king");
        assert!(matches!(err, ChessError::MalformedPosition(_)));
    }

    #[test]
    fn two_kings_for_one_side_is_malformed() {
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1").is_err());
    }

    #[test]
    fn pawn_on_last_rank_is_malformed() {
        assert!(Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn side_not_to_move_in_check_is_malformed() {
        // Black king attacked by the rook while white is to move.
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").is_err());
    }

    #[test]
    fn castling_right_without_rook_is_malformed() {
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").is_err());
    }

    #[test]
    fn en_passant_target_must_follow_a_double_step() {
        assert!(Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").is_ok());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - e3 0 1").is_err());
        assert!(Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1").is_err());
        assert!(Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 b - e4 0 1").is_err());
    }

    #[test]
    fn repetition_ignores_clocks() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").expect("FEN should parse");
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 12 40").expect("FEN should parse");
        assert_ne!(a, b);
        assert!(a.is_repetition_of(&b));
    }
}
