//! Bitboard piece container.
//!
//! `Board` is a plain value: every edit returns a new board and leaves the
//! receiver untouched. It performs no rule validation of its own.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.mask();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
            .map(|kind| Piece::new(color, kind))
    }

    #[inline]
    pub const fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub const fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub const fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(Square::from_index(kings.trailing_zeros() as u8))
        }
    }

    /// Board with `piece` on `square`, replacing whatever stood there.
    #[must_use]
    pub fn with_piece_placed(&self, square: Square, piece: Piece) -> Self {
        let mut next = self.with_piece_removed(square);
        next.set(square, piece);
        next
    }

    /// Board with `square` emptied. Removing from an empty square is a no-op.
    #[must_use]
    pub fn with_piece_removed(&self, square: Square) -> Self {
        let mut next = *self;
        next.clear(square);
        next
    }

    /// Board with the piece on `from` moved to `to`, capturing anything on `to`.
    #[must_use]
    pub fn with_piece_moved(&self, from: Square, to: Square) -> Self {
        match self.piece_at(from) {
            Some(piece) => {
                let mut next = *self;
                next.clear(from);
                next.clear(to);
                next.set(to, piece);
                next
            }
            None => *self,
        }
    }

    /// Every occupied square with its piece, a1 first.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares_of(self.occupancy_all)
            .filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub(crate) fn set(&mut self, square: Square, piece: Piece) {
        let mask = square.mask();
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    pub(crate) fn clear(&mut self, square: Square) {
        let mask = !square.mask();
        for color in self.pieces.iter_mut() {
            for bitboard in color.iter_mut() {
                *bitboard &= mask;
            }
        }
        self.occupancy_by_color[0] &= mask;
        self.occupancy_by_color[1] &= mask;
        self.occupancy_all &= mask;
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::game_state::chess_types::*;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("valid square name")
    }

    #[test]
    fn edits_return_new_boards_and_leave_original_alone() {
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let empty = Board::empty();
        let placed = empty.with_piece_placed(sq("g1"), knight);

        assert_eq!(empty.piece_at(sq("g1")), None);
        assert_eq!(placed.piece_at(sq("g1")), Some(knight));

        let moved = placed.with_piece_moved(sq("g1"), sq("f3"));
        assert_eq!(placed.piece_at(sq("g1")), Some(knight));
        assert_eq!(moved.piece_at(sq("g1")), None);
        assert_eq!(moved.piece_at(sq("f3")), Some(knight));
        assert_eq!(moved.occupancy(Color::White), sq("f3").mask());
    }

    #[test]
    fn placing_over_a_piece_replaces_it() {
        let board = Board::empty()
            .with_piece_placed(sq("d5"), Piece::new(Color::Black, PieceKind::Pawn))
            .with_piece_placed(sq("d5"), Piece::new(Color::White, PieceKind::Queen));

        assert_eq!(
            board.piece_at(sq("d5")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(board.pieces(Color::Black, PieceKind::Pawn), 0);
        assert_eq!(board.occupancy(Color::Black), 0);
    }

    #[test]
    fn moving_from_an_empty_square_changes_nothing() {
        let board = Board::empty().with_piece_placed(sq("a1"), Piece::new(Color::White, PieceKind::Rook));
        assert_eq!(board.with_piece_moved(sq("b1"), sq("b2")), board);
    }
}
