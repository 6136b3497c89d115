//! Move value type.
//!
//! A `Move` only means something relative to the position it was generated
//! from. Besides the from/to squares and optional promotion it records the
//! moving piece and capture/castle/en-passant flags so the executor never has
//! to re-derive them.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

/// Special-move flags carried by a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const QUIET: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1 << 0);
    pub const DOUBLE_PAWN_PUSH: MoveFlags = MoveFlags(1 << 1);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 2);
    pub const CASTLING: MoveFlags = MoveFlags(1 << 3);

    #[inline]
    pub const fn union(self, other: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = MoveFlags;

    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        self.union(rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    pub const fn new(
        from: Square,
        to: Square,
        piece: PieceKind,
        captured: Option<PieceKind>,
        promotion: Option<PieceKind>,
        flags: MoveFlags,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            promotion,
            flags,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLING)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// True when the move resets the fifty-move counter.
    #[inline]
    pub fn is_irreversible(&self) -> bool {
        self.piece == PieceKind::Pawn || self.is_capture()
    }
}

/// Long algebraic (coordinate) form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}
