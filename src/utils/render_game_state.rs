//! Terminal-oriented Unicode board renderer.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Render the board with White at the bottom, followed by a status line with
/// side to move, castling rights and en-passant target.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in (0..8i16).rev() {
        let rank_char = char::from(b'1' + rank as u8);
        out.push(rank_char);
        out.push(' ');

        for file in 0..8i16 {
            let piece = Square::new(file, rank)
                .ok()
                .and_then(|square| position.piece_at(square));
            out.push(piece.map_or('·', piece_to_unicode));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");

    let fen = position.to_fen();
    let mut fields = fen.split_whitespace().skip(2);
    out.push_str(&format!(
        "{} to move, castling {}, en passant {}",
        position.side_to_move(),
        fields.next().unwrap_or("-"),
        fields.next().unwrap_or("-"),
    ));
    out
}

pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_position;
    use crate::game_state::position::Position;

    #[test]
    fn renders_start_position() {
        let text = render_position(&Position::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
        assert_eq!(lines[10], "white to move, castling KQkq, en passant -");
    }
}
