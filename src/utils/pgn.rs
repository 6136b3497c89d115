//! PGN read/write for game history interchange.
//!
//! Export writes the seven-tag roster (plus `SetUp`/`FEN` for games that did
//! not start from the initial layout) and SAN movetext. Import accepts SAN or
//! coordinate moves, skips comments, variations and NAGs, and replays the
//! game into a fresh session.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::session::game_session::GameSession;
use crate::session::session_config::SessionConfig;
use crate::utils::san::move_to_san;

const MOVETEXT_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub session: GameSession,
    pub result: String,
}

/// Export `session` with default headers dated today.
pub fn write_pgn(session: &GameSession) -> ChessResult<String> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Casual Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    write_pgn_with_headers(session, &headers)
}

/// Export with caller-supplied headers. `Result`, `SetUp` and `FEN` always
/// reflect the session and override whatever `headers` holds.
pub fn write_pgn_with_headers(
    session: &GameSession,
    headers: &BTreeMap<String, String>,
) -> ChessResult<String> {
    let result = session.status().result_token();
    let mut headers = headers.clone();
    headers.insert("Result".to_owned(), result.to_owned());

    let initial = session.initial_position();
    let initial_fen = initial.to_fen();
    if initial_fen == STARTING_POSITION_FEN {
        headers.remove("SetUp");
        headers.remove("FEN");
    } else {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut tokens = Vec::<String>::with_capacity(session.moves_played().len() * 3 / 2 + 1);
    let mut before = initial;
    for (ply, (mv, after)) in session.history().enumerate() {
        if before.side_to_move() == Color::White {
            tokens.push(format!("{}.", before.fullmove_number()));
        } else if ply == 0 {
            tokens.push(format!("{}...", before.fullmove_number()));
        }
        tokens.push(move_to_san(mv, before)?);
        before = after;
    }
    tokens.push(result.to_owned());

    out.push_str(&wrap_tokens(&tokens, MOVETEXT_WIDTH));
    out.push('\n');
    Ok(out)
}

fn wrap_tokens(tokens: &[String], width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0usize;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > width {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(token);
        line_len += token.len();
    }
    out
}

/// Parse one PGN game and replay it into a session built with `config`.
pub fn read_pgn(pgn: &str, config: SessionConfig) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        if trimmed.starts_with('[') {
            let (key, value) = parse_header_line(trimmed)?;
            headers.insert(key, value);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let initial = if headers.get("SetUp").map(String::as_str) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessError::InvalidNotation("PGN has SetUp \"1\" but no FEN header".to_owned())
        })?;
        Position::from_fen(fen)?
    } else {
        Position::new_game()
    };
    let mut session = GameSession::from_position(initial, config);

    let mut result = "*".to_owned();
    let movetext = strip_comments_and_variations(&movetext_lines.join(" "));
    for raw in movetext.split_whitespace() {
        let token = strip_move_number(raw);
        if token.is_empty() || token.starts_with('$') {
            continue;
        }
        if is_result_token(token) {
            result = token.to_owned();
            break;
        }
        session.play_notation(token)?;
    }

    if let Some(header_result) = headers.get("Result").filter(|r| is_result_token(r)) {
        result = header_result.clone();
    }

    Ok(PgnGame {
        headers,
        session,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidNotation(format!("bad PGN header {line:?}"));

    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.trim().split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;

    Ok((key.to_owned(), value.replace("\\\"", "\"").replace("\\\\", "\\")))
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth += 1,
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth += 1,
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// `"12."`, `"12..."` and `"12.Nf3"` all lose their move-number prefix.
fn strip_move_number(token: &str) -> &str {
    let digits = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if digits.len() < token.len() && digits.starts_with('.') {
        digits.trim_start_matches('.')
    } else {
        token
    }
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_status::game_status::GameStatus;

    fn session_after(lans: &[&str]) -> GameSession {
        let mut session = GameSession::default();
        for lan in lans {
            session.play_notation(lan).expect("legal move");
        }
        session
    }

    #[test]
    fn export_uses_san_and_dated_headers() {
        let session = session_after(&["e2e4", "e7e5", "g1f3", "b8c6"]);
        let pgn = write_pgn(&session).expect("PGN should write");

        assert!(pgn.contains("[Result \"*\"]"));
        assert!(pgn.contains(&format!("[Date \"{}\"]", Local::now().format("%Y.%m.%d"))));
        assert!(!pgn.contains("[FEN"));
        assert!(pgn.ends_with("1. e4 e5 2. Nf3 Nc6 *\n"));
    }

    #[test]
    fn round_trip_reaches_the_same_position() {
        let session = session_after(&["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "e1g1"]);
        let pgn = write_pgn(&session).expect("PGN should write");
        let parsed = read_pgn(&pgn, SessionConfig::default()).expect("PGN should parse");

        assert_eq!(parsed.session.moves_played(), session.moves_played());
        assert_eq!(parsed.session.fen(), session.fen());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn finished_game_exports_its_result() {
        let session = session_after(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        let pgn = write_pgn(&session).expect("PGN should write");
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.ends_with("1. f3 e5 2. g4 Qh4# 0-1\n"));

        let parsed = read_pgn(&pgn, SessionConfig::default()).expect("PGN should parse");
        assert_eq!(
            parsed.session.status(),
            GameStatus::Checkmate { loser: Color::White }
        );
    }

    #[test]
    fn custom_start_writes_setup_headers() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 7";
        let mut session =
            GameSession::from_fen(fen, SessionConfig::default()).expect("FEN should parse");
        session.play_notation("e8d7").expect("legal");
        session.play_notation("e2e4").expect("legal");

        let pgn = write_pgn(&session).expect("PGN should write");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
        assert!(pgn.contains("7... Kd7 8. e4 *"));

        let parsed = read_pgn(&pgn, SessionConfig::default()).expect("PGN should parse");
        assert_eq!(parsed.session.initial_position().to_fen(), fen);
        assert_eq!(parsed.session.fen(), session.fen());
    }

    #[test]
    fn import_tolerates_comments_variations_and_coordinates() {
        let pgn = "[Event \"Test \\\"quoted\\\"\"]\n\n\
                   1.e4 {best by test} e5 (1... c5 2. Nf3) 2. g1f3 $1 Nc6 3.Bb5 a6 *\n";
        let parsed = read_pgn(pgn, SessionConfig::default()).expect("PGN should parse");

        assert_eq!(parsed.headers.get("Event").map(String::as_str), Some("Test \"quoted\""));
        let lans: Vec<String> = parsed
            .session
            .moves_played()
            .iter()
            .map(|mv| mv.to_string())
            .collect();
        assert_eq!(lans, ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6"]);
    }

    #[test]
    fn import_rejects_illegal_movetext() {
        let pgn = "1. e4 e5 2. Ke3 *";
        assert!(matches!(
            read_pgn(pgn, SessionConfig::default()),
            Err(ChessError::IllegalMove { .. })
        ));
        assert!(matches!(
            read_pgn("[Event broken]\n1. e4 *", SessionConfig::default()),
            Err(ChessError::InvalidNotation(_))
        ));
    }

    #[test]
    fn long_movetext_wraps() {
        let config = SessionConfig::default()
            .with_repetition_limit(u8::MAX)
            .expect("valid repetition limit");
        let mut session = GameSession::new(config);
        for _ in 0..6 {
            for lan in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                session.play_notation(lan).expect("legal");
            }
        }
        let pgn = write_pgn(&session).expect("PGN should write");
        let movetext = pgn.split("\n\n").nth(1).expect("movetext after headers");
        assert!(movetext.lines().count() > 1);
        assert!(movetext.lines().all(|line| line.len() <= MOVETEXT_WIDTH));
    }
}
