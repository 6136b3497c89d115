//! Game session: turn sequencing, move history and the command interface a
//! front-end talks to.
//!
//! The session keeps every position of the game in order (`timeline[0]` is
//! the starting position) plus the move that produced each later one. History
//! only grows by appending; undo truncates. A session is owned by a single
//! caller; front-ends that share one across threads wrap it in a mutex.

use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::game_status::game_status::{status_with_history, GameStatus};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::session::session_config::SessionConfig;
use crate::utils::long_algebraic::long_algebraic_to_move;
use crate::utils::san::san_to_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Finished(GameStatus),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    timeline: Vec<Position>,
    moves: Vec<Move>,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession {
    /// Session from the standard starting position.
    pub fn new(config: SessionConfig) -> Self {
        Self::from_position(Position::new_game(), config)
    }

    /// Session from an imported position. The position may already be
    /// terminal (for example a stalemate), in which case the session starts
    /// finished.
    pub fn from_position(position: Position, config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            timeline: vec![position],
            moves: Vec::new(),
            state: SessionState::InProgress,
        };
        session.refresh_state();
        session
    }

    pub fn from_fen(fen: &str, config: SessionConfig) -> ChessResult<Self> {
        let position = Position::from_fen(fen)?;
        debug!(fen, "session imported position");
        Ok(Self::from_position(position, config))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Change a draw-rule option; the current status is re-evaluated.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        self.config.set_option(name, value)?;
        self.refresh_state();
        Ok(())
    }

    pub fn current_position(&self) -> &Position {
        self.timeline
            .last()
            .expect("session timeline always holds the starting position")
    }

    pub fn initial_position(&self) -> &Position {
        &self.timeline[0]
    }

    /// Moves played, each with the position it produced, oldest first.
    pub fn history(&self) -> impl Iterator<Item = (Move, &Position)> + '_ {
        self.moves.iter().copied().zip(self.timeline[1..].iter())
    }

    pub fn moves_played(&self) -> &[Move] {
        &self.moves
    }

    /// Every position of the game, starting position first.
    pub fn positions(&self) -> &[Position] {
        &self.timeline
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        match self.state {
            SessionState::InProgress => GameStatus::Ongoing,
            SessionState::Finished(status) => status,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.current_position().side_to_move()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.current_position().piece_at(square)
    }

    pub fn is_in_check(&self) -> bool {
        let position = self.current_position();
        position.is_in_check(position.side_to_move())
    }

    pub fn fen(&self) -> String {
        self.current_position().to_fen()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        match self.state {
            SessionState::InProgress => legal_moves(self.current_position()),
            SessionState::Finished(_) => Vec::new(),
        }
    }

    /// Legal moves of the piece on `from`, for highlighting a selected piece.
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.from == from)
            .collect()
    }

    /// Play the move from `from` to `to`. A pawn reaching the last rank needs
    /// `promotion`; any other move must not carry one.
    pub fn request_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<&Position> {
        self.ensure_in_progress()?;

        let candidates: Vec<Move> = legal_moves(self.current_position())
            .into_iter()
            .filter(|mv| mv.from == from && mv.to == to)
            .collect();
        let notation = format!(
            "{from}{to}{}",
            promotion.map(|kind| kind.fen_char().to_string()).unwrap_or_default()
        );

        let chosen = match (candidates.first(), promotion) {
            (None, _) => None,
            (Some(first), None) if first.is_promotion() => {
                warn!(%from, %to, "promotion piece missing");
                return Err(ChessError::AmbiguousPromotion {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            (Some(_), requested) => candidates
                .iter()
                .copied()
                .find(|mv| mv.promotion == requested),
        };

        match chosen {
            Some(mv) => self.play(mv),
            None => {
                warn!(notation = %notation, fen = %self.fen(), "rejected move request");
                Err(ChessError::illegal(
                    notation,
                    format!("not a legal move for {}", self.side_to_move()),
                ))
            }
        }
    }

    /// Play a move produced by the generator for the current position.
    pub fn play(&mut self, mv: Move) -> ChessResult<&Position> {
        self.ensure_in_progress()?;

        let next = apply_move(self.current_position(), mv).inspect_err(|err| {
            warn!(%mv, %err, "rejected move");
        })?;
        debug!(%mv, fen = %next.to_fen(), "move applied");

        self.timeline.push(next);
        self.moves.push(mv);
        self.refresh_state();
        Ok(self.current_position())
    }

    /// Play a move written in coordinate notation (`e2e4`, `e7e8q`) or SAN
    /// (`Nf3`, `exd5`, `O-O`, `e8=Q+`).
    pub fn play_notation(&mut self, text: &str) -> ChessResult<&Position> {
        self.ensure_in_progress()?;
        let position = self.current_position();
        let mv = match long_algebraic_to_move(text, position) {
            Ok(mv) => mv,
            Err(ChessError::InvalidNotation(_)) => san_to_move(text, position)?,
            Err(err) => return Err(err),
        };
        self.play(mv)
    }

    /// Take back the last move. The session is in progress again afterwards,
    /// even if that move had ended the game or a draw option was tightened
    /// since. Draw rules are checked again on the next move.
    pub fn undo(&mut self) -> ChessResult<Move> {
        let mv = self.moves.pop().ok_or(ChessError::EmptyHistory)?;
        self.timeline.pop();
        self.state = SessionState::InProgress;
        debug!(%mv, fen = %self.fen(), "move undone");
        Ok(mv)
    }

    fn ensure_in_progress(&self) -> ChessResult<()> {
        match self.state {
            SessionState::InProgress => Ok(()),
            SessionState::Finished(status) => Err(ChessError::GameFinished(status)),
        }
    }

    fn refresh_state(&mut self) {
        let (current, earlier) = self
            .timeline
            .split_last()
            .expect("session timeline always holds the starting position");
        let status = status_with_history(current, earlier, &self.config);

        self.state = if status.is_ongoing() {
            SessionState::InProgress
        } else {
            if self.state == SessionState::InProgress {
                info!(%status, moves = self.moves.len(), "game finished");
            }
            SessionState::Finished(status)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn new_session_offers_twenty_moves() {
        let session = GameSession::default();
        assert_eq!(session.legal_moves().len(), 20);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.side_to_move(), Color::White);
    }

    #[test]
    fn request_move_advances_and_records_history() {
        let mut session = GameSession::default();
        session
            .request_move(sq("e2"), sq("e4"), None)
            .expect("e2e4 is legal");
        session
            .request_move(sq("e7"), sq("e5"), None)
            .expect("e7e5 is legal");

        let history: Vec<String> = session.history().map(|(mv, _)| mv.to_string()).collect();
        assert_eq!(history, vec!["e2e4".to_owned(), "e7e5".to_owned()]);
        assert_eq!(
            session.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn illegal_request_leaves_position_unchanged() {
        let mut session = GameSession::default();
        let before = session.current_position().clone();

        let err = session
            .request_move(sq("e2"), sq("e5"), None)
            .expect_err("e2e5 is illegal");
        assert!(matches!(err, ChessError::IllegalMove { .. }));
        assert_eq!(session.current_position(), &before);
        assert_eq!(session.history().count(), 0);

        // Moving the opponent's piece is equally illegal.
        assert!(session.request_move(sq("e7"), sq("e5"), None).is_err());
        assert_eq!(session.current_position(), &before);
    }

    #[test]
    fn fools_mate_finishes_the_session() {
        let mut session = GameSession::default();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            session.request_move(sq(from), sq(to), None).expect("legal move");
        }

        assert_eq!(
            session.state(),
            SessionState::Finished(GameStatus::Checkmate { loser: Color::White })
        );
        assert!(session.is_in_check());
        assert!(session.legal_moves().is_empty());
        assert_eq!(
            session.request_move(sq("e1"), sq("f2"), None).expect_err("game is over"),
            ChessError::GameFinished(GameStatus::Checkmate { loser: Color::White })
        );
    }

    #[test]
    fn undo_reopens_a_finished_game() {
        let mut session = GameSession::default();
        for lan in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            session.play_notation(lan).expect("legal move");
        }
        let undone = session.undo().expect("one move to undo");
        assert_eq!(undone.to_string(), "d8h4");
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.side_to_move(), Color::Black);
        assert_eq!(session.moves_played().len(), 3);
    }

    #[test]
    fn undo_reopens_after_a_tightened_draw_option() {
        let mut session = GameSession::default();
        for lan in ["g1f3", "g8f6"] {
            session.play_notation(lan).expect("legal move");
        }
        session
            .set_option("FiftyMoveHalfmoves", "1")
            .expect("valid option");
        assert_eq!(
            session.state(),
            SessionState::Finished(GameStatus::DrawFiftyMove)
        );

        session.undo().expect("one move to undo");
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.legal_moves().len(), 20);

        session
            .request_move(sq("b8"), sq("c6"), None)
            .expect("session accepts moves again");
        assert_eq!(
            session.state(),
            SessionState::Finished(GameStatus::DrawFiftyMove)
        );
    }

    #[test]
    fn undo_on_empty_history_fails() {
        let mut session = GameSession::default();
        assert_eq!(session.undo(), Err(ChessError::EmptyHistory));
    }

    #[test]
    fn promotion_requires_a_piece() {
        let mut session =
            GameSession::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", SessionConfig::default())
                .expect("FEN should parse");

        let err = session
            .request_move(sq("a7"), sq("a8"), None)
            .expect_err("promotion piece missing");
        assert!(matches!(err, ChessError::AmbiguousPromotion { .. }));
        assert_eq!(session.moves_played().len(), 0);

        session
            .request_move(sq("a7"), sq("a8"), Some(PieceKind::Rook))
            .expect("a7a8r is legal");
        assert_eq!(
            session.piece_at(sq("a8")),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
    }

    #[test]
    fn promotion_piece_on_ordinary_move_is_illegal() {
        let mut session = GameSession::default();
        let err = session
            .request_move(sq("e2"), sq("e4"), Some(PieceKind::Queen))
            .expect_err("e2e4 cannot promote");
        assert!(matches!(err, ChessError::IllegalMove { .. }));
    }

    #[test]
    fn legal_moves_from_selected_square() {
        let session = GameSession::default();
        let targets: Vec<String> = session
            .legal_moves_from(sq("g1"))
            .iter()
            .map(|mv| mv.to.to_string())
            .collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&"f3".to_owned()));
        assert!(targets.contains(&"h3".to_owned()));
        assert!(session.legal_moves_from(sq("e1")).is_empty());
    }

    #[test]
    fn fifty_quiet_moves_draw_the_game() {
        let config = SessionConfig::default()
            .with_repetition_limit(u8::MAX)
            .expect("valid repetition limit");
        let mut session = GameSession::from_fen("7k/8/8/8/8/8/8/R6K w - - 0 1", config)
            .expect("FEN should parse");

        for cycle in 0..25 {
            assert_eq!(session.state(), SessionState::InProgress, "cycle {cycle}");
            for lan in ["a1a2", "h8g8", "a2a1", "g8h8"] {
                session.play_notation(lan).expect("legal move");
            }
        }
        assert_eq!(session.current_position().halfmove_clock(), 100);
        assert_eq!(
            session.state(),
            SessionState::Finished(GameStatus::DrawFiftyMove)
        );
    }

    #[test]
    fn repetition_limit_is_configurable() {
        let config = SessionConfig::default()
            .with_repetition_limit(2)
            .expect("valid repetition limit");
        let mut session = GameSession::new(config);
        for lan in ["g1f3", "g8f6", "f3g1"] {
            session.play_notation(lan).expect("legal move");
        }
        assert_eq!(session.state(), SessionState::InProgress);
        session.play_notation("f6g8").expect("legal move");
        assert_eq!(
            session.state(),
            SessionState::Finished(GameStatus::DrawRepetition)
        );
    }

    #[test]
    fn san_and_coordinate_notation_are_both_accepted() {
        let mut session = GameSession::default();
        session.play_notation("e4").expect("SAN pawn push");
        session.play_notation("e7e5").expect("coordinate move");
        session.play_notation("Nf3").expect("SAN knight move");
        assert_eq!(session.moves_played().len(), 3);
    }

    #[test]
    fn terminal_import_starts_finished() {
        let session =
            GameSession::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", SessionConfig::default())
                .expect("FEN should parse");
        assert_eq!(session.state(), SessionState::Finished(GameStatus::Stalemate));
    }
}
