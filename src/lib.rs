//! Crate root module declarations for the chess rules engine.
//!
//! Exposes the board model, move generation, game-status detection, the game
//! session and notation utilities so the binary, benches and external
//! front-ends can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
    pub mod zobrist;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_moves;
    pub mod slider_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod game_status {
    pub mod game_status;
    pub mod insufficient_material;
}

pub mod session {
    pub mod game_session;
    pub mod session_config;
}

pub mod frontend {
    pub mod text_protocol;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}
