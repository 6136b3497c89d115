use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

/// A legal move together with the position it leads to.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub position_after: Position,
    pub gives_check: bool,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove>;
}
