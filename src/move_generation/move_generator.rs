use crate::game_state::position::Position;
use crate::moves::move_description::Move;

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub position_after: Position,
}

pub trait MoveGenerator: Send + Sync {
    /// All legal moves for the side to move, in a stable order.
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove>;
}
