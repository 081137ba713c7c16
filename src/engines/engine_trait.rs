//! Engine abstraction layer.
//!
//! Different move-selection strategies sit behind one trait so the CLI and
//! game drivers can pick them at runtime.

use crate::errors::ChessResult;
use crate::game_state::position::Position;
use crate::moves::move_description::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Move,
    /// Side-to-move score, when the engine computes one.
    pub score: Option<i32>,
    pub depth: Option<u8>,
    pub nodes: u64,
}

impl EngineOutput {
    pub fn unscored(best_move: Move) -> Self {
        Self {
            best_move,
            score: None,
            depth: None,
            nodes: 0,
        }
    }
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Fails with `ChessError::GameOver` when there is nothing to play.
    fn choose_move(&mut self, position: &Position) -> ChessResult<EngineOutput>;
}
