//! Random-move engine.
//!
//! Selects uniformly from legal moves with a seeded generator, so playouts
//! are reproducible. Used for diagnostics and random-playout testing.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::legal_moves;

pub struct RandomEngine {
    seed: u64,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    /// Restart the move sequence from the construction seed.
    fn new_game(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    fn choose_move(&mut self, position: &Position) -> ChessResult<EngineOutput> {
        let moves = legal_moves(position);
        let picked = moves.choose(&mut self.rng).ok_or(ChessError::GameOver)?;
        Ok(EngineOutput::unscored(*picked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_moves() {
        let start = Position::new_game();
        let mut a = RandomEngine::new(7);
        let mut b = RandomEngine::new(7);
        for _ in 0..5 {
            let ma = a.choose_move(&start).expect("move").best_move;
            let mb = b.choose_move(&start).expect("move").best_move;
            assert_eq!(ma, mb);
        }
    }

    #[test]
    fn picks_only_legal_moves_and_reports_game_over() {
        let start = Position::new_game();
        let mut engine = RandomEngine::new(1);
        let picked = engine.choose_move(&start).expect("move").best_move;
        assert!(legal_moves(&start).contains(&picked));

        let stalemate = Position::from_fen("7k/8/6QK/8/8/8/8/8 b - - 0 1").expect("FEN");
        assert!(matches!(engine.choose_move(&stalemate), Err(ChessError::GameOver)));
    }

    #[test]
    fn new_game_replays_the_sequence() {
        let start = Position::new_game();
        let mut engine = RandomEngine::new(99);
        let first: Vec<_> = (0..4)
            .map(|_| engine.choose_move(&start).expect("move").best_move)
            .collect();
        engine.new_game();
        let second: Vec<_> = (0..4)
            .map(|_| engine.choose_move(&start).expect("move").best_move)
            .collect();
        assert_eq!(first, second);
    }
}
