//! Search-backed engine.
//!
//! Wraps iterative-deepening alpha-beta with a configurable evaluation and
//! search configuration.

use tracing::info;

use crate::config::EngineConfig;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessResult;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::BoardScorer;
use crate::search::iterative_deepening::{search, SearchConfig, SearchResult};

pub struct AlphaBetaEngine {
    move_generator: LegalMoveGenerator,
    scorer: Box<dyn BoardScorer>,
    search: SearchConfig,
}

impl AlphaBetaEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            scorer: config.evaluation.scorer(),
            search: config.search,
        }
    }

    pub fn with_scorer(scorer: Box<dyn BoardScorer>, search: SearchConfig) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            scorer,
            search,
        }
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    pub fn set_search_config(&mut self, search: SearchConfig) {
        self.search = search;
    }

    pub fn analyze(&self, position: &Position) -> ChessResult<SearchResult> {
        Ok(search(position, &self.move_generator, &self.scorer, &self.search)?)
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn choose_move(&mut self, position: &Position) -> ChessResult<EngineOutput> {
        let result = self.analyze(position)?;
        info!(
            best_move = %result.best_move,
            score = result.best_score,
            depth = result.reached_depth,
            nodes = result.nodes,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "engine move chosen"
        );
        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.best_score),
            depth: Some(result.reached_depth),
            nodes: result.nodes,
        })
    }
}
