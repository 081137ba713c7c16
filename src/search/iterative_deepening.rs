//! Iterative deepening driver.
//!
//! Runs the alpha-beta search at depth 1, 2, ... up to `max_depth`. With a
//! deadline, the first iteration always completes and any later iteration
//! that overruns is thrown away, so the reported move always comes from the
//! deepest fully searched ply.

use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::errors::ChessError;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_description::Move;
use crate::search::alpha_beta::{RootOutcome, SearchContext};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::order_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Milliseconds from the start of the search.
    pub deadline_ms: Option<u64>,
    pub parallel_root: bool,
    pub order_moves: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            deadline_ms: None,
            parallel_root: false,
            order_moves: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Absolute deadline for a search started at `started`.
    pub fn deadline(&self, started: Instant) -> Option<Instant> {
        self.deadline_ms
            .map(|ms| started + Duration::from_millis(ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no legal moves to search")]
    NoLegalMoves,
}

impl From<SearchError> for ChessError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::NoLegalMoves => ChessError::GameOver,
        }
    }
}

pub fn search<G, S>(
    position: &Position,
    generator: &G,
    scorer: &S,
    config: &SearchConfig,
) -> Result<SearchResult, SearchError>
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let started = Instant::now();
    let deadline = config.deadline(started);

    let mut root_moves = generator.generate_legal_moves(position);
    if root_moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }
    if config.order_moves {
        order_moves(&mut root_moves);
    }

    let max_depth = config.max_depth.max(1);
    let mut completed: Option<(Move, i32, u8)> = None;
    let mut nodes = 0u64;

    for depth in 1..=max_depth {
        let iteration_deadline = if depth == 1 { None } else { deadline };
        let outcome = if config.parallel_root && root_moves.len() > 1 {
            search_root_parallel(&root_moves, generator, scorer, config, depth, iteration_deadline)
        } else {
            SearchContext::new(generator, scorer, config.order_moves, iteration_deadline)
                .search_root(&root_moves, depth)
        };
        nodes += outcome.nodes;

        let Some((best_move, best_score)) = outcome.best else {
            trace!(depth, nodes, "deadline reached, discarding unfinished iteration");
            break;
        };
        completed = Some((best_move, best_score, depth));
        debug!(
            depth,
            best_move = %best_move,
            best_score,
            nodes,
            "search iteration complete"
        );

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            trace!(depth, "deadline reached after a completed iteration");
            break;
        }
    }

    // Depth 1 runs without a deadline and the root has moves.
    let (best_move, best_score, reached_depth) =
        completed.ok_or(SearchError::NoLegalMoves)?;

    Ok(SearchResult {
        best_move,
        best_score,
        reached_depth,
        nodes,
        elapsed: started.elapsed(),
    })
}

/// Each root move gets its own full-window search on a scoped worker. Scores
/// are combined in root order with the same strict-improvement rule as the
/// sequential root, so both pick the same move.
fn search_root_parallel<G, S>(
    root_moves: &[GeneratedMove],
    generator: &G,
    scorer: &S,
    config: &SearchConfig,
    depth: u8,
    deadline: Option<Instant>,
) -> RootOutcome
where
    G: MoveGenerator + ?Sized,
    S: BoardScorer + ?Sized,
{
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, root_moves.len());
    let chunk_size = root_moves.len().div_ceil(workers);

    let results: Vec<(Vec<Option<i32>>, u64)> = thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut ctx = SearchContext::new(generator, scorer, config.order_moves, deadline);
                    let scores: Vec<Option<i32>> = chunk
                        .iter()
                        .map(|child| ctx.score_root_child(child, depth))
                        .collect();
                    (scores, ctx.nodes())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let nodes: u64 = results.iter().map(|(_, nodes)| nodes).sum();
    let mut best: Option<(Move, i32)> = None;
    let scores = results.into_iter().flat_map(|(scores, _)| scores);
    for (child, score) in root_moves.iter().zip(scores) {
        let Some(score) = score else {
            return RootOutcome { best: None, nodes };
        };
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((child.mv, score));
        }
    }

    RootOutcome { best, nodes }
}
