//! Negamax with alpha-beta pruning.
//!
//! Scores are always from the side to move. A node with no legal moves is
//! mate (`-(MATE_SCORE - ply)`) or stalemate (`0`), and the draw rules are
//! tested before the horizon so they hold at every depth.

use std::time::Instant;

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::classifier::has_insufficient_material;
use crate::game_state::position::Position;
use crate::move_generation::attacks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_description::Move;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::move_ordering::order_moves;

/// Wider than any reachable score.
pub const INFINITY: i32 = 32000;

const DEADLINE_CHECK_MASK: u64 = 1023;

/// Best root move and its score, or `None` when the deadline cut the
/// iteration short.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RootOutcome {
    pub best: Option<(Move, i32)>,
    pub nodes: u64,
}

pub(crate) struct SearchContext<'a, G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized> {
    generator: &'a G,
    scorer: &'a S,
    order_moves: bool,
    deadline: Option<Instant>,
    nodes: u64,
    aborted: bool,
}

impl<'a, G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized> SearchContext<'a, G, S> {
    pub fn new(generator: &'a G, scorer: &'a S, order_moves: bool, deadline: Option<Instant>) -> Self {
        Self {
            generator,
            scorer,
            order_moves,
            deadline,
            nodes: 0,
            aborted: false,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `moves` from the root with a window narrowed as better moves
    /// are found. Only a strictly higher score replaces the current best.
    pub fn search_root(&mut self, moves: &[GeneratedMove], depth: u8) -> RootOutcome {
        debug_assert!(depth >= 1, "root search needs at least one ply");
        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for child in moves {
            let score = -self.negamax(&child.position_after, depth - 1, 1, -INFINITY, -alpha);
            if self.aborted {
                return RootOutcome {
                    best: None,
                    nodes: self.nodes,
                };
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child.mv, score));
            }
            alpha = alpha.max(score);
        }

        RootOutcome {
            best,
            nodes: self.nodes,
        }
    }

    /// Exact score of one root child, searched with a full window.
    pub fn score_root_child(&mut self, child: &GeneratedMove, depth: u8) -> Option<i32> {
        let score = -self.negamax(&child.position_after, depth - 1, 1, -INFINITY, INFINITY);
        if self.aborted {
            None
        } else {
            Some(score)
        }
    }

    pub fn negamax(&mut self, position: &Position, depth: u8, ply: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if self.nodes & DEADLINE_CHECK_MASK == 0 && self.deadline_passed() {
            self.aborted = true;
        }
        if self.aborted {
            return 0;
        }

        let mut moves = self.generator.generate_legal_moves(position);
        if moves.is_empty() {
            return if is_king_in_check(position, position.side_to_move()) {
                -(MATE_SCORE - i32::from(ply))
            } else {
                0
            };
        }
        if position.halfmove_clock() >= FIFTY_MOVE_HALFMOVES || has_insufficient_material(position) {
            return 0;
        }
        if depth == 0 {
            return self.scorer.score(position);
        }

        if self.order_moves {
            order_moves(&mut moves);
        }

        let mut best = -INFINITY;
        for child in &moves {
            let score = -self.negamax(&child.position_after, depth - 1, ply + 1, -beta, -alpha);
            if self.aborted {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
