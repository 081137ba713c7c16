use std::thread;

use crate::game_state::position::Position;
use crate::move_generation::attacks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_description::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count only, without the per-leaf classification.
pub fn perft_nodes<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generator.generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|child| perft_nodes(generator, &child.position_after, depth - 1))
        .sum()
}

pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for child in generator.generate_legal_moves(position) {
        perft_recurse(generator, &child, depth - 1, &mut total);
    }
    total
}

/// Leaf count below each root move, in generation order.
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    generator
        .generate_legal_moves(position)
        .into_iter()
        .map(|child| {
            let nodes = perft_nodes(generator, &child.position_after, depth - 1);
            (child.mv, nodes)
        })
        .collect()
}

/// Same totals as [`perft`], with root moves shared out over `threads`
/// scoped workers.
pub fn perft_multi_threaded<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
    threads: usize,
) -> PerftCounts {
    if depth == 0 {
        return perft(generator, position, 0);
    }

    let root_moves = generator.generate_legal_moves(position);
    let threads = threads.clamp(1, root_moves.len().max(1));
    let chunk_size = root_moves.len().div_ceil(threads).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    for child in chunk {
                        perft_recurse(generator, child, depth - 1, &mut local);
                    }
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    })
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    mv: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) {
    if remaining > 0 {
        for child in generator.generate_legal_moves(&mv.position_after) {
            perft_recurse(generator, &child, remaining - 1, counts);
        }
        return;
    }

    counts.nodes += 1;
    if mv.mv.is_capture() {
        counts.captures += 1;
    }
    if mv.mv.is_en_passant() {
        counts.en_passant += 1;
    }
    if mv.mv.is_castle() {
        counts.castles += 1;
    }
    if mv.mv.promotion().is_some() {
        counts.promotions += 1;
    }

    let after = &mv.position_after;
    if is_king_in_check(after, after.side_to_move()) {
        counts.checks += 1;
        if generator.generate_legal_moves(after).is_empty() {
            counts.checkmates += 1;
        }
    }
}
