//! Ray tables and occupancy-aware slider attacks.
//!
//! `RAYS[direction][square]` holds every square reachable from `square` in one
//! compass direction on an empty board. A blocked ray is the full ray minus
//! the ray continuing past the first occupied square, so the blocker itself
//! stays attacked.

use crate::game_state::chess_types::{Bitboard, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::NorthEast => 4,
            Direction::NorthWest => 5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 7,
        }
    }

    /// `(file, rank)` step.
    #[inline]
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthEast | Direction::SouthWest
        )
    }

    /// Whether square indices grow while walking this ray.
    #[inline]
    pub const fn is_ascending(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::NorthEast | Direction::NorthWest
        )
    }
}

pub const RAYS: [[Bitboard; 64]; 8] = generate_rays();

#[inline]
pub const fn ray(square: Square, direction: Direction) -> Bitboard {
    RAYS[direction.index()][square as usize]
}

/// Attacks along one ray, stopping at (and including) the first blocker.
#[inline]
pub fn ray_attacks(square: Square, direction: Direction, occupancy: Bitboard) -> Bitboard {
    let full = ray(square, direction);
    let blockers = full & occupancy;
    if blockers == 0 {
        return full;
    }

    let first = if direction.is_ascending() {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    full & !ray(first as Square, direction)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Direction::DIAGONAL
        .iter()
        .fold(0, |acc, &d| acc | ray_attacks(square, d, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Direction::ORTHOGONAL
        .iter()
        .fold(0, |acc, &d| acc | ray_attacks(square, d, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

const fn generate_rays() -> [[Bitboard; 64]; 8] {
    let mut table = [[0u64; 64]; 8];
    let mut d = 0usize;

    while d < 8 {
        let (file_step, rank_step) = Direction::ALL[d].step();
        let mut sq = 0usize;
        while sq < 64 {
            let mut file = (sq % 8) as i8 + file_step;
            let mut rank = (sq / 8) as i8 + rank_step;
            let mut bits = 0u64;
            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                bits |= 1u64 << (rank as u32 * 8 + file as u32);
                file += file_step;
                rank += rank_step;
            }
            table[d][sq] = bits;
            sq += 1;
        }
        d += 1;
    }

    table
}
