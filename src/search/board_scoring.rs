//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays independent of the heuristic by delegating static scoring to
//! `BoardScorer`. Every scorer is colour-symmetric: mirroring the position
//! negates its White-relative score.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Positive when White is better.
    fn evaluate_white(&self, position: &Position) -> i32;

    /// Score from the perspective of the side to move.
    #[inline]
    fn score(&self, position: &Position) -> i32 {
        let white = self.evaluate_white(position);
        match position.side_to_move() {
            Color::White => white,
            Color::Black => -white,
        }
    }
}

impl<T: BoardScorer + ?Sized> BoardScorer for Box<T> {
    fn evaluate_white(&self, position: &Position) -> i32 {
        (**self).evaluate_white(position)
    }
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

fn material_white_minus_black(position: &Position) -> i32 {
    ALL_PIECE_KINDS
        .iter()
        .map(|&kind| {
            let white = position.pieces(Color::White, kind).count_ones() as i32;
            let black = position.pieces(Color::Black, kind).count_ones() as i32;
            (white - black) * piece_value(kind)
        })
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn evaluate_white(&self, position: &Position) -> i32 {
        material_white_minus_black(position)
    }
}

/// Material plus piece-square bonuses, with an active-king table once the
/// middlegame is over.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    /// Endgame once each side has either no queen, or a queen with no rook
    /// and at most one minor piece beside it.
    pub fn is_endgame(position: &Position) -> bool {
        Color::ALL.iter().all(|&color| {
            let queens = position.pieces(color, PieceKind::Queen);
            let rooks = position.pieces(color, PieceKind::Rook);
            let minors = (position.pieces(color, PieceKind::Knight)
                | position.pieces(color, PieceKind::Bishop))
            .count_ones();
            queens == 0 || (rooks == 0 && minors <= 1)
        })
    }

    fn table(kind: PieceKind, endgame: bool) -> &'static [i32; 64] {
        match kind {
            PieceKind::Pawn => &PAWN_TABLE,
            PieceKind::Knight => &KNIGHT_TABLE,
            PieceKind::Bishop => &BISHOP_TABLE,
            PieceKind::Rook => &ROOK_TABLE,
            PieceKind::Queen => &QUEEN_TABLE,
            PieceKind::King if endgame => &KING_END_TABLE,
            PieceKind::King => &KING_MIDDLE_TABLE,
        }
    }
}

impl BoardScorer for PieceSquareScorer {
    fn evaluate_white(&self, position: &Position) -> i32 {
        let endgame = Self::is_endgame(position);
        let mut score = material_white_minus_black(position);

        for kind in ALL_PIECE_KINDS {
            let table = Self::table(kind, endgame);

            // Tables are written from White's point of view with a8 first.
            let mut white = position.pieces(Color::White, kind);
            while white != 0 {
                let sq = white.trailing_zeros() as usize;
                score += table[sq ^ 56];
                white &= white - 1;
            }

            let mut black = position.pieces(Color::Black, kind);
            while black != 0 {
                let sq = black.trailing_zeros() as usize;
                score -= table[sq];
                black &= black - 1;
            }
        }

        score
    }
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDDLE_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_END_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];
