//! Attack queries against a position.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks, pawn_attacks};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

/// Every square attacked by `by` under the current occupancy.
pub fn attacked_squares(position: &Position, by: Color) -> Bitboard {
    let occupancy = position.occupied();
    let mut attacked = 0u64;

    for kind in ALL_PIECE_KINDS {
        let mut bits = position.pieces(by, kind);
        while bits != 0 {
            let from = bits.trailing_zeros() as Square;
            attacked |= match kind {
                PieceKind::Pawn => pawn_attacks(by, from),
                PieceKind::Knight => knight_attacks(from),
                PieceKind::Bishop => bishop_attacks(from, occupancy),
                PieceKind::Rook => rook_attacks(from, occupancy),
                PieceKind::Queen => queen_attacks(from, occupancy),
                PieceKind::King => king_attacks(from),
            };
            bits &= bits - 1;
        }
    }

    attacked
}

/// Pieces of `by` that attack `square`.
pub fn attackers_to_square(position: &Position, square: Square, by: Color) -> Bitboard {
    let occupancy = position.occupied();
    let rooks_queens = position.pieces(by, PieceKind::Rook) | position.pieces(by, PieceKind::Queen);
    let bishops_queens =
        position.pieces(by, PieceKind::Bishop) | position.pieces(by, PieceKind::Queen);

    // A pawn of `by` attacks `square` exactly when a pawn of the other colour
    // standing on `square` would attack it.
    (pawn_attacks(by.opposite(), square) & position.pieces(by, PieceKind::Pawn))
        | (knight_attacks(square) & position.pieces(by, PieceKind::Knight))
        | (king_attacks(square) & position.pieces(by, PieceKind::King))
        | (bishop_attacks(square, occupancy) & bishops_queens)
        | (rook_attacks(square, occupancy) & rooks_queens)
}

#[inline]
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    attackers_to_square(position, square, by) != 0
}

/// `false` when `color` has no king on the board.
#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king) => is_square_attacked(position, king, color.opposite()),
        None => false,
    }
}
