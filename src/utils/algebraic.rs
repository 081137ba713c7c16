//! Square and bitboard conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (e.g. `e4`) and internal
//! square indices reused by FEN, long algebraic, SAN and PGN.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, square_at, Bitboard, Square};

/// Parse a coordinate such as `"e4"` into a square index.
#[inline]
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(text.to_owned()));
    }

    Ok(square_at(file - b'a', rank - b'1'))
}

/// Coordinate of a square index (`0..=63`).
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(rank_char(square));
    out
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + file_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + rank_of(square))
}

/// Ascending list of the squares set in a bitboard.
pub fn bitboard_squares(bitboard: Bitboard) -> Vec<Square> {
    let mut squares = Vec::with_capacity(bitboard.count_ones() as usize);
    let mut bits = bitboard;
    while bits != 0 {
        squares.push(bits.trailing_zeros() as Square);
        bits &= bits - 1;
    }
    squares
}
