//! Long algebraic move text (`e2e4`, `e7e8q`).

use crate::errors::{ChessError, ChessResult};
use crate::game_api::resolve_move;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::position::Position;
use crate::moves::move_description::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Split move text into from, to and an optional promotion piece. The
/// promotion letter may be upper or lower case.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let invalid = || ChessError::InvalidMoveText(text.to_owned());
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(letter) => Some(PieceKind::from_letter(letter).ok_or_else(invalid)?),
    };

    Ok((from, to, promotion))
}

/// Resolve move text against the legal moves of `position`.
pub fn long_algebraic_to_move(text: &str, position: &Position) -> ChessResult<Move> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    resolve_move(position, from, to, promotion)
}
