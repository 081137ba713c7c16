//! Narrow interface for collaborators (request handlers, session storage,
//! UI). Every function takes an immutable snapshot and either returns a new
//! value or a recoverable `ChessError`.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{square_bit, Bitboard, PieceKind, Square};
use crate::game_state::classifier::{self, GameStatus};
use crate::game_state::mailbox::Mailbox;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply;
use crate::move_generation::legal_move_generator::{self, LegalMoveGenerator};
use crate::moves::move_description::Move;
use crate::search::board_scoring::PieceSquareScorer;
use crate::search::iterative_deepening::{search, SearchConfig};
use crate::utils::algebraic::bitboard_squares;

pub fn new_game() -> Position {
    Position::new_game()
}

pub fn legal_moves(position: &Position) -> Vec<Move> {
    legal_move_generator::legal_moves(position)
}

/// Squares the piece on `from` can legally reach, as a bitboard.
pub fn legal_destinations(position: &Position, from: Square) -> Bitboard {
    legal_moves(position)
        .iter()
        .filter(|mv| mv.from == from)
        .fold(0, |acc, mv| acc | square_bit(mv.to))
}

pub fn legal_destination_squares(position: &Position, from: Square) -> Vec<Square> {
    bitboard_squares(legal_destinations(position, from))
}

/// Match a from/to/promotion request against the legal moves.
///
/// Without a promotion piece, a destination reachable only by promoting is
/// `AmbiguousPromotion`. A promotion piece on a move that does not promote,
/// or one that names a king or pawn, is `IllegalMove`.
pub fn resolve_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<Move> {
    let illegal = ChessError::IllegalMove {
        from,
        to,
        promotion,
    };
    let candidates: Vec<Move> = legal_moves(position)
        .into_iter()
        .filter(|mv| mv.from == from && mv.to == to)
        .collect();
    if candidates.is_empty() {
        return Err(illegal);
    }

    match promotion {
        Some(kind) => candidates
            .into_iter()
            .find(|mv| mv.promotion() == Some(kind))
            .ok_or(illegal),
        None => match candidates.iter().find(|mv| mv.promotion().is_none()) {
            Some(mv) => Ok(*mv),
            None => Err(ChessError::AmbiguousPromotion { from, to }),
        },
    }
}

pub fn apply_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<Position> {
    match resolve_move(position, from, to, promotion) {
        Ok(mv) => Ok(legal_move_apply::apply_move(position, &mv)),
        Err(err) => {
            debug!(fen = %position.to_fen(), %err, "rejected move request");
            Err(err)
        }
    }
}

/// Apply a `Move` value, which must be one of the legal moves exactly.
pub fn play_move(position: &Position, mv: &Move) -> ChessResult<Position> {
    if legal_moves(position).contains(mv) {
        Ok(legal_move_apply::apply_move(position, mv))
    } else {
        debug!(fen = %position.to_fen(), mv = %mv, "rejected move value");
        Err(ChessError::IllegalMove {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion(),
        })
    }
}

pub fn classify(position: &Position) -> GameStatus {
    classifier::classify(position)
}

/// Fixed-depth search with the piece-square evaluation. Depth 0 is treated as 1.
pub fn select_move(position: &Position, depth: u8) -> ChessResult<Move> {
    let config = SearchConfig::with_depth(depth.max(1));
    let result = search(position, &LegalMoveGenerator, &PieceSquareScorer, &config)?;
    Ok(result.best_move)
}

pub fn to_mailbox(position: &Position) -> Mailbox {
    position.mailbox()
}
