//! Crate-wide error type.
//!
//! `ChessError` covers every recoverable failure a collaborator can trigger:
//! rejected move requests, malformed FEN/mailbox/move text, and configuration
//! loading. Contract violations inside the core (a move that does not match
//! the board it is applied to) are bugs and panic instead.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Error)]
pub enum ChessError {
    /// The requested from/to/promotion is not among the legal moves.
    #[error(
        "illegal move {}{}{}",
        square_name(.from),
        square_name(.to),
        promotion_suffix(.promotion)
    )]
    IllegalMove {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },

    /// The destination is only reachable by promoting and no piece was given.
    #[error("move {}{} needs a promotion piece", square_name(.from), square_name(.to))]
    AmbiguousPromotion { from: Square, to: Square },

    #[error("game is over: the side to move has no legal moves")]
    GameOver,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("invalid mailbox: {0}")]
    InvalidMailbox(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn square_name(square: &Square) -> String {
    square_to_algebraic(*square)
}

fn promotion_suffix(promotion: &Option<PieceKind>) -> String {
    promotion.map(|kind| kind.letter().to_string()).unwrap_or_default()
}
