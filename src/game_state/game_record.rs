//! Game history: every position reached plus the moves between them.
//!
//! The record only grows during play. `positions[0]` is the starting
//! position, and `positions[i + 1]` is the result of `moves[i]`.

use chrono::{DateTime, Utc};

use crate::errors::ChessResult;
use crate::game_api::{play_move, resolve_move};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::mailbox::Mailbox;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::moves::move_description::Move;
use crate::utils::pgn::write_pgn;

const THREEFOLD: usize = 3;

#[derive(Debug, Clone)]
pub struct GameRecord {
    positions: Vec<Position>,
    moves: Vec<Move>,
    started_at: DateTime<Utc>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRecord {
    pub fn new() -> Self {
        Self::from_position(Position::new_game())
    }

    pub fn from_position(position: Position) -> Self {
        Self {
            positions: vec![position],
            moves: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Play a from/to/promotion request. Nothing is appended on error.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<&Position> {
        let mv = resolve_move(self.current(), from, to, promotion)?;
        let next = apply_move(self.current(), &mv);
        Ok(self.append(mv, next))
    }

    /// Append a `Move` value; it must be legal in the current position.
    pub fn push_move(&mut self, mv: &Move) -> ChessResult<&Position> {
        let next = play_move(self.current(), mv)?;
        Ok(self.append(*mv, next))
    }

    fn append(&mut self, mv: Move, next: Position) -> &Position {
        self.moves.push(mv);
        self.positions.push(next);
        self.current()
    }

    pub fn current(&self) -> &Position {
        // `positions` is never empty.
        &self.positions[self.positions.len() - 1]
    }

    pub fn initial(&self) -> &Position {
        &self.positions[0]
    }

    /// Position after `index` plies; `0` is the start.
    pub fn position(&self, index: usize) -> Option<&Position> {
        self.positions.get(index)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of plies played.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Drop the whole history and restart from `position`.
    pub fn reset(&mut self, position: Position) {
        *self = Self::from_position(position);
    }

    pub fn mailbox_history(&self) -> Vec<Mailbox> {
        self.positions.iter().map(Position::mailbox).collect()
    }

    /// How often the current position has occurred, counting itself. Only
    /// positions since the last irreversible move can repeat it.
    pub fn repetition_count(&self) -> usize {
        let current = self.current();
        let key = current.repetition_key();
        let window = usize::from(current.halfmove_clock()) + 1;
        self.positions
            .iter()
            .rev()
            .take(window)
            .filter(|position| position.repetition_key() == key)
            .count()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= THREEFOLD
    }

    pub fn to_pgn(&self, white: &str, black: &str) -> String {
        write_pgn(self, white, black)
    }
}
