//! Check, mate and draw classification of a single position or a whole game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::chess_types::*;
use crate::game_state::game_record::GameRecord;
use crate::game_state::position::Position;
use crate::move_generation::attacks::is_king_in_check;
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameOutcome {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    /// PGN result token.
    pub fn result_token(&self) -> &'static str {
        match self {
            GameOutcome::Ongoing => "*",
            GameOutcome::Checkmate {
                winner: Color::White,
            } => "1-0",
            GameOutcome::Checkmate {
                winner: Color::Black,
            } => "0-1",
            GameOutcome::Stalemate | GameOutcome::Draw(_) => "1/2-1/2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub side_to_move: Color,
    pub in_check: bool,
    pub legal_move_count: usize,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub is_fifty_move_draw: bool,
    pub is_insufficient_material: bool,
    pub is_threefold_repetition: bool,
    /// Fifty-move, insufficient material or repetition. Stalemate is
    /// reported on its own flag.
    pub is_draw: bool,
}

impl GameStatus {
    /// Checkmate wins over every draw flag.
    pub fn outcome(&self) -> GameOutcome {
        if self.is_checkmate {
            return GameOutcome::Checkmate {
                winner: self.side_to_move.opposite(),
            };
        }
        if self.is_stalemate {
            return GameOutcome::Stalemate;
        }
        if self.is_fifty_move_draw {
            return GameOutcome::Draw(DrawReason::FiftyMoveRule);
        }
        if self.is_insufficient_material {
            return GameOutcome::Draw(DrawReason::InsufficientMaterial);
        }
        if self.is_threefold_repetition {
            return GameOutcome::Draw(DrawReason::ThreefoldRepetition);
        }
        GameOutcome::Ongoing
    }
}

/// One-line status for display next to the board.
impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side_to_move.name();
        match self.outcome() {
            GameOutcome::Checkmate { winner } => write!(f, "Checkmate! {} wins", winner.name()),
            GameOutcome::Stalemate => f.write_str("Stalemate"),
            GameOutcome::Draw(DrawReason::FiftyMoveRule) => f.write_str("Draw by the fifty-move rule"),
            GameOutcome::Draw(DrawReason::InsufficientMaterial) => {
                f.write_str("Draw by insufficient material")
            }
            GameOutcome::Draw(DrawReason::ThreefoldRepetition) => {
                f.write_str("Draw by threefold repetition")
            }
            GameOutcome::Ongoing if self.in_check => write!(f, "{side} is in check"),
            GameOutcome::Ongoing => write!(f, "{side} to move"),
        }
    }
}

pub fn classify(position: &Position) -> GameStatus {
    let side = position.side_to_move();
    let in_check = is_king_in_check(position, side);
    let legal_move_count = legal_moves(position).len();
    let is_fifty_move_draw = position.halfmove_clock() >= FIFTY_MOVE_HALFMOVES;
    let is_insufficient_material = has_insufficient_material(position);

    GameStatus {
        side_to_move: side,
        in_check,
        legal_move_count,
        is_checkmate: in_check && legal_move_count == 0,
        is_stalemate: !in_check && legal_move_count == 0,
        is_fifty_move_draw,
        is_insufficient_material,
        is_threefold_repetition: false,
        is_draw: is_fifty_move_draw || is_insufficient_material,
    }
}

/// [`classify`] on the current position plus repetition from the history.
pub fn classify_record(record: &GameRecord) -> GameStatus {
    let mut status = classify(record.current());
    status.is_threefold_repetition = record.is_threefold_repetition();
    status.is_draw |= status.is_threefold_repetition;
    status
}

/// No pawns, rooks or queens, and either at most one minor piece in total or
/// only bishops that all stand on one square colour.
pub fn has_insufficient_material(position: &Position) -> bool {
    let mut knights = 0u32;
    let mut bishops: Bitboard = 0;

    for color in Color::ALL {
        let heavy = position.pieces(color, PieceKind::Pawn)
            | position.pieces(color, PieceKind::Rook)
            | position.pieces(color, PieceKind::Queen);
        if heavy != 0 {
            return false;
        }
        knights += position.pieces(color, PieceKind::Knight).count_ones();
        bishops |= position.pieces(color, PieceKind::Bishop);
    }

    let minors = knights + bishops.count_ones();
    if minors <= 1 {
        return true;
    }
    knights == 0 && (bishops & LIGHT_SQUARES == 0 || bishops & !LIGHT_SQUARES == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(fen: &str) -> GameStatus {
        classify(&Position::from_fen(fen).expect("FEN should parse"))
    }

    #[test]
    fn start_position_is_ongoing() {
        let status = classify(&Position::new_game());
        assert_eq!(status.legal_move_count, 20);
        assert!(!status.in_check);
        assert_eq!(status.outcome(), GameOutcome::Ongoing);
    }

    #[test]
    fn stalemate_is_not_a_draw_flag() {
        let status = status("7k/8/6QK/8/8/8/8/8 b - - 0 1");
        assert!(status.is_stalemate);
        assert!(!status.in_check);
        assert!(!status.is_draw);
        assert_eq!(status.outcome(), GameOutcome::Stalemate);
        assert_eq!(status.outcome().result_token(), "1/2-1/2");
    }

    #[test]
    fn checkmate_takes_precedence_over_fifty_moves() {
        let status = status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80");
        assert!(status.is_checkmate);
        assert!(status.is_fifty_move_draw);
        assert_eq!(
            status.outcome(),
            GameOutcome::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn fifty_move_rule_triggers_at_one_hundred_halfmoves() {
        assert!(!status("4k3/8/8/8/8/8/8/R3K3 w - - 99 70").is_fifty_move_draw);
        let status = status("4k3/8/8/8/8/8/8/R3K3 w - - 100 70");
        assert!(status.is_fifty_move_draw && status.is_draw);
        assert_eq!(status.outcome(), GameOutcome::Draw(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn insufficient_material_cases() {
        let insufficient = |fen: &str| {
            has_insufficient_material(&Position::from_fen(fen).expect("FEN should parse"))
        };
        assert!(insufficient("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(insufficient("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"));
        assert!(insufficient("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        // c1 and f4 are both dark squares.
        assert!(insufficient("4k3/8/8/8/5b2/8/8/2B1K3 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/2B1KN2 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
    }

    #[test]
    fn status_line_text() {
        assert_eq!(classify(&Position::new_game()).to_string(), "White to move");
        assert_eq!(
            status("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").to_string(),
            "Checkmate! White wins"
        );
        assert_eq!(status("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").to_string(), "Black is in check");
        assert_eq!(status("7k/8/6QK/8/8/8/8/8 b - - 0 1").to_string(), "Stalemate");
    }
}
