//! Standard algebraic notation (`Nbd7`, `exd6`, `e8=Q+`, `O-O`).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::attacks::is_king_in_check;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_description::{Move, MoveKind};
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// SAN for a legal move of `position`, with the `+`/`#` suffix.
pub fn move_to_san(position: &Position, mv: &Move) -> String {
    let legal = legal_moves(position);
    let mut san = san_body(mv, &legal);

    let next = apply_move(position, mv);
    if is_king_in_check(&next, next.side_to_move()) {
        san.push(if legal_moves(&next).is_empty() { '#' } else { '+' });
    }
    san
}

/// Find the legal move written as `text`. Check and annotation suffixes are
/// ignored, and `0-0` is accepted for `O-O`.
pub fn san_to_move(position: &Position, text: &str) -> ChessResult<Move> {
    let cleaned = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
        .replace('0', "O");
    let legal = legal_moves(position);
    legal
        .iter()
        .find(|mv| san_body(mv, &legal) == cleaned)
        .copied()
        .ok_or_else(|| ChessError::InvalidMoveText(text.to_owned()))
}

fn san_body(mv: &Move, legal: &[Move]) -> String {
    match mv.kind {
        MoveKind::CastleKingside => return "O-O".to_owned(),
        MoveKind::CastleQueenside => return "O-O-O".to_owned(),
        _ => {}
    }

    let mut out = String::with_capacity(7);
    if mv.piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(mv.from));
            out.push('x');
        }
        out.push_str(&square_to_algebraic(mv.to));
        if let Some(kind) = mv.promotion() {
            out.push('=');
            out.push(kind.letter().to_ascii_uppercase());
        }
        return out;
    }

    out.push(mv.piece.letter().to_ascii_uppercase());
    let rivals: Vec<&Move> = legal
        .iter()
        .filter(|other| other.piece == mv.piece && other.to == mv.to && other.from != mv.from)
        .collect();
    if !rivals.is_empty() {
        let shares_file = rivals.iter().any(|other| file_of(other.from) == file_of(mv.from));
        let shares_rank = rivals.iter().any(|other| rank_of(other.from) == rank_of(mv.from));
        if !shares_file {
            out.push(file_char(mv.from));
        } else if !shares_rank {
            out.push(rank_char(mv.from));
        } else {
            out.push_str(&square_to_algebraic(mv.from));
        }
    }
    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(mv.to));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn san_of(fen: &str, lan: &str) -> String {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mv = long_algebraic_to_move(lan, &position).expect("legal move");
        move_to_san(&position, &mv)
    }

    #[test]
    fn pieces_pawns_and_castles() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(san_of(start, "g1f3"), "Nf3");
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"), "O-O-O");
        assert_eq!(san_of("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"), "exd6");
    }

    #[test]
    fn disambiguation_by_file_rank_and_square() {
        // Knights on b1 and f1 both reach d2.
        assert_eq!(san_of("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
        // Rooks on a1 and a5 both reach a3.
        assert_eq!(san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
        // Queens on a1, c1 and a3 all reach b2.
        assert_eq!(san_of("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1", "a1b2"), "Qa1b2");
    }

    #[test]
    fn promotion_and_check_suffixes() {
        assert_eq!(san_of("5k2/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8q"), "a8=Q+");
        assert_eq!(san_of("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", "a1a8"), "Ra8#");
    }

    #[test]
    fn parses_san_back_to_moves() {
        let position = Position::new_game();
        let mv = san_to_move(&position, "Nf3").expect("legal");
        assert_eq!(mv.to_string(), "g1f3");
        let castle_position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        assert_eq!(san_to_move(&castle_position, "0-0+").expect("castle").to_string(), "e1g1");
        assert!(matches!(san_to_move(&position, "Nf6"), Err(ChessError::InvalidMoveText(_))));
    }
}
