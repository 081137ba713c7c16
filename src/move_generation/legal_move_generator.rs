//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves piece by piece, then filters them. Pinned
//! pieces are restricted to their pin line. King moves, every move made while
//! in check, and en-passant captures are verified by applying the move and
//! testing the mover's king. Castling arrives already fully checked.

use crate::game_state::chess_types::{square_bit, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::attacks::is_king_in_check;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_piece::generate_piece_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::move_generation::pins::pinned_map;
use crate::moves::move_description::Move;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> Vec<GeneratedMove> {
        let mut legal = Vec::with_capacity(48);
        filter_legal(position, |mv, after| {
            let position_after = after.unwrap_or_else(|| apply_move(position, &mv));
            legal.push(GeneratedMove { mv, position_after });
        });
        legal
    }
}

/// Pawns, then knights, bishops, rooks, queens, then the king.
pub fn pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_pawn_moves(position, &mut moves);
    generate_piece_moves(position, &mut moves);
    generate_king_moves(position, &mut moves);
    moves
}

pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut legal = Vec::with_capacity(48);
    filter_legal(position, |mv, _| legal.push(mv));
    legal
}

/// Feed every legal move to `emit`, along with the successor when the
/// filter already had to build it.
fn filter_legal(position: &Position, mut emit: impl FnMut(Move, Option<Position>)) {
    let side = position.side_to_move();
    assert!(
        position.king_square(side).is_some(),
        "legal move generation needs a {} king on the board",
        side.name()
    );

    let in_check = is_king_in_check(position, side);
    let pins = pinned_map(position, side);

    for mv in pseudo_legal_moves(position) {
        if in_check || mv.piece == PieceKind::King || mv.is_en_passant() {
            let after = apply_move(position, &mv);
            if !is_king_in_check(&after, side) {
                emit(mv, Some(after));
            }
            continue;
        }

        if let Some(line) = pins.allowed(mv.from) {
            if line & square_bit(mv.to) == 0 {
                continue;
            }
        }
        emit(mv, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn start_position_has_twenty_moves() {
        assert_eq!(legal_moves(&Position::new_game()).len(), 20);
    }

    #[test]
    fn generated_moves_carry_their_successor() {
        let position = Position::new_game();
        for generated in LegalMoveGenerator.generate_legal_moves(&position) {
            assert_eq!(generated.position_after, apply_move(&position, &generated.mv));
        }
    }

    #[test]
    fn pinned_bishop_has_no_moves_off_the_line() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN");
        let moves = legal_moves(&position);
        assert!(moves.iter().all(|mv| mv.from != sq("e2")));
    }

    #[test]
    fn pinned_rook_slides_along_the_pin_and_captures() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1").expect("FEN");
        let rook_targets: Vec<Square> = legal_moves(&position)
            .into_iter()
            .filter(|mv| mv.from == sq("e2"))
            .map(|mv| mv.to)
            .collect();
        assert_eq!(
            rook_targets,
            vec![sq("e3"), sq("e4"), sq("e5"), sq("e6"), sq("e7")]
        );
    }

    #[test]
    fn horizontal_en_passant_discovered_check_is_rejected() {
        let position = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").expect("FEN");
        assert!(legal_moves(&position).iter().all(|mv| !mv.is_en_passant()));
    }

    #[test]
    fn in_check_only_evasions_remain() {
        let position = Position::from_fen("4k3/8/8/8/8/8/3q4/R3K3 w Q - 0 1").expect("FEN");
        let moves = legal_moves(&position);
        // Rook moves and castling fall away; only Kf1 and Kxd2 are left.
        let targets: Vec<Square> = moves.iter().map(|mv| mv.to).collect();
        assert_eq!(targets, vec![sq("f1"), sq("d2")]);
        assert!(moves.iter().all(|mv| mv.piece == PieceKind::King));
        assert_eq!(moves[1].captured, Some(PieceKind::Queen));
    }

    #[test]
    #[should_panic(expected = "needs a White king")]
    fn missing_king_is_a_contract_violation() {
        let mut position = Position::new_game();
        position.remove_piece(4);
        legal_moves(&position);
    }
}
