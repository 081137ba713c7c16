use crate::game_state::chess_rules::{castle_path, CastleSide};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::attacks::is_square_attacked;
use crate::move_generation::legal_moves_piece::push_targets;
use crate::moves::leaper_attacks::king_attacks;
use crate::moves::move_description::{Move, MoveKind};

/// King steps (pseudo-legal) followed by fully checked castling moves.
pub fn generate_king_moves(position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let Some(from) = position.king_square(side) else {
        return;
    };

    let targets = king_attacks(from) & !position.occupancy(side);
    push_targets(position, from, PieceKind::King, targets, out);

    generate_castling_moves(position, from, out);
}

fn generate_castling_moves(position: &Position, king_from: Square, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let enemy = side.opposite();

    for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
        let path = castle_path(side, castle_side);

        if !position.has_castling_right(path.right) || king_from != path.king_from {
            continue;
        }
        if position.piece_at(path.rook_from) != Some(Piece::new(side, PieceKind::Rook)) {
            continue;
        }
        if position.occupied() & path.must_be_empty != 0 {
            continue;
        }
        // Castling out of check is not allowed.
        if is_square_attacked(position, king_from, enemy) {
            return;
        }
        if path
            .king_path
            .iter()
            .any(|&sq| is_square_attacked(position, sq, enemy))
        {
            continue;
        }

        let kind = match castle_side {
            CastleSide::Kingside => MoveKind::CastleKingside,
            CastleSide::Queenside => MoveKind::CastleQueenside,
        };
        out.push(Move::new(king_from, path.king_to, PieceKind::King, None, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::position::Position;
    use crate::moves::move_description::Move;

    fn castles(fen: &str) -> Vec<Move> {
        let position = Position::from_fen(fen).expect("FEN");
        let mut moves = Vec::new();
        generate_king_moves(&position, &mut moves);
        moves.retain(|mv| mv.is_castle());
        moves
    }

    #[test]
    fn both_sides_available_on_an_open_back_rank() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").len(), 2);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1").len(), 2);
    }

    #[test]
    fn attacked_transit_or_destination_forbids_castling() {
        // f1 is covered by the rook on f8.
        let through = castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(through.len(), 1);
        assert_eq!(through[0].to, 2);

        // g1 is covered by the rook on g8.
        let into = castles("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(into.len(), 1);
        assert_eq!(into[0].to, 2);
    }

    #[test]
    fn attacked_b1_does_not_matter_for_queenside() {
        let moves = castles("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn no_castling_out_of_check_or_through_pieces() {
        assert!(castles("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
        assert!(castles("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").is_empty());
    }
}
