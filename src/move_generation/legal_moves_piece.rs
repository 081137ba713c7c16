use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::knight_attacks;
use crate::moves::move_description::Move;
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};

/// Pseudo-legal knight, bishop, rook and queen moves for the side to move.
pub fn generate_piece_moves(position: &Position, out: &mut Vec<Move>) {
    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ] {
        generate_moves_for_kind(position, kind, out);
    }
}

fn generate_moves_for_kind(position: &Position, kind: PieceKind, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let own_occ = position.occupancy(side);
    let occupancy = position.occupied();

    let mut pieces = position.pieces(side, kind);
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        let attacks = match kind {
            PieceKind::Knight => knight_attacks(from),
            PieceKind::Bishop => bishop_attacks(from, occupancy),
            PieceKind::Rook => rook_attacks(from, occupancy),
            PieceKind::Queen => queen_attacks(from, occupancy),
            PieceKind::Pawn | PieceKind::King => unreachable!("not handled here"),
        };
        push_targets(position, from, kind, attacks & !own_occ, out);
        pieces &= pieces - 1;
    }
}

/// One move per set bit of `targets`, captures tagged from the board.
pub(crate) fn push_targets(
    position: &Position,
    from: Square,
    kind: PieceKind,
    mut targets: Bitboard,
    out: &mut Vec<Move>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let captured = position.piece_at(to).map(|piece| piece.kind);
        out.push(Move::normal(from, to, kind, captured));
        targets &= targets - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::generate_piece_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;

    #[test]
    fn start_position_has_only_knight_moves() {
        let mut moves = Vec::new();
        generate_piece_moves(&Position::new_game(), &mut moves);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.piece == PieceKind::Knight));
    }

    #[test]
    fn sliders_capture_the_first_blocker_only() {
        let position = Position::from_fen("4k3/8/8/3p4/8/8/8/R2QK3 w - - 0 1").expect("FEN");
        let mut moves = Vec::new();
        generate_piece_moves(&position, &mut moves);

        let rook_moves = moves.iter().filter(|mv| mv.piece == PieceKind::Rook).count();
        // a1 rook: b1, c1 and the a-file.
        assert_eq!(rook_moves, 9);

        let queen_captures: Vec<_> = moves
            .iter()
            .filter(|mv| mv.piece == PieceKind::Queen && mv.is_capture())
            .collect();
        assert_eq!(queen_captures.len(), 1);
        assert_eq!(queen_captures[0].to, 35);
        assert_eq!(queen_captures[0].captured, Some(PieceKind::Pawn));
    }
}
