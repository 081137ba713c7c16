use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::leaper_attacks::pawn_attacks;
use crate::moves::move_description::{Move, MoveKind};

/// Pseudo-legal pawn moves for the side to move: pushes, captures,
/// promotions and en passant, in ascending source-square order.
pub fn generate_pawn_moves(position: &Position, out: &mut Vec<Move>) {
    let side = position.side_to_move();
    let enemy_occ = position.occupancy(side.opposite());
    let empty = !position.occupied();

    let mut pawns = position.pieces(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        let one_step = match side {
            Color::White => from + 8,
            Color::Black => from - 8,
        };
        if square_bit(one_step) & empty != 0 {
            push_pawn_move(out, side, from, one_step, None);

            if rank_of(from) == side.pawn_start_rank() {
                let two_step = match side {
                    Color::White => from + 16,
                    Color::Black => from - 16,
                };
                if square_bit(two_step) & empty != 0 {
                    out.push(Move::new(
                        from,
                        two_step,
                        PieceKind::Pawn,
                        None,
                        MoveKind::DoublePawnPush,
                    ));
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        let mut captures = attacks & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            let captured = position.piece_at(to).map(|piece| piece.kind);
            push_pawn_move(out, side, from, to, captured);
            captures &= captures - 1;
        }

        if let Some(target) = en_passant_target(position) {
            if attacks & square_bit(target) != 0 {
                out.push(Move::new(
                    from,
                    target,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    MoveKind::EnPassant,
                ));
            }
        }

        pawns &= pawns - 1;
    }
}

/// The en-passant square, if an enemy pawn really stands behind it.
fn en_passant_target(position: &Position) -> Option<Square> {
    let target = position.en_passant_square()?;
    let side = position.side_to_move();
    let victim = match side {
        Color::White => target - 8,
        Color::Black => target + 8,
    };
    let victim_is_pawn =
        position.piece_at(victim) == Some(Piece::new(side.opposite(), PieceKind::Pawn));
    if victim_is_pawn && position.piece_at(target).is_none() {
        Some(target)
    } else {
        None
    }
}

fn push_pawn_move(
    out: &mut Vec<Move>,
    side: Color,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
) {
    if rank_of(to) == side.promotion_rank() {
        for promo in PROMOTION_KINDS {
            out.push(Move::new(
                from,
                to,
                PieceKind::Pawn,
                captured,
                MoveKind::Promotion(promo),
            ));
        }
    } else {
        out.push(Move::normal(from, to, PieceKind::Pawn, captured));
    }
}
