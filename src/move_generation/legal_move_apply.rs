use crate::game_state::chess_rules::{castle_path, rights_touched_by, CastleSide};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_description::{Move, MoveKind};

/// Apply a pseudo-legal move and return the successor position.
///
/// The input is never touched. A move that does not match the board (wrong
/// piece on `from`, capture bookkeeping that disagrees with `to`) is a bug in
/// the caller and panics.
pub fn apply_move(position: &Position, mv: &Move) -> Position {
    let mover = position.side_to_move();
    let enemy = mover.opposite();

    let mut next = position.clone();

    let moved = next
        .remove_piece(mv.from)
        .unwrap_or_else(|| panic!("apply_move {mv}: no piece on the source square"));
    assert!(
        moved == Piece::new(mover, mv.piece),
        "apply_move {mv}: source holds {moved:?}, expected {:?} {:?}",
        mover,
        mv.piece
    );

    // Captures.
    let capture_square = match mv.kind {
        MoveKind::EnPassant => match mover {
            Color::White => mv.to - 8,
            Color::Black => mv.to + 8,
        },
        _ => mv.to,
    };
    let captured = next.remove_piece(capture_square);
    match (captured, mv.captured) {
        (None, None) => {}
        (Some(piece), Some(kind)) if piece.color == enemy && piece.kind == kind => {}
        (actual, expected) => panic!(
            "apply_move {mv}: capture mismatch, board has {actual:?}, move expects {expected:?}"
        ),
    }
    if mv.is_en_passant() {
        assert!(
            next.piece_at(mv.to).is_none(),
            "apply_move {mv}: en-passant target square is occupied"
        );
    }

    next.put_piece(mv.to, Piece::new(mover, mv.piece_after()));

    // Castling rook.
    let castle_side = match mv.kind {
        MoveKind::CastleKingside => Some(CastleSide::Kingside),
        MoveKind::CastleQueenside => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castle_side {
        let path = castle_path(mover, side);
        let rook = next
            .remove_piece(path.rook_from)
            .unwrap_or_else(|| panic!("apply_move {mv}: castling rook missing"));
        assert!(
            rook == Piece::new(mover, PieceKind::Rook),
            "apply_move {mv}: castling corner holds {rook:?}"
        );
        next.put_piece(path.rook_to, rook);
    }

    // Rights.
    next.castling_rights &= !(rights_touched_by(mv.from) | rights_touched_by(mv.to));
    if mv.piece == PieceKind::King {
        next.castling_rights &= !mover.castling_mask();
    }

    next.en_passant_square = match mv.kind {
        MoveKind::DoublePawnPush => Some((mv.from + mv.to) / 2),
        _ => None,
    };

    // Clocks.
    if mv.piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy;

    debug_assert!(next.is_consistent(), "apply_move {mv}: inconsistent successor");
    next
}
