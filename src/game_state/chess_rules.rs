//! Fixed rule constants: starting layout and castling geometry.

use crate::game_state::chess_types::*;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank layout from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Half-moves without capture or pawn move after which a draw applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook.
    pub must_be_empty: Bitboard,
    /// Transit and destination squares of the king.
    pub king_path: [Square; 2],
}

const WHITE_KINGSIDE: CastlePath = CastlePath {
    right: CASTLE_WHITE_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    must_be_empty: square_bit(5) | square_bit(6),
    king_path: [5, 6],
};

const WHITE_QUEENSIDE: CastlePath = CastlePath {
    right: CASTLE_WHITE_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    must_be_empty: square_bit(1) | square_bit(2) | square_bit(3),
    king_path: [3, 2],
};

const BLACK_KINGSIDE: CastlePath = CastlePath {
    right: CASTLE_BLACK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    must_be_empty: square_bit(61) | square_bit(62),
    king_path: [61, 62],
};

const BLACK_QUEENSIDE: CastlePath = CastlePath {
    right: CASTLE_BLACK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    must_be_empty: square_bit(57) | square_bit(58) | square_bit(59),
    king_path: [59, 58],
};

#[inline]
pub const fn castle_path(color: Color, side: CastleSide) -> &'static CastlePath {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => &WHITE_KINGSIDE,
        (Color::White, CastleSide::Queenside) => &WHITE_QUEENSIDE,
        (Color::Black, CastleSide::Kingside) => &BLACK_KINGSIDE,
        (Color::Black, CastleSide::Queenside) => &BLACK_QUEENSIDE,
    }
}

/// Castling rights that disappear once anything moves from or onto `square`.
#[inline]
pub const fn rights_touched_by(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
