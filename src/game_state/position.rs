//! Bitboard position with a mailbox mirror.
//!
//! `Position` is the central model of the crate. It stores one bitboard per
//! (color, piece kind), occupancy caches, a derived square-to-piece array,
//! and the turn/rights/clock state. Every placement change goes through
//! `put_piece` / `remove_piece`, which keep the three board views in step.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castle_path, CastleSide, BACK_RANK};
use crate::game_state::chess_types::*;
use crate::game_state::mailbox::Mailbox;
use crate::move_generation::attacks::is_king_in_check;
use crate::moves::leaper_attacks::pawn_attacks;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    // [color][piece_kind]
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupancy_by_color: [Bitboard; 2],
    pub(crate) occupancy_all: Bitboard,
    pub(crate) board: [Option<Piece>; 64],

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

/// Everything that identifies a position for repetition purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    pieces: [[Bitboard; 6]; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// Board with no pieces, White to move, no rights.
    pub const fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Standard starting setup.
    pub fn new_game() -> Self {
        let mut position = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            position.put_piece(square_at(file, 0), Piece::new(Color::White, *kind));
            position.put_piece(square_at(file, 1), Piece::new(Color::White, PieceKind::Pawn));
            position.put_piece(square_at(file, 6), Piece::new(Color::Black, PieceKind::Pawn));
            position.put_piece(square_at(file, 7), Piece::new(Color::Black, *kind));
        }
        position.castling_rights = CASTLE_ALL;
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Rebuild a position from its transport form plus the state the mailbox
    /// does not carry. Rights whose king or rook is off its home square are
    /// dropped.
    pub fn from_mailbox(
        mailbox: &Mailbox,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
    ) -> ChessResult<Self> {
        let mut position = Self::empty();
        for (square, piece) in mailbox.iter() {
            if let Some(piece) = piece {
                position.put_piece(square, piece);
            }
        }
        position.side_to_move = side_to_move;
        position.castling_rights = castling_rights & CASTLE_ALL;
        position.en_passant_square = en_passant_square;

        position
            .validate_placement()
            .map_err(ChessError::InvalidMailbox)?;
        position
            .validate_en_passant()
            .map_err(ChessError::InvalidMailbox)?;
        position.drop_unbacked_castling_rights();
        Ok(position)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        debug_assert!(square < 64, "square index out of bounds: {square}");
        self.board[square as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Transport snapshot of the board.
    #[inline]
    pub fn mailbox(&self) -> Mailbox {
        Mailbox::from_squares(self.board)
    }

    /// The en-passant square only counts when a pawn of the side to move
    /// stands next to the pushed pawn.
    pub fn repetition_key(&self) -> RepetitionKey {
        let mover = self.side_to_move;
        let en_passant_square = self
            .en_passant_square
            .filter(|&sq| pawn_attacks(mover.opposite(), sq) & self.pieces(mover, PieceKind::Pawn) != 0);
        RepetitionKey {
            pieces: self.pieces,
            side_to_move: mover,
            castling_rights: self.castling_rights,
            en_passant_square,
        }
    }

    /// Colour-swapped copy with ranks mirrored, so White's position becomes
    /// Black's and vice versa.
    pub fn mirrored(&self) -> Self {
        let mut out = Self::empty();
        for square in 0..64u8 {
            if let Some(piece) = self.piece_at(square) {
                out.put_piece(square ^ 56, Piece::new(piece.color.opposite(), piece.kind));
            }
        }
        out.side_to_move = self.side_to_move.opposite();
        out.castling_rights = ((self.castling_rights & 0b0011) << 2) | ((self.castling_rights >> 2) & 0b0011);
        out.en_passant_square = self.en_passant_square.map(|sq| sq ^ 56);
        out.halfmove_clock = self.halfmove_clock;
        out.fullmove_number = self.fullmove_number;
        out
    }

    /// Bitboards never overlap and both caches agree with them.
    pub fn is_consistent(&self) -> bool {
        let mut seen = 0u64;
        for color in Color::ALL {
            let mut color_occ = 0u64;
            for kind in ALL_PIECE_KINDS {
                let bb = self.pieces(color, kind);
                if seen & bb != 0 {
                    return false;
                }
                seen |= bb;
                color_occ |= bb;

                let mut bits = bb;
                while bits != 0 {
                    let sq = bits.trailing_zeros() as usize;
                    if self.board[sq] != Some(Piece::new(color, kind)) {
                        return false;
                    }
                    bits &= bits - 1;
                }
            }
            if color_occ != self.occupancy(color) {
                return false;
            }
        }

        let mailbox_count = self.board.iter().filter(|p| p.is_some()).count();
        seen == self.occupancy_all && mailbox_count == seen.count_ones() as usize
    }

    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(self.board[square as usize].is_none(), "square {square} already occupied");
        let bit = square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.occupancy_by_color[piece.color.index()] |= bit;
        self.occupancy_all |= bit;
        self.board[square as usize] = Some(piece);
    }

    pub(crate) fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.board[square as usize].take()?;
        let bit = !square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] &= bit;
        self.occupancy_by_color[piece.color.index()] &= bit;
        self.occupancy_all &= bit;
        Some(piece)
    }

    /// Exactly one king per side, no pawns on the first or last rank, and
    /// the side that just moved is not left in check.
    pub(crate) fn validate_placement(&self) -> Result<(), String> {
        const BACK_RANKS: Bitboard = 0xFF00_0000_0000_00FF;
        for color in Color::ALL {
            let kings = self.pieces(color, PieceKind::King).count_ones();
            if kings != 1 {
                return Err(format!("{} has {kings} kings, expected exactly one", color.name()));
            }
            if self.pieces(color, PieceKind::Pawn) & BACK_RANKS != 0 {
                return Err(format!("{} has a pawn on a back rank", color.name()));
            }
        }
        let waiting = self.side_to_move.opposite();
        if is_king_in_check(self, waiting) {
            return Err(format!(
                "{} is in check but it is {} to move",
                waiting.name(),
                self.side_to_move.name()
            ));
        }
        Ok(())
    }

    pub(crate) fn validate_en_passant(&self) -> Result<(), String> {
        let Some(square) = self.en_passant_square else {
            return Ok(());
        };
        let expected_rank = match self.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        if square >= 64 || rank_of(square) != expected_rank {
            return Err(format!("en-passant square {square} is not on the expected rank"));
        }
        Ok(())
    }

    pub(crate) fn drop_unbacked_castling_rights(&mut self) {
        for color in Color::ALL {
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                let path = castle_path(color, side);
                let king_home = self.piece_at(path.king_from) == Some(Piece::new(color, PieceKind::King));
                let rook_home = self.piece_at(path.rook_from) == Some(Piece::new(color, PieceKind::Rook));
                if !(king_home && rook_home) {
                    self.castling_rights &= !path.right;
                }
            }
        }
    }
}
