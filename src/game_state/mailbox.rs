//! 64-square transport form of a board.
//!
//! A `Mailbox` carries piece placement only. It serializes as a flat list of
//! 64 integer codes (`Piece::code`, `-1` for empty) and has a compact text form
//! of 64 FEN characters with `.` for empty squares, both starting at a1.

use serde::{Deserialize, Serialize};

use crate::errors::ChessError;
use crate::game_state::chess_types::{Piece, Square};

pub const EMPTY_CODE: i8 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i8>", into = "Vec<i8>")]
pub struct Mailbox([Option<Piece>; 64]);

impl Default for Mailbox {
    fn default() -> Self {
        Self([None; 64])
    }
}

impl Mailbox {
    #[inline]
    pub(crate) fn from_squares(squares: [Option<Piece>; 64]) -> Self {
        Self(squares)
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        debug_assert!(square < 64, "square index out of bounds: {square}");
        self.0[square as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        debug_assert!(square < 64, "square index out of bounds: {square}");
        self.0[square as usize] = piece;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        self.0.iter().enumerate().map(|(sq, piece)| (sq as Square, *piece))
    }

    pub fn codes(&self) -> Vec<i8> {
        self.0
            .iter()
            .map(|piece| piece.map(Piece::code).unwrap_or(EMPTY_CODE))
            .collect()
    }

    pub fn from_codes(codes: &[i8]) -> Result<Self, ChessError> {
        if codes.len() != 64 {
            return Err(ChessError::InvalidMailbox(format!(
                "expected 64 squares, got {}",
                codes.len()
            )));
        }

        let mut squares = [None; 64];
        for (sq, &code) in codes.iter().enumerate() {
            squares[sq] = match code {
                EMPTY_CODE => None,
                _ => Some(Piece::from_code(code).ok_or_else(|| {
                    ChessError::InvalidMailbox(format!("unknown piece code {code} on square {sq}"))
                })?),
            };
        }
        Ok(Self(squares))
    }

    pub fn to_board_string(&self) -> String {
        self.0
            .iter()
            .map(|piece| piece.map(Piece::fen_char).unwrap_or('.'))
            .collect()
    }

    pub fn from_board_string(text: &str) -> Result<Self, ChessError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 64 {
            return Err(ChessError::InvalidMailbox(format!(
                "expected 64 characters, got {}",
                chars.len()
            )));
        }

        let mut squares = [None; 64];
        for (sq, ch) in chars.into_iter().enumerate() {
            if ch == '.' {
                continue;
            }
            squares[sq] = Some(Piece::from_fen_char(ch).ok_or_else(|| {
                ChessError::InvalidMailbox(format!("unknown piece character '{ch}'"))
            })?);
        }
        Ok(Self(squares))
    }
}

impl From<Mailbox> for Vec<i8> {
    fn from(mailbox: Mailbox) -> Self {
        mailbox.codes()
    }
}

impl TryFrom<Vec<i8>> for Mailbox {
    type Error = ChessError;

    fn try_from(codes: Vec<i8>) -> Result<Self, Self::Error> {
        Self::from_codes(&codes)
    }
}

#[cfg(test)]
mod tests {
    use super::Mailbox;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::game_state::position::Position;

    #[test]
    fn start_position_codes_follow_transport_layout() {
        let mailbox = Position::new_game().mailbox();
        let codes = mailbox.codes();
        assert_eq!(&codes[..8], &[3, 1, 2, 4, 5, 2, 1, 3]);
        assert_eq!(codes[8], 0);
        assert_eq!(codes[28], -1);
        assert_eq!(codes[60], 11);
    }

    #[test]
    fn json_form_is_a_flat_list_and_idempotent() {
        let mailbox = Position::new_game().mailbox();
        let json = serde_json::to_string(&mailbox).expect("mailbox should serialize");
        assert!(json.starts_with("[3,1,2,4,5,2,1,3,0"));

        let back: Mailbox = serde_json::from_str(&json).expect("mailbox should deserialize");
        assert_eq!(back, mailbox);
        assert_eq!(serde_json::to_string(&back).expect("serialize again"), json);
    }

    #[test]
    fn board_string_round_trips() {
        let mailbox = Position::new_game().mailbox();
        let text = mailbox.to_board_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("RNBQKBNRPPPPPPPP........"));
        assert_eq!(Mailbox::from_board_string(&text).expect("text should parse"), mailbox);
    }

    #[test]
    fn rejects_bad_lengths_and_codes() {
        assert!(serde_json::from_str::<Mailbox>("[1,2,3]").is_err());
        let mut codes = vec![-1i8; 64];
        codes[10] = 12;
        assert!(Mailbox::from_codes(&codes).is_err());
        assert!(Mailbox::from_board_string("x").is_err());
    }

    #[test]
    fn set_and_get_single_squares() {
        let mut mailbox = Mailbox::default();
        let queen = Piece::new(Color::White, PieceKind::Queen);
        mailbox.set(3, Some(queen));
        assert_eq!(mailbox.get(3), Some(queen));
        assert_eq!(mailbox.iter().filter(|(_, p)| p.is_some()).count(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "square index out of bounds")]
    fn set_rejects_off_board_squares() {
        Mailbox::default().set(64, None);
    }
}
