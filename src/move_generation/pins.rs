//! Absolute pin detection.
//!
//! A piece is pinned when it is the only piece between its own king and an
//! enemy slider that moves along that line. The pinned piece keeps the right
//! to move along the line, including capturing the pinner.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::slider_attacks::{ray_attacks, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMap {
    pinned: Bitboard,
    lines: [Bitboard; 64],
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            pinned: 0,
            lines: [0; 64],
        }
    }
}

impl PinMap {
    #[inline]
    pub fn pinned(&self) -> Bitboard {
        self.pinned
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pinned == 0
    }

    /// Squares the piece on `square` may still move to, or `None` if it is
    /// not pinned.
    #[inline]
    pub fn allowed(&self, square: Square) -> Option<Bitboard> {
        if self.pinned & square_bit(square) != 0 {
            Some(self.lines[square as usize])
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Bitboard)> + '_ {
        let mut bits = self.pinned;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let sq = bits.trailing_zeros() as Square;
            bits &= bits - 1;
            Some((sq, self.lines[sq as usize]))
        })
    }
}

/// Pins against the king of `color`. Empty when `color` has no king.
pub fn pinned_map(position: &Position, color: Color) -> PinMap {
    let mut map = PinMap::default();
    let Some(king) = position.king_square(color) else {
        return map;
    };

    let occupancy = position.occupied();
    let own = position.occupancy(color);
    let enemy = color.opposite();
    let queens = position.pieces(enemy, PieceKind::Queen);
    let orthogonal = position.pieces(enemy, PieceKind::Rook) | queens;
    let diagonal = position.pieces(enemy, PieceKind::Bishop) | queens;

    for direction in Direction::ALL {
        let first_hit = ray_attacks(king, direction, occupancy) & occupancy;
        if first_hit & own == 0 {
            continue;
        }

        // Look through the friendly blocker to the next piece on the ray.
        let line = ray_attacks(king, direction, occupancy & !first_hit);
        let second_hit = line & occupancy & !first_hit;
        let sliders = if direction.is_diagonal() {
            diagonal
        } else {
            orthogonal
        };
        if second_hit & sliders == 0 {
            continue;
        }

        let pinned_sq = first_hit.trailing_zeros() as Square;
        map.pinned |= first_hit;
        map.lines[pinned_sq as usize] = line;
    }

    map
}

#[cfg(test)]
mod tests {
    use super::pinned_map;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn bishop_pinned_on_file_cannot_leave_it() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN");
        let pins = pinned_map(&position, Color::White);

        assert_eq!(pins.pinned(), square_bit(sq("e2")));
        let line = pins.allowed(sq("e2")).expect("e2 should be pinned");
        for name in ["e2", "e3", "e4", "e5", "e6", "e7"] {
            assert_ne!(line & square_bit(sq(name)), 0, "{name} should be on the line");
        }
        assert_eq!(line & square_bit(sq("e8")), 0);
        assert_eq!(line & square_bit(sq("d3")), 0);
    }

    #[test]
    fn two_blockers_mean_no_pin() {
        let position = Position::from_fen("4k3/4r3/8/8/4N3/8/4B3/4K3 w - - 0 1").expect("FEN");
        assert!(pinned_map(&position, Color::White).is_empty());
    }

    #[test]
    fn wrong_slider_type_does_not_pin() {
        let position = Position::from_fen("4k3/4b3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN");
        assert!(pinned_map(&position, Color::White).is_empty());

        let diagonal = Position::from_fen("4k3/8/8/b7/8/8/3N4/4K3 w - - 0 1").expect("FEN");
        let pins = pinned_map(&diagonal, Color::White);
        assert_eq!(pins.pinned(), square_bit(sq("d2")));
        assert_eq!(pins.iter().count(), 1);
    }

    #[test]
    fn enemy_blocker_is_not_pinned_for_us() {
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4b3/4K3 w - - 0 1").expect("FEN");
        assert!(pinned_map(&position, Color::White).is_empty());
    }
}
