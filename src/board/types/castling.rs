//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

const ALL_CASTLING_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Rights that survive a move touching each square. A move clears every
/// right whose king or rook home square is its origin or destination.
const CASTLING_KEEP_MASK: [u8; 64] = {
    let mut mask = [ALL_CASTLING_RIGHTS; 64];
    mask[Square::A1.index()] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_Q;
    mask[Square::E1.index()] = ALL_CASTLING_RIGHTS & !(CASTLE_WHITE_K | CASTLE_WHITE_Q);
    mask[Square::H1.index()] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_K;
    mask[Square::A8.index()] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_Q;
    mask[Square::E8.index()] = ALL_CASTLING_RIGHTS & !(CASTLE_BLACK_K | CASTLE_BLACK_Q);
    mask[Square::H8.index()] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_K;
    mask
};

/// Castling rights represented as a 4-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// Number of distinct rights combinations
    pub const COMBINATIONS: usize = 16;

    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Remove a specific castling right
    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combination index (0-15), used for Zobrist keys
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rights remaining after a move between `from` and `to`
    #[inline]
    #[must_use]
    pub const fn after_move(self, from: Square, to: Square) -> Self {
        CastlingRights(self.0 & CASTLING_KEEP_MASK[from.index()] & CASTLING_KEEP_MASK[to.index()])
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

/// FEN letter for a right: `K`, `Q`, `k`, `q`
pub(crate) fn castle_bit(c: char) -> Option<u8> {
    match c {
        'K' => Some(CASTLE_WHITE_K),
        'Q' => Some(CASTLE_WHITE_Q),
        'k' => Some(CASTLE_BLACK_K),
        'q' => Some(CASTLE_BLACK_Q),
        _ => None,
    }
}

impl CastlingRights {
    pub(crate) fn insert_bit(&mut self, bit: u8) {
        self.0 |= bit & ALL_CASTLING_RIGHTS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_move_clears_both_rights() {
        let rights = CastlingRights::all().after_move(Square::E1, Square::F1);
        assert!(!rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn rook_capture_clears_victim_right() {
        // Something lands on h8 (the black king-side rook)
        let rights = CastlingRights::all().after_move(Square::B1, Square::H8);
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
        assert_eq!(rights.index(), 0b1011);
    }
}
