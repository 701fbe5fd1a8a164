//! Attack tables for move generation.
//!
//! Leaper attacks (knight, king, pawn) are flat per-square tables. Slider
//! attacks use magic bitboards generated at startup from a seeded RNG.

mod leapers;
mod magic;

pub(crate) use magic::{occupancy_subsets, ray_attacks, relevant_mask, Slider};

use rand::Rng;

use self::magic::MagicTable;
use crate::board::error::TableInitError;
use crate::board::types::{Bitboard, Color, Square};

/// Immutable lookup from (square, occupancy) to attack bitboards.
#[derive(Clone, Debug)]
pub struct AttackTables {
    knight: [u64; 64],
    king: [u64; 64],
    pawn: [[u64; 64]; 2],
    bishop: MagicTable,
    rook: MagicTable,
}

impl AttackTables {
    /// Build all tables, searching bishop and rook magics with `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`TableInitError::MagicNotFound`] if any square's magic
    /// search exhausts its retry budget.
    pub fn generate<R: Rng>(rng: &mut R) -> Result<Self, TableInitError> {
        let bishop = MagicTable::generate(Slider::Bishop, rng)?;
        let rook = MagicTable::generate(Slider::Rook, rng)?;
        log::debug!(
            "magic tables ready: {} bishop slots, {} rook slots",
            bishop.len(),
            rook.len()
        );
        Ok(AttackTables {
            knight: leapers::knight_table(),
            king: leapers::king_table(),
            pawn: leapers::pawn_table(),
            bishop,
            rook,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn knight(&self, sq: Square) -> Bitboard {
        Bitboard(self.knight[sq.index()])
    }

    #[inline(always)]
    #[must_use]
    pub fn king(&self, sq: Square) -> Bitboard {
        Bitboard(self.king[sq.index()])
    }

    /// Squares attacked by a pawn of `color` standing on `sq`
    #[inline(always)]
    #[must_use]
    pub fn pawn(&self, color: Color, sq: Square) -> Bitboard {
        Bitboard(self.pawn[color.index()][sq.index()])
    }

    /// Bishop attacks; only occupancy on relevant squares affects the result
    #[inline(always)]
    #[must_use]
    pub fn bishop(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        Bitboard(self.bishop.attacks(sq, occupancy.0))
    }

    #[inline(always)]
    #[must_use]
    pub fn rook(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        Bitboard(self.rook.attacks(sq, occupancy.0))
    }

    #[inline]
    #[must_use]
    pub fn queen(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop(sq, occupancy) | self.rook(sq, occupancy)
    }

    pub(crate) fn relevant_mask(&self, slider: Slider, sq: Square) -> u64 {
        match slider {
            Slider::Bishop => self.bishop.entry(sq).mask,
            Slider::Rook => self.rook.entry(sq).mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Tables;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn rook_attacks_empty_board() {
        let tables = Tables::shared();
        let attacks = tables.attacks().rook(sq("e4"), Bitboard::EMPTY);
        let expected = (Bitboard::rank_mask(3) | Bitboard::file_mask(4)) & !sq("e4").bitboard();
        assert_eq!(attacks, expected);
    }

    #[test]
    fn bishop_attacks_with_blocker() {
        let tables = Tables::shared();
        let attacks = tables.attacks().bishop(sq("e4"), sq("g6").bitboard());
        assert!(attacks.contains(sq("g6")));
        assert!(!attacks.contains(sq("h7")));
        assert!(attacks.contains(sq("b1")));
        assert!(attacks.contains(sq("a8")));
        assert!(!attacks.contains(sq("e4")));
    }

    #[test]
    fn irrelevant_occupancy_is_ignored() {
        let tables = Tables::shared();
        let a = tables.attacks();
        let d4 = sq("d4");
        // Edge squares and off-ray squares must not change the lookup
        let noise = Bitboard::RANK_1 | Bitboard::RANK_8 | sq("e6").bitboard();
        assert_eq!(a.rook(d4, noise), a.rook(d4, Bitboard::EMPTY));
        assert_eq!(a.queen(d4, Bitboard::EMPTY).popcount(), 27);
    }
}
