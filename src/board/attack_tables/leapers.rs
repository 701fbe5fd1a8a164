//! Attack sets for leaper pieces (knights, kings, pawns), computed by
//! shifting the square's bitboard with file-wrap masks.

use crate::board::types::{Bitboard, Color};

const NOT_FILE_A: u64 = !Bitboard::FILE_A.0;
const NOT_FILE_AB: u64 = !(Bitboard::FILE_A.0 | Bitboard::FILE_B.0);
const NOT_FILE_H: u64 = !Bitboard::FILE_H.0;
const NOT_FILE_GH: u64 = !(Bitboard::FILE_G.0 | Bitboard::FILE_H.0);

#[inline]
pub(crate) const fn knight_attacks_from(bb: u64) -> u64 {
    ((bb << 17) & NOT_FILE_A)
        | ((bb << 15) & NOT_FILE_H)
        | ((bb << 10) & NOT_FILE_AB)
        | ((bb << 6) & NOT_FILE_GH)
        | ((bb >> 17) & NOT_FILE_H)
        | ((bb >> 15) & NOT_FILE_A)
        | ((bb >> 10) & NOT_FILE_GH)
        | ((bb >> 6) & NOT_FILE_AB)
}

#[inline]
pub(crate) const fn king_attacks_from(bb: u64) -> u64 {
    let row = bb | ((bb << 1) & NOT_FILE_A) | ((bb >> 1) & NOT_FILE_H);
    (row | (row << 8) | (row >> 8)) ^ bb
}

#[inline]
pub(crate) const fn pawn_attacks_from(bb: u64, color: Color) -> u64 {
    match color {
        Color::White => ((bb << 9) & NOT_FILE_A) | ((bb << 7) & NOT_FILE_H),
        Color::Black => ((bb >> 7) & NOT_FILE_A) | ((bb >> 9) & NOT_FILE_H),
    }
}

pub(crate) const fn knight_table() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = knight_attacks_from(1u64 << sq);
        sq += 1;
    }
    table
}

pub(crate) const fn king_table() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = king_attacks_from(1u64 << sq);
        sq += 1;
    }
    table
}

/// Indexed `[color][square]`: the squares a pawn of `color` attacks.
pub(crate) const fn pawn_table() -> [[u64; 64]; 2] {
    let mut table = [[0u64; 64]; 2];
    let mut sq = 0;
    while sq < 64 {
        table[0][sq] = pawn_attacks_from(1u64 << sq, Color::White);
        table[1][sq] = pawn_attacks_from(1u64 << sq, Color::Black);
        sq += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_counts() {
        let table = knight_table();
        assert_eq!(table[0].count_ones(), 2); // a1
        assert_eq!(table[7].count_ones(), 2); // h1
        assert_eq!(table[27].count_ones(), 8); // d4
        assert_eq!(table[57].count_ones(), 3); // b8
        // a1 -> b3, c2
        assert_eq!(table[0], (1 << 17) | (1 << 10));
    }

    #[test]
    fn king_counts() {
        let table = king_table();
        assert_eq!(table[0].count_ones(), 3);
        assert_eq!(table[4].count_ones(), 5);
        assert_eq!(table[36].count_ones(), 8);
        assert_eq!(table[63].count_ones(), 3);
    }

    #[test]
    fn pawn_attacks_do_not_wrap() {
        let table = pawn_table();
        // White pawn on a2 attacks only b3
        assert_eq!(table[0][8], 1 << 17);
        // White pawn on h2 attacks only g3
        assert_eq!(table[0][15], 1 << 22);
        // Black pawn on e5 attacks d4 and f4
        assert_eq!(table[1][36], (1 << 27) | (1 << 29));
        // Pawns on the last rank attack nothing further
        assert_eq!(table[0][60], 0);
    }
}
