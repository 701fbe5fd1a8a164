//! Zobrist hashing keys.
//!
//! One random key per (color, piece, square), per en-passant file, per
//! castling-rights combination, plus one for black to move. A position's
//! hash is the XOR of the keys describing it, so every state change is a
//! constant number of XORs.

use rand::Rng;

use crate::board::{CastlingRights, Color, Piece, Square};

#[derive(Clone, Debug)]
pub struct ZobristKeys {
    // pieces[color][piece][square]
    pieces: [[[u64; 64]; 6]; 2],
    en_passant: [u64; 8],
    castling: [u64; CastlingRights::COMBINATIONS],
    black_to_move: u64,
}

impl ZobristKeys {
    /// Draw every key from `rng`. The same seed always yields the same keys.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in &mut pieces {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }

        let mut castling = [0u64; CastlingRights::COMBINATIONS];
        for key in &mut castling {
            *key = rng.gen();
        }

        ZobristKeys {
            pieces,
            en_passant,
            castling,
            black_to_move: rng.gen(),
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.pieces[color.index()][piece.index()][sq.index()]
    }

    /// Key for an en-passant target; only its file matters
    #[inline(always)]
    #[must_use]
    pub fn en_passant(&self, target: Square) -> u64 {
        self.en_passant[target.file()]
    }

    #[inline(always)]
    #[must_use]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.index()]
    }

    #[inline(always)]
    #[must_use]
    pub fn black_to_move(&self) -> u64 {
        self.black_to_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_keys() {
        let a = ZobristKeys::generate(&mut StdRng::seed_from_u64(99));
        let b = ZobristKeys::generate(&mut StdRng::seed_from_u64(99));
        assert_eq!(
            a.piece(Color::Black, Piece::Queen, Square::D8),
            b.piece(Color::Black, Piece::Queen, Square::D8)
        );
        assert_eq!(a.black_to_move(), b.black_to_move());
    }

    #[test]
    fn keys_are_distinct() {
        let keys = ZobristKeys::generate(&mut StdRng::seed_from_u64(1));
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in Square::all() {
                    assert!(seen.insert(keys.piece(color, piece, sq)));
                }
            }
        }
        for key in keys.castling.iter().chain(&keys.en_passant) {
            assert!(seen.insert(*key));
        }
        assert!(seen.insert(keys.black_to_move()));
    }
}
