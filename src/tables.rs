//! Startup-built lookup tables shared by every board.
//!
//! `Tables` bundles the attack tables and Zobrist keys. It is immutable
//! once built and handed to boards as `Arc<Tables>`, so independent engines
//! in one process may share one instance or each build their own.

use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{AttackTables, TableInitError};
use crate::zobrist::ZobristKeys;

/// Seed behind [`Tables::shared`]
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE_F00D_0001;

static SHARED: Lazy<Arc<Tables>> = Lazy::new(|| match Tables::generate(DEFAULT_SEED) {
    Ok(tables) => Arc::new(tables),
    Err(err) => panic!("lookup table initialisation failed: {err}"),
});

#[derive(Debug)]
pub struct Tables {
    attacks: AttackTables,
    zobrist: ZobristKeys,
}

impl Tables {
    /// Build attack tables and Zobrist keys from one seeded RNG.
    ///
    /// # Errors
    ///
    /// Fails if magic-number search exhausts its retry budget for any square.
    pub fn generate(seed: u64) -> Result<Self, TableInitError> {
        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(seed);
        let attacks = AttackTables::generate(&mut rng)?;
        let zobrist = ZobristKeys::generate(&mut rng);
        log::info!(
            "lookup tables generated in {:?} (seed {seed:#x})",
            started.elapsed()
        );
        Ok(Tables { attacks, zobrist })
    }

    /// Process-wide tables built on first use from [`DEFAULT_SEED`].
    ///
    /// # Panics
    ///
    /// Panics on first use if table generation fails; without correct
    /// slider attacks no move can be generated.
    #[must_use]
    pub fn shared() -> Arc<Tables> {
        Arc::clone(&SHARED)
    }

    #[inline(always)]
    #[must_use]
    pub fn attacks(&self) -> &AttackTables {
        &self.attacks
    }

    #[inline(always)]
    #[must_use]
    pub fn zobrist(&self) -> &ZobristKeys {
        &self.zobrist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Bitboard, Square};

    #[test]
    fn shared_is_a_single_instance() {
        assert!(Arc::ptr_eq(&Tables::shared(), &Tables::shared()));
    }

    #[test]
    fn independent_seeds_agree_on_attacks() {
        let other = Tables::generate(42).unwrap();
        let shared = Tables::shared();
        let occ = Bitboard(0x0042_0018_2400_1000);
        for sq in Square::all() {
            assert_eq!(other.attacks().queen(sq, occ), shared.attacks().queen(sq, occ));
        }
    }
}
