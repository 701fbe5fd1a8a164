//! Magic bitboard generation for sliding pieces.
//!
//! For every square the relevant occupancy mask (the piece's rays minus the
//! board edge) is enumerated subset by subset, and a random sparse multiplier
//! is tried until `((occ & mask) * magic) >> shift` sends every subset with a
//! distinct attack set to a distinct slot.

use rand::Rng;

use crate::board::error::TableInitError;
use crate::board::types::Square;

/// Bounded retry budget per square; exhausting it is a fatal startup error.
pub(crate) const MAX_MAGIC_ATTEMPTS: u64 = 1 << 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    const fn directions(self) -> [(i8, i8); 4] {
        match self {
            Slider::Bishop => [(1, 1), (1, -1), (-1, 1), (-1, -1)],
            Slider::Rook => [(1, 0), (-1, 0), (0, 1), (0, -1)],
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Slider::Bishop => "bishop",
            Slider::Rook => "rook",
        }
    }
}

/// Per-square hashing parameters into the shared attack vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct MagicEntry {
    pub mask: u64,
    pub magic: u64,
    pub shift: u32,
    pub offset: usize,
}

impl MagicEntry {
    #[inline(always)]
    pub fn index(&self, occupancy: u64) -> usize {
        let hashed = (occupancy & self.mask).wrapping_mul(self.magic) >> self.shift;
        self.offset + hashed as usize
    }
}

/// Magic entries for all 64 squares of one slider family, with every
/// square's attack slots packed into a single vector.
#[derive(Clone, Debug)]
pub(crate) struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    pub fn generate<R: Rng>(slider: Slider, rng: &mut R) -> Result<Self, TableInitError> {
        let mut entries = [MagicEntry::default(); 64];
        let mut attacks = Vec::new();

        for sq in Square::all() {
            let (magic, shift, slots) = find_magic(slider, sq, rng)?;
            entries[sq.index()] = MagicEntry {
                mask: relevant_mask(slider, sq),
                magic,
                shift,
                offset: attacks.len(),
            };
            attacks.extend_from_slice(&slots);
        }

        Ok(MagicTable { entries, attacks })
    }

    #[inline(always)]
    pub fn attacks(&self, sq: Square, occupancy: u64) -> u64 {
        let entry = &self.entries[sq.index()];
        self.attacks[entry.index(occupancy)]
    }

    pub fn entry(&self, sq: Square) -> &MagicEntry {
        &self.entries[sq.index()]
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }
}

/// Squares whose occupancy can change the slider's attacks from `sq`:
/// every ray square except the last one before the edge.
pub(crate) fn relevant_mask(slider: Slider, sq: Square) -> u64 {
    let mut mask = 0u64;
    for (dr, df) in slider.directions() {
        let mut rank = sq.rank() as i8 + dr;
        let mut file = sq.file() as i8 + df;
        while on_board(rank + dr, file + df) {
            mask |= 1u64 << (rank * 8 + file);
            rank += dr;
            file += df;
        }
    }
    mask
}

/// Attack set from `sq` found by walking each ray until a blocker or the edge.
pub(crate) fn ray_attacks(slider: Slider, sq: Square, occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    for (dr, df) in slider.directions() {
        let mut rank = sq.rank() as i8 + dr;
        let mut file = sq.file() as i8 + df;
        while on_board(rank, file) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            rank += dr;
            file += df;
        }
    }
    attacks
}

#[inline]
fn on_board(rank: i8, file: i8) -> bool {
    (0..8).contains(&rank) && (0..8).contains(&file)
}

/// All subsets of `mask`, starting with the empty set (carry-rippler).
pub(crate) fn occupancy_subsets(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

/// Sparse candidates succeed far more often than uniform ones.
#[inline]
fn sparse_random<R: Rng>(rng: &mut R) -> u64 {
    rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>()
}

fn find_magic<R: Rng>(
    slider: Slider,
    sq: Square,
    rng: &mut R,
) -> Result<(u64, u32, Vec<u64>), TableInitError> {
    let mask = relevant_mask(slider, sq);
    let bits = mask.count_ones();
    let shift = 64 - bits;
    let occupancies = occupancy_subsets(mask);
    let reference: Vec<u64> = occupancies
        .iter()
        .map(|&occ| ray_attacks(slider, sq, occ))
        .collect();

    let size = 1usize << bits;
    let mut slots = vec![0u64; size];
    // Slot `i` is valid for the current attempt iff `epoch[i] == attempt`.
    let mut epoch = vec![0u64; size];

    for attempt in 1..=MAX_MAGIC_ATTEMPTS {
        let magic = sparse_random(rng);
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        let mut collision = false;
        for (&occ, &attack) in occupancies.iter().zip(&reference) {
            let idx = (occ.wrapping_mul(magic) >> shift) as usize;
            if epoch[idx] != attempt {
                epoch[idx] = attempt;
                slots[idx] = attack;
            } else if slots[idx] != attack {
                collision = true;
                break;
            }
        }

        if !collision {
            log::trace!(
                "{} magic for {} found after {} attempts",
                slider.name(),
                sq,
                attempt
            );
            return Ok((magic, shift, slots));
        }
    }

    Err(TableInitError::MagicNotFound {
        slider: slider.name(),
        square: sq,
        attempts: MAX_MAGIC_ATTEMPTS,
    })
}
