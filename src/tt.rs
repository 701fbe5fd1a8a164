//! Transposition table for caching search results.
//!
//! A fixed-size array with one slot per index and an always-replace
//! policy: storing into an occupied slot overwrites it unconditionally.
//! It is a lossy cache owned by one search engine, so plain (non-atomic)
//! slots suffice.

use std::mem;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    // 0 is reserved for "empty slot"
    fn to_bits(self) -> u64 {
        match self {
            BoundType::Exact => 1,
            BoundType::LowerBound => 2,
            BoundType::UpperBound => 3,
        }
    }

    fn from_bits(v: u64) -> Option<Self> {
        match v & 0x3 {
            1 => Some(BoundType::Exact),
            2 => Some(BoundType::LowerBound),
            3 => Some(BoundType::UpperBound),
            _ => None,
        }
    }
}

/// Unpacked TT entry for reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        self.depth as u32
    }

    pub fn score(&self) -> i32 {
        self.score as i32
    }
}

/// Packed entry format:
/// - bits 0-23:  move (0 = no move)
/// - bits 24-31: depth
/// - bits 32-47: score (i16 as u16)
/// - bits 48-49: bound (0 = empty)
fn pack_entry(depth: u8, score: i16, bound_type: BoundType, best_move: Option<Move>) -> u64 {
    let mv = best_move.map_or(0, |m| m.as_u32() as u64);
    mv | ((depth as u64) << 24) | (((score as u16) as u64) << 32) | (bound_type.to_bits() << 48)
}

fn unpack_entry(data: u64) -> Option<TTEntry> {
    let bound_type = BoundType::from_bits(data >> 48)?;
    let mv_bits = (data & 0x00FF_FFFF) as u32;
    Some(TTEntry {
        depth: ((data >> 24) & 0xFF) as u8,
        score: ((data >> 32) & 0xFFFF) as u16 as i16,
        bound_type,
        best_move: (mv_bits != 0).then(|| Move::from_u32(mv_bits)),
    })
}

#[derive(Clone, Copy, Default)]
struct TTSlot {
    key: u64,
    data: u64,
}

pub struct TranspositionTable {
    slots: Vec<TTSlot>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes (rounded down to a
    /// power-of-two slot count, at least 1024 slots).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<TTSlot>();
        let wanted = size_mb.saturating_mul(1024 * 1024) / slot_size;
        let count = if wanted < 1024 {
            1024
        } else if wanted.is_power_of_two() {
            wanted
        } else {
            wanted.next_power_of_two() / 2
        };
        Self::with_slots(count)
    }

    /// Create a table with exactly `count` slots (rounded up to a power of two).
    #[must_use]
    pub fn with_slots(count: usize) -> Self {
        let count = count.max(1).next_power_of_two();
        TranspositionTable {
            slots: vec![TTSlot::default(); count],
            mask: count - 1,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Entry stored for exactly this hash, if its slot still holds it.
    #[inline]
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        let slot = &self.slots[self.index(hash)];
        if slot.key != hash {
            return None;
        }
        unpack_entry(slot.data)
    }

    /// Store an entry, replacing whatever occupied the slot.
    #[inline]
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let depth = depth.min(u8::MAX as u32) as u8;
        let score = score.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let idx = self.index(hash);
        self.slots[idx] = TTSlot {
            key: hash,
            data: pack_entry(depth, score, bound_type, best_move),
        };
    }

    /// Returns table fullness in per mille (0-1000), sampled from the first slots.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let occupied = self.slots[..sample]
            .iter()
            .filter(|slot| slot.data != 0)
            .count();
        ((occupied * 1000) / sample) as u32
    }

    pub fn clear(&mut self) {
        self.slots.fill(TTSlot::default());
    }
}
