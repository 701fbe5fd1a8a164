//! Move ordering memory: killer moves per ply and the history heuristic.
//!
//! Neither table affects the value of a search, only the order in which
//! moves are tried.

use super::constants::HISTORY_MAX;
use crate::board::{Color, Move, MAX_PLY};

const KILLER_SLOTS: usize = 2;

/// Quiet moves that caused a beta cutoff, remembered per ply
#[derive(Clone, Debug)]
pub struct KillerTable {
    slots: [[Move; KILLER_SLOTS]; MAX_PLY + 1],
}

impl Default for KillerTable {
    fn default() -> Self {
        KillerTable {
            slots: [[Move::NULL; KILLER_SLOTS]; MAX_PLY + 1],
        }
    }
}

impl KillerTable {
    #[inline]
    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |s| s[0])
    }

    #[inline]
    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(Move::NULL, |s| s[1])
    }

    /// Record a cutoff move; the previous primary slides to secondary.
    #[inline]
    pub fn update(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot[0] != mv {
            slot[1] = slot[0];
            slot[0] = mv;
        }
    }

    pub fn reset(&mut self) {
        self.slots = [[Move::NULL; KILLER_SLOTS]; MAX_PLY + 1];
    }
}

/// Cutoff counts indexed by `[color][piece][to]`
#[derive(Clone, Debug)]
pub struct HistoryTable {
    table: [[[i32; 64]; 6]; 2],
}

impl Default for HistoryTable {
    fn default() -> Self {
        HistoryTable {
            table: [[[0; 64]; 6]; 2],
        }
    }
}

impl HistoryTable {
    #[inline]
    #[must_use]
    pub fn score(&self, color: Color, mv: Move) -> i32 {
        self.table[color.index()][mv.piece().index()][mv.to().index()]
    }

    /// Credit a quiet move with a cutoff found at `depth` remaining plies.
    #[inline]
    pub fn update(&mut self, color: Color, mv: Move, depth: u32) {
        let bonus = (depth * depth).min(HISTORY_MAX as u32) as i32;
        let entry = &mut self.table[color.index()][mv.piece().index()][mv.to().index()];
        *entry = (*entry + bonus).min(HISTORY_MAX);
    }

    /// Halve every counter so older cutoffs weigh less.
    pub fn age(&mut self) {
        for value in self.table.iter_mut().flatten().flatten() {
            *value /= 2;
        }
    }

    pub fn reset(&mut self) {
        self.table = [[[0; 64]; 6]; 2];
    }
}
