//! Triangular principal variation table.
//!
//! Row `ply` holds the best line found from that ply downward, stored
//! relative to the row (index 0 is the move played at `ply`).

use crate::board::{Move, MAX_PLY};

const ROWS: usize = MAX_PLY + 1;

#[derive(Clone, Debug)]
pub struct PvTable {
    lines: Vec<[Move; ROWS]>,
    lengths: [usize; ROWS],
}

impl Default for PvTable {
    fn default() -> Self {
        PvTable {
            lines: vec![[Move::NULL; ROWS]; ROWS],
            lengths: [0; ROWS],
        }
    }
}

impl PvTable {
    /// Forget the line at `ply`. Called on entry to every node.
    #[inline]
    pub fn clear(&mut self, ply: usize) {
        if let Some(len) = self.lengths.get_mut(ply) {
            *len = 0;
        }
    }

    /// `mv` improved alpha at `ply`: the new line is `mv` followed by the
    /// child's line.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply + 1 >= ROWS {
            return;
        }
        let child_len = self.lengths[ply + 1].min(ROWS - 1);
        let (head, tail) = self.lines.split_at_mut(ply + 1);
        let row = &mut head[ply];
        row[0] = mv;
        row[1..=child_len].copy_from_slice(&tail[0][..child_len]);
        self.lengths[ply] = child_len + 1;
    }

    #[must_use]
    pub fn line(&self, ply: usize) -> &[Move] {
        match (self.lines.get(ply), self.lengths.get(ply)) {
            (Some(row), Some(&len)) => &row[..len],
            _ => &[],
        }
    }
}
