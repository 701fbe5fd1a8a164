//! Hashes of the positions preceding the current one, for repetition checks.

/// One entry per move made, pushed by `make_move` and popped by
/// `unmake_move`, so the stack always mirrors the game path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RepetitionHistory {
    keys: Vec<u64>,
}

impl RepetitionHistory {
    pub(crate) fn new() -> Self {
        RepetitionHistory {
            keys: Vec::with_capacity(256),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, hash: u64) {
        self.keys.push(hash);
    }

    #[inline]
    pub(crate) fn pop(&mut self) {
        self.keys.pop();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Count earlier occurrences of `hash` with the same side to move.
    ///
    /// Only the last `window` plies are scanned (positions before the last
    /// capture or pawn move cannot recur), and never entries below `floor`.
    pub(crate) fn occurrences(&self, hash: u64, window: usize, floor: usize) -> usize {
        let len = self.keys.len();
        let lowest = len.saturating_sub(window).max(floor);
        let mut count = 0;
        let mut idx = len;
        while idx >= lowest + 2 {
            idx -= 2;
            if self.keys[idx] == hash {
                count += 1;
            }
        }
        count
    }
}
