//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts against reference values
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `magic.rs` - Magic lookups against ray tracing
//! - `search.rs` - Search results and invariants
//! - `proptest.rs` - Property-based tests

mod perft;
mod search;

use crate::board::{Board, Move, Square};

pub(super) fn sq(text: &str) -> Square {
    text.parse().expect("valid square")
}

/// Legal move in coordinate notation, panicking if it is not playable.
pub(super) fn find_move(board: &mut Board, text: &str) -> Move {
    board
        .parse_move(text)
        .unwrap_or_else(|e| panic!("{text} should be legal: {e}"))
}
