//! Bitboard chess engine core: magic attack tables, legal move generation,
//! Zobrist hashing and an alpha-beta search with a transposition table.
//!
//! ```
//! use chess_core::engine::Engine;
//! use chess_core::board::SearchLimits;
//!
//! let mut engine = Engine::new();
//! engine.set_position("startpos", &["e2e4", "e7e5"]).unwrap();
//! let result = engine.find_best_move(&SearchLimits::depth(3));
//! assert!(result.best_move.is_some());
//! ```

pub mod board;
pub mod engine;
mod perft;
pub mod sync;
pub mod tables;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use engine::Engine;
pub use tables::Tables;
pub use tt::TranspositionTable;
