//! Chess board representation and game logic.
//!
//! Uses bitboards and magic attack lookups for move generation, and a
//! reversible make/unmake for search. Supports full chess rules including
//! castling, en passant, promotions and draw detection.
//!
//! # Example
//! ```
//! use chess_core::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
pub mod error;
pub mod eval;
mod fen;
mod history;
mod make_unmake;
mod movegen;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::AttackTables;
pub use error::{FenError, MoveParseError, OptionError, PositionError, SquareError, TableInitError};
pub use eval::{Evaluator, MaterialEvaluator};
pub use fen::STARTPOS_FEN;
pub use state::{Board, RepetitionScope, StateBackup};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece,
    Square, MAX_PLY,
};

pub use search::{
    find_best_move, search, SearchLimits, SearchParams, SearchResult, SearchState, MATE_SCORE,
    MATE_THRESHOLD,
};

pub(crate) use types::{castle_bit, ScoredMoveList, PROMOTION_PIECES};
