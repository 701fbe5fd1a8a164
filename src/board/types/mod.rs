//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - board square stored as its 0-63 index
//! - `Bitboard` - 64-bit square set
//! - `Move` and `MoveList` - packed move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MoveListIntoIter, MAX_PLY};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use castling::castle_bit;
pub(crate) use moves::ScoredMoveList;
pub(crate) use piece::PROMOTION_PIECES;
