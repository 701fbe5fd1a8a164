//! Error types for board, table and engine operations.

use std::fmt;

use super::types::Square;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// FEN string has more than 6 fields
    TooManyParts { found: usize },
    /// Piece placement does not have exactly 8 ranks
    WrongRankCount { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// A rank does not describe exactly 8 files
    WrongFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Half-move clock or full-move number is not a number
    InvalidCounter { field: &'static str, found: String },
    /// A side does not have exactly one king
    WrongKingCount { color: &'static str, count: u32 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::TooManyParts { found } => {
                write!(f, "FEN must have at most 6 parts, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN piece placement must have 8 ranks, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { field, found } => {
                write!(f, "Invalid {field} '{found}' in FEN")
            }
            FenError::WrongKingCount { color, count } => {
                write!(f, "{color} has {count} kings, expected exactly 1")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square construction and parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    RankOutOfBounds { rank: usize },
    FileOutOfBounds { file: usize },
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Startup failure while building the lookup tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableInitError {
    /// No collision-free magic multiplier was found within the retry budget
    MagicNotFound {
        slider: &'static str,
        square: Square,
        attempts: u64,
    },
}

impl fmt::Display for TableInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableInitError::MagicNotFound {
                slider,
                square,
                attempts,
            } => write!(
                f,
                "No {slider} magic found for {square} after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for TableInitError {}

/// Error type for textual option updates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    UnknownOption { name: String },
    InvalidValue { name: String, value: String },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionError::UnknownOption { name } => write!(f, "Unknown option '{name}'"),
            OptionError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl std::error::Error for OptionError {}

/// Error type for position setup (FEN or start position plus move replay)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Command names neither `startpos` nor `fen`
    MissingPosition { command: String },
    Fen(FenError),
    Move(MoveParseError),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::MissingPosition { command } => {
                write!(f, "Expected 'startpos' or 'fen' in '{command}'")
            }
            PositionError::Fen(err) => write!(f, "{err}"),
            PositionError::Move(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PositionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PositionError::MissingPosition { .. } => None,
            PositionError::Fen(err) => Some(err),
            PositionError::Move(err) => Some(err),
        }
    }
}

impl From<FenError> for PositionError {
    fn from(err: FenError) -> Self {
        PositionError::Fen(err)
    }
}

impl From<MoveParseError> for PositionError {
    fn from(err: MoveParseError) -> Self {
        PositionError::Move(err)
    }
}
