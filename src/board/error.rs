//! Error types for board operations.

use std::fmt;

/// Error type for FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewFields { found: usize },
    /// Invalid piece character in the position field
    InvalidPiece { char: char },
    /// Position field has the wrong number of ranks
    InvalidRankCount { found: usize },
    /// A rank describes more than eight files
    TooManyFiles { rank: usize },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "invalid piece character '{char}' in FEN")
            }
            FenError::InvalidRankCount { found } => {
                write!(f, "FEN position field has {found} ranks, expected 8")
            }
            FenError::TooManyFiles { rank } => {
                write!(f, "too many files in FEN rank {rank}")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "invalid castling character '{char}' in FEN")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for long-algebraic move token parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Token has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in the token
    InvalidSquare { notation: String },
    /// No legal move matches the token in the current position
    NoMatchingMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move token must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square notation in '{notation}'")
            }
            MoveParseError::NoMatchingMove { notation } => {
                write!(f, "no legal move matches '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}
