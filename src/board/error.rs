//! Error types for board operations.

use std::fmt;

use super::Color;

/// Error type for square-name parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Not letters followed by a 1-based rank
    InvalidNotation { notation: String },
    /// Well-formed name that lies outside the board
    OffBoard { notation: String },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
            PositionError::OffBoard { notation } => {
                write!(f, "Square '{notation}' is off the board")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Ranks of differing widths
    RaggedRank { rank: usize, files: usize, expected: usize },
    /// Board dimensions outside 1..=16
    UnsupportedSize { width: usize, height: usize },
    /// Invalid castling character, or a castling flag without its king and rook
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Invalid half-move or full-move counter
    InvalidCounter { found: String },
    /// Each side needs exactly one king
    KingCount { color: Color, found: usize },
    /// The side that just moved is left in check
    OpponentInCheck { color: Color },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::RaggedRank {
                rank,
                files,
                expected,
            } => {
                write!(f, "Rank {rank} has {files} files, expected {expected}")
            }
            FenError::UnsupportedSize { width, height } => {
                write!(f, "Unsupported board size {width}x{height}")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}'")
            }
            FenError::KingCount { color, found } => {
                write!(f, "{color} must have exactly one king, found {found}")
            }
            FenError::OpponentInCheck { color } => {
                write!(f, "{color} is in check but not on move")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for playing a move by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Name does not have the shape `<from><to>[promotion]`
    Malformed { name: String },
    /// Well-formed name that is not a legal move in this position
    Illegal { name: String },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Malformed { name } => write!(f, "Malformed move '{name}'"),
            MoveError::Illegal { name } => write!(f, "Illegal move '{name}'"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Error type for deriving a mutable tier from an authoritative board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The side has no king on the board
    MissingKing { color: Color },
    /// The tier only supports a fixed geometry
    UnsupportedGeometry { width: u8, height: u8 },
    /// Castling flags with the king off its standard home square
    UnsupportedCastling { color: Color },
    /// More pieces of one kind than the representation can hold
    CapacityExceeded { pieces: usize, capacity: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::MissingKing { color } => write!(f, "{color} has no king"),
            BoardError::UnsupportedGeometry { width, height } => {
                write!(f, "Unsupported board geometry {width}x{height}, expected 8x8")
            }
            BoardError::UnsupportedCastling { color } => {
                write!(f, "{color} castling rights require the king on the e-file")
            }
            BoardError::CapacityExceeded { pieces, capacity } => {
                write!(f, "{pieces} pieces exceed capacity {capacity}")
            }
        }
    }
}

impl std::error::Error for BoardError {}
