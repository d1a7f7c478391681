//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by the parsing boundary
//! (FEN, move text, engine options) and by the front ends that sit on top of
//! it. The search itself never fails: it only ever sees positions it built.
//!
//! Usage guidelines:
//! - Input-related variants (`InvalidFen`, `InvalidMoveString`,
//!   `IllegalMove`, ...) are recoverable; callers report them and prompt
//!   again. State is never mutated when one of these is returned.
//! - `InvalidPieceChar` coming from a compiled-in constant indicates a bug.

use thiserror::Error;

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// A board description contained a character that is not a piece,
    /// an empty-square marker or a padding marker.
    #[error("invalid piece character '{0}'")]
    InvalidPieceChar(char),

    /// FEN-like board description had malformed structure.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square name outside `a1..h8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text of the wrong length or with out-of-range file/rank.
    #[error("invalid move string: {0}")]
    InvalidMoveString(String),

    /// Well-formed move text that the position does not generate.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// An engine option value could not be interpreted.
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },

    /// Error raised by a front end while reading or writing its stream.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ChessErrors {
    fn from(err: std::io::Error) -> Self {
        ChessErrors::Io(err.to_string())
    }
}

pub type ChessResult<T> = Result<T, ChessErrors>;
