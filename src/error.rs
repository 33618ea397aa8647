//! Construction-time errors.
//!
//! The vector arithmetic itself cannot fail; only building lookup tables and
//! loading residue or score buffers validates its input.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("substitution matrix has {size} symbols; the row lookup holds at most {max}")]
    MatrixTooLarge { size: usize, max: usize },

    #[error("substitution matrix expects {expected} scores, got {actual}")]
    MatrixShape { expected: usize, actual: usize },

    #[error("residue code {code} in lane {lane} is outside 0..32")]
    ResidueOutOfRange { lane: usize, code: u8 },

    #[error("buffer holds {actual} lanes, need {needed}")]
    BufferTooShort { needed: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ScoreError>;
