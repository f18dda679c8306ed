//! Error types for the coding pipeline.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodingError {
    /// There are no characters to build a tree from.
    #[error("input is empty, nothing to build a tree from")]
    EmptyInput,

    /// The text holds a character that has no leaf in the supplied index.
    #[error("character {0:?} has no leaf in the code map")]
    UnknownCharacter(char),

    /// The bit stream ended in the middle of a code.
    #[error("bit stream truncated inside a code after {consumed} bits")]
    TruncatedStream { consumed: usize },

    /// Heap operation on an empty queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    #[error("invalid bit character {0:?}, expected '0' or '1'")]
    InvalidBit(char),
}

pub type Result<T> = std::result::Result<T, CodingError>;
