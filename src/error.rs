//! Errors returned by tree construction and by the indexed operations.
//!
//! Every check runs before the tree is touched, so an `Err` always means
//! the tree is exactly as it was before the call.

use std::fmt;

/// Coarse classification of a [`SegTreeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The arguments are malformed independently of the tree's size.
    InvalidArgument,
    /// An index lies outside `0..len`.
    OutOfRange,
}

/// Error returned when a precondition of a tree operation does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegTreeError {
    /// Construction from an empty sequence, or with a length of zero.
    EmptySequence,
    /// A range whose left end lies past its right end.
    InvertedRange { left: usize, right: usize },
    /// An index outside the tree.
    OutOfRange { index: usize, len: usize },
}

impl SegTreeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SegTreeError::EmptySequence | SegTreeError::InvertedRange { .. } => {
                ErrorKind::InvalidArgument
            }
            SegTreeError::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

impl fmt::Display for SegTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegTreeError::EmptySequence => {
                write!(f, "cannot build a segment tree over an empty sequence")
            }
            SegTreeError::InvertedRange { left, right } => {
                write!(f, "inverted range: left {} is past right {}", left, right)
            }
            SegTreeError::OutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
        }
    }
}

impl std::error::Error for SegTreeError {}

pub type Result<T> = std::result::Result<T, SegTreeError>;
