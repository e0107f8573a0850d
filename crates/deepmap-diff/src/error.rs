//! Error types for the diff crate.

use std::fmt;

/// Which input of a comparison an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// A top-level input was a callable. Callables nested inside containers
    /// are skipped instead.
    #[error("invalid argument: function given as {side} input, value expected")]
    InvalidArgument { side: Side },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
