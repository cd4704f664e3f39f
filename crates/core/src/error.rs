//! Error types for the simulation core.
//!
//! Only construction can fail. Once an [`crate::Engine`] exists, illegal moves
//! and rotations are rejected silently and game over is reported through
//! [`crate::Status`], never as an error.

use thiserror::Error;

use crate::types::PieceKind;

/// A rotation data text could not be parsed into four masks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 16 mask rows, found {found}")]
    Truncated { found: usize },
    #[error("unexpected data after the fourth orientation at line {line}")]
    TrailingData { line: usize },
    #[error("line {line} has {len} columns, expected at least 4")]
    ShortRow { line: usize, len: usize },
    #[error("orientation {orientation} has no filled cells")]
    EmptyMask { orientation: usize },
}

/// The rotation table is incomplete or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    #[error("no rotation data for piece {kind:?}")]
    Missing { kind: PieceKind },
    #[error("malformed rotation data for piece {kind:?}")]
    Malformed {
        kind: PieceKind,
        #[source]
        source: ParseError,
    },
}

/// A well could not be built from the given rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WellError {
    #[error("a well needs at least one row and one column")]
    Empty,
    #[error("row {row} has {len} columns, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}
