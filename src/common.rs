//! Common types for the engine: shot outcomes and grid errors.

use core::fmt;

use crate::bitboard::BitBoardError;

/// Result of firing at an unresolved cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The cell held a ship segment.
    Hit,
    /// The cell was open water.
    Miss,
}

/// Errors returned by grid, placement and shot operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// A ship of `length` found no legal spot within `attempts` samples.
    PlacementExhausted { length: usize, attempts: usize },
    /// The target cell was already hit or missed.
    RepeatShot { row: usize, col: usize },
    /// Attempted to turn a resolved cell back into water or ship.
    ResolvedCell { row: usize, col: usize },
    /// `set` asked for Hit or Miss; only a shot may resolve a cell.
    IllegalTransition { row: usize, col: usize },
    /// A snapshot whose hit/miss layers disagree with its ship layer.
    InconsistentSnapshot,
    /// Underlying bitboard error other than an index fault.
    BitBoard(BitBoardError),
}

impl From<BitBoardError> for GridError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => GridError::OutOfBounds { row, col },
            other => GridError::BitBoard(other),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the grid", row, col)
            }
            GridError::PlacementExhausted { length, attempts } => write!(
                f,
                "Could not place ship of size {} after {} attempts",
                length, attempts
            ),
            GridError::RepeatShot { row, col } => {
                write!(f, "Cell ({}, {}) was already fired at", row, col)
            }
            GridError::ResolvedCell { row, col } => {
                write!(f, "Cell ({}, {}) is already resolved", row, col)
            }
            GridError::IllegalTransition { row, col } => {
                write!(f, "Cell ({}, {}) can only be resolved by firing at it", row, col)
            }
            GridError::InconsistentSnapshot => write!(f, "Grid snapshot layers are inconsistent"),
            GridError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
        }
    }
}
