//! Ship classes and straight ship runs on the grid.

use core::fmt;

use crate::common::GridError;
use crate::config::{GridMask, GRID_SIZE};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Row/column step from one run cell to the next.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A class of ship in the fleet: name, length, and how many to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
    count: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize, count: usize) -> Self {
        Self {
            name,
            length,
            count,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// A straight run of `length` cells starting at (`row`, `col`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipRun {
    row: usize,
    col: usize,
    orientation: Orientation,
    length: usize,
}

impl ShipRun {
    /// Build a run, rejecting any that would leave the grid.
    pub fn new(
        length: usize,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<Self, GridError> {
        let (dr, dc) = orientation.step();
        let tail = length.saturating_sub(1);
        let (end_r, end_c) = match (row.checked_add(dr * tail), col.checked_add(dc * tail)) {
            (Some(r), Some(c)) => (r, c),
            _ => return Err(GridError::OutOfBounds { row, col }),
        };
        if length == 0 || end_r >= GRID_SIZE || end_c >= GRID_SIZE {
            return Err(GridError::OutOfBounds {
                row: end_r,
                col: end_c,
            });
        }
        Ok(ShipRun {
            row,
            col,
            orientation,
            length,
        })
    }

    /// Origin of the run (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Cells covered by the run, from the origin outward.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (dr, dc) = self.orientation.step();
        let (row, col) = (self.row, self.col);
        (0..self.length).map(move |i| (row + dr * i, col + dc * i))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }

    /// Occupancy mask of the run.
    pub fn mask(&self) -> GridMask {
        let mut mask = GridMask::new();
        for (r, c) in self.cells() {
            // bounds were checked in `new`
            let _ = mask.set(r, c);
        }
        mask
    }

    /// The run plus its one-cell buffer in all eight directions.
    pub fn halo(&self) -> GridMask {
        self.mask().halo()
    }
}

impl fmt::Debug for ShipRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ShipRun {{ origin: ({}, {}), orientation: {:?}, length: {} }}",
            self.row, self.col, self.orientation, self.length
        )
    }
}
