//! One side's grid: ship placements plus the shots taken against it.

use crate::common::{GridError, ShotOutcome};
use crate::config::{GridMask, GRID_SIZE};
use core::fmt;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    /// `true` once the cell has been fired at.
    pub fn is_resolved(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// Raw layers of a grid, used to ship a finished deployment between workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub ship_map: u64,
    pub hits: u64,
    pub misses: u64,
}

/// An N×N board. `hits` is always a subset of `ship_map`, and `misses` never
/// overlaps it.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Grid {
    ship_map: GridMask,
    hits: GridMask,
    misses: GridMask,
}

impl Grid {
    /// All-Empty grid.
    pub fn new() -> Self {
        let empty = GridMask::new();
        Grid {
            ship_map: empty,
            hits: empty,
            misses: empty,
        }
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Current state of (row, col).
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        if self.hits.get(row, col)? {
            Ok(Cell::Hit)
        } else if self.misses.get(row, col)? {
            Ok(Cell::Miss)
        } else if self.ship_map.get(row, col)? {
            Ok(Cell::Ship)
        } else {
            Ok(Cell::Empty)
        }
    }

    /// Place or remove a ship segment. Shots only land through [`Grid::fire`],
    /// so Hit and Miss are never written here; writing a cell's current state
    /// is a no-op.
    pub fn set(&mut self, row: usize, col: usize, state: Cell) -> Result<(), GridError> {
        let current = self.cell_at(row, col)?;
        if current == state {
            return Ok(());
        }
        if current.is_resolved() {
            return Err(GridError::ResolvedCell { row, col });
        }
        match state {
            Cell::Ship => self.ship_map.set(row, col)?,
            Cell::Empty => self.ship_map.clear(row, col)?,
            Cell::Hit | Cell::Miss => return Err(GridError::IllegalTransition { row, col }),
        }
        Ok(())
    }

    /// Resolve a shot at (row, col): Ship becomes Hit, Empty becomes Miss.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<ShotOutcome, GridError> {
        match self.cell_at(row, col)? {
            Cell::Ship => {
                self.hits.set(row, col)?;
                Ok(ShotOutcome::Hit)
            }
            Cell::Empty => {
                self.misses.set(row, col)?;
                Ok(ShotOutcome::Miss)
            }
            Cell::Hit | Cell::Miss => Err(GridError::RepeatShot { row, col }),
        }
    }

    /// Returns `true` when no cell still holds an unhit ship segment.
    pub fn all_ships_sunk(&self) -> bool {
        self.hits == self.ship_map
    }

    pub fn ship_cells_remaining(&self) -> usize {
        (self.ship_map & !self.hits).count_ones()
    }

    pub fn is_resolved(&self, row: usize, col: usize) -> Result<bool, GridError> {
        Ok(self.cell_at(row, col)?.is_resolved())
    }

    /// Every cell that has ever held a ship, hit or not.
    pub fn ships(&self) -> GridMask {
        self.ship_map
    }

    pub fn hits(&self) -> GridMask {
        self.hits
    }

    pub fn misses(&self) -> GridMask {
        self.misses
    }

    /// Cells not yet fired at.
    pub fn unresolved(&self) -> GridMask {
        !(self.hits | self.misses)
    }

    /// Cells a new ship may not occupy.
    pub(crate) fn occupied(&self) -> GridMask {
        self.ship_map | self.misses
    }

    /// Commit a run of ship cells in one go.
    pub(crate) fn stamp(&mut self, mask: GridMask) {
        self.ship_map |= mask;
    }

    /// Return every cell to Empty.
    pub fn reset(&mut self) {
        *self = Grid::new();
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {{\n  ship_map: {:?},\n  hits: {:?},\n  misses: {:?}\n}}",
            self.ship_map, self.hits, self.misses
        )
    }
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        GridSnapshot {
            ship_map: grid.ship_map.into_raw(),
            hits: grid.hits.into_raw(),
            misses: grid.misses.into_raw(),
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let ship_map = GridMask::from_raw(snapshot.ship_map);
        let hits = GridMask::from_raw(snapshot.hits);
        let misses = GridMask::from_raw(snapshot.misses);
        if !hits.is_subset_of(&ship_map) || !(misses & ship_map).is_empty() {
            return Err(GridError::InconsistentSnapshot);
        }
        Ok(Grid {
            ship_map,
            hits,
            misses,
        })
    }
}
