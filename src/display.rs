//! Display capability the match loop reports through.
//!
//! The engine never formats output itself; it hands grids and events to a
//! [`GameDisplay`]. [`GridView`] is the shared text layout used by the text
//! front end.

use core::fmt;

use crate::{
    config::GRID_SIZE,
    game::MatchEvent,
    grid::{Cell, Grid},
};

pub const WATER: char = '.';
pub const SHIP: char = 'S';
pub const HIT: char = 'X';
pub const MISS: char = 'O';

/// Pluggable output for a match.
pub trait GameDisplay {
    /// Show a grid. Unhit ships are drawn only when `reveal` is set.
    fn render(&mut self, grid: &Grid, reveal: bool);

    /// Report a match event.
    fn announce(&mut self, event: &MatchEvent);
}

/// Display that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl GameDisplay for NullDisplay {
    fn render(&mut self, _grid: &Grid, _reveal: bool) {}
    fn announce(&mut self, _event: &MatchEvent) {}
}

/// Marker for a cell as the opponent (or an observer) would see it.
pub fn marker(cell: Cell, reveal: bool) -> char {
    match cell {
        Cell::Empty => WATER,
        Cell::Ship if reveal => SHIP,
        Cell::Ship => WATER,
        Cell::Hit => HIT,
        Cell::Miss => MISS,
    }
}

/// Text layout of a grid with column and row indices.
pub struct GridView<'a> {
    grid: &'a Grid,
    reveal: bool,
}

impl<'a> GridView<'a> {
    pub fn new(grid: &'a Grid, reveal: bool) -> Self {
        Self { grid, reveal }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..GRID_SIZE {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;
        for r in 0..GRID_SIZE {
            write!(f, "{} ", r)?;
            for c in 0..GRID_SIZE {
                let cell = self.grid.cell_at(r, c).map_err(|_| fmt::Error)?;
                write!(f, " {}", marker(cell, self.reveal))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
