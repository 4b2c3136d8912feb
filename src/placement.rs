//! Random fleet placement with a one-cell gap around every ship.
//!
//! Placement happens on a scratch copy of the grid: a call either commits the
//! whole fleet or leaves the grid untouched. A ship that cannot be fitted
//! within [`MAX_PLACEMENT_ATTEMPTS`] samples fails the call with
//! [`GridError::PlacementExhausted`]; [`deploy_fleet`] then starts the fleet
//! over from scratch.

use alloc::vec::Vec;
use log::{debug, warn};
use rand::Rng;

use crate::common::GridError;
use crate::config::{GRID_SIZE, MAX_FLEET_ATTEMPTS, MAX_PLACEMENT_ATTEMPTS};
use crate::grid::Grid;
use crate::ship::{Orientation, ShipClass, ShipRun};

/// Legality check for a candidate run: in bounds (guaranteed by `ShipRun`),
/// every run cell Empty, and no ship anywhere in its halo.
pub fn can_place(grid: &Grid, run: &ShipRun) -> bool {
    (grid.occupied() & run.mask()).is_empty() && (grid.ships() & run.halo()).is_empty()
}

/// Returns a random legal run of `length`, or `PlacementExhausted` after
/// [`MAX_PLACEMENT_ATTEMPTS`] samples.
pub fn random_placement<R: Rng + ?Sized>(
    grid: &Grid,
    length: usize,
    rng: &mut R,
) -> Result<ShipRun, GridError> {
    if length == 0 || length > GRID_SIZE {
        return Err(GridError::PlacementExhausted {
            length,
            attempts: 0,
        });
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let max_r = if orient == Orientation::Vertical {
            GRID_SIZE - length
        } else {
            GRID_SIZE - 1
        };
        let max_c = if orient == Orientation::Horizontal {
            GRID_SIZE - length
        } else {
            GRID_SIZE - 1
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        let run = ShipRun::new(length, orient, r, c)?;
        if can_place(grid, &run) {
            return Ok(run);
        }
    }
    Err(GridError::PlacementExhausted {
        length,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Place every ship of `fleet`, longest first. On success the grid holds the
/// new ships and the placed runs are returned; on failure the grid is
/// unchanged.
pub fn place_fleet<R: Rng + ?Sized>(
    grid: &mut Grid,
    fleet: &[ShipClass],
    rng: &mut R,
) -> Result<Vec<ShipRun>, GridError> {
    let mut classes: Vec<ShipClass> = fleet.to_vec();
    classes.sort_by(|a, b| b.length().cmp(&a.length()));

    let mut staged = *grid;
    let mut runs = Vec::with_capacity(classes.iter().map(|c| c.count()).sum());
    for class in classes {
        for _ in 0..class.count() {
            let run = random_placement(&staged, class.length(), rng)?;
            staged.stamp(run.mask());
            debug!("placed {} at {:?}", class.name(), run);
            runs.push(run);
        }
    }
    *grid = staged;
    Ok(runs)
}

/// [`place_fleet`] with whole-fleet retries. Each exhausted attempt is logged
/// as a warning; the error is returned only after [`MAX_FLEET_ATTEMPTS`].
pub fn deploy_fleet<R: Rng + ?Sized>(
    grid: &mut Grid,
    fleet: &[ShipClass],
    rng: &mut R,
) -> Result<Vec<ShipRun>, GridError> {
    let mut last = GridError::PlacementExhausted {
        length: 0,
        attempts: 0,
    };
    for attempt in 1..=MAX_FLEET_ATTEMPTS {
        match place_fleet(grid, fleet, rng) {
            Ok(runs) => return Ok(runs),
            Err(e @ GridError::PlacementExhausted { .. }) => {
                warn!("fleet placement attempt {} failed: {}", attempt, e);
                last = e;
            }
            Err(e) => return Err(e),
        }
    }
    Err(last)
}
