use crate::bitboard::BitBoard;
use crate::ship::ShipClass;

/// Side length of every grid.
pub const GRID_SIZE: usize = 8;

/// One bit per cell of a grid.
pub type GridMask = BitBoard<u64, GRID_SIZE>;

/// The fixed fleet, longest ships first.
pub const FLEET: [ShipClass; 3] = [
    ShipClass::new("Battleship", 4, 1),
    ShipClass::new("Cruiser", 3, 2),
    ShipClass::new("Destroyer", 2, 2),
];

/// Total number of ship cells in the fixed fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 3 * 2 + 2 * 2;

/// Origin/orientation samples tried per ship before placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Whole-fleet placements tried by `deploy_fleet` before the error surfaces.
pub const MAX_FLEET_ATTEMPTS: usize = 32;

/// Mixed into a side's deployment seed to seed its targeting stream.
pub const STRATEGY_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Upper bound on pending hunt targets per side.
pub const TARGET_QUEUE_CAPACITY: usize = GRID_SIZE * GRID_SIZE;

/// Look up a ship class by its display name.
pub fn ship_class(name: &str) -> Option<ShipClass> {
    FLEET.iter().copied().find(|class| class.name() == name)
}

/// Sum of `length × count` over a fleet.
pub fn fleet_cells(fleet: &[ShipClass]) -> usize {
    fleet.iter().map(|class| class.length() * class.count()).sum()
}
