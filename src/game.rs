use alloc::boxed::Box;
use core::fmt;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    common::{GridError, ShotOutcome},
    config::STRATEGY_STREAM,
    display::GameDisplay,
    grid::Grid,
    strategy::{Mode, Strategy},
};

/// Identifies one of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SideId {
    A,
    B,
}

impl SideId {
    pub fn opponent(self) -> SideId {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideId::A => write!(f, "Side A"),
            SideId::B => write!(f, "Side B"),
        }
    }
}

/// Something worth telling the display about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    Started,
    /// Precedes a `render` of the given side's grid.
    Board { side: SideId },
    Shot {
        attacker: SideId,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
        mode: Mode,
    },
    Won { winner: SideId, shots: usize },
}

/// Errors that stop a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// The grid rejected a shot; a correct strategy never causes this.
    Grid(GridError),
    /// A strategy found no target although the enemy still had ships.
    NoTarget { side: SideId },
}

impl From<GridError> for MatchError {
    fn from(err: GridError) -> Self {
        MatchError::Grid(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Grid(e) => write!(f, "Grid error: {}", e),
            MatchError::NoTarget { side } => write!(f, "{} has no target left to fire at", side),
        }
    }
}

/// Per-side shot tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SideStats {
    pub shots: usize,
    pub hits: usize,
    pub ship_cells_remaining: usize,
}

/// Summary of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchReport {
    pub winner: SideId,
    /// Completed rounds; a round is side A's shot followed by side B's.
    pub rounds: usize,
    pub side_a: SideStats,
    pub side_b: SideStats,
}

/// Targeting rng for a side deployed from `deploy_seed`. It is reproducible
/// from the seed but never replays the placement draws.
pub fn strategy_rng(deploy_seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(deploy_seed ^ STRATEGY_STREAM)
}

/// One participant: its own grid, the strategy it attacks with, and the
/// random stream that strategy draws from.
pub struct Side {
    grid: Grid,
    deployed: Grid,
    strategy: Box<dyn Strategy>,
    rng: SmallRng,
    shots: usize,
    hits: usize,
}

impl Side {
    pub fn new(grid: Grid, strategy: Box<dyn Strategy>, rng: SmallRng) -> Self {
        Self {
            grid,
            deployed: grid,
            strategy,
            rng,
            shots: 0,
            hits: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    fn stats(&self) -> SideStats {
        SideStats {
            shots: self.shots,
            hits: self.hits,
            ship_cells_remaining: self.grid.ship_cells_remaining(),
        }
    }

    fn restore(&mut self) {
        self.grid = self.deployed;
        self.strategy.reset();
        self.shots = 0;
        self.hits = 0;
    }
}

/// Alternating-turn match between two sides. Side A always fires first.
pub struct Match {
    a: Side,
    b: Side,
    next: SideId,
    rounds: usize,
    winner: Option<SideId>,
    reveal_ships: bool,
}

impl Match {
    /// Start a match; both strategies begin with empty target queues.
    pub fn new(mut a: Side, mut b: Side) -> Self {
        a.strategy.reset();
        b.strategy.reset();
        Self {
            a,
            b,
            next: SideId::A,
            rounds: 0,
            winner: None,
            reveal_ships: true,
        }
    }

    /// Whether grids rendered between rounds show unhit ships.
    pub fn with_reveal(mut self, reveal_ships: bool) -> Self {
        self.reveal_ships = reveal_ships;
        self
    }

    pub fn side(&self, id: SideId) -> &Side {
        match id {
            SideId::A => &self.a,
            SideId::B => &self.b,
        }
    }

    pub fn grid(&self, id: SideId) -> &Grid {
        &self.side(id).grid
    }

    /// Side due to fire next.
    pub fn next_to_fire(&self) -> SideId {
        self.next
    }

    pub fn winner(&self) -> Option<SideId> {
        self.winner
    }

    /// Returns (attacker, defender).
    fn split(&mut self, attacker: SideId) -> (&mut Side, &mut Side) {
        match attacker {
            SideId::A => (&mut self.a, &mut self.b),
            SideId::B => (&mut self.b, &mut self.a),
        }
    }

    /// Fire a single shot for the side whose turn it is. Returns the winner
    /// once the defender's grid is fully sunk.
    pub fn step(&mut self, display: &mut dyn GameDisplay) -> Result<Option<SideId>, MatchError> {
        if self.winner.is_some() {
            return Ok(self.winner);
        }
        let attacker_id = self.next;
        let (attacker, defender) = self.split(attacker_id);

        let target = attacker
            .strategy
            .select_target(&mut attacker.rng, &defender.grid.hits(), &defender.grid.misses())
            .ok_or(MatchError::NoTarget { side: attacker_id })?;
        let outcome = defender.grid.fire(target.row, target.col)?;
        attacker.shots += 1;
        if outcome == ShotOutcome::Hit {
            attacker.hits += 1;
        }
        attacker.strategy.handle_shot_result(
            target.coord(),
            outcome,
            &defender.grid.hits(),
            &defender.grid.misses(),
        );
        debug!(
            "{} fires at ({}, {}) [{:?}]: {:?}",
            attacker_id, target.row, target.col, target.mode, outcome
        );
        display.announce(&MatchEvent::Shot {
            attacker: attacker_id,
            row: target.row,
            col: target.col,
            outcome,
            mode: target.mode,
        });

        if defender.grid.all_ships_sunk() {
            let shots = attacker.shots;
            self.winner = Some(attacker_id);
            info!("{} wins after {} shots", attacker_id, shots);
            // final boards first, so `Won` is the last thing a display sees
            self.render(display);
            display.announce(&MatchEvent::Won {
                winner: attacker_id,
                shots,
            });
            return Ok(self.winner);
        }

        if attacker_id == SideId::B {
            self.rounds += 1;
        }
        self.next = attacker_id.opponent();
        Ok(None)
    }

    /// Play until one grid is fully sunk.
    pub fn play(&mut self, display: &mut dyn GameDisplay) -> Result<MatchReport, MatchError> {
        display.announce(&MatchEvent::Started);
        self.render(display);
        loop {
            if let Some(winner) = self.step(display)? {
                return Ok(self.report(winner));
            }
            if self.next == SideId::A {
                self.render(display);
            }
        }
    }

    fn render(&self, display: &mut dyn GameDisplay) {
        for id in [SideId::A, SideId::B] {
            display.announce(&MatchEvent::Board { side: id });
            display.render(self.grid(id), self.reveal_ships);
        }
    }

    fn report(&self, winner: SideId) -> MatchReport {
        MatchReport {
            winner,
            rounds: self.rounds,
            side_a: self.a.stats(),
            side_b: self.b.stats(),
        }
    }

    /// Restore both grids to their deployed layout and start over.
    pub fn rematch(&mut self) {
        self.a.restore();
        self.b.restore();
        self.next = SideId::A;
        self.rounds = 0;
        self.winner = None;
    }

    /// Split the match back into its sides.
    pub fn into_sides(self) -> (Side, Side) {
        (self.a, self.b)
    }
}
