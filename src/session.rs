#![cfg(feature = "std")]

//! Interactive session: the menu loop around repeated matches.

use std::io::{BufRead, Write};

use anyhow::anyhow;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    ai::{HuntStrategy, RandomStrategy},
    config::FLEET,
    display::GameDisplay,
    game::{Match, MatchEvent, MatchReport, Side, SideId},
    grid::Grid,
    placement::deploy_fleet,
    strategy::Strategy,
};

/// Which targeting strategy both sides use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StrategyKind {
    #[default]
    Hunt,
    Random,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Hunt => Box::new(HuntStrategy::new()),
            StrategyKind::Random => Box::new(RandomStrategy::new()),
        }
    }
}

/// Runtime options for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed_a: u64,
    pub seed_b: u64,
    pub strategy: StrategyKind,
    pub reveal_ships: bool,
}

impl SessionConfig {
    /// Side B's seed is derived from side A's.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed_a: seed,
            seed_b: seed.wrapping_add(1),
            strategy: StrategyKind::default(),
            reveal_ships: true,
        }
    }
}

/// Menu entries, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    StartMatch,
    ViewBoards,
    Redeploy,
    Quit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::StartMatch),
            "2" => Some(MenuChoice::ViewBoards),
            "3" => Some(MenuChoice::Redeploy),
            "4" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

const MENU: &str = "\n--- Battleship game ---\n\
1. Start New Game\n\
2. View Boards\n\
3. Redeploy Ships\n\
4. Quit Game\n\
Make your choice(1-4): ";

/// Two grids that live for the whole process, plus one random stream per side.
pub struct Session {
    config: SessionConfig,
    rng_a: SmallRng,
    rng_b: SmallRng,
    grid_a: Grid,
    grid_b: Grid,
    matches_played: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            rng_a: SmallRng::seed_from_u64(config.seed_a),
            rng_b: SmallRng::seed_from_u64(config.seed_b),
            grid_a: Grid::new(),
            grid_b: Grid::new(),
            matches_played: 0,
        }
    }

    pub fn grid(&self, side: SideId) -> &Grid {
        match side {
            SideId::A => &self.grid_a,
            SideId::B => &self.grid_b,
        }
    }

    pub fn matches_played(&self) -> usize {
        self.matches_played
    }

    /// Clear both grids and place fresh fleets.
    pub fn redeploy(&mut self) -> anyhow::Result<()> {
        self.grid_a.reset();
        self.grid_b.reset();
        deploy_fleet(&mut self.grid_a, &FLEET, &mut self.rng_a).map_err(|e| anyhow!(e))?;
        deploy_fleet(&mut self.grid_b, &FLEET, &mut self.rng_b).map_err(|e| anyhow!(e))?;
        Ok(())
    }

    /// Deploy new fleets and play a full match. The final grids stay
    /// viewable afterwards.
    pub fn start_match(&mut self, display: &mut dyn GameDisplay) -> anyhow::Result<MatchReport> {
        self.redeploy()?;
        let side_a = Side::new(
            self.grid_a,
            self.config.strategy.build(),
            SmallRng::from_rng(&mut self.rng_a),
        );
        let side_b = Side::new(
            self.grid_b,
            self.config.strategy.build(),
            SmallRng::from_rng(&mut self.rng_b),
        );
        let mut game = Match::new(side_a, side_b).with_reveal(self.config.reveal_ships);
        let report = game.play(display).map_err(|e| anyhow!(e))?;
        self.grid_a = *game.grid(SideId::A);
        self.grid_b = *game.grid(SideId::B);
        self.matches_played += 1;
        info!("match {} finished: {} wins", self.matches_played, report.winner);
        Ok(report)
    }

    /// Render both grids with ships shown.
    pub fn view_boards(&self, display: &mut dyn GameDisplay) {
        for side in [SideId::A, SideId::B] {
            display.announce(&MatchEvent::Board { side });
            display.render(self.grid(side), true);
        }
    }

    /// Read menu choices from `input` until Quit or end of input.
    pub fn run_menu<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        display: &mut dyn GameDisplay,
    ) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{}", MENU)?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match MenuChoice::parse(&line) {
                Some(MenuChoice::StartMatch) => {
                    self.start_match(display)?;
                }
                Some(MenuChoice::ViewBoards) => self.view_boards(display),
                Some(MenuChoice::Redeploy) => {
                    self.redeploy()?;
                    writeln!(out, "Ships redeployed.")?;
                }
                Some(MenuChoice::Quit) => return Ok(()),
                None => writeln!(out, "Invalid selection.")?,
            }
        }
    }
}
