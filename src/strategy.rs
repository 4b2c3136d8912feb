use rand::rngs::SmallRng;

use crate::common::ShotOutcome;
use crate::config::GridMask;

/// Targeting mode a shot was chosen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Uniform random sampling over unresolved cells.
    Search,
    /// Following up a pending target left by an earlier hit.
    Hunt,
}

/// A coordinate picked by a strategy, together with how it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub row: usize,
    pub col: usize,
    pub mode: Mode,
}

impl Target {
    pub fn coord(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Interface implemented by the opponent AIs.
///
/// A strategy only ever sees the hit and miss layers of the grid it attacks,
/// never the ship layer.
pub trait Strategy: Send {
    /// Choose the next unresolved coordinate, or `None` if every cell of the
    /// enemy grid is already resolved.
    fn select_target(&mut self, rng: &mut SmallRng, hits: &GridMask, misses: &GridMask)
        -> Option<Target>;

    /// Inform the strategy of the outcome of its last shot. `hits` and
    /// `misses` already include that shot.
    fn handle_shot_result(
        &mut self,
        _coord: (usize, usize),
        _outcome: ShotOutcome,
        _hits: &GridMask,
        _misses: &GridMask,
    ) {
    }

    /// Forget everything learned in the previous match.
    fn reset(&mut self) {}

    /// Mode the next call to `select_target` will start in.
    fn mode(&self) -> Mode {
        Mode::Search
    }
}
