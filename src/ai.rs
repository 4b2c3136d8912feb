// Search-and-hunt targeting for the opponent grid.
// Random search over open cells until something is hit, then a FIFO queue of
// orthogonal neighbours walks out the rest of the ship.

use alloc::collections::VecDeque;
use log::trace;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    common::ShotOutcome,
    config::{GridMask, GRID_SIZE, TARGET_QUEUE_CAPACITY},
    strategy::{Mode, Strategy, Target},
};

/// Pick a cell uniformly among those not yet hit or missed.
pub fn search_target<R: Rng + ?Sized>(
    hits: &GridMask,
    misses: &GridMask,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let open = !(*hits | *misses);
    let n = open.count_ones();
    if n == 0 {
        return None;
    }
    open.nth_set_bit(rng.random_range(0..n))
}

/// In-bounds orthogonal neighbours of (row, col): up, down, left, right.
pub fn orthogonal_neighbors(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = row.checked_sub(1).map(|r| (r, col));
    let down = (row + 1 < GRID_SIZE).then(|| (row + 1, col));
    let left = col.checked_sub(1).map(|c| (row, c));
    let right = (col + 1 < GRID_SIZE).then(|| (row, col + 1));
    [up, down, left, right].into_iter().flatten()
}

/// Bounded FIFO of pending hunt coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetQueue {
    pending: VecDeque<(usize, usize)>,
}

impl TargetQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(TARGET_QUEUE_CAPACITY),
        }
    }

    /// Append a coordinate. Returns `false` if the queue is full.
    pub fn push(&mut self, coord: (usize, usize)) -> bool {
        if self.pending.len() >= TARGET_QUEUE_CAPACITY {
            return false;
        }
        self.pending.push_back(coord);
        true
    }

    pub fn pop(&mut self) -> Option<(usize, usize)> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn contains(&self, coord: (usize, usize)) -> bool {
        self.pending.contains(&coord)
    }

    /// Pending coordinates, front first.
    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.pending.iter()
    }
}

/// Random search plus a breadth-first hunt around every hit.
#[derive(Debug, Clone, Default)]
pub struct HuntStrategy {
    queue: TargetQueue,
    stale_skipped: usize,
}

impl HuntStrategy {
    pub fn new() -> Self {
        Self {
            queue: TargetQueue::new(),
            stale_skipped: 0,
        }
    }

    pub fn queue(&self) -> &TargetQueue {
        &self.queue
    }

    /// Queue entries dropped because their cell was resolved by the time they
    /// reached the front.
    pub fn stale_skipped(&self) -> usize {
        self.stale_skipped
    }

    /// Dequeue the first still-open pending target, falling back to search
    /// when the queue runs dry.
    pub fn next_target<R: Rng + ?Sized>(
        &mut self,
        hits: &GridMask,
        misses: &GridMask,
        rng: &mut R,
    ) -> Option<Target> {
        let resolved = *hits | *misses;
        while let Some((row, col)) = self.queue.pop() {
            if resolved.get(row, col).unwrap_or(true) {
                self.stale_skipped += 1;
                trace!("dropping stale target ({}, {})", row, col);
                continue;
            }
            return Some(Target {
                row,
                col,
                mode: Mode::Hunt,
            });
        }
        search_target(hits, misses, rng).map(|(row, col)| Target {
            row,
            col,
            mode: Mode::Search,
        })
    }

    /// On a hit, queue every open orthogonal neighbour of `coord`.
    pub fn observe(
        &mut self,
        coord: (usize, usize),
        outcome: ShotOutcome,
        hits: &GridMask,
        misses: &GridMask,
    ) {
        if outcome != ShotOutcome::Hit {
            return;
        }
        let resolved = *hits | *misses;
        for (r, c) in orthogonal_neighbors(coord.0, coord.1) {
            if resolved.get(r, c).unwrap_or(true) {
                continue;
            }
            if !self.queue.push((r, c)) {
                trace!("target queue full, dropping ({}, {})", r, c);
            }
        }
    }
}

impl Strategy for HuntStrategy {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        hits: &GridMask,
        misses: &GridMask,
    ) -> Option<Target> {
        self.next_target(hits, misses, rng)
    }

    fn handle_shot_result(
        &mut self,
        coord: (usize, usize),
        outcome: ShotOutcome,
        hits: &GridMask,
        misses: &GridMask,
    ) {
        self.observe(coord, outcome, hits, misses);
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.stale_skipped = 0;
    }

    fn mode(&self) -> Mode {
        if self.queue.is_empty() {
            Mode::Search
        } else {
            Mode::Hunt
        }
    }
}

/// Pure random search with no follow-up on hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RandomStrategy {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        hits: &GridMask,
        misses: &GridMask,
    ) -> Option<Target> {
        search_target(hits, misses, rng).map(|(row, col)| Target {
            row,
            col,
            mode: Mode::Search,
        })
    }
}
