use crate::spatial::{Cell, Grid};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform choice of an index below `len`
    ///
    /// A single option is returned without drawing from the random source.
    pub fn uniform_index(&mut self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => Some(self.rng.random_range(0..len)),
        }
    }

    /// Uniform choice of one item from a slice
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        self.uniform_index(items.len())
            .and_then(|index| items.get(index).copied())
    }
}

/// Positions of all uncollapsed cells sharing the lowest non-zero entropy
///
/// Stuck cells (entropy 0) are passed over. Positions come out in row-major
/// order. An empty result with uncollapsed cells remaining is a contradiction.
pub fn lowest_entropy_positions(grid: &Grid) -> Vec<[usize; 2]> {
    let ordered = grid.by_entropy();
    let Some(lowest) = ordered
        .iter()
        .map(|cell| cell.entropy())
        .find(|&entropy| entropy > 0)
    else {
        return Vec::new();
    };

    ordered
        .iter()
        .filter(|cell| cell.entropy() == lowest)
        .map(|cell| cell.position())
        .collect()
}

/// Pick the next cell to collapse, breaking entropy ties uniformly at random
pub fn select_cell(grid: &Grid, selector: &mut RandomSelector) -> Option<[usize; 2]> {
    let tied = lowest_entropy_positions(grid);
    selector.choose(&tied)
}

/// Pick a palette index for a cell
///
/// A forced cell (entropy 1) resolves deterministically; otherwise the choice
/// is uniform over its candidates.
pub fn choose_variant(cell: &Cell, selector: &mut RandomSelector) -> Option<usize> {
    let candidates = cell.candidates();
    selector
        .uniform_index(candidates.count())
        .and_then(|n| candidates.nth(n))
}
