use crate::{
    algorithm::cache::SignatureCache,
    algorithm::propagation::{PropagationMode, propagate},
    algorithm::selection::{RandomSelector, choose_variant, select_cell},
    io::configuration::iteration_limit,
    io::error::{Result, invalid_parameter},
    spatial::tiles::{Palette, TileVariant},
    spatial::{Cell, Grid},
};
use tracing::{debug, info, warn};

/// Solver parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Which cells are refreshed after each collapse
    pub propagation: PropagationMode,
    /// Override for the iteration ceiling, `rows * cols + rows` when unset
    pub iteration_limit: Option<usize>,
}

/// How a generation run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Every cell holds a variant
    Complete,
    /// Uncollapsed cells remain but none has a compatible variant
    Contradiction {
        /// Row of the first stuck cell
        row: usize,
        /// Column of the first stuck cell
        col: usize,
    },
    /// The iteration ceiling was reached before the grid filled
    IterationLimit {
        /// Iterations performed
        iterations: usize,
    },
}

/// Summary of a finished run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// How the run ended
    pub completion: Completion,
    /// Iterations performed
    pub iterations: usize,
    /// Cells holding a variant, presets included
    pub collapsed: usize,
    /// Cells left without a variant
    pub uncollapsed: usize,
}

impl GenerationReport {
    /// Whether the grid was filled completely
    pub const fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Complete)
    }
}

/// A single cell collapse performed by the solver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collapse {
    /// Iteration the collapse happened in, starting at 1
    pub iteration: usize,
    /// Position as `[row, col]`
    pub position: [usize; 2],
    /// Palette index that was chosen
    pub palette_index: usize,
    /// The chosen variant
    pub variant: TileVariant,
    /// Candidate count of the cell just before it collapsed
    pub entropy: usize,
}

/// Outcome of one solver iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was collapsed and work may remain
    Collapsed(Collapse),
    /// The run is over
    Finished(Completion),
}

/// Greedy minimum-entropy wave function collapse over a fixed grid
///
/// Each iteration refreshes candidate sets, collapses the uncollapsed cell
/// with the fewest candidates (ties broken uniformly at random) and repeats.
/// There is no backtracking: a cell with no candidates left stays empty and
/// the run ends as a contradiction once nothing else can be collapsed.
pub struct WaveCollapse {
    grid: Grid,
    palette: Palette,
    config: SolverConfig,
    random_selector: RandomSelector,
    signature_cache: SignatureCache,
    iteration: usize,
    iteration_limit: usize,
    uncollapsed: usize,
    last_collapsed: Option<[usize; 2]>,
    finished: Option<Completion>,
}

impl WaveCollapse {
    /// Create a solver over a grid, possibly already seeded with presets
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The palette is empty, so no cell could ever be filled
    /// - The grid's candidate sets were sized for a different palette
    pub fn new(grid: Grid, palette: Palette, config: SolverConfig, seed: u64) -> Result<Self> {
        if palette.is_empty() {
            return Err(invalid_parameter("palette", &0, &"contains no variants"));
        }
        if grid.palette_len() != palette.len() {
            return Err(invalid_parameter(
                "palette",
                &palette.len(),
                &format!("grid was built for {} variants", grid.palette_len()),
            ));
        }

        let limit = config
            .iteration_limit
            .unwrap_or_else(|| iteration_limit(grid.rows(), grid.cols()));
        let uncollapsed = grid.uncollapsed_count();

        Ok(Self {
            grid,
            palette,
            config,
            random_selector: RandomSelector::new(seed),
            signature_cache: SignatureCache::new(),
            iteration: 0,
            iteration_limit: limit,
            uncollapsed,
            last_collapsed: None,
            finished: None,
        })
    }

    /// Access the grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take the grid out of the solver
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Palette the solver draws from
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Iterations performed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Iteration ceiling for this run
    pub const fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    /// Cells still awaiting collapse
    pub const fn uncollapsed(&self) -> usize {
        self.uncollapsed
    }

    /// Signature cache, for inspecting hit rates
    pub const fn signature_cache(&self) -> &SignatureCache {
        &self.signature_cache
    }

    /// Run a single iteration
    ///
    /// Once the run has finished, further calls keep returning the same
    /// completion without touching the grid.
    pub fn run_iteration(&mut self) -> Step {
        if let Some(completion) = self.finished {
            return Step::Finished(completion);
        }

        if self.uncollapsed == 0 {
            return self.finish(Completion::Complete);
        }
        if self.iteration >= self.iteration_limit {
            return self.finish(Completion::IterationLimit {
                iterations: self.iteration,
            });
        }

        self.iteration += 1;

        propagate(
            &mut self.grid,
            &self.palette,
            &mut self.signature_cache,
            self.config.propagation,
            self.last_collapsed,
        );

        let Some([row, col]) = select_cell(&self.grid, &mut self.random_selector) else {
            let [row, col] = self.grid.first_stuck().map_or([0, 0], Cell::position);
            return self.finish(Completion::Contradiction { row, col });
        };

        let Some(collapse) = self.collapse_cell(row, col) else {
            return self.finish(Completion::Contradiction { row, col });
        };

        Step::Collapsed(collapse)
    }

    /// Run until the grid is full, stuck, or the iteration ceiling is hit
    pub fn run(&mut self) -> GenerationReport {
        self.run_with(|_| {})
    }

    /// Run to the end, reporting each collapse to an observer
    pub fn run_with<F>(&mut self, mut on_collapse: F) -> GenerationReport
    where
        F: FnMut(&Collapse),
    {
        info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            palette = self.palette.len(),
            uncollapsed = self.uncollapsed,
            "starting generation"
        );

        loop {
            match self.run_iteration() {
                Step::Collapsed(collapse) => on_collapse(&collapse),
                Step::Finished(completion) => return self.report(completion),
            }
        }
    }

    /// Summarise the run so far under the given completion
    pub fn report(&self, completion: Completion) -> GenerationReport {
        let cells = self.grid.rows() * self.grid.cols();
        GenerationReport {
            completion,
            iterations: self.iteration,
            collapsed: cells - self.uncollapsed,
            uncollapsed: self.uncollapsed,
        }
    }

    fn collapse_cell(&mut self, row: usize, col: usize) -> Option<Collapse> {
        let cell = self.grid.cell(row, col)?;
        let entropy = cell.entropy();
        let palette_index = choose_variant(cell, &mut self.random_selector)?;
        let variant = *self.palette.get(palette_index)?;

        self.grid.collapse(row, col, variant).ok()?;
        self.uncollapsed -= 1;
        self.last_collapsed = Some([row, col]);

        debug!(
            iteration = self.iteration,
            row,
            col,
            entropy,
            palette_index,
            rotation = variant.rotation().degrees(),
            connections = %variant.connections(),
            "collapsed cell"
        );

        Some(Collapse {
            iteration: self.iteration,
            position: [row, col],
            palette_index,
            variant,
            entropy,
        })
    }

    fn finish(&mut self, completion: Completion) -> Step {
        match completion {
            Completion::Complete => {
                info!(iterations = self.iteration, "generation complete");
            }
            Completion::Contradiction { row, col } => {
                warn!(
                    row,
                    col,
                    uncollapsed = self.uncollapsed,
                    "contradiction: no uncollapsed cell has a compatible variant"
                );
            }
            Completion::IterationLimit { iterations } => {
                warn!(
                    iterations,
                    uncollapsed = self.uncollapsed,
                    "iteration limit reached before the grid was filled"
                );
            }
        }

        self.finished = Some(completion);
        Step::Finished(completion)
    }
}

/// Fill a grid from a palette in one call
///
/// Uses neighbour-only propagation and the default iteration ceiling. The
/// grid is returned whether or not generation completed; check the report.
///
/// # Errors
///
/// Returns an error if the palette is empty or does not match the grid
pub fn generate_map(grid: Grid, palette: Palette, seed: u64) -> Result<(Grid, GenerationReport)> {
    let mut solver = WaveCollapse::new(grid, palette, SolverConfig::default(), seed)?;
    let report = solver.run();
    Ok((solver.into_grid(), report))
}
