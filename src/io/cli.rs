//! Command-line interface for generating a tile map from a tileset configuration

use crate::algorithm::executor::{GenerationReport, SolverConfig, WaveCollapse};
use crate::algorithm::propagation::PropagationMode;
use crate::io::configuration::GenerationConfig;
use crate::io::error::{GenerationError, Result};
use crate::io::export::{render_connection_rows, render_glyphs, write_map};
use crate::io::prefill::PrefillData;
use crate::io::progress::{GenerationProgress, completion_message};
use crate::spatial::Grid;
use crate::spatial::tiles::Palette;
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "tilewave")]
#[command(
    author,
    version,
    about = "Generate connected tile maps with wave function collapse"
)]
/// Command-line arguments for the map generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tileset configuration file (TOML); the built-in road tileset when omitted
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Grid height in cells
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Grid width in cells
    #[arg(short = 'w', long)]
    pub cols: Option<usize>,

    /// Withhold a tile kind from random selection (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "KIND")]
    pub exclude: Vec<String>,

    /// Re-evaluate every cell on every pass instead of only the last collapse's neighbours
    #[arg(long)]
    pub full_rescan: bool,

    /// Print connection vectors instead of box-drawing glyphs
    #[arg(short, long)]
    pub connections: bool,

    /// Write the map to a file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output and warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Load the configuration file, or the defaults, and apply flag overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn load_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_toml_file(path)?,
            None => GenerationConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Apply command-line flags on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut GenerationConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if self.full_rescan {
            config.propagation = PropagationMode::Full;
        }
        for name in &self.exclude {
            if !config.exclude.contains(name) {
                config.exclude.push(name.clone());
            }
        }
    }
}

/// Runs one generation from command-line arguments to printed map
pub struct MapRunner {
    cli: Cli,
}

impl MapRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build, solve and emit the map
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid or leaves an empty palette
    /// - A preset cannot be placed
    /// - The map cannot be written
    /// - Generation ends without filling the grid
    pub fn run(&self) -> Result<GenerationReport> {
        let config = self.cli.load_config()?;
        let (grid, report) = generate_from_config(&config, self.cli.should_show_progress())?;

        let text = if self.cli.connections {
            render_connection_rows(&grid)
        } else {
            render_glyphs(&grid)
        };

        if let Some(path) = &self.cli.output {
            write_map(path, &text)?;
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .map_err(|e| GenerationError::FileSystem {
                    path: PathBuf::from("<stdout>"),
                    operation: "write map",
                    source: e,
                })?;
        }

        if report.is_complete() {
            Ok(report)
        } else {
            Err(GenerationError::Incomplete {
                completion: completion_message(&report.completion),
                uncollapsed: report.uncollapsed,
                cells: report.collapsed + report.uncollapsed,
            })
        }
    }
}

/// Build catalog, palette, grid and presets from a configuration, then solve
///
/// The grid comes back alongside its report even when generation stopped
/// early.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration describes an invalid catalog or an empty palette
/// - The grid dimensions are invalid
/// - A preset cannot be placed
pub fn generate_from_config(
    config: &GenerationConfig,
    show_progress: bool,
) -> Result<(Grid, GenerationReport)> {
    let catalog = config.catalog()?;
    let palette = Palette::from_catalog(&catalog)?;
    let mut grid = Grid::new(config.rows, config.cols, palette.len())?;
    let pinned = PrefillData::from_specs(&config.presets, &catalog)?.apply(&mut grid)?;

    info!(
        kinds = catalog.len(),
        variants = palette.len(),
        pinned,
        seed = config.seed,
        "prepared tileset"
    );

    let solver_config = SolverConfig {
        propagation: config.propagation,
        iteration_limit: Some(config.effective_iteration_limit()),
    };
    let mut solver = WaveCollapse::new(grid, palette, solver_config, config.seed)?;

    let total_cells = config.rows * config.cols;
    let progress = if show_progress {
        GenerationProgress::new(total_cells)
    } else {
        GenerationProgress::hidden(total_cells)
    };
    let mut collapsed = total_cells - solver.uncollapsed();
    progress.set_collapsed(collapsed);

    let report = solver.run_with(|_| {
        collapsed += 1;
        progress.set_collapsed(collapsed);
    });
    progress.finish(&report);

    Ok((solver.into_grid(), report))
}
