//! Generation constants and the TOML configuration file format
//!
//! An empty configuration file describes the standard road tileset on a 6x6
//! grid. A custom tileset looks like:
//!
//! ```toml
//! rows = 8
//! cols = 12
//! seed = 7
//! exclude = ["Room"]
//!
//! [[kinds]]
//! name = "Empty"
//! connections = [0, 0, 0, 0]
//!
//! [[kinds]]
//! name = "Room"
//! connections = [1, 0, 0, 0]
//!
//! [[presets]]
//! row = 0
//! col = 1
//! kind = "Room"
//! rotation = 180
//! ```

use crate::algorithm::propagation::PropagationMode;
use crate::io::error::{GenerationError, Result};
use crate::spatial::catalog::Catalog;
use crate::spatial::tiles::ConnectionVector;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default grid height
pub const DEFAULT_ROWS: usize = 6;

/// Default grid width
pub const DEFAULT_COLS: usize = 6;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Extra iterations allowed per grid row beyond one per cell
pub const ITERATION_HEADROOM_PER_ROW: usize = 1;

/// Built-in road tileset: name, connections (Up, Right, Down, Left), manual-only
pub const STANDARD_TILESET: [(&str, [u8; 4], bool); 6] = [
    ("Empty", [0, 0, 0, 0], false),
    ("Room", [1, 0, 0, 0], true),
    ("Bend", [0, 1, 1, 0], false),
    ("Straight", [1, 0, 1, 0], false),
    ("ThreeWay", [0, 1, 1, 1], false),
    ("FourWay", [1, 1, 1, 1], false),
];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Iteration ceiling for a grid: one per cell plus headroom per row
pub const fn iteration_limit(rows: usize, cols: usize) -> usize {
    rows * cols + rows * ITERATION_HEADROOM_PER_ROW
}

/// A tile kind entry in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSpec {
    /// Kind identifier
    pub name: String,
    /// Connections at rotation 0, Up, Right, Down, Left, each 0 or 1
    pub connections: [u8; 4],
    /// Reserved for manual placement, never picked at random
    #[serde(default)]
    pub manual: bool,
}

/// A preset placement entry in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSpec {
    /// Row of the pinned cell
    pub row: usize,
    /// Column of the pinned cell
    pub col: usize,
    /// Kind name, which may be an excluded kind
    pub kind: String,
    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    #[serde(default)]
    pub rotation: u16,
}

/// Everything needed to set up one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid height
    pub rows: usize,
    /// Grid width
    pub cols: usize,
    /// Seed for the random source
    pub seed: u64,
    /// How cells are refreshed after each collapse
    pub propagation: PropagationMode,
    /// Override for the iteration ceiling
    pub iteration_limit: Option<usize>,
    /// Tile kinds in palette order
    pub kinds: Vec<KindSpec>,
    /// Additional kind names withheld from random selection
    pub exclude: Vec<String>,
    /// Cells pinned before solving
    pub presets: Vec<PresetSpec>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: DEFAULT_SEED,
            propagation: PropagationMode::default(),
            iteration_limit: None,
            kinds: standard_kinds(),
            exclude: Vec::new(),
            presets: Vec::new(),
        }
    }
}

impl GenerationConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::parse(contents, Path::new("<inline>"))
    }

    /// Load a configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| GenerationError::FileSystem {
                path: path.to_path_buf(),
                operation: "read configuration",
                source,
            })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GenerationError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the tile catalog with manual kinds and named exclusions withheld
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A connection vector contains digits other than 0 or 1
    /// - A kind name is repeated
    /// - An excluded name does not match any kind
    pub fn catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::new();

        for spec in &self.kinds {
            let connections = ConnectionVector::from_digits(spec.connections).ok_or_else(|| {
                GenerationError::InvalidConnections {
                    kind: spec.name.clone(),
                    digits: spec.connections,
                }
            })?;
            let id = catalog.add_kind(&spec.name, connections)?;
            if spec.manual {
                catalog.exclude(id)?;
            }
        }

        for name in &self.exclude {
            catalog.exclude_by_name(name)?;
        }

        Ok(catalog)
    }

    /// Iteration ceiling for this configuration
    pub const fn effective_iteration_limit(&self) -> usize {
        match self.iteration_limit {
            Some(limit) => limit,
            None => iteration_limit(self.rows, self.cols),
        }
    }
}

/// Standard road tileset as configuration entries
pub fn standard_kinds() -> Vec<KindSpec> {
    STANDARD_TILESET
        .iter()
        .map(|&(name, connections, manual)| KindSpec {
            name: name.to_string(),
            connections,
            manual,
        })
        .collect()
}
