//! Error types for catalog setup, preset placement and file handling
//!
//! Contradictions and the iteration limit are not errors; they are reported
//! through the generation report's completion state.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Every kind was excluded, so no variant can ever be placed
    EmptyPalette {
        /// Number of kinds in the catalog
        kinds: usize,
        /// Number of kinds withheld from random selection
        excluded: usize,
    },

    /// A kind name does not appear in the catalog
    UnknownKind {
        /// The name that failed to resolve
        name: String,
    },

    /// Two kinds were registered under the same name
    DuplicateKind {
        /// The repeated name
        name: String,
    },

    /// A connection vector contains something other than 0 or 1
    InvalidConnections {
        /// Kind the vector belongs to
        kind: String,
        /// The digits as supplied
        digits: [u8; 4],
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A preset placement cannot be applied
    InvalidPreset {
        /// Row of the preset
        row: usize,
        /// Column of the preset
        col: usize,
        /// Why it was rejected
        reason: String,
    },

    /// Position lies outside the grid
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid rows
        rows: usize,
        /// Grid columns
        cols: usize,
    },

    /// Attempt to collapse a cell that already holds a variant
    CellAlreadyCollapsed {
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
    },

    /// Configuration file could not be parsed
    ConfigParse {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Generation stopped before every cell held a variant
    Incomplete {
        /// Description of how the run ended
        completion: String,
        /// Cells left without a variant
        uncollapsed: usize,
        /// Cells in the grid
        cells: usize,
    },

    /// The log subscriber could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPalette { kinds: 0, .. } => {
                write!(
                    f,
                    "Palette is empty: no tile kinds are available for generation"
                )
            }
            Self::EmptyPalette { kinds, excluded } => {
                write!(
                    f,
                    "Palette is empty: {excluded} of {kinds} tile kinds are excluded"
                )
            }
            Self::UnknownKind { name } => write!(f, "Unknown tile kind '{name}'"),
            Self::DuplicateKind { name } => write!(f, "Tile kind '{name}' is defined twice"),
            Self::InvalidConnections { kind, digits } => {
                write!(
                    f,
                    "Invalid connections {digits:?} for kind '{kind}': each edge must be 0 or 1"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPreset { row, col, reason } => {
                write!(f, "Invalid preset at ({row}, {col}): {reason}")
            }
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "Position ({row}, {col}) is outside the {rows}x{cols} grid"
                )
            }
            Self::CellAlreadyCollapsed { row, col } => {
                write!(f, "Cell ({row}, {col}) is already collapsed")
            }
            Self::ConfigParse { path, source } => {
                write!(
                    f,
                    "Failed to parse configuration '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Incomplete {
                completion,
                uncollapsed,
                cells,
            } => {
                write!(
                    f,
                    "Generation incomplete ({completion}): {uncollapsed} of {cells} cells empty"
                )
            }
            Self::Logging { reason } => write!(f, "Failed to initialise logging: {reason}"),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid preset error
pub fn invalid_preset(row: usize, col: usize, reason: &impl ToString) -> GenerationError {
    GenerationError::InvalidPreset {
        row,
        col,
        reason: reason.to_string(),
    }
}
