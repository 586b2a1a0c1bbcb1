//! Grid tile map generation by wave function collapse over directional connections
//!
//! Every tile kind declares which of its four edges carry a connection. Kinds
//! are expanded into their distinct rotations, and each grid cell is filled
//! with a variant whose edges agree with every collapsed neighbour and stay
//! closed along the grid boundary.

#![forbid(unsafe_code)]

/// Signature propagation, entropy selection and the solver loop
pub mod algorithm;
/// Configuration, presets, rendering, logging and the command-line tool
pub mod io;
/// Tile kinds, rotated variants and the cell grid
pub mod spatial;

pub use algorithm::executor::generate_map;
pub use io::error::{GenerationError, Result};
