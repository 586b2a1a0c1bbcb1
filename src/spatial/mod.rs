//! Spatial data structures for tile map generation
//!
//! This module contains the data model the solver works on:
//! - Directions, connection vectors and rotated tile variants
//! - The tile kind catalog and its exclusion set
//! - The grid of cells and its entropy-ordered view

/// Tile kind catalog and exclusion set
pub mod catalog;
/// Grid and cell state
pub mod grid;
/// Directional tile data and rotation expansion
pub mod tiles;

pub use catalog::{Catalog, KindId};
pub use grid::{Cell, Grid};
pub use tiles::{ConnectionVector, Direction, Palette, Rotation, TileVariant};
