//! Preset placements pinned to the grid before solving

use crate::io::configuration::PresetSpec;
use crate::io::error::{GenerationError, Result, invalid_preset};
use crate::spatial::catalog::{Catalog, TileKind};
use crate::spatial::Grid;
use crate::spatial::tiles::{Direction, Rotation, TileVariant};
use std::collections::{HashSet, VecDeque};
use tracing::warn;

/// Single preset placement instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefillPlacement {
    /// Grid coordinates as `[row, col]`
    pub position: [usize; 2],
    /// Variant to pin there
    pub variant: TileVariant,
}

/// Queue of cells to force-collapse before the solver's first pass
///
/// Presets may use kinds that are excluded from random selection. They are
/// placed as given; a preset whose connections point off the grid is logged,
/// not rejected.
#[derive(Debug, Clone, Default)]
pub struct PrefillData {
    /// Placements in the order they will be applied
    pub placement_queue: VecDeque<PrefillPlacement>,
}

impl PrefillData {
    /// Create an empty prefill
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve configuration entries against a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A preset names a kind that is not in the catalog
    /// - A rotation is not 0, 90, 180 or 270 degrees
    pub fn from_specs(specs: &[PresetSpec], catalog: &Catalog) -> Result<Self> {
        let mut prefill = Self::new();

        for spec in specs {
            let id = catalog.require(&spec.kind)?;
            let rotation = Rotation::from_degrees(spec.rotation).ok_or_else(|| {
                invalid_preset(
                    spec.row,
                    spec.col,
                    &format!(
                        "rotation {} is not a multiple of 90 below 360",
                        spec.rotation
                    ),
                )
            })?;
            let base = catalog
                .kind(id)
                .map(TileKind::connections)
                .ok_or_else(|| GenerationError::UnknownKind {
                    name: spec.kind.clone(),
                })?;

            prefill.push(spec.row, spec.col, TileVariant::new(id, base, rotation));
        }

        Ok(prefill)
    }

    /// Queue a placement
    pub fn push(&mut self, row: usize, col: usize, variant: TileVariant) {
        self.placement_queue.push_back(PrefillPlacement {
            position: [row, col],
            variant,
        });
    }

    /// Get the next placement from the queue
    pub fn next_placement(&mut self) -> Option<PrefillPlacement> {
        self.placement_queue.pop_front()
    }

    /// Number of queued placements
    pub fn len(&self) -> usize {
        self.placement_queue.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.placement_queue.is_empty()
    }

    /// Force-collapse every queued placement into the grid
    ///
    /// Returns the number of cells pinned.
    ///
    /// # Errors
    ///
    /// Returns an error if a placement lies outside the grid or targets a
    /// cell that is already collapsed. The queue is validated before any
    /// cell is touched.
    pub fn apply(mut self, grid: &mut Grid) -> Result<usize> {
        let mut seen = HashSet::new();
        for placement in &self.placement_queue {
            let [row, col] = placement.position;
            let cell = grid.cell(row, col).ok_or_else(|| {
                invalid_preset(
                    row,
                    col,
                    &format!("outside the {}x{} grid", grid.rows(), grid.cols()),
                )
            })?;
            if cell.is_collapsed() || !seen.insert(placement.position) {
                return Err(invalid_preset(row, col, &"cell is already pinned"));
            }
        }

        let mut applied = 0;
        while let Some(placement) = self.next_placement() {
            let [row, col] = placement.position;
            warn_on_open_boundary(grid, &placement);
            grid.collapse(row, col, placement.variant)?;
            applied += 1;
        }

        Ok(applied)
    }
}

fn warn_on_open_boundary(grid: &Grid, placement: &PrefillPlacement) {
    let [row, col] = placement.position;
    for direction in Direction::ALL {
        if grid.neighbor_position(row, col, direction).is_none()
            && placement.variant.connections().connects(direction)
        {
            warn!(
                row,
                col,
                ?direction,
                "preset connects off the edge of the grid"
            );
        }
    }
}
