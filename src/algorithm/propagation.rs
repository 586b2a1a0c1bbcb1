use crate::{
    algorithm::cache::SignatureCache,
    spatial::Grid,
    spatial::tiles::{Direction, Palette, Requirement, Signature},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which uncollapsed cells are re-evaluated after a collapse
///
/// Both modes produce identical signatures: a collapse only changes what its
/// four direct neighbours see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationMode {
    /// Refresh only the uncollapsed neighbours of the last collapsed cell
    #[default]
    Neighbors,
    /// Refresh every uncollapsed cell on every pass
    Full,
}

/// Compute what a cell's four neighbours require of its edges
///
/// Off-grid edges are closed so no connection points off the map; edges
/// facing a collapsed neighbour must mirror its connection on the shared
/// edge; edges facing an uncollapsed neighbour are unconstrained.
pub fn required_signature(grid: &Grid, row: usize, col: usize) -> Signature {
    let mut signature = Signature::ANY;

    for direction in Direction::ALL {
        let requirement = grid
            .neighbor(row, col, direction)
            .map_or(Requirement::Closed, |neighbor| {
                neighbor.connections().map_or(Requirement::Any, |connections| {
                    Requirement::matching(connections.connects(direction.opposite()))
                })
            });
        signature.set(direction, requirement);
    }

    signature
}

/// Recompute one cell's signature and candidate set
///
/// Collapsed cells are left untouched. Returns the new entropy, or `None` if
/// the cell is collapsed or off the grid.
pub fn refresh_cell(
    grid: &mut Grid,
    palette: &Palette,
    cache: &mut SignatureCache,
    row: usize,
    col: usize,
) -> Option<usize> {
    if grid.cell(row, col)?.is_collapsed() {
        return None;
    }

    let signature = required_signature(grid, row, col);
    let candidates = cache.compatible(signature, palette).clone();
    let cell = grid.cell_mut(row, col)?;
    cell.refresh(signature, candidates);

    if cell.is_stuck() {
        debug!(row, col, %signature, "cell has no compatible variants");
    }
    Some(cell.entropy())
}

/// Refresh every uncollapsed cell on the grid
pub fn refresh_all(grid: &mut Grid, palette: &Palette, cache: &mut SignatureCache) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            refresh_cell(grid, palette, cache, row, col);
        }
    }
}

/// Refresh the uncollapsed neighbours of a just-collapsed cell
pub fn refresh_neighbors(
    grid: &mut Grid,
    palette: &Palette,
    cache: &mut SignatureCache,
    row: usize,
    col: usize,
) {
    for direction in Direction::ALL {
        if let Some([r, c]) = grid.neighbor_position(row, col, direction) {
            refresh_cell(grid, palette, cache, r, c);
        }
    }
}

/// Bring candidate sets up to date before the next selection
///
/// Without a previous collapse (the first pass, which also picks up presets)
/// the whole grid is refreshed regardless of mode.
pub fn propagate(
    grid: &mut Grid,
    palette: &Palette,
    cache: &mut SignatureCache,
    mode: PropagationMode,
    last_collapsed: Option<[usize; 2]>,
) {
    match (mode, last_collapsed) {
        (PropagationMode::Neighbors, Some([row, col])) => {
            refresh_neighbors(grid, palette, cache, row, col);
        }
        _ => refresh_all(grid, palette, cache),
    }
}
