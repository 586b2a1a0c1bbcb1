//! Fixed-size grid of cells awaiting collapse
//!
//! The grid is the single owner of every cell. Entropy-ordered selection works
//! on a transient, sorted view of borrowed cells rather than a second list, so
//! the two can never drift apart.

use crate::algorithm::bitset::VariantSet;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::tiles::{ConnectionVector, Direction, Signature, TileVariant};
use ndarray::Array2;

/// One grid position and its collapse state
///
/// A cell is either uncollapsed, carrying the signature its neighbours demand
/// and the palette indexes that satisfy it, or collapsed with a resolved
/// variant. Collapse is one-way.
#[derive(Clone, Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    resolved: Option<TileVariant>,
    signature: Signature,
    candidates: VariantSet,
    entropy: usize,
}

impl Cell {
    /// Create an uncollapsed cell admitting the whole palette
    pub fn new(row: usize, col: usize, palette_len: usize) -> Self {
        Self {
            row,
            col,
            resolved: None,
            signature: Signature::ANY,
            candidates: VariantSet::all(palette_len),
            entropy: palette_len,
        }
    }

    /// Row index
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Column index
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Position as `[row, col]`
    pub const fn position(&self) -> [usize; 2] {
        [self.row, self.col]
    }

    /// Whether a variant has been assigned
    pub const fn is_collapsed(&self) -> bool {
        self.resolved.is_some()
    }

    /// Resolved variant, present iff collapsed
    pub const fn variant(&self) -> Option<&TileVariant> {
        self.resolved.as_ref()
    }

    /// Final connections, present iff collapsed
    pub fn connections(&self) -> Option<ConnectionVector> {
        self.resolved.map(|variant| variant.connections())
    }

    /// Signature from the most recent refresh
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Palette indexes compatible with the current signature
    pub const fn candidates(&self) -> &VariantSet {
        &self.candidates
    }

    /// Number of compatible variants; 0 once collapsed
    pub const fn entropy(&self) -> usize {
        self.entropy
    }

    /// Uncollapsed with nothing left that fits
    pub const fn is_stuck(&self) -> bool {
        !self.is_collapsed() && self.entropy == 0
    }

    pub(crate) fn refresh(&mut self, signature: Signature, candidates: VariantSet) {
        self.entropy = candidates.count();
        self.signature = signature;
        self.candidates = candidates;
    }

    fn resolve(&mut self, variant: TileVariant) {
        self.resolved = Some(variant);
        self.candidates.clear();
        self.entropy = 0;
    }
}

/// Rectangular grid of cells with fixed dimensions
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    palette_len: usize,
}

impl Grid {
    /// Allocate a grid of fresh uncollapsed cells, row-major
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`
    pub fn new(rows: usize, cols: usize, palette_len: usize) -> Result<Self> {
        for (parameter, value) in [("rows", rows), ("cols", cols)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            Cell::new(row, col, palette_len)
        });

        Ok(Self { cells, palette_len })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Palette size the candidate sets were built for
    pub const fn palette_len(&self) -> usize {
        self.palette_len
    }

    /// Cell at a position
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get([row, col])
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut([row, col])
    }

    /// Coordinates of the neighbour in a direction, if on the grid
    pub fn neighbor_position(
        &self,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Option<[usize; 2]> {
        direction.step(row, col, self.rows(), self.cols())
    }

    /// Neighbouring cell in a direction, if on the grid
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<&Cell> {
        self.neighbor_position(row, col, direction)
            .and_then(|[r, c]| self.cell(r, c))
    }

    /// All cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of cells still awaiting collapse
    pub fn uncollapsed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !cell.is_collapsed())
            .count()
    }

    /// Whether every cell has been collapsed
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// First uncollapsed cell with no compatible variant, in row-major order
    pub fn first_stuck(&self) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.is_stuck())
    }

    /// Uncollapsed cells ordered by ascending entropy
    ///
    /// Equal entropies keep row-major order. This is a transient view over the
    /// grid's own cells.
    pub fn by_entropy(&self) -> Vec<&Cell> {
        let mut cells: Vec<&Cell> = self
            .cells
            .iter()
            .filter(|cell| !cell.is_collapsed())
            .collect();
        cells.sort_by_key(|cell| cell.entropy());
        cells
    }

    /// Force a cell to a variant, making it permanent
    ///
    /// # Errors
    ///
    /// Returns an error if the position is off the grid or already collapsed
    pub fn collapse(&mut self, row: usize, col: usize, variant: TileVariant) -> Result<()> {
        let (rows, cols) = (self.rows(), self.cols());
        let cell = self
            .cell_mut(row, col)
            .ok_or(GenerationError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            })?;

        if cell.is_collapsed() {
            return Err(GenerationError::CellAlreadyCollapsed { row, col });
        }

        cell.resolve(variant);
        Ok(())
    }

    /// Whether two cells are joined through their shared edge
    ///
    /// True when both cells are collapsed and each connects towards the other.
    pub fn is_linked(&self, row: usize, col: usize, direction: Direction) -> bool {
        let own = self.cell(row, col).and_then(Cell::connections);
        let other = self
            .neighbor(row, col, direction)
            .and_then(Cell::connections);

        match (own, other) {
            (Some(own), Some(other)) => {
                own.connects(direction) && other.connects(direction.opposite())
            }
            _ => false,
        }
    }
}
