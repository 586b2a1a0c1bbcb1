//! Plain-text dumps of a generated grid

use crate::io::error::{GenerationError, Result};
use crate::spatial::tiles::ConnectionVector;
use crate::spatial::{Cell, Grid};
use std::path::Path;

/// Glyph for a cell whose variant is not decided
pub const UNCOLLAPSED_GLYPH: char = '?';

// Indexed by Up << 3 | Right << 2 | Down << 1 | Left
const GLYPHS: [char; 16] = [
    '·', '╴', '╷', '┐', '╶', '─', '┌', '┬', '╵', '┘', '│', '┤', '└', '┴', '├', '┼',
];

/// Box-drawing glyph for a connection vector
pub fn glyph(connections: ConnectionVector) -> char {
    let index = connections
        .digits()
        .iter()
        .fold(0usize, |acc, &bit| (acc << 1) | usize::from(bit));
    GLYPHS.get(index).copied().unwrap_or(UNCOLLAPSED_GLYPH)
}

fn cell_glyph(cell: &Cell) -> char {
    cell.connections().map_or(UNCOLLAPSED_GLYPH, glyph)
}

/// One glyph per cell, one line per row
pub fn render_glyphs(grid: &Grid) -> String {
    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1) * 3);
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            text.push(grid.cell(row, col).map_or(UNCOLLAPSED_GLYPH, cell_glyph));
        }
        text.push('\n');
    }
    text
}

/// Each cell's connection vector as four digits, `????` when uncollapsed
pub fn render_connection_rows(grid: &Grid) -> String {
    let mut lines = Vec::with_capacity(grid.rows());
    for row in 0..grid.rows() {
        let cells: Vec<String> = (0..grid.cols())
            .map(|col| {
                grid.cell(row, col)
                    .and_then(Cell::connections)
                    .map_or_else(|| "????".to_string(), |connections| connections.to_string())
            })
            .collect();
        lines.push(cells.join(" , "));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write rendered text to a file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn write_map(output_path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(output_path, text).map_err(|e| GenerationError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write map",
        source: e,
    })
}
