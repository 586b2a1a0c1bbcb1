//! Tests for seeded choices, minimum-entropy selection and variant choice

#[cfg(test)]
mod tests {
    use tilewave::algorithm::cache::SignatureCache;
    use tilewave::algorithm::propagation::refresh_all;
    use tilewave::algorithm::selection::{
        RandomSelector, choose_variant, lowest_entropy_positions, select_cell,
    };
    use tilewave::spatial::catalog::Catalog;
    use tilewave::spatial::grid::{Cell, Grid};
    use tilewave::spatial::tiles::{Palette, Rotation, TileVariant};

    fn refreshed_grid(rows: usize, cols: usize) -> (Catalog, Palette, Grid) {
        let catalog = Catalog::standard();
        let palette = Palette::expand(&catalog);
        let mut grid = Grid::new(rows, cols, palette.len()).unwrap();
        refresh_all(&mut grid, &palette, &mut SignatureCache::new());
        (catalog, palette, grid)
    }

    // Tests identical seeds give identical sequences
    // Verified by seeding from entropy instead of the given seed
    #[test]
    fn test_selector_reproducible() {
        let mut a = RandomSelector::new(7);
        let mut b = RandomSelector::new(7);
        let first: Vec<Option<usize>> = (0..20).map(|_| a.uniform_index(10)).collect();
        let second: Vec<Option<usize>> = (0..20).map(|_| b.uniform_index(10)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|index| index.is_some_and(|i| i < 10)));
    }

    // Tests degenerate ranges never draw
    // Verified by drawing for single-option ranges
    #[test]
    fn test_uniform_index_edge_cases() {
        let mut selector = RandomSelector::new(1);
        assert_eq!(selector.uniform_index(0), None);
        assert_eq!(selector.uniform_index(1), Some(0));
        assert_eq!(selector.choose::<u8>(&[]), None);
        assert_eq!(selector.choose(&[9]), Some(9));
    }

    // Tests corners of a fresh grid have the lowest entropy
    // Verified by selecting the highest entropy instead
    #[test]
    fn test_lowest_entropy_positions_on_fresh_grid() {
        let (_, _, grid) = refreshed_grid(3, 3);
        let positions = lowest_entropy_positions(&grid);
        assert_eq!(positions, vec![[0, 0], [0, 2], [2, 0], [2, 2]]);

        let lowest = grid.cell(0, 0).unwrap().entropy();
        assert!(grid.iter().all(|cell| cell.entropy() >= lowest));
    }

    // Tests stuck cells are passed over in favour of positive entropy
    // Verified by including zero-entropy cells in the minimum search
    #[test]
    fn test_lowest_entropy_skips_stuck() {
        let mut catalog = Catalog::new();
        catalog
            .add_kind(
                "FourWay",
                tilewave::spatial::tiles::ConnectionVector::from_digits([1, 1, 1, 1]).unwrap(),
            )
            .unwrap();
        let palette = Palette::expand(&catalog);
        let mut grid = Grid::new(2, 2, palette.len()).unwrap();
        refresh_all(&mut grid, &palette, &mut SignatureCache::new());

        // Every cell touches the boundary, so nothing fits
        assert!(grid.iter().all(Cell::is_stuck));
        assert!(lowest_entropy_positions(&grid).is_empty());
        assert_eq!(select_cell(&grid, &mut RandomSelector::new(0)), None);
    }

    // Tests the chosen cell always comes from the tied minimum set
    // Verified by choosing from all uncollapsed cells
    #[test]
    fn test_select_cell_within_ties() {
        let (_, _, grid) = refreshed_grid(4, 5);
        let tied = lowest_entropy_positions(&grid);
        let mut selector = RandomSelector::new(3);
        for _ in 0..50 {
            let chosen = select_cell(&grid, &mut selector).unwrap();
            assert!(tied.contains(&chosen));
        }
    }

    // Tests a forced cell resolves to its only candidate
    // Verified by offsetting the chosen candidate index
    #[test]
    fn test_choose_variant_forced() {
        let (catalog, palette, mut grid) = refreshed_grid(1, 2);
        let empty = catalog.find("Empty").unwrap();
        let base = catalog.kind(empty).unwrap().connections();
        grid.collapse(0, 0, TileVariant::new(empty, base, Rotation::R0))
            .unwrap();
        refresh_all(&mut grid, &palette, &mut SignatureCache::new());

        // (0, 1) is closed on every edge: only Empty fits
        let cell = grid.cell(0, 1).unwrap();
        assert_eq!(cell.entropy(), 1);
        let index = choose_variant(cell, &mut RandomSelector::new(99)).unwrap();
        assert_eq!(palette.get(index).map(TileVariant::kind), Some(empty));
    }

    // Tests chosen variants are always candidates of the cell
    // Verified by choosing from the whole palette
    #[test]
    fn test_choose_variant_among_candidates() {
        let (_, _, grid) = refreshed_grid(3, 3);
        let cell = grid.cell(1, 1).unwrap();
        let mut selector = RandomSelector::new(5);
        for _ in 0..50 {
            let index = choose_variant(cell, &mut selector).unwrap();
            assert!(cell.candidates().contains(index));
        }

        let collapsed_like = tilewave::spatial::grid::Cell::new(0, 0, 0);
        assert_eq!(choose_variant(&collapsed_like, &mut selector), None);
    }
}
