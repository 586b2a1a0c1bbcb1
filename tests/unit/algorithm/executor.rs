//! Tests for the solver loop, completion states and run reporting

#[cfg(test)]
mod tests {
    use tilewave::GenerationError;
    use tilewave::algorithm::executor::{Completion, SolverConfig, Step, WaveCollapse, generate_map};
    use tilewave::algorithm::propagation::PropagationMode;
    use tilewave::io::configuration::iteration_limit;
    use tilewave::spatial::catalog::Catalog;
    use tilewave::spatial::grid::Grid;
    use tilewave::spatial::tiles::{ConnectionVector, Direction, Palette};

    fn standard_solver(rows: usize, cols: usize, seed: u64) -> WaveCollapse {
        let palette = Palette::expand(&Catalog::standard());
        let grid = Grid::new(rows, cols, palette.len()).unwrap();
        WaveCollapse::new(grid, palette, SolverConfig::default(), seed).unwrap()
    }

    fn single_kind_palette(digits: [u8; 4]) -> Palette {
        let mut catalog = Catalog::new();
        catalog
            .add_kind("Only", ConnectionVector::from_digits(digits).unwrap())
            .unwrap();
        Palette::expand(&catalog)
    }

    // Tests every placed cell agrees with its neighbours and keeps the boundary closed
    // Verified by mirroring the neighbour's bit on the wrong side when building signatures
    #[test]
    fn test_run_respects_adjacency() {
        let mut completed = 0;
        for seed in 0..16 {
            let mut solver = standard_solver(6, 6, seed);
            let report = solver.run();
            assert_eq!(report.collapsed + report.uncollapsed, 36);

            if report.is_complete() {
                completed += 1;
                assert_eq!(report.iterations, 36);
                assert!(solver.grid().is_complete());
            }

            let grid = solver.grid();
            for cell in grid.iter() {
                let Some(connections) = cell.connections() else {
                    continue;
                };
                for direction in Direction::ALL {
                    match grid.neighbor(cell.row(), cell.col(), direction) {
                        None => assert!(!connections.connects(direction)),
                        Some(neighbor) => {
                            if let Some(other) = neighbor.connections() {
                                assert_eq!(
                                    connections.connects(direction),
                                    other.connects(direction.opposite())
                                );
                            }
                        }
                    }
                }
            }
        }
        assert!(completed > 0);
    }

    // Tests the default ceiling is one iteration per cell plus one per row
    // Verified by dropping the per-row headroom
    #[test]
    fn test_default_iteration_limit() {
        let solver = standard_solver(3, 5, 0);
        assert_eq!(solver.iteration_limit(), 18);
        assert_eq!(iteration_limit(3, 5), 18);
        assert_eq!(solver.uncollapsed(), 15);
        assert_eq!(solver.iteration(), 0);
    }

    // Tests identical seeds reproduce identical grids
    // Verified by reseeding the selector on every iteration
    #[test]
    fn test_seed_reproducibility() {
        let mut a = standard_solver(5, 7, 1234);
        let mut b = standard_solver(5, 7, 1234);
        a.run();
        b.run();

        for (first, second) in a.grid().iter().zip(b.grid().iter()) {
            assert_eq!(first.variant(), second.variant());
        }
    }

    // Tests both propagation modes produce the same grid for a seed
    // Verified by skipping the Down neighbour in neighbour refresh
    #[test]
    fn test_propagation_modes_identical() {
        let palette = Palette::expand(&Catalog::standard());
        let results: Vec<Vec<_>> = [PropagationMode::Neighbors, PropagationMode::Full]
            .into_iter()
            .map(|propagation| {
                let grid = Grid::new(6, 8, palette.len()).unwrap();
                let config = SolverConfig {
                    propagation,
                    iteration_limit: None,
                };
                let mut solver = WaveCollapse::new(grid, palette.clone(), config, 9).unwrap();
                solver.run();
                solver
                    .grid()
                    .iter()
                    .map(|cell| cell.variant().copied())
                    .collect()
            })
            .collect();

        assert_eq!(results.first(), results.last());
    }

    // Tests a palette that can never satisfy the boundary ends in a contradiction
    // Verified by treating stuck cells as selectable
    #[test]
    fn test_contradiction_reported() {
        let palette = single_kind_palette([1, 1, 1, 1]);
        let grid = Grid::new(2, 2, palette.len()).unwrap();
        let mut solver = WaveCollapse::new(grid, palette, SolverConfig::default(), 0).unwrap();
        let report = solver.run();

        assert_eq!(
            report.completion,
            Completion::Contradiction { row: 0, col: 0 }
        );
        assert_eq!(report.collapsed, 0);
        assert_eq!(report.uncollapsed, 4);
        assert!(!report.is_complete());
    }

    // Tests an exhausted iteration budget stops the run
    // Verified by ignoring the configured ceiling
    #[test]
    fn test_iteration_limit_reported() {
        let palette = single_kind_palette([0, 0, 0, 0]);
        let grid = Grid::new(3, 3, palette.len()).unwrap();
        let config = SolverConfig {
            propagation: PropagationMode::Neighbors,
            iteration_limit: Some(4),
        };
        let mut solver = WaveCollapse::new(grid, palette, config, 11).unwrap();
        let report = solver.run();

        assert_eq!(
            report.completion,
            Completion::IterationLimit { iterations: 4 }
        );
        assert_eq!(report.collapsed, 4);
        assert_eq!(report.uncollapsed, 5);
    }

    // Tests each step reports a collapse and finished runs stay finished
    // Verified by clearing the finished state after reporting it
    #[test]
    fn test_run_iteration_steps() {
        let palette = single_kind_palette([0, 0, 0, 0]);
        let grid = Grid::new(1, 2, palette.len()).unwrap();
        let mut solver = WaveCollapse::new(grid, palette, SolverConfig::default(), 0).unwrap();

        let Step::Collapsed(first) = solver.run_iteration() else {
            unreachable!("Expected a collapse on the first iteration");
        };
        assert_eq!(first.iteration, 1);
        assert_eq!(first.palette_index, 0);
        assert!(first.variant.connections().is_empty());

        assert!(matches!(solver.run_iteration(), Step::Collapsed(_)));
        assert_eq!(solver.run_iteration(), Step::Finished(Completion::Complete));
        assert_eq!(solver.run_iteration(), Step::Finished(Completion::Complete));
        assert_eq!(solver.iteration(), 2);
    }

    // Tests the observer sees every collapse in order
    // Verified by skipping the callback for forced cells
    #[test]
    fn test_run_with_observer() {
        let mut solver = standard_solver(4, 4, 8);
        let mut seen = Vec::new();
        let report = solver.run_with(|collapse| seen.push(collapse.iteration));

        assert_eq!(seen, (1..=seen.len()).collect::<Vec<_>>());
        assert_eq!(seen.len(), report.collapsed);
    }

    // Tests presets already on the grid are respected by their neighbours
    // Verified by starting propagation from neighbour mode with no previous collapse
    #[test]
    fn test_respects_existing_collapse() {
        let catalog = Catalog::standard();
        let palette = Palette::expand(&catalog);
        let mut grid = Grid::new(3, 3, palette.len()).unwrap();
        let four_way = catalog.find("FourWay").unwrap();
        let variant = *palette.variants_of(four_way).next().unwrap();
        grid.collapse(1, 1, variant).unwrap();

        let mut solver = WaveCollapse::new(grid, palette, SolverConfig::default(), 3).unwrap();
        assert_eq!(solver.uncollapsed(), 8);
        let report = solver.run();
        assert!(report.is_complete());
        assert_eq!(report.iterations, 8);

        for direction in Direction::ALL {
            assert!(solver.grid().is_linked(1, 1, direction));
        }
    }

    // Tests mismatched or empty palettes are rejected up front
    // Verified by removing the palette size check
    #[test]
    fn test_new_rejects_bad_palette() {
        let palette = Palette::expand(&Catalog::standard());
        let grid = Grid::new(2, 2, palette.len() + 1).unwrap();
        assert!(matches!(
            WaveCollapse::new(grid, palette, SolverConfig::default(), 0),
            Err(GenerationError::InvalidParameter { parameter: "palette", .. })
        ));

        let grid = Grid::new(2, 2, 0).unwrap();
        let config = SolverConfig::default();
        let error = WaveCollapse::new(grid, Palette::default(), config, 0)
            .err()
            .unwrap();
        assert!(matches!(
            error,
            GenerationError::InvalidParameter { parameter: "palette", .. }
        ));
        assert!(error.to_string().contains("contains no variants"));
    }

    // Tests the one-call entry point hands back the grid its report describes
    #[test]
    fn test_generate_map() {
        let palette = Palette::expand(&Catalog::standard());
        let grid = Grid::new(4, 6, palette.len()).unwrap();
        let (grid, report) = generate_map(grid, palette, 42).unwrap();

        assert_eq!(report.is_complete(), grid.is_complete());
        assert_eq!(report.uncollapsed, grid.uncollapsed_count());
    }
}
