//! Property-based checks of the neighbor count and the generation step.

use proptest::prelude::*;

use lifegrid::{Cell, GenerationEngine, Grid, live_neighbors, run, step_serial};

fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..24, 1usize..24).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(any::<bool>(), rows * cols).prop_map(move |bits| {
            let cells = bits
                .into_iter()
                .map(|b| if b { Cell::Alive } else { Cell::Dead })
                .collect();
            Grid::from_cells(rows, cols, cells).unwrap()
        })
    })
}

/// Count by brute force over every cell of the grid.
fn count_by_distance(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let near = r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1;
            if near && (r, c) != (row, col) && grid.get(r, c).is_alive() {
                count += 1;
            }
        }
    }
    count
}

proptest! {
    #[test]
    fn prop_neighbor_count_in_range(grid in grid_strategy()) {
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let n = live_neighbors(&grid, row, col);
                prop_assert!(n <= 8);
                prop_assert_eq!(n, count_by_distance(&grid, row, col));
            }
        }
    }

    #[test]
    fn prop_parallel_step_matches_serial(grid in grid_strategy(), chunk_rows in 1usize..8) {
        let (rows, cols) = grid.dims();
        let mut serial = Grid::new(rows, cols);
        let mut parallel = Grid::new(rows, cols);
        step_serial(&grid, &mut serial);
        GenerationEngine::new(chunk_rows).step(&grid, &mut parallel);
        prop_assert_eq!(parallel, serial);
    }

    #[test]
    fn prop_deterministic(grid in grid_strategy(), generations in 0u64..12) {
        prop_assert_eq!(run(grid.clone(), generations), run(grid, generations));
    }

    #[test]
    fn prop_zero_generations_is_identity(grid in grid_strategy()) {
        prop_assert_eq!(run(grid.clone(), 0), grid);
    }

    #[test]
    fn prop_dimensions_preserved(grid in grid_strategy(), generations in 0u64..6) {
        let dims = grid.dims();
        prop_assert_eq!(run(grid, generations).dims(), dims);
    }

    #[test]
    fn prop_dead_grid_stays_dead(rows in 1usize..40, cols in 1usize..40, generations in 0u64..20) {
        prop_assert_eq!(run(Grid::new(rows, cols), generations).population(), 0);
    }
}
