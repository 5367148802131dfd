use rayon::prelude::*;

use crate::grid::{Cell, Grid};
use crate::neighbors::live_neighbors;

/// B3/S23: survive on 2 or 3 live neighbors, birth on exactly 3.
#[inline]
pub fn next_state(cell: Cell, live: u8) -> Cell {
    match (cell, live) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Computes one generation from `current` into `next`.
///
/// The row range is cut into disjoint blocks of `chunk_rows` rows, one rayon
/// task per block. A task writes only the cells of its own block in `next`
/// and reads `current` freely, so no locking is involved. The parallel
/// iterator returning is the barrier: every cell of `next` has been written
/// exactly once by then.
#[derive(Clone, Copy, Debug)]
pub struct GenerationEngine {
    chunk_rows: usize,
}

impl Default for GenerationEngine {
    fn default() -> Self {
        Self { chunk_rows: 1 }
    }
}

impl GenerationEngine {
    pub fn new(chunk_rows: usize) -> Self {
        Self {
            chunk_rows: chunk_rows.max(1),
        }
    }

    pub fn chunk_rows(&self) -> usize {
        self.chunk_rows
    }

    pub fn step(&self, current: &Grid, next: &mut Grid) {
        assert_eq!(current.dims(), next.dims(), "buffer dimensions diverged");
        let (rows, cols) = current.dims();
        // a block never spans more than the whole grid
        let chunk_rows = self.chunk_rows.min(rows);

        next.cells_mut()
            .par_chunks_mut(cols * chunk_rows)
            .enumerate()
            .for_each(|(block, cells)| {
                let first_row = block * chunk_rows;
                for (i, out) in cells.iter_mut().enumerate() {
                    let row = first_row + i / cols;
                    let col = i % cols;
                    *out = next_state(current.get(row, col), live_neighbors(current, row, col));
                }
            });
    }
}

/// Single-threaded step with the same semantics as [`GenerationEngine::step`].
pub fn step_serial(current: &Grid, next: &mut Grid) {
    assert_eq!(current.dims(), next.dims(), "buffer dimensions diverged");
    let (rows, cols) = current.dims();
    for row in 0..rows {
        for col in 0..cols {
            next.set(
                row,
                col,
                next_state(current.get(row, col), live_neighbors(current, row, col)),
            );
        }
    }
}
