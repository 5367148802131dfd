//! Front/back grid pair for generation stepping.
//!
//! `current` is the readable generation, `next` the one being computed.
//! Both are allocated once and only ever exchanged, never resized.

use tracing::debug;

use crate::grid::Grid;

#[derive(Debug)]
pub struct DoubleBuffer {
    current: Grid,
    next: Grid,
}

impl DoubleBuffer {
    /// Two dead `rows x cols` grids.
    pub fn allocate(rows: usize, cols: usize) -> Self {
        debug!(rows, cols, "allocating grid buffers");
        Self {
            current: Grid::new(rows, cols),
            next: Grid::new(rows, cols),
        }
    }

    /// Take ownership of `initial` as the current generation and allocate a
    /// matching back buffer. Back buffer contents are meaningless until the
    /// engine has filled it.
    pub fn with_initial(initial: Grid) -> Self {
        let (rows, cols) = initial.dims();
        debug!(rows, cols, "allocating back buffer");
        Self {
            current: initial,
            next: Grid::new(rows, cols),
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        self.current.dims()
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Read-only front and write-only back for one generation.
    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        (&self.current, &mut self.next)
    }

    /// Exchange roles. Moves the two `Vec` headers, never the cells.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Teardown. Frees the back buffer and moves the current generation
    /// out to the caller, who owns it from here on.
    pub fn release(self) -> Grid {
        let (rows, cols) = self.dims();
        debug!(rows, cols, "releasing grid buffers");
        let Self { current, next } = self;
        drop(next);
        current
    }
}
