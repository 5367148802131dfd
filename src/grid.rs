use crate::error::{Error, Result};
use crate::rng::Rng;

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Text encoding used by the grid files: `'*'` alive, `' '` dead.
    pub fn from_byte(b: u8) -> Option<Cell> {
        match b {
            b'*' => Some(Cell::Alive),
            b' ' => Some(Cell::Dead),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Cell::Alive => '*',
            Cell::Dead => ' ',
        }
    }
}

/// Upper bound on cells in one grid buffer (4 GiB at one byte per cell).
pub const MAX_CELLS: usize = u32::MAX as usize;

/// Fail unless a `rows x cols` grid fits under [`MAX_CELLS`].
pub fn check_size(rows: usize, cols: usize) -> Result<()> {
    match rows.checked_mul(cols) {
        Some(n) if n <= MAX_CELLS => Ok(()),
        _ => Err(Error::TooLarge {
            rows,
            cols,
            max: MAX_CELLS,
        }),
    }
}

/// Row-major flat grid of cells. Dimensions are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    data: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// All-dead grid. Panics on a zero dimension or one past [`MAX_CELLS`];
    /// use [`Grid::from_cells`] or [`check_size`] for unvalidated input.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        assert!(check_size(rows, cols).is_ok(), "grid of {rows}x{cols} cells is too large");
        Self {
            data: vec![Cell::Dead; rows * cols],
            rows,
            cols,
        }
    }

    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid { rows, cols });
        }
        check_size(rows, cols)?;
        if cells.len() != rows * cols {
            return Err(Error::CellCount {
                expected: rows * cols,
                found: cells.len(),
            });
        }
        Ok(Self {
            data: cells,
            rows,
            cols,
        })
    }

    /// Dead grid with the given `(row, col)` coordinates set alive.
    pub fn with_alive<I>(rows: usize, cols: usize, alive: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(rows, cols);
        for (row, col) in alive {
            grid.set(row, col, Cell::Alive);
        }
        grid
    }

    /// Random soup: each cell alive with probability `fill`.
    pub fn random(rows: usize, cols: usize, fill: f64, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut grid = Self::new(rows, cols);
        for cell in grid.data.iter_mut() {
            if rng.chance(fill) {
                *cell = Cell::Alive;
            }
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let i = self.idx(row, col);
        self.data[i] = cell;
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// Mutable view of the cell storage. Length is fixed; the grid's shape
    /// cannot change through it.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.data
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.data.iter().filter(|c| c.is_alive()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.dims(), (3, 4));
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn set_and_get_are_row_major() {
        let mut grid = Grid::new(2, 3);
        grid.set(1, 2, Cell::Alive);
        assert_eq!(grid.get(1, 2), Cell::Alive);
        assert_eq!(grid.cells()[5], Cell::Alive);
        assert_eq!(grid.row(1), &[Cell::Dead, Cell::Dead, Cell::Alive]);
    }

    #[test]
    fn from_cells_validates_shape() {
        assert!(matches!(
            Grid::from_cells(0, 3, vec![]),
            Err(Error::EmptyGrid { rows: 0, cols: 3 })
        ));
        assert!(matches!(
            Grid::from_cells(2, 2, vec![Cell::Dead; 3]),
            Err(Error::CellCount { expected: 4, found: 3 })
        ));
        assert!(Grid::from_cells(2, 2, vec![Cell::Alive; 4]).is_ok());
    }

    #[test]
    fn size_limit() {
        assert!(check_size(1, MAX_CELLS).is_ok());
        assert!(matches!(check_size(2, MAX_CELLS), Err(Error::TooLarge { .. })));
        assert!(matches!(check_size(usize::MAX, 2), Err(Error::TooLarge { .. })));
        assert!(matches!(
            Grid::from_cells(usize::MAX, 2, vec![]),
            Err(Error::TooLarge { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn zero_rows_panics() {
        let _ = Grid::new(0, 5);
    }

    #[test]
    fn random_is_seeded() {
        let a = Grid::random(16, 16, 0.3, 9);
        let b = Grid::random(16, 16, 0.3, 9);
        assert_eq!(a, b);
        assert_eq!(Grid::random(8, 8, 0.0, 1).population(), 0);
        assert_eq!(Grid::random(8, 8, 1.0, 1).population(), 64);
    }

    #[test]
    fn cell_chars() {
        assert_eq!(Cell::from_byte(b'*'), Some(Cell::Alive));
        assert_eq!(Cell::from_byte(b' '), Some(Cell::Dead));
        assert_eq!(Cell::from_byte(b'x'), None);
        assert_eq!(Cell::from_byte(0xB7), None);
        assert_eq!(Cell::Alive.as_char(), '*');
        assert_eq!(Cell::Dead.as_char(), ' ');
    }
}
