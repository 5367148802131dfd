use crate::grid::Grid;

/// Moore neighborhood as `(d_row, d_col)` pairs.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Apply an offset, returning `None` when it leaves the grid.
/// No wrapping: the grid edge is a hard boundary.
#[inline]
pub fn offset(
    row: usize,
    col: usize,
    d_row: isize,
    d_col: isize,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(d_row).filter(|&r| r < rows)?;
    let c = col.checked_add_signed(d_col).filter(|&c| c < cols)?;
    Some((r, c))
}

/// In-bounds Moore neighbors of `(row, col)`.
pub fn neighbors8(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter_map(move |(dr, dc)| offset(row, col, dr, dc, rows, cols))
}

/// Live cells among the 8 neighbors of `(row, col)`, in `0..=8`.
/// Read-only; safe to call from many workers on the same grid.
#[inline]
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (rows, cols) = grid.dims();
    neighbors8(row, col, rows, cols)
        .map(|(r, c)| grid.get(r, c) as u8)
        .sum()
}
