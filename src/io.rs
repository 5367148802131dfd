//! Grid text format.
//!
//! Input: a `"<rows> <cols>"` header line, then one line per row with `'*'`
//! for alive and `' '` for dead. Output: every cell prefixed by `'|'`, each
//! row closed by `"|\n"`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid, check_size};

/// Handling of rows that don't match the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Reject unknown characters, rows of the wrong width and missing rows.
    #[default]
    Strict,
    /// Skip unknown characters, ignore overflow, treat missing cells as dead.
    Lenient,
}

/// Parse the `"<rows> <cols>"` header line.
pub fn parse_header(header: &str) -> Result<(usize, usize)> {
    let malformed = || Error::MalformedHeader {
        header: header.to_string(),
    };
    let mut fields = header.split_whitespace();
    let (Some(rows), Some(cols), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed());
    };
    let rows: usize = rows.parse().map_err(|_| malformed())?;
    let cols: usize = cols.parse().map_err(|_| malformed())?;
    if rows == 0 || cols == 0 {
        return Err(malformed());
    }
    check_size(rows, cols)?;
    Ok((rows, cols))
}

fn describe(b: u8) -> String {
    if b.is_ascii_graphic() {
        format!("{:?}", b as char)
    } else {
        format!("byte 0x{b:02X}")
    }
}

fn fill_row_strict(grid: &mut Grid, row: usize, text: &[u8]) -> Result<()> {
    let cols = grid.cols();
    let line = row + 2;
    for (col, &b) in text.iter().enumerate() {
        let cell = Cell::from_byte(b).ok_or_else(|| Error::MalformedGrid {
            line,
            message: format!("invalid character {} at column {}", describe(b), col + 1),
        })?;
        if col < cols {
            grid.set(row, col, cell);
        }
    }
    if text.len() != cols {
        return Err(Error::MalformedGrid {
            line,
            message: format!("expected {cols} cells, found {}", text.len()),
        });
    }
    Ok(())
}

/// Returns the number of bytes that were skipped or dropped.
fn fill_row_lenient(grid: &mut Grid, row: usize, text: &[u8]) -> usize {
    let cols = grid.cols();
    let mut col = 0;
    let mut ignored = 0;
    for &b in text {
        match Cell::from_byte(b) {
            Some(cell) if col < cols => {
                grid.set(row, col, cell);
                col += 1;
            }
            _ => ignored += 1,
        }
    }
    ignored
}

/// Read one line into `buf` without its `\n` / `\r\n` terminator.
/// Returns `false` at end of input.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(true)
}

/// Parse a grid from its text form. Rows are read as raw bytes, so input
/// that is not UTF-8 only matters where it lands in a row.
pub fn parse_grid<R: BufRead>(mut reader: R, mode: LoadMode) -> Result<Grid> {
    let mut buf = Vec::new();
    read_line(&mut reader, &mut buf)?;
    let (rows, cols) = parse_header(&String::from_utf8_lossy(&buf))?;
    let mut grid = Grid::new(rows, cols);

    let mut read = 0;
    while read < rows && read_line(&mut reader, &mut buf)? {
        match mode {
            LoadMode::Strict => fill_row_strict(&mut grid, read, &buf)?,
            LoadMode::Lenient => {
                let ignored = fill_row_lenient(&mut grid, read, &buf);
                if ignored > 0 {
                    debug!(row = read, ignored, "skipped characters");
                }
            }
        }
        read += 1;
    }

    if read < rows {
        match mode {
            LoadMode::Strict => {
                return Err(Error::MalformedGrid {
                    line: read + 2,
                    message: format!("expected {rows} rows, found {read}"),
                });
            }
            LoadMode::Lenient => warn!(expected = rows, found = read, "missing rows treated as dead"),
        }
    }

    Ok(grid)
}

pub fn load_grid(path: &Path, mode: LoadMode) -> Result<Grid> {
    let file = File::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(BufReader::new(file), mode)?;
    debug!(path = %path.display(), rows = grid.rows(), cols = grid.cols(), "loaded grid");
    Ok(grid)
}

/// Serialize `grid` one row per line.
pub fn write_grid<W: Write>(grid: &Grid, mut out: W) -> std::io::Result<()> {
    let mut line = String::with_capacity(grid.cols() * 2 + 2);
    for row in 0..grid.rows() {
        line.clear();
        for cell in grid.row(row) {
            line.push('|');
            line.push(cell.as_char());
        }
        line.push_str("|\n");
        out.write_all(line.as_bytes())?;
    }
    out.flush()
}

pub fn format_grid(grid: &Grid) -> String {
    let mut buf = Vec::with_capacity(grid.rows() * (grid.cols() * 2 + 2));
    // writing into a Vec cannot fail
    let _ = write_grid(grid, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn save_grid(path: &Path, grid: &Grid) -> Result<()> {
    let access = |source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(access)?;
    write_grid(grid, BufWriter::new(file)).map_err(access)?;
    debug!(path = %path.display(), "saved grid");
    Ok(())
}
