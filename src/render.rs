use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::grid::Grid;

const ALIVE: [u8; 4] = [236, 239, 244, 255];
const DEAD: [u8; 4] = [22, 26, 34, 255];

/// Largest snapshot rendered, in pixels (8192 x 8192, 256 MiB of RGBA).
pub const MAX_PIXELS: usize = 8192 * 8192;

/// Fail unless a `rows x cols` grid at `scale` fits under [`MAX_PIXELS`].
pub fn check_raster(rows: usize, cols: usize, scale: u32) -> Result<()> {
    let scale = scale.max(1) as usize;
    let pixels = rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(scale))
        .and_then(|n| n.checked_mul(scale));
    match pixels {
        Some(n) if n <= MAX_PIXELS => Ok(()),
        _ => Err(Error::SnapshotTooLarge {
            rows,
            cols,
            scale: scale as u32,
            max: MAX_PIXELS,
        }),
    }
}

/// RGBA8 raster of `grid`, `scale x scale` pixels per cell.
/// Returns `(rgba, width, height)`.
pub fn render_grid(grid: &Grid, scale: u32) -> (Vec<u8>, u32, u32) {
    let scale = scale.max(1) as usize;
    let w = grid.cols() * scale;
    let h = grid.rows() * scale;
    let mut rgba = vec![0u8; w * h * 4];

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, line)| {
        let row = grid.row(y / scale);
        for (x, px) in line.chunks_exact_mut(4).enumerate() {
            let color = if row[x / scale].is_alive() { ALIVE } else { DEAD };
            px.copy_from_slice(&color);
        }
    });

    (rgba, w as u32, h as u32)
}

pub fn save_png(path: &Path, grid: &Grid, scale: u32) -> Result<()> {
    check_raster(grid.rows(), grid.cols(), scale)?;
    let (rgba, w, h) = render_grid(grid, scale);
    image::save_buffer(path, &rgba, w, h, image::ColorType::Rgba8)?;
    Ok(())
}
