//! JSON request handling for the HTTP server.

use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::io::{LoadMode, format_grid, parse_grid, parse_header};
use crate::render::{check_raster, render_grid};
use crate::simulation::{Timing, evolve};

/// Upper bound on `rows * cols` accepted over HTTP.
pub const MAX_REQUEST_CELLS: usize = 4096 * 4096;
pub const MAX_GENERATIONS: u64 = 100_000;

#[derive(Debug, Deserialize)]
pub struct EvolveRequest {
    /// Grid in the text input format.
    pub grid: Option<String>,
    /// Random soup, used when `grid` is absent.
    pub random: Option<RandomSoup>,
    pub generations: u64,
    #[serde(default)]
    pub lenient: bool,
    pub scale: Option<u32>,
    pub threads: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RandomSoup {
    pub rows: usize,
    pub cols: usize,
    #[serde(default = "default_fill")]
    pub fill: f64,
    #[serde(default)]
    pub seed: u64,
}

fn default_fill() -> f64 {
    0.3
}

#[derive(Debug, Serialize)]
pub struct EvolveResponse {
    pub rows: usize,
    pub cols: usize,
    pub generations: u64,
    pub population: usize,
    /// Final grid in the output text format.
    pub grid: String,
    /// PNG snapshot as a data URL.
    pub image: String,
    pub timings: Vec<Timing>,
}

pub fn encode_png(rgba: &[u8], w: u32, h: u32) -> Result<String> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(rgba, w, h, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

/// Both the cell grid and its PNG snapshot must fit before anything is
/// allocated.
fn check_size(rows: usize, cols: usize, config: &Config) -> Result<()> {
    if rows.saturating_mul(cols) > MAX_REQUEST_CELLS {
        return Err(Error::InvalidConfig(format!("grid larger than {MAX_REQUEST_CELLS} cells")));
    }
    check_raster(rows, cols, config.png_scale)
}

fn initial_grid(req: &EvolveRequest, config: &Config) -> Result<Grid> {
    if let Some(text) = &req.grid {
        let (rows, cols) = parse_header(text.lines().next().unwrap_or_default())?;
        check_size(rows, cols, config)?;
        return parse_grid(text.as_bytes(), config.load_mode);
    }
    let Some(soup) = &req.random else {
        return Err(Error::InvalidConfig("request needs `grid` or `random`".into()));
    };
    if soup.rows == 0 || soup.cols == 0 {
        return Err(Error::EmptyGrid {
            rows: soup.rows,
            cols: soup.cols,
        });
    }
    check_size(soup.rows, soup.cols, config)?;
    if !(0.0..=1.0).contains(&soup.fill) {
        return Err(Error::InvalidConfig("fill must be in [0, 1]".into()));
    }
    Ok(Grid::random(soup.rows, soup.cols, soup.fill, soup.seed))
}

pub fn handle_evolve(req: EvolveRequest) -> Result<EvolveResponse> {
    let defaults = Config::default();
    let config = Config {
        threads: req.threads,
        load_mode: if req.lenient {
            LoadMode::Lenient
        } else {
            LoadMode::Strict
        },
        png_scale: req.scale.unwrap_or(defaults.png_scale),
        ..defaults
    };
    config.validate()?;
    if req.generations > MAX_GENERATIONS {
        return Err(Error::InvalidConfig(format!(
            "at most {MAX_GENERATIONS} generations per request"
        )));
    }

    let initial = initial_grid(&req, &config)?;

    let out = evolve(initial, req.generations, &config)?;
    let (rgba, w, h) = render_grid(&out.grid, config.png_scale);

    Ok(EvolveResponse {
        rows: out.grid.rows(),
        cols: out.grid.cols(),
        generations: out.generations,
        population: out.grid.population(),
        grid: format_grid(&out.grid),
        image: encode_png(&rgba, w, h)?,
        timings: out.timings,
    })
}
