use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lifegrid::io::{load_grid, save_grid};
use lifegrid::render::{check_raster, save_png};
use lifegrid::{Config, LoadMode, Timing};

#[derive(Parser, Debug)]
#[command(name = "lifegrid")]
#[command(about = "Evolve a Game of Life grid for a fixed number of generations")]
struct Cli {
    /// Grid file: "<rows> <cols>" header, then rows of '*' (alive) and ' ' (dead)
    input: PathBuf,

    /// Number of generations to evolve
    generations: u64,

    /// Where to write the final grid
    output: PathBuf,

    /// Worker threads (defaults to one per CPU)
    #[arg(long)]
    threads: Option<usize>,

    /// Rows per parallel work unit
    #[arg(long, default_value_t = 1)]
    chunk_rows: usize,

    /// Skip unknown characters and treat missing cells as dead instead of failing
    #[arg(long)]
    lenient: bool,

    /// Also save a PNG snapshot of the final grid
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell in the PNG snapshot
    #[arg(long, default_value_t = 4)]
    png_scale: u32,

    /// Print a JSON run report instead of the plain summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    rows: usize,
    cols: usize,
    generations: u64,
    population: usize,
    output: &'a PathBuf,
    timings: &'a [Timing],
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config {
        threads: cli.threads,
        chunk_rows: cli.chunk_rows,
        load_mode: if cli.lenient {
            LoadMode::Lenient
        } else {
            LoadMode::Strict
        },
        png_scale: cli.png_scale,
    };
    config.validate()?;

    info!("Loading grid from: {}", cli.input.display());
    let initial = load_grid(&cli.input, config.load_mode)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    if cli.png.is_some() {
        check_raster(initial.rows(), initial.cols(), config.png_scale)?;
    }

    let out = lifegrid::evolve(initial, cli.generations, &config)?;

    save_grid(&cli.output, &out.grid)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    if let Some(png) = &cli.png {
        save_png(png, &out.grid, config.png_scale)
            .with_context(|| format!("failed to write {}", png.display()))?;
        info!("Saved {}", png.display());
    }

    if cli.json {
        let report = Report {
            rows: out.grid.rows(),
            cols: out.grid.cols(),
            generations: out.generations,
            population: out.grid.population(),
            output: &cli.output,
            timings: &out.timings,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("time: {:.6} seconds", out.evolve_secs());
        println!("results saved in {}", cli.output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifegrid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
