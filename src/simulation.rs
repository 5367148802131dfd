use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::buffers::DoubleBuffer;
use crate::config::Config;
use crate::engine::GenerationEngine;
use crate::error::{Error, Result};
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Evolving,
    Finalized,
}

/// Owns the buffer pair for a run and advances it one generation at a time.
/// Each step is compute, barrier, swap; generations never overlap.
#[derive(Debug)]
pub struct Simulation {
    buffers: DoubleBuffer,
    engine: GenerationEngine,
    generation: u64,
    phase: Phase,
}

impl Simulation {
    pub fn new(initial: Grid, engine: GenerationEngine) -> Self {
        Self {
            buffers: DoubleBuffer::with_initial(initial),
            engine,
            generation: 0,
            phase: Phase::Initialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> &Grid {
        self.buffers.current()
    }

    pub fn step(&mut self) -> Result<()> {
        if self.phase == Phase::Finalized {
            return Err(Error::Finalized {
                generation: self.generation,
            });
        }
        self.evolve_once();
        Ok(())
    }

    /// Compute, barrier, swap. Callers have checked the phase.
    fn evolve_once(&mut self) {
        self.phase = Phase::Evolving;
        let (current, next) = self.buffers.split();
        self.engine.step(current, next);
        self.buffers.swap();
        self.generation += 1;
    }

    pub fn advance(&mut self, generations: u64) -> Result<()> {
        for _ in 0..generations {
            self.step()?;
        }
        Ok(())
    }

    /// Stop evolving. Further steps fail; the grid stays readable.
    pub fn finalize(&mut self) {
        debug!(generation = self.generation, "simulation finalized");
        self.phase = Phase::Finalized;
    }

    /// Finalize and tear down the buffer pair, handing out the last
    /// generation.
    pub fn into_grid(mut self) -> Grid {
        self.finalize();
        self.buffers.release()
    }
}

/// Evolve `initial` for `generations` steps on the global rayon pool.
pub fn run(initial: Grid, generations: u64) -> Grid {
    let mut sim = Simulation::new(initial, GenerationEngine::default());
    for _ in 0..generations {
        sim.evolve_once();
    }
    sim.into_grid()
}

#[derive(Clone, Debug, Serialize)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Result of [`evolve`].
#[derive(Debug)]
pub struct Evolution {
    pub grid: Grid,
    pub generations: u64,
    pub timings: Vec<Timing>,
}

impl Evolution {
    /// Wall-clock time of the evolution loop alone, in seconds.
    pub fn evolve_secs(&self) -> f64 {
        self.timings
            .iter()
            .find(|t| t.name == "evolve")
            .map_or(0.0, |t| t.ms / 1000.0)
    }
}

/// Evolve `initial` inside a worker pool sized by `config.threads`.
pub fn evolve(initial: Grid, generations: u64, config: &Config) -> Result<Evolution> {
    config.validate()?;
    let mut timings = Vec::new();

    let t = Instant::now();
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    timings.push(Timing {
        name: "pool",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let (rows, cols) = initial.dims();
    info!(
        rows,
        cols,
        generations,
        threads = pool.current_num_threads(),
        chunk_rows = config.chunk_rows,
        "evolving"
    );

    let mut sim = Simulation::new(initial, GenerationEngine::new(config.chunk_rows));
    let t = Instant::now();
    pool.install(|| sim.advance(generations))?;
    timings.push(Timing {
        name: "evolve",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let grid = sim.into_grid();
    info!(population = grid.population(), "evolution finished");

    Ok(Evolution {
        grid,
        generations,
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_generations_is_identity() {
        let grid = Grid::random(12, 9, 0.5, 5);
        assert_eq!(run(grid.clone(), 0), grid);
    }

    #[test]
    fn phases_advance() {
        let mut sim = Simulation::new(Grid::new(4, 4), GenerationEngine::default());
        assert_eq!(sim.phase(), Phase::Initialized);
        sim.advance(3).unwrap();
        assert_eq!(sim.phase(), Phase::Evolving);
        assert_eq!(sim.generation(), 3);
        sim.finalize();
        assert_eq!(sim.phase(), Phase::Finalized);
        assert!(matches!(sim.step(), Err(Error::Finalized { generation: 3 })));
    }

    #[test]
    fn block_is_still_life() {
        let block = Grid::with_alive(6, 6, [(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(run(block.clone(), 1), block);
        assert_eq!(run(block.clone(), 17), block);
    }

    #[test]
    fn lone_corner_cell_dies() {
        let grid = Grid::with_alive(3, 3, [(0, 0)]);
        assert_eq!(run(grid, 1).population(), 0);
    }

    #[test]
    fn evolve_reports_timings() {
        let blinker = Grid::with_alive(5, 5, [(2, 1), (2, 2), (2, 3)]);
        let config = Config {
            threads: Some(2),
            ..Config::default()
        };
        let out = evolve(blinker.clone(), 2, &config).unwrap();
        assert_eq!(out.grid, blinker);
        assert_eq!(out.generations, 2);
        assert!(out.timings.iter().any(|t| t.name == "evolve"));
        assert!(out.evolve_secs() >= 0.0);
    }

    #[test]
    fn evolve_accepts_huge_row_blocks() {
        let config = Config {
            chunk_rows: 1 << 63,
            ..Config::default()
        };
        let out = evolve(Grid::with_alive(4, 2, [(1, 0)]), 1, &config).unwrap();
        assert_eq!(out.grid.population(), 0);
    }

    #[test]
    fn run_ends_finalized_without_discarding_steps() {
        let blinker = Grid::with_alive(5, 5, [(2, 1), (2, 2), (2, 3)]);
        let mut sim = Simulation::new(blinker.clone(), GenerationEngine::default());
        sim.advance(2).unwrap();
        assert_eq!(sim.current(), &run(blinker, 2));
        let done = sim.into_grid();
        assert_eq!(done.dims(), (5, 5));
    }

    #[test]
    fn evolve_rejects_invalid_config() {
        let config = Config {
            threads: Some(0),
            ..Config::default()
        };
        assert!(matches!(
            evolve(Grid::new(2, 2), 1, &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
