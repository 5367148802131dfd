pub mod api;
pub mod buffers;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod neighbors;
pub mod render;
pub mod rng;
pub mod simulation;

pub use buffers::DoubleBuffer;
pub use config::Config;
pub use engine::{GenerationEngine, next_state, step_serial};
pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use io::LoadMode;
pub use neighbors::live_neighbors;
pub use simulation::{Evolution, Phase, Simulation, Timing, evolve, run};
