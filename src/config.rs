use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::LoadMode;

/// Run parameters shared by the CLI and the HTTP server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker threads for the generation step. `None` uses rayon's default
    /// (one per logical CPU).
    pub threads: Option<usize>,
    /// Rows per parallel work unit.
    pub chunk_rows: usize,
    /// How to treat rows that don't match the declared width.
    pub load_mode: LoadMode,
    /// Pixels per cell edge in PNG snapshots.
    pub png_scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: None,
            chunk_rows: 1,
            load_mode: LoadMode::Strict,
            png_scale: 4,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(Error::InvalidConfig("threads must be at least 1".into()));
        }
        if self.chunk_rows == 0 {
            return Err(Error::InvalidConfig("chunk_rows must be at least 1".into()));
        }
        if self.png_scale == 0 || self.png_scale > 64 {
            return Err(Error::InvalidConfig("png_scale must be in 1..=64".into()));
        }
        Ok(())
    }
}
