use std::path::PathBuf;

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed grid header {header:?}: expected \"<rows> <cols>\" with positive integers")]
    MalformedHeader { header: String },

    #[error("malformed grid at line {line}: {message}")]
    MalformedGrid { line: usize, message: String },

    #[error("grid dimensions must be positive (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid of {rows}x{cols} cells exceeds the limit of {max} cells")]
    TooLarge { rows: usize, cols: usize, max: usize },

    #[error("snapshot of {rows}x{cols} cells at scale {scale} exceeds {max} pixels")]
    SnapshotTooLarge {
        rows: usize,
        cols: usize,
        scale: u32,
        max: usize,
    },

    #[error("expected {expected} cells for the grid, got {found}")]
    CellCount { expected: usize, found: usize },

    #[error("simulation already finalized after {generation} generations")]
    Finalized { generation: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}
