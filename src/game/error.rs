use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Debug, Error)]
pub enum GameError {
    /// A high-score file line that is not a non-negative integer
    #[error("high score file {path:?} is corrupted at line {line}: {content:?}")]
    PersistenceCorruption {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Every playable cell is covered by the snake
    #[error("no free cell left to place food")]
    SpawnExhausted,

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("high score file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
