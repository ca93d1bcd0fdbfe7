use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be between {min} and {max}, got {rows}x{cols}")]
    DimensionOutOfRange {
        rows: u8,
        cols: u8,
        min: u8,
        max: u8,
    },
    #[error("At least one grid dimension must be even, got {rows}x{cols}")]
    OddCellCount { rows: u8, cols: u8 },
    #[error("Board needs {requested} symbols but only {available} exist")]
    AlphabetExhausted { requested: usize, available: usize },
    #[error("Color palette is empty")]
    EmptyPalette,
    #[error("Board layout has {actual} cells, expected {expected}")]
    InvalidBoardShape { expected: usize, actual: usize },
    #[error("Symbol {symbol} does not form exactly one same-colored pair")]
    BrokenPair { symbol: char },
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("hide delay must be greater than zero")]
    ZeroHideDelay,
    #[error("color palette must not be empty")]
    EmptyPalette,
    #[error("invalid preset size {size}: {source}")]
    InvalidPreset {
        size: u8,
        #[source]
        source: GameError,
    },
}
