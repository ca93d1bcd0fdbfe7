use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Characters a tile can carry, in draw order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const MIN_DIMENSION: u8 = 2;
pub const MAX_DIMENSION: u8 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(char);

impl Symbol {
    pub fn new(ch: char) -> Option<Self> {
        ALPHABET.contains(ch).then_some(Self(ch))
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Symbol> {
        ALPHABET.chars().map(Symbol)
    }

    pub fn alphabet_len() -> usize {
        ALPHABET.len()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    Cyan,
    Magenta,
    Brown,
}

impl TileColor {
    pub const ALL: [TileColor; 8] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Purple,
        TileColor::Orange,
        TileColor::Cyan,
        TileColor::Magenta,
        TileColor::Brown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
            TileColor::Purple => "purple",
            TileColor::Orange => "orange",
            TileColor::Cyan => "cyan",
            TileColor::Magenta => "magenta",
            TileColor::Brown => "brown",
        }
    }

    /// RGB components in `0.0..=1.0`, for drawing the symbol.
    pub fn rgb(self) -> (f64, f64, f64) {
        let (r, g, b): (u8, u8, u8) = match self {
            TileColor::Red => (0xe0, 0x1b, 0x24),
            TileColor::Blue => (0x1c, 0x71, 0xd8),
            TileColor::Green => (0x26, 0xa2, 0x69),
            TileColor::Purple => (0x81, 0x3d, 0x9c),
            TileColor::Orange => (0xff, 0x78, 0x00),
            TileColor::Cyan => (0x00, 0xa5, 0xb8),
            TileColor::Magenta => (0xc0, 0x1c, 0x9c),
            TileColor::Brown => (0x86, 0x5e, 0x3c),
        };
        (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TileStatus {
    #[default]
    Hidden,
    Flipped,
    Matched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: u8,
    cols: u8,
}

impl GridSize {
    /// Validates dimensions against the playable range. Both dimensions must be
    /// within `MIN_DIMENSION..=MAX_DIMENSION` and the cell count must be even.
    pub fn new(rows: u8, cols: u8) -> Result<Self> {
        let in_range = |d: u8| (MIN_DIMENSION..=MAX_DIMENSION).contains(&d);
        if !in_range(rows) || !in_range(cols) {
            return Err(GameError::DimensionOutOfRange {
                rows,
                cols,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }
        if rows % 2 != 0 && cols % 2 != 0 {
            return Err(GameError::OddCellCount { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn square(size: u8) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn rows(self) -> usize {
        self.rows as usize
    }

    pub fn cols(self) -> usize {
        self.cols as usize
    }

    pub fn cell_count(self) -> usize {
        self.rows() * self.cols()
    }

    pub fn pair_count(self) -> usize {
        self.cell_count() / 2
    }

    pub fn contains(self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    pub fn index_of(self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols() + pos.col)
    }

    pub fn position_of(self, index: usize) -> Option<Position> {
        (index < self.cell_count()).then(|| Position::new(index / self.cols(), index % self.cols()))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
