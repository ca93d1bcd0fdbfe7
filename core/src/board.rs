use std::collections::HashMap;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::error::{GameError, Result};
use crate::types::{GridSize, Position, Symbol, TileColor, TileStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub symbol: Symbol,
    pub color: TileColor,
    pub status: TileStatus,
}

impl Cell {
    pub fn is_revealed(&self) -> bool {
        self.status != TileStatus::Hidden
    }

    pub fn pairs_with(&self, other: &Cell) -> bool {
        self.position != other.position && self.symbol == other.symbol && self.color == other.color
    }
}

/// Row-major grid of cells in which every symbol occurs on exactly two cells of
/// the same color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Board {
    /// Picks `size.pair_count()` distinct symbols, gives each pair one color
    /// from `palette` and shuffles the pairs across the grid.
    pub fn generate<R: Rng + ?Sized>(
        size: GridSize,
        palette: &[TileColor],
        rng: &mut R,
    ) -> Result<Self> {
        let pair_count = size.pair_count();
        if size.cell_count() % 2 != 0 {
            return Err(GameError::OddCellCount {
                rows: size.rows() as u8,
                cols: size.cols() as u8,
            });
        }
        if pair_count > Symbol::alphabet_len() {
            return Err(GameError::AlphabetExhausted {
                requested: pair_count,
                available: Symbol::alphabet_len(),
            });
        }

        let mut symbols: Vec<Symbol> = Symbol::all().collect();
        symbols.shuffle(rng);

        let mut pairs = Vec::with_capacity(size.cell_count());
        for &symbol in &symbols[..pair_count] {
            let color = *palette.choose(rng).ok_or(GameError::EmptyPalette)?;
            pairs.push((symbol, color));
            pairs.push((symbol, color));
        }
        pairs.shuffle(rng);

        tracing::debug!(%size, pairs = pair_count, "generated board");
        Ok(Self::build(size, pairs))
    }

    pub fn random(size: GridSize, palette: &[TileColor]) -> Result<Self> {
        Self::generate(size, palette, &mut rand::rng())
    }

    /// Builds a board from an explicit row-major layout, checking the pair
    /// invariant.
    pub fn from_pairs(size: GridSize, layout: Vec<(Symbol, TileColor)>) -> Result<Self> {
        if layout.len() != size.cell_count() {
            return Err(GameError::InvalidBoardShape {
                expected: size.cell_count(),
                actual: layout.len(),
            });
        }

        let mut seen: HashMap<Symbol, (TileColor, usize)> = HashMap::new();
        for &(symbol, color) in &layout {
            let entry = seen.entry(symbol).or_insert((color, 0));
            if entry.0 != color {
                return Err(GameError::BrokenPair {
                    symbol: symbol.as_char(),
                });
            }
            entry.1 += 1;
        }
        if let Some((symbol, _)) = seen.iter().find(|(_, (_, count))| *count != 2) {
            return Err(GameError::BrokenPair {
                symbol: symbol.as_char(),
            });
        }

        Ok(Self::build(size, layout))
    }

    fn build(size: GridSize, layout: Vec<(Symbol, TileColor)>) -> Self {
        let cells = layout
            .into_iter()
            .enumerate()
            .map(|(index, (symbol, color))| Cell {
                position: Position::new(index / size.cols(), index % size.cols()),
                symbol,
                color,
                status: TileStatus::Hidden,
            })
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn pair_count(&self) -> usize {
        self.size.pair_count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.size.index_of(pos).and_then(|index| self.cells.get(index))
    }

    pub(crate) fn set_status(&mut self, pos: Position, status: TileStatus) {
        if let Some(cell) = self.size.index_of(pos).and_then(|index| self.cells.get_mut(index)) {
            cell.status = status;
        }
    }

    pub fn positions_of(&self, symbol: Symbol) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.symbol == symbol)
            .map(|cell| cell.position)
            .collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }

    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.status == TileStatus::Matched)
    }
}
