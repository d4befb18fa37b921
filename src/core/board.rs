use super::types::Symbol;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

pub const CELL_COUNT: usize = 9;
pub const CENTER: usize = 4;

/// 3x3 board, row-major, index 0 top-left.
///
/// Serializes as a plain array of `"X"`, `"O"` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Option<Symbol>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Symbol>; CELL_COUNT]) -> Self {
        Board { cells }
    }

    pub fn is_empty_at(&self, cell: usize) -> bool {
        cell < CELL_COUNT && self.cells[cell].is_none()
    }

    pub fn place(&mut self, cell: usize, symbol: Symbol) {
        self.cells[cell] = Some(symbol);
    }

    pub fn clear(&mut self, cell: usize) {
        self.cells[cell] = None;
    }

    /// Empty cells in ascending index order.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i].is_none()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|c| **c == Some(symbol)).count()
    }
}

impl Index<usize> for Board {
    type Output = Option<Symbol>;

    fn index(&self, cell: usize) -> &Self::Output {
        &self.cells[cell]
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, cell: usize) -> &mut Self::Output {
        &mut self.cells[cell]
    }
}
