//! Per-cell resource levels.
//!
//! A [`ResourceField`] stores one non-negative amount per cell in row-major
//! order. Reads wrap their coordinate, so callers can look up neighbours
//! without normalizing first.

use serde::{Deserialize, Serialize};

use crate::{Coord, Positioned, Torus, TorusError};

/// One cell and the amount it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Where the cell is.
    pub coord: Coord,
    /// Resource held by the cell.
    pub amount: u32,
}

impl Positioned for Cell {
    fn position(&self) -> Coord {
        self.coord
    }
}

/// Resource levels over a whole torus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceField {
    torus: Torus,
    amounts: Vec<u32>,
}

impl ResourceField {
    /// An empty (all-zero) field.
    #[must_use]
    pub fn new(torus: Torus) -> Self {
        Self {
            torus,
            amounts: vec![0; torus.area()],
        }
    }

    /// Build a field from row-major amounts.
    ///
    /// # Errors
    ///
    /// Returns [`TorusError::SizeMismatch`] if `amounts` does not cover the grid
    /// exactly.
    pub fn from_rows(torus: Torus, amounts: Vec<u32>) -> Result<Self, TorusError> {
        if amounts.len() != torus.area() {
            return Err(TorusError::SizeMismatch {
                expected: torus.area(),
                actual: amounts.len(),
            });
        }
        Ok(Self { torus, amounts })
    }

    /// The grid this field covers.
    #[must_use]
    pub const fn torus(&self) -> &Torus {
        &self.torus
    }

    fn slot(&self, coord: Coord) -> usize {
        // wrap() always yields an in-range coordinate
        self.torus.index(self.torus.wrap(coord)).unwrap_or_default()
    }

    /// Amount at a (wrapped) coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> u32 {
        self.amounts[self.slot(coord)]
    }

    /// Overwrite the amount at a (wrapped) coordinate.
    pub fn set(&mut self, coord: Coord, amount: u32) {
        let slot = self.slot(coord);
        self.amounts[slot] = amount;
    }

    /// Sum over all cells.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.amounts.iter().map(|&a| u64::from(a)).sum()
    }

    /// Raw row-major amounts.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.amounts
    }

    /// Every cell with its amount, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.torus
            .cells()
            .zip(self.amounts.iter().copied())
            .map(|(coord, amount)| Cell { coord, amount })
    }
}
