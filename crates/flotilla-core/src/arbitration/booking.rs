//! Per-turn cell reservations.

use shoal::{Coord, Torus};

/// A width×height table of claims for one turn.
///
/// Cells hold an index into the arbiter's unit array, never the unit itself.
/// The grid does not wrap: callers pass coordinates already reduced with
/// [`Torus::wrap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingGrid {
    torus: Torus,
    cells: Vec<Option<usize>>,
}

impl BookingGrid {
    /// Creates an empty grid covering `torus`.
    #[must_use]
    pub fn new(torus: Torus) -> Self {
        Self {
            torus,
            cells: vec![None; torus.area()],
        }
    }

    /// The geometry this grid covers.
    #[must_use]
    pub const fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Claims `coord` for `unit`, overwriting any previous claim.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid.
    pub fn claim(&mut self, coord: Coord, unit: usize) {
        let slot = self.slot(coord);
        self.cells[slot] = Some(unit);
    }

    /// The unit holding `coord`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid.
    #[must_use]
    pub fn lookup(&self, coord: Coord) -> Option<usize> {
        self.cells[self.slot(coord)]
    }

    /// Clears the claim on `coord` and returns the unit that held it.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the grid.
    pub fn release(&mut self, coord: Coord) -> Option<usize> {
        let slot = self.slot(coord);
        self.cells[slot].take()
    }

    /// Number of claimed cells.
    #[must_use]
    pub fn claimed(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every claim as `(cell, unit)`, in row-major order.
    pub fn claims(&self) -> impl Iterator<Item = (Coord, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, unit)| unit.map(|u| (self.torus.coord_at(i), u)))
    }

    fn slot(&self, coord: Coord) -> usize {
        match self.torus.index(coord) {
            Some(slot) => slot,
            None => panic!(
                "booking coordinate {coord} is outside the {}x{} grid",
                self.torus.width(),
                self.torus.height()
            ),
        }
    }
}
