//! # Shoal
//!
//! Toroidal grid substrate for turn-based fleet simulations.
//!
//! Shoal models a finite 2-D grid whose edges wrap on both axes. Everything in
//! the crate is pure arithmetic over that torus:
//!
//! - **Coordinates**: integer cells, always normalized into `[0, W) x [0, H)`
//! - **Displacement**: shortest signed wraparound delta per axis
//! - **Distance**: toroidal Manhattan distance
//! - **Neighbourhoods**: precomputed diamond offset tables for radius scans
//! - **Resource fields**: per-cell non-negative levels with deterministic hashing
//!
//! ## Quick Start
//!
//! ```
//! use shoal::{Coord, Direction, Torus};
//!
//! let torus = Torus::new(32, 32).unwrap();
//!
//! // Moving west from the left edge lands on the right edge.
//! let here = Coord::new(0, 5);
//! assert_eq!(torus.apply_direction(here, Direction::West), Coord::new(31, 5));
//!
//! // The two edges are adjacent.
//! assert_eq!(torus.distance(&Coord::new(0, 0), &Coord::new(31, 0)), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod diamond;
pub mod direction;
pub mod field;
pub mod hash;
pub mod torus;

// Re-exports for convenience
pub use diamond::Diamond;
pub use direction::Direction;
pub use field::{Cell, ResourceField};
pub use hash::hash_field;
pub use torus::{Torus, TorusError};

use std::fmt;

/// An integer cell coordinate.
///
/// A `Coord` is only meaningful relative to a [`Torus`]. Values produced by
/// torus operations are always wrapped into range; values built by hand may
/// lie outside it until passed through [`Torus::wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    /// Column, growing eastwards.
    pub x: i32,
    /// Row, growing southwards.
    pub y: i32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate offset by a raw (unwrapped) displacement.
    #[must_use]
    pub fn offset(self, delta: glam::IVec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Anything that occupies a cell on the grid.
///
/// Units, fixed structures and plain cells all expose their position through
/// this one capability; the spatial functions on [`Torus`] accept any
/// `Positioned` value rather than concrete entity types.
pub trait Positioned {
    /// The cell this value sits on.
    fn position(&self) -> Coord;
}

impl Positioned for Coord {
    fn position(&self) -> Coord {
        *self
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn position(&self) -> Coord {
        (**self).position()
    }
}
