//! The wraparound grid geometry.
//!
//! A [`Torus`] holds only its dimensions. Every operation is pure: it takes
//! coordinates (or anything [`Positioned`]) and returns new values without
//! touching any state.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coord, Direction, Positioned};

/// Errors from building grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TorusError {
    /// Width or height was zero or negative.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },
    /// A row-major buffer did not match the grid area.
    #[error("expected {expected} cells for the grid, got {actual}")]
    SizeMismatch {
        /// Cells required by the grid
        expected: usize,
        /// Cells supplied
        actual: usize,
    },
}

/// A `width x height` grid whose edges wrap on both axes.
///
/// # Example
///
/// ```
/// use shoal::{Coord, Torus};
///
/// let torus = Torus::new(8, 6).unwrap();
/// assert_eq!(torus.wrap(Coord::new(-1, 6)), Coord::new(7, 0));
/// assert_eq!(torus.delta(&Coord::new(0, 0), &Coord::new(7, 0)).x, -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Torus {
    width: i32,
    height: i32,
}

impl Torus {
    /// Create a torus.
    ///
    /// # Errors
    ///
    /// Returns [`TorusError::InvalidDimensions`] unless both sides are positive.
    pub fn new(width: i32, height: i32) -> Result<Self, TorusError> {
        if width <= 0 || height <= 0 {
            return Err(TorusError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn area(&self) -> usize {
        // Both sides are positive by construction.
        self.width as usize * self.height as usize
    }

    /// Reduce a coordinate into range on both axes.
    ///
    /// Always non-negative, including for negative inputs.
    #[must_use]
    pub const fn wrap(&self, coord: Coord) -> Coord {
        Coord::new(coord.x.rem_euclid(self.width), coord.y.rem_euclid(self.height))
    }

    /// True if the coordinate is already in range.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Shortest signed displacement from `a` to `b`, per axis.
    ///
    /// Each axis independently picks the shorter of the direct and the
    /// wraparound path. When both are equally long (even side, exactly half
    /// way) the non-negative displacement wins.
    #[must_use]
    pub fn delta<A, B>(&self, a: &A, b: &B) -> IVec2
    where
        A: Positioned + ?Sized,
        B: Positioned + ?Sized,
    {
        let (a, b) = (a.position(), b.position());
        IVec2::new(
            Self::axis_delta(a.x, b.x, self.width),
            Self::axis_delta(a.y, b.y, self.height),
        )
    }

    fn axis_delta(from: i32, to: i32, size: i32) -> i32 {
        let forward = (to - from).rem_euclid(size);
        if forward * 2 > size {
            forward - size
        } else {
            forward
        }
    }

    /// Toroidal Manhattan distance between two positions.
    #[must_use]
    pub fn distance<A, B>(&self, a: &A, b: &B) -> u32
    where
        A: Positioned + ?Sized,
        B: Positioned + ?Sized,
    {
        let d = self.delta(a, b);
        d.x.unsigned_abs() + d.y.unsigned_abs()
    }

    /// The wrapped cell one step away in `direction` (the same cell for `Still`).
    #[must_use]
    pub fn apply_direction(&self, coord: Coord, direction: Direction) -> Coord {
        self.wrap(coord.offset(direction.delta()))
    }

    /// The four wrapped orthogonal neighbours, in [`Direction::CARDINALS`] order.
    #[must_use]
    pub fn neighbours(&self, coord: Coord) -> [Coord; 4] {
        Direction::CARDINALS.map(|dir| self.apply_direction(coord, dir))
    }

    /// Row-major index of an in-range coordinate.
    ///
    /// Returns `None` for coordinates outside the grid; this does not wrap.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn index(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`Torus::index`]; out-of-range indices wrap.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn coord_at(&self, index: usize) -> Coord {
        let index = (index % self.area()) as i32;
        Coord::new(index % self.width, index / self.width)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}
