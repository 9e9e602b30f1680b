//! Unit steps on the grid.
//!
//! North is towards smaller `y`, matching the row order in which the engine
//! transmits the map.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One step on the grid, or no step at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// y - 1
    North,
    /// y + 1
    South,
    /// x + 1
    East,
    /// x - 1
    West,
    /// No movement.
    Still,
}

impl Direction {
    /// The four moving directions.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Raw displacement of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::South => IVec2::new(0, 1),
            Direction::East => IVec2::new(1, 0),
            Direction::West => IVec2::new(-1, 0),
            Direction::Still => IVec2::ZERO,
        }
    }

    /// The direction that undoes this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Still => Direction::Still,
        }
    }

    /// True for [`Direction::Still`].
    #[must_use]
    pub const fn is_still(self) -> bool {
        matches!(self, Direction::Still)
    }

    /// Cardinal directions that shrink a signed displacement `(dx, dy)`.
    ///
    /// Horizontal first, then vertical. Empty when the displacement is zero.
    #[must_use]
    pub fn toward(delta: IVec2) -> Vec<Direction> {
        let mut dirs = Vec::with_capacity(2);
        if delta.x > 0 {
            dirs.push(Direction::East);
        } else if delta.x < 0 {
            dirs.push(Direction::West);
        }
        if delta.y > 0 {
            dirs.push(Direction::South);
        } else if delta.y < 0 {
            dirs.push(Direction::North);
        }
        dirs
    }
}
