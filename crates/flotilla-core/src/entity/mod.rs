//! Entities that make up a turn snapshot.
//!
//! - [`ShipId`] / [`PlayerId`]: stable identifiers
//! - [`Ship`]: a mobile unit carrying halite
//! - [`Structure`]: a fixed shipyard or dropoff
//!
//! Ships and structures both implement [`Positioned`], so every spatial query
//! in [`shoal`] accepts them directly.
//!
//! # Example
//!
//! ```
//! use flotilla_core::entity::{PlayerId, Ship, ShipId};
//! use shoal::{Coord, Positioned};
//!
//! let ship = Ship::new(ShipId::new(7), PlayerId::new(0), Coord::new(3, 4), 120);
//! assert!(ship.is_alive());
//! assert_eq!(ship.position(), Coord::new(3, 4));
//! assert_eq!(ship.command, None);
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use shoal::{Coord, Positioned};
use std::fmt;

pub use components::{ShipFlags, StructureKind};

use crate::action::Action;

/// Engine-assigned ship identifier.
///
/// Ids persist across turns; a ship missing from a frame has been destroyed
/// and its id is never reused. Ordering by id is the arbitration visit order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(u32);

impl ShipId {
    /// Creates a `ShipId` from the raw engine value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShipId({})", self.0)
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ShipId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Player identifier, `0..players`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a `PlayerId` from the raw engine value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into per-player tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mobile unit.
///
/// `command` is the action committed for the current turn: `None` means no
/// decision yet (or none could be found), which the engine treats as staying
/// put.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    /// Stable identifier.
    pub id: ShipId,
    /// Owning player.
    pub owner: PlayerId,
    /// Current cell.
    pub position: Coord,
    /// Halite carried.
    pub halite: u32,
    /// Per-turn status bits.
    pub flags: ShipFlags,
    /// Action committed for this turn.
    pub command: Option<Action>,
}

impl Ship {
    /// Creates a live ship with no command.
    #[must_use]
    pub fn new(id: ShipId, owner: PlayerId, position: Coord, halite: u32) -> Self {
        Self {
            id,
            owner,
            position,
            halite,
            flags: ShipFlags::ALIVE,
            command: None,
        }
    }

    /// Present in the latest frame.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.flags.contains(ShipFlags::ALIVE)
    }

    /// Flagged by the last inspiration scan.
    #[must_use]
    pub fn is_inspired(&self) -> bool {
        self.flags.contains(ShipFlags::INSPIRED)
    }

    /// Sets or clears the inspiration bit.
    pub fn set_inspired(&mut self, inspired: bool) {
        self.flags.set(ShipFlags::INSPIRED, inspired);
    }
}

impl Positioned for Ship {
    fn position(&self) -> Coord {
        self.position
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {} ({},{} - owner {})",
            self.id, self.position.x, self.position.y, self.owner
        )
    }
}

/// A fixed base. Never moves and never takes part in booking conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    /// Owning player.
    pub owner: PlayerId,
    /// Cell the structure occupies.
    pub position: Coord,
    /// Shipyard or dropoff.
    pub kind: StructureKind,
}

impl Structure {
    /// Creates a structure.
    #[must_use]
    pub const fn new(owner: PlayerId, position: Coord, kind: StructureKind) -> Self {
        Self {
            owner,
            position,
            kind,
        }
    }
}

impl Positioned for Structure {
    fn position(&self) -> Coord {
        self.position
    }
}
