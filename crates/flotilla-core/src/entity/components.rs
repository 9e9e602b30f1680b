//! Small state components shared by entity types.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Per-turn status bits on a ship.
    ///
    /// Both bits are recomputed every turn: `ALIVE` by the frame refresh,
    /// `INSPIRED` by the inspiration scan.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ShipFlags: u8 {
        /// Present in the latest frame.
        const ALIVE = 1 << 0;
        /// Enough enemy ships nearby to earn the inspiration bonus.
        const INSPIRED = 1 << 1;
    }
}

/// What kind of fixed structure a [`Structure`](super::Structure) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// The player's starting base; new ships appear here.
    Shipyard,
    /// A base built by converting a ship.
    Dropoff,
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipyard => write!(f, "Shipyard"),
            Self::Dropoff => write!(f, "Dropoff"),
        }
    }
}
