//! Ship actions and the commands sent back to the engine.
//!
//! An [`Action`] is one of the six primitives a ship can commit to in a turn.
//! A [`Command`] is the wire-level instruction derived from it (plus the
//! fleet-level spawn instruction).
//!
//! # Example
//!
//! ```
//! use flotilla_core::action::{Action, Command};
//! use flotilla_core::entity::ShipId;
//!
//! let action = Action::from_wire('e').unwrap();
//! assert_eq!(action, Action::East);
//! assert_eq!(Command::for_ship(ShipId::new(9), action).to_string(), "m 9 e");
//! assert_eq!(Command::for_ship(ShipId::new(9), Action::Convert).to_string(), "c 9");
//! ```

use serde::{Deserialize, Serialize};
use shoal::{Coord, Direction, Torus};
use std::fmt;

use crate::entity::ShipId;
use crate::error::ProtocolError;

/// A per-ship, per-turn action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Move one cell north.
    North,
    /// Move one cell south.
    South,
    /// Move one cell east.
    East,
    /// Move one cell west.
    West,
    /// Stay in place (mine).
    Stay,
    /// Turn into a dropoff where the ship stands.
    Convert,
}

impl Action {
    /// All six primitives.
    pub const ALL: [Action; 6] = [
        Action::North,
        Action::South,
        Action::East,
        Action::West,
        Action::Stay,
        Action::Convert,
    ];

    /// The four moving actions.
    pub const MOVES: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// Decode the engine's single-letter form.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::IllegalAction`] for anything other than
    /// `n s e w o c`.
    pub fn from_wire(c: char) -> Result<Self, ProtocolError> {
        match c {
            'n' => Ok(Action::North),
            's' => Ok(Action::South),
            'e' => Ok(Action::East),
            'w' => Ok(Action::West),
            'o' => Ok(Action::Stay),
            'c' => Ok(Action::Convert),
            other => Err(ProtocolError::IllegalAction(other)),
        }
    }

    /// The engine's single-letter form.
    #[must_use]
    pub const fn wire(self) -> char {
        match self {
            Action::North => 'n',
            Action::South => 's',
            Action::East => 'e',
            Action::West => 'w',
            Action::Stay => 'o',
            Action::Convert => 'c',
        }
    }

    /// The grid step this action takes; `Still` for stay and convert.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Action::North => Direction::North,
            Action::South => Direction::South,
            Action::East => Direction::East,
            Action::West => Direction::West,
            Action::Stay | Action::Convert => Direction::Still,
        }
    }

    /// The moving action for a grid step; `Stay` for `Still`.
    #[must_use]
    pub const fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::North => Action::North,
            Direction::South => Action::South,
            Direction::East => Action::East,
            Direction::West => Action::West,
            Direction::Still => Action::Stay,
        }
    }

    /// True for the four moving actions.
    #[must_use]
    pub const fn is_move(self) -> bool {
        !matches!(self, Action::Stay | Action::Convert)
    }

    /// The cell a ship at `from` occupies after this action.
    #[must_use]
    pub fn destination(self, torus: &Torus, from: Coord) -> Coord {
        torus.apply_direction(from, self.direction())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire())
    }
}

/// An instruction in the turn submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Build a new ship at the shipyard.
    Spawn,
    /// Convert a ship into a dropoff.
    Construct(ShipId),
    /// Move (or explicitly hold) a ship.
    Move(ShipId, Action),
}

impl Command {
    /// The command that carries out `action` for `ship`.
    #[must_use]
    pub const fn for_ship(ship: ShipId, action: Action) -> Self {
        match action {
            Action::Convert => Command::Construct(ship),
            other => Command::Move(ship, other),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Spawn => write!(f, "g"),
            Command::Construct(ship) => write!(f, "c {ship}"),
            Command::Move(ship, action) => write!(f, "m {ship} {action}"),
        }
    }
}
