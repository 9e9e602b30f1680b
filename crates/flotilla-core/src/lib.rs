//! # Flotilla Core
//!
//! Move arbitration and fleet orchestration for turn-based matches on a
//! toroidal grid.
//!
//! Every turn each ship must end up with exactly one action (move one cell,
//! stay, or convert into a dropoff) without two ships committing to the same
//! cell. Strategies rank what each ship would like to do; the arbiter turns
//! those rankings into a collision-free set of commands.
//!
//! ## Architecture
//!
//! - **Snapshot**: [`snapshot::TurnSnapshot`] holds ships, structures and the
//!   resource field for one turn
//! - **Strategies**: [`strategy::Strategy`] implementations produce a ranked
//!   [`strategy::Plan`] per ship
//! - **Arbitration**: [`arbitration::Arbiter`] claims and evicts cells on a
//!   per-turn [`arbitration::BookingGrid`]; [`arbitration::InspirationScanner`]
//!   flags ships near enemies
//! - **Orchestration**: [`overmind::Overmind`] runs inspire → plan →
//!   arbitrate → commit
//! - **Protocol**: [`protocol`] reads engine frames and writes orders
//!
//! ## Usage
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use flotilla_core::action::Action;
//! use flotilla_core::arbitration::Arbiter;
//! use flotilla_core::entity::{PlayerId, Ship, ShipId};
//! use flotilla_core::protocol::GameConstants;
//! use flotilla_core::snapshot::TurnSnapshot;
//! use flotilla_core::strategy::Plan;
//! use shoal::{Coord, ResourceField, Torus};
//!
//! let field = ResourceField::new(Torus::new(4, 4).unwrap());
//! let mut snapshot = TurnSnapshot::new(GameConstants::default(), 1, PlayerId::new(0), field);
//! snapshot.begin_frame(0);
//! snapshot.insert_ship(Ship::new(ShipId::new(0), PlayerId::new(0), Coord::new(0, 0), 50));
//! snapshot.insert_ship(Ship::new(ShipId::new(1), PlayerId::new(0), Coord::new(2, 2), 0));
//! snapshot.finish_frame();
//!
//! let mut plans = BTreeMap::new();
//! plans.insert(ShipId::new(0), Plan::new(vec![Action::East, Action::Stay]));
//! plans.insert(ShipId::new(1), Plan::hold());
//!
//! let resolution = Arbiter::default().resolve(&snapshot, &plans).unwrap();
//! assert_eq!(resolution.action(ShipId::new(0)), Some(Action::East));
//! assert_eq!(resolution.action(ShipId::new(1)), Some(Action::Stay));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export shoal for spatial types
pub use shoal;

pub mod action;
pub mod arbitration;
pub mod entity;
pub mod error;
pub mod overmind;
pub mod protocol;
pub mod snapshot;
pub mod strategies;
pub mod strategy;

pub use action::{Action, Command};
pub use arbitration::{Arbiter, ArbiterConfig, InspirationScanner, Resolution};
pub use error::{ArbitrationError, ProtocolError};
pub use overmind::{Overmind, OvermindConfig, TurnOrders};
pub use snapshot::TurnSnapshot;
pub use strategy::{Plan, Strategy};

#[cfg(test)]
mod tests;
