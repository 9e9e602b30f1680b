//! Turn arbitration: turning ranked wishes into collision-free commands.
//!
//! Arbitration is the write phase of a turn. Strategies only propose (see
//! [`crate::strategy`]); the [`Arbiter`] decides, using a fresh
//! [`BookingGrid`] that records which ship has claimed which destination cell.
//!
//! # Invariants
//!
//! - No two committed ships share a destination cell (ships on their final
//!   dash home are exempt; they never claim).
//! - A ship committed to stay keeps its cell for the rest of the turn.
//! - A claimed cell never becomes free again within a turn; it can only pass
//!   to a ship carrying strictly more halite.
//! - Resolution finishes within [`ArbiterConfig::max_passes`] passes.
//!
//! # Contents
//!
//! - [`BookingGrid`]: cell → unit index table for one turn
//! - [`Arbiter`]: the claim/evict algorithm, producing a [`Resolution`]
//! - [`InspirationScanner`]: neighbour-density flags read by strategies

mod arbiter;
mod booking;
mod inspiration;

pub use arbiter::{Arbiter, ArbiterConfig, Eviction, Resolution};
pub use booking::BookingGrid;
pub use inspiration::{InspirationScanner, SUPPORTED_RADIUS};
