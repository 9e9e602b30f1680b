//! Built-in strategies.
//!
//! - [`Prospector`]: greedy miner that returns cargo to the nearest base and
//!   dashes home at the end of the match

mod prospector;

pub use prospector::{Prospector, ProspectorConfig};
