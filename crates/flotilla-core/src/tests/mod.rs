//! Test module for determinism, integration and property tests.
//!
//! - **Determinism tests**: same seed and snapshot give identical orders
//! - **Integration tests**: the full inspire → plan → arbitrate → commit
//!   pipeline, driven by a small local engine
//! - **Property tests**: arbitration invariants over random crowds
//!
//! # Test Structure
//!
//! - `determinism.rs`: repeatability across runs and thread pools
//! - `integration.rs`: end-to-end scenarios and protocol text
//! - `properties.rs`: proptest scenarios for the arbiter
//! - `helpers.rs`: snapshot builders and the local engine

mod helpers;

// Re-export for convenience
pub use helpers::*;
