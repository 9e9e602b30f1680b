//! Error types.
//!
//! Contention between ships is never an error: a ship that cannot be placed
//! simply ends the turn without a command. The variants here are the cases
//! that indicate a bug in a collaborator or corrupt input, and they abort the
//! current turn.

use std::io;

use shoal::TorusError;
use thiserror::Error;

use crate::entity::ShipId;

/// Invariant violations detected while arbitrating a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArbitrationError {
    /// The id never appeared in any frame.
    #[error("ship {0} is not part of the current snapshot")]
    UnknownShip(ShipId),
    /// The ship was destroyed before this frame; the reference is stale.
    #[error("ship {0} was destroyed and cannot be commanded")]
    StaleShip(ShipId),
    /// Preference generation produced nothing to choose from.
    #[error("ship {0} has an empty preference list")]
    EmptyPreferences(ShipId),
}

/// Errors reading engine input or decoding wire values.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Underlying stream failure.
    #[error("failed to read engine input: {0}")]
    Io(#[from] io::Error),
    /// Input ended mid-message.
    #[error("engine input ended while reading {expected}")]
    UnexpectedEof {
        /// What the reader was looking for.
        expected: &'static str,
    },
    /// A token that should be an integer was not.
    #[error("token {index} ({token:?}) is not a valid {expected}")]
    InvalidInteger {
        /// Zero-based token position in the stream.
        index: usize,
        /// The offending text.
        token: String,
        /// What the reader was looking for.
        expected: &'static str,
    },
    /// The constants line was not valid JSON.
    #[error("failed to parse game constants: {0}")]
    Constants(#[from] serde_json::Error),
    /// Grid dimensions or map rows were inconsistent.
    #[error("invalid map: {0}")]
    Grid(#[from] TorusError),
    /// A player id outside `0..players`.
    #[error("player {0} is out of range")]
    UnknownPlayer(u32),
    /// A character that is not one of the six action primitives.
    #[error("illegal action {0:?}")]
    IllegalAction(char),
}
