//! Engine constants.
//!
//! The engine sends these as one JSON object on the first line of input. Keys
//! that are missing fall back to the standard values, and unknown keys are
//! ignored.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Match-wide constants announced by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GameConstants {
    /// Manhattan radius scanned for enemy ships.
    pub inspiration_radius: u32,
    /// Enemy ships within the radius needed to become inspired.
    pub inspiration_ship_count: u32,
    /// Moving costs `cell halite / MOVE_COST_RATIO`.
    pub move_cost_ratio: u32,
    /// Mining takes `cell halite / EXTRACT_RATIO` (rounded up).
    pub extract_ratio: u32,
    /// Cargo capacity of a ship.
    pub max_energy: u32,
    /// Match length in turns.
    pub max_turns: u32,
    /// Price of a new ship.
    pub new_entity_energy_cost: u32,
    /// Price of converting a ship into a dropoff.
    pub dropoff_cost: u32,
    /// Seed the engine used to build the map.
    #[serde(rename = "game_seed")]
    pub game_seed: u64,
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            inspiration_radius: 4,
            inspiration_ship_count: 2,
            move_cost_ratio: 10,
            extract_ratio: 4,
            max_energy: 1000,
            max_turns: 400,
            new_entity_energy_cost: 1000,
            dropoff_cost: 4000,
            game_seed: 0,
        }
    }
}

impl GameConstants {
    /// Parse the engine's constants line.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Constants`] if the text is not a JSON object
    /// with the expected value types.
    pub fn from_json_str(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Halite spent moving off a cell holding `cell_halite`.
    #[must_use]
    pub fn move_cost(&self, cell_halite: u32) -> u32 {
        cell_halite.checked_div(self.move_cost_ratio).unwrap_or(0)
    }
}
