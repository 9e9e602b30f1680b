//! Bot configuration file.
//!
//! Every field is optional; missing values fall back to the defaults.
//!
//! ```json
//! {
//!   "overmind": { "arbiter": { "max_passes": 6 }, "spawn_cutoff": 150 },
//!   "prospector": { "return_threshold": 900 }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flotilla_core::strategies::ProspectorConfig;
use flotilla_core::OvermindConfig;
use serde::{Deserialize, Serialize};

/// Everything tunable about the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Seed, arbitration and spawning.
    pub overmind: OvermindConfig,
    /// Mining strategy thresholds.
    pub prospector: ProspectorConfig,
}

impl BotConfig {
    /// Loads a config file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
