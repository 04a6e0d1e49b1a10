//! Simulation configuration with documented defaults
//!
//! Values can be loaded from a TOML file; any key left out falls back to
//! its default.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{ArenaError, Result};

/// Configuration for the arena and its background loops
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sleep between movement ticks (milliseconds)
    pub move_interval_ms: u64,

    /// Sleep between combat ticks (milliseconds)
    ///
    /// Combat drains at most one battle task per tick, so this is also the
    /// upper bound on battle throughput.
    pub combat_interval_ms: u64,

    /// How long `stop` waits after clearing the running flag before joining
    pub stop_grace_ms: u64,

    /// Length of a timed auto-battle (seconds)
    pub game_duration_secs: u64,

    /// Number of NPCs spawned by "initialize game"
    pub initial_npc_count: usize,

    /// File the kill log is appended to
    pub battle_log_path: PathBuf,

    /// Default roster file for save/load
    pub roster_path: PathBuf,

    /// Master seed. When set, every NPC generator is derived from it.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            move_interval_ms: 50,
            combat_interval_ms: 100,
            stop_grace_ms: 100,
            game_duration_secs: 30,
            initial_npc_count: 50,
            battle_log_path: PathBuf::from("battle_log.txt"),
            roster_path: PathBuf::from("dungeon.txt"),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.move_interval_ms == 0 || self.combat_interval_ms == 0 {
            return Err(ArenaError::InvalidConfig(
                "tick intervals must be positive".into(),
            ));
        }
        if self.game_duration_secs == 0 {
            return Err(ArenaError::InvalidConfig(
                "game_duration_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn combat_interval(&self) -> Duration {
        Duration::from_millis(self.combat_interval_ms)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }
}
