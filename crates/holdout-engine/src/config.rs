//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `holdout-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and a loader that reads the file. Every field has
//! a default matching the reference behavior, so an empty file is a
//! valid configuration.

use std::path::Path;

use holdout_agents::VitalsConfig;
use serde::Deserialize;

use crate::clock::NightConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// World-level settings: map size and the continuous-mode tick delay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Map width in units.
    pub width: f64,
    /// Map height in units.
    pub height: f64,
    /// Delay between ticks in continuous mode, milliseconds.
    pub tick_delay_ms: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 400.0,
            tick_delay_ms: 500,
        }
    }
}

/// Hostile-entity parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostileConfig {
    /// Movement speed per tick.
    pub speed: f64,
    /// Health a fresh spawn starts with.
    pub spawn_health: f64,
    /// Distance within which a hostile can strike an agent.
    pub attack_range: f64,
    /// Energy damage dealt per strike on an agent.
    pub attack_damage: f64,
    /// Distance within which a hostile damages the base. Larger than the
    /// agent attack range: the base is a structure, not a dodging target.
    pub base_attack_range: f64,
    /// Health damage dealt per strike on the base.
    pub base_attack_damage: f64,
    /// Minimum ticks between spawns (inclusive).
    pub spawn_interval_min: u64,
    /// Maximum ticks between spawns (exclusive).
    pub spawn_interval_max: u64,
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            spawn_health: 100.0,
            attack_range: 15.0,
            attack_damage: 10.0,
            base_attack_range: 25.0,
            base_attack_damage: 5.0,
            spawn_interval_min: 10,
            spawn_interval_max: 30,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Map and tick-scheduling settings.
    pub world: WorldSettings,
    /// Night-window settings.
    pub night: NightConfig,
    /// Hostile-entity settings.
    pub hostiles: HostileConfig,
    /// Vital-mechanics settings.
    pub vitals: VitalsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}
