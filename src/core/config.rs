//! Simulation configuration with documented constants
//!
//! All tunable numbers for the idle loop live here. Every field has a
//! default, so a TOML file only needs to name what it overrides.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::{Seconds, ENERGY, FOOD, MINERALS, RESEARCH_POINTS};

/// Configuration for the simulation driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === PRODUCTION ===
    /// Per-second income every colony receives before building bonuses
    ///
    /// Minerals and Energy trickle in at 1/s so a colony with no buildings
    /// can still afford its first Mine within a minute. ResearchPoints has
    /// no base rate: research only comes from Research Labs.
    pub base_rates: BTreeMap<String, f64>,

    // === EVENTS ===
    /// Probability that a scheduled event check fires an event
    pub event_chance: f64,

    /// Simulated seconds between event checks
    ///
    /// At 10s with a 15% chance, a colony sees roughly one event per minute.
    pub event_check_interval: Seconds,

    /// Maximum number of entries kept in the colony's event history
    pub max_history: usize,

    /// Seed for the session RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let base_rates = [
            (MINERALS, 1.0),
            (ENERGY, 1.0),
            (FOOD, 0.2),
            (RESEARCH_POINTS, 0.0),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_string(), rate))
        .collect();

        Self {
            base_rates,
            event_chance: 0.15,
            event_check_interval: 10.0,
            max_history: 10,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(ColonyError::InvalidConfig(format!(
                "event_chance ({}) must be within [0, 1]",
                self.event_chance
            )));
        }

        if !self.event_check_interval.is_finite() || self.event_check_interval <= 0.0 {
            return Err(ColonyError::InvalidConfig(format!(
                "event_check_interval ({}) must be a positive number of seconds",
                self.event_check_interval
            )));
        }

        if self.max_history == 0 {
            return Err(ColonyError::InvalidConfig(
                "max_history must keep at least one entry".into(),
            ));
        }

        if let Some((name, rate)) = self
            .base_rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate < 0.0)
        {
            return Err(ColonyError::InvalidConfig(format!(
                "base rate for {} ({}) must be a non-negative number",
                name, rate
            )));
        }

        Ok(())
    }

    /// Base rate for a resource, 0.0 when unset
    pub fn base_rate(&self, resource: &str) -> f64 {
        self.base_rates.get(resource).copied().unwrap_or(0.0)
    }
}
