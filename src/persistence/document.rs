//! Persisted document shape
//!
//! ```json
//! {
//!   "resources": { "Minerals": 120.5, "Energy": 40.0 },
//!   "buildings": [ { "name": "Mine", "level": 2 } ],
//!   "turn_number": 1,
//!   "event_history": [ "Built Mine." ],
//!   "completed_research": [ "geothermal_power" ],
//!   "unlocked_buildings": [ "Mine", "Geothermal Plant" ]
//! }
//! ```
//!
//! Every field is optional when reading; a missing field takes the value a
//! fresh colony would have.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colony::state::STARTER_RESOURCES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonyDocument {
    #[serde(default = "starter_resources")]
    pub resources: BTreeMap<String, f64>,
    #[serde(default)]
    pub buildings: Vec<BuildingEntry>,
    #[serde(default = "first_turn")]
    pub turn_number: u64,
    #[serde(default)]
    pub event_history: Vec<String>,
    #[serde(default)]
    pub completed_research: Vec<String>,
    /// `None` when absent from an older document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_buildings: Option<Vec<String>>,
}

impl Default for ColonyDocument {
    /// The document of a fresh colony with no buildings
    fn default() -> Self {
        Self {
            resources: starter_resources(),
            buildings: Vec::new(),
            turn_number: first_turn(),
            event_history: Vec::new(),
            completed_research: Vec::new(),
            unlocked_buildings: None,
        }
    }
}

/// A saved building: `{name, level}` or, in old saves, a bare name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildingEntry {
    Leveled {
        name: String,
        #[serde(default = "first_level")]
        level: i64,
    },
    Bare(String),
}

impl BuildingEntry {
    pub fn name(&self) -> &str {
        match self {
            BuildingEntry::Leveled { name, .. } | BuildingEntry::Bare(name) => name,
        }
    }

    /// Level clamped to at least 1
    pub fn level(&self) -> u32 {
        match self {
            BuildingEntry::Leveled { level, .. } => {
                u32::try_from((*level).max(1)).unwrap_or(u32::MAX)
            }
            BuildingEntry::Bare(_) => 1,
        }
    }
}

fn starter_resources() -> BTreeMap<String, f64> {
    STARTER_RESOURCES
        .iter()
        .map(|(name, amount)| (name.to_string(), *amount))
        .collect()
}

fn first_turn() -> u64 {
    1
}

fn first_level() -> i64 {
    1
}
