//! Background event effects
//!
//! An effect is a plain descriptor with its random parameters already
//! rolled. Applying it is deterministic.

use serde::{Deserialize, Serialize};

use crate::colony::state::Colony;
use crate::core::types::{ENERGY, MINERALS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventEffect {
    /// Grant `amount` of one resource
    ResourceBoost { resource: String, amount: f64 },
    /// Remove up to `amount` of one resource
    ResourceDrain { resource: String, amount: f64 },
    /// One-time Minerals and Energy bonus
    ProductionSpike { minerals: f64, energy: f64 },
    /// Remove up to `energy` Energy
    SolarFlare { energy: f64 },
}

impl EventEffect {
    /// Mutate the colony and return the history line describing what happened
    pub fn apply(&self, colony: &mut Colony) -> String {
        match self {
            EventEffect::ResourceBoost { resource, amount } => {
                colony.add_resource(resource, *amount);
                format!("Minor Resource Boost: Added {:.1} {}.", amount, resource)
            }
            EventEffect::ResourceDrain { resource, amount } => {
                let lost = colony.drain_resource(resource, *amount);
                format!(
                    "Small Resource Drain: Lost {:.1} {} due to a malfunction.",
                    lost, resource
                )
            }
            EventEffect::ProductionSpike { minerals, energy } => {
                colony.add_resource(MINERALS, *minerals);
                colony.add_resource(ENERGY, *energy);
                format!(
                    "Production Spike: Systems surged, granting an instant bonus of \
                     {:.1} Minerals and {:.1} Energy.",
                    minerals, energy
                )
            }
            EventEffect::SolarFlare { energy } => {
                let lost = colony.drain_resource(ENERGY, *energy);
                format!("Solar Flare: Lost {:.1} Energy due to radiation interference.", lost)
            }
        }
    }
}
