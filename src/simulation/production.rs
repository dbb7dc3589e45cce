//! Production system - converts elapsed time into resources
//!
//! Rate per resource = configured base rate + sum of building production.
//! The rate table covers the union of resources with a base rate and
//! resources any building produces.

use std::collections::BTreeMap;

use crate::colony::ledger::ResourceLedger;
use crate::colony::state::Colony;
use crate::core::config::SimulationConfig;
use crate::core::types::Seconds;

impl Colony {
    /// Per-second income given the base rate table
    pub fn production_rates(&self, base_rates: &BTreeMap<String, f64>) -> ResourceLedger {
        let mut rates = ResourceLedger::new();
        for (resource, rate) in base_rates {
            rates.add(resource, *rate);
        }
        rates.absorb(&self.calculate_production_bonuses());
        rates
    }
}

/// Per-second income of the colony under `config`
pub fn production_rates(colony: &Colony, config: &SimulationConfig) -> ResourceLedger {
    colony.production_rates(&config.base_rates)
}

/// Apply `elapsed` seconds of production to the colony
///
/// Returns the amounts added. Non-positive or non-finite `elapsed` is a
/// no-op. A zero amount is skipped unless the resource is already in the
/// ledger, so ticking never introduces empty resource entries.
pub fn tick_production(
    colony: &mut Colony,
    config: &SimulationConfig,
    elapsed: Seconds,
) -> ResourceLedger {
    let mut produced = ResourceLedger::new();
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return produced;
    }

    for (resource, rate) in production_rates(colony, config).iter() {
        let amount = rate * elapsed;
        if amount == 0.0 && !colony.get_resources().contains(resource) {
            continue;
        }
        colony.add_resource(resource, amount);
        produced.add(resource, amount);
    }

    tracing::trace!(elapsed, produced = %produced, "production tick");
    produced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::building::BuildingInstance;
    use crate::core::types::{ENERGY, FOOD, MINERALS, RESEARCH_POINTS};

    #[test]
    fn test_tick_with_one_mine() {
        let config = SimulationConfig::default();
        let mut colony = Colony::new();
        colony.add_building(BuildingInstance::new("Mine"));
        let before = colony.get_resources().get(MINERALS);

        tick_production(&mut colony, &config, 1.0);

        assert_eq!(colony.get_resources().get(MINERALS), before + 6.0);
        assert_eq!(colony.get_resources().get(ENERGY), 61.0);
        assert!((colony.get_resources().get(FOOD) - 10.2).abs() < 1e-9);
    }

    #[test]
    fn test_rates_cover_union_of_base_and_bonus() {
        let mut config = SimulationConfig::default();
        config.base_rates.clear();
        config.base_rates.insert(MINERALS.into(), 1.0);

        let mut colony = Colony::new();
        colony.add_building(BuildingInstance::new("Research Lab"));

        let rates = production_rates(&colony, &config);
        assert_eq!(rates.get(MINERALS), 1.0);
        assert_eq!(rates.get(RESEARCH_POINTS), 0.5);
        assert_eq!(rates.len(), 2);
    }

    #[test]
    fn test_zero_rates_do_not_create_entries() {
        let mut config = SimulationConfig::default();
        config.base_rates.insert("Antimatter".into(), 0.0);

        let mut colony = Colony::new();
        let produced = tick_production(&mut colony, &config, 5.0);

        assert!(!colony.get_resources().contains("Antimatter"));
        // ResearchPoints exists already, so it is still touched
        assert!(produced.contains(RESEARCH_POINTS));
        assert_eq!(colony.get_resources().get(RESEARCH_POINTS), 0.0);
    }

    #[test]
    fn test_non_positive_elapsed_is_noop() {
        let config = SimulationConfig::default();
        let mut colony = Colony::new();
        let before = colony.get_resources().clone();

        assert!(tick_production(&mut colony, &config, 0.0).is_empty());
        assert!(tick_production(&mut colony, &config, -3.0).is_empty());
        assert!(tick_production(&mut colony, &config, f64::NAN).is_empty());
        assert_eq!(colony.get_resources(), &before);
    }
}
