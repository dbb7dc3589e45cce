//! Building catalog and building instances
//!
//! A building instance is just `{kind, level}`. Everything derived from the
//! kind (construction cost, upgrade cost, production) is looked up in the
//! [`BuildingCatalog`], which is the only place those formulas live.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::colony::ledger::ResourceLedger;
use crate::core::types::{normalize_name, ENERGY, FOOD, MINERALS, RESEARCH_POINTS};

/// Flat cost quoted for kinds with no upgrade formula; no colony will afford it
pub const NOT_UPGRADABLE_COST: f64 = 999_999.0;

/// Exponent of the upgrade cost curve: `floor(coefficient * level^1.5)`
const UPGRADE_EXPONENT: f64 = 1.5;

/// A constructed building owned by a colony
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInstance {
    /// Catalog display name, e.g. "Solar Panel"
    pub kind: String,
    /// Current level, always >= 1
    pub level: u32,
}

impl BuildingInstance {
    /// A freshly constructed level-1 building
    pub fn new(kind: impl Into<String>) -> Self {
        Self::with_level(kind, 1)
    }

    pub fn with_level(kind: impl Into<String>, level: u32) -> Self {
        Self {
            kind: kind.into(),
            level: level.max(1),
        }
    }
}

/// Static descriptor of one constructible building kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    /// Display name, also the kind identifier
    pub name: String,
    /// Cost to construct level 1
    pub base_cost: ResourceLedger,
    /// Per-resource coefficients of the upgrade cost curve.
    /// Empty means the kind cannot be upgraded.
    #[serde(default)]
    pub upgrade_coefficients: ResourceLedger,
    /// Per-second yield added by each level
    #[serde(default)]
    pub production_per_level: ResourceLedger,
}

impl BuildingSpec {
    /// Cost to go from `level` to `level + 1`
    pub fn upgrade_cost(&self, level: u32) -> ResourceLedger {
        if self.upgrade_coefficients.is_empty() {
            return not_upgradable_cost();
        }
        let scale = f64::from(level.max(1)).powf(UPGRADE_EXPONENT);
        let mut cost = ResourceLedger::new();
        for (res, coefficient) in self.upgrade_coefficients.iter() {
            cost.add(res, (coefficient * scale).floor());
        }
        cost
    }

    /// Per-second yield at the given level, linear in level
    pub fn production(&self, level: u32) -> ResourceLedger {
        let mut output = ResourceLedger::new();
        for (res, bonus) in self.production_per_level.iter() {
            output.add(res, bonus * f64::from(level));
        }
        output
    }
}

/// The flat fallback cost for kinds without an upgrade formula
pub fn not_upgradable_cost() -> ResourceLedger {
    ResourceLedger::from_pairs([(MINERALS, NOT_UPGRADABLE_COST), (ENERGY, NOT_UPGRADABLE_COST)])
}

/// Catalog of all constructible building kinds
#[derive(Debug, Clone, Default)]
pub struct BuildingCatalog {
    specs: Vec<BuildingSpec>,
    /// normalized name -> index into `specs`
    index: AHashMap<String, usize>,
}

impl BuildingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard colony buildings
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(spec(
            "Mine",
            &[(MINERALS, 50.0)],
            &[(MINERALS, 25.0), (ENERGY, 10.0)],
            (MINERALS, 5.0),
        ));
        catalog.add(spec(
            "Solar Panel",
            &[(MINERALS, 30.0), (ENERGY, 20.0)],
            &[(MINERALS, 20.0), (ENERGY, 15.0)],
            (ENERGY, 3.0),
        ));
        catalog.add(spec(
            "Hydroponics Farm",
            &[(MINERALS, 40.0), (ENERGY, 15.0)],
            &[(MINERALS, 20.0), (ENERGY, 10.0)],
            (FOOD, 2.0),
        ));
        catalog.add(spec(
            "Research Lab",
            &[(MINERALS, 60.0), (ENERGY, 40.0)],
            &[(MINERALS, 30.0), (ENERGY, 25.0)],
            (RESEARCH_POINTS, 0.5),
        ));
        // Locked until geothermal_power is researched
        catalog.add(spec(
            "Geothermal Plant",
            &[(MINERALS, 120.0), (ENERGY, 30.0)],
            &[(MINERALS, 60.0), (ENERGY, 20.0)],
            (ENERGY, 8.0),
        ));

        catalog
    }

    /// Add a spec, replacing any existing spec with the same name
    pub fn add(&mut self, spec: BuildingSpec) {
        let key = normalize_name(&spec.name);
        match self.index.get(&key) {
            Some(&i) => self.specs[i] = spec,
            None => {
                self.index.insert(key, self.specs.len());
                self.specs.push(spec);
            }
        }
    }

    /// Look up a spec by name, tolerant of spacing and case
    pub fn get(&self, name: &str) -> Option<&BuildingSpec> {
        self.index
            .get(&normalize_name(name))
            .and_then(|&i| self.specs.get(i))
    }

    /// Canonical display name for a loosely-spelled kind
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(|spec| spec.name.as_str())
    }

    /// Kind names in declaration order
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    pub fn all(&self) -> &[BuildingSpec] {
        &self.specs
    }

    /// Upgrade cost for any kind; unknown kinds are not upgradable
    pub fn upgrade_cost(&self, kind: &str, level: u32) -> ResourceLedger {
        self.get(kind)
            .map(|spec| spec.upgrade_cost(level))
            .unwrap_or_else(not_upgradable_cost)
    }

    /// Production for any kind; unknown kinds produce nothing
    pub fn production(&self, kind: &str, level: u32) -> ResourceLedger {
        self.get(kind)
            .map(|spec| spec.production(level))
            .unwrap_or_default()
    }
}

fn spec(
    name: &str,
    base_cost: &[(&str, f64)],
    upgrade: &[(&str, f64)],
    production: (&str, f64),
) -> BuildingSpec {
    BuildingSpec {
        name: name.to_string(),
        base_cost: ResourceLedger::from_pairs(base_cost.iter().copied()),
        upgrade_coefficients: ResourceLedger::from_pairs(upgrade.iter().copied()),
        production_per_level: ResourceLedger::from_pairs([production]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_upgrade_cost_curve() {
        let catalog = BuildingCatalog::with_defaults();
        let mine = catalog.get("Mine").unwrap();

        let level1 = mine.upgrade_cost(1);
        assert_eq!(level1.get(MINERALS), 25.0);
        assert_eq!(level1.get(ENERGY), 10.0);

        // 25 * 2^1.5 = 70.71, 10 * 2^1.5 = 28.28
        let level2 = mine.upgrade_cost(2);
        assert_eq!(level2.get(MINERALS), 70.0);
        assert_eq!(level2.get(ENERGY), 28.0);
    }

    #[test]
    fn test_production_is_linear_in_level() {
        let catalog = BuildingCatalog::with_defaults();
        assert_eq!(catalog.production("Mine", 1).get(MINERALS), 5.0);
        assert_eq!(catalog.production("Mine", 3).get(MINERALS), 15.0);
        assert_eq!(catalog.production("Research Lab", 2).get(RESEARCH_POINTS), 1.0);
        assert_eq!(catalog.production("Solar Panel", 1).len(), 1);
    }

    #[test]
    fn test_lookup_tolerates_spacing() {
        let catalog = BuildingCatalog::with_defaults();
        assert_eq!(catalog.resolve_name("GeothermalPlant"), Some("Geothermal Plant"));
        assert_eq!(catalog.resolve_name("solar panel"), Some("Solar Panel"));
        assert_eq!(catalog.resolve_name("Orbital Elevator"), None);
    }

    #[test]
    fn test_unknown_or_formula_less_kinds_are_not_upgradable() {
        let mut catalog = BuildingCatalog::with_defaults();
        assert_eq!(catalog.upgrade_cost("Orbital Elevator", 1), not_upgradable_cost());
        assert!(catalog.production("Orbital Elevator", 4).is_empty());

        catalog.add(BuildingSpec {
            name: "Monument".into(),
            base_cost: ResourceLedger::from_pairs([(MINERALS, 500.0)]),
            upgrade_coefficients: ResourceLedger::new(),
            production_per_level: ResourceLedger::new(),
        });
        assert_eq!(
            catalog.upgrade_cost("Monument", 1).get(MINERALS),
            NOT_UPGRADABLE_COST
        );
    }

    #[test]
    fn test_add_replaces_existing_kind() {
        let mut catalog = BuildingCatalog::with_defaults();
        let count = catalog.all().len();

        let mut cheap_mine = catalog.get("Mine").unwrap().clone();
        cheap_mine.base_cost = ResourceLedger::from_pairs([(MINERALS, 10.0)]);
        catalog.add(cheap_mine);

        assert_eq!(catalog.all().len(), count);
        assert_eq!(catalog.get("Mine").unwrap().base_cost.get(MINERALS), 10.0);
        assert_eq!(catalog.kinds().next(), Some("Mine"));
    }

    #[test]
    fn test_instance_level_floor() {
        assert_eq!(BuildingInstance::new("Mine").level, 1);
        assert_eq!(BuildingInstance::with_level("Mine", 0).level, 1);
    }
}
