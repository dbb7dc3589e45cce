//! Construction system - building, upgrading and damaging structures
//!
//! `upgrade_building` is the only way a level goes up; `damage_building`
//! is the only way a level goes down or a building disappears.

use rand::Rng;

use crate::colony::building::BuildingInstance;
use crate::colony::state::Colony;
use crate::core::error::{ColonyError, Result};

/// Result of damaging one building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageResult {
    /// Level went down by one
    Damaged { kind: String, new_level: u32 },
    /// A level-1 building was removed
    Destroyed { kind: String },
    /// The colony had nothing to hit
    NoTarget,
}

impl DamageResult {
    pub fn message(&self) -> String {
        match self {
            DamageResult::Damaged { kind, new_level } => {
                format!("{} was damaged and dropped to level {}.", kind, new_level)
            }
            DamageResult::Destroyed { kind } => format!("{} was destroyed!", kind),
            DamageResult::NoTarget => "No buildings were in the impact zone.".to_string(),
        }
    }
}

impl Colony {
    /// Construct a new level-1 building of `kind`
    ///
    /// Fails if the kind is unknown, still locked, or unaffordable. The
    /// outcome is always written to the event history.
    pub fn build(&mut self, kind: &str) -> Result<()> {
        match self.try_build(kind) {
            Ok(built) => {
                self.log(format!("Built {}.", built));
                Ok(())
            }
            Err(err) => {
                tracing::debug!(kind, "build rejected: {}", err);
                self.log(err.to_string());
                Err(err)
            }
        }
    }

    fn try_build(&mut self, kind: &str) -> Result<String> {
        let catalog = self.catalog_handle();
        let spec = catalog
            .buildings
            .get(kind)
            .ok_or_else(|| ColonyError::UnknownBuilding(kind.to_string()))?;

        if !self.unlocked_buildings.contains(&spec.name) {
            return Err(ColonyError::BuildingLocked(spec.name.clone()));
        }

        if !self.resources.spend(&spec.base_cost) {
            return Err(ColonyError::InsufficientResources {
                action: format!("build {}", spec.name),
                missing: self.resources.shortfall(&spec.base_cost).to_string(),
            });
        }

        self.add_building(BuildingInstance::new(spec.name.clone()));
        tracing::debug!(kind = %spec.name, count = self.buildings.len(), "building constructed");
        Ok(spec.name.clone())
    }

    /// Upgrade the building at `index` by one level
    pub fn upgrade_building(&mut self, index: usize) -> bool {
        match self.try_upgrade(index) {
            Ok(message) => {
                self.log(message);
                true
            }
            Err(err) => {
                tracing::debug!(index, "upgrade rejected: {}", err);
                self.log(err.to_string());
                false
            }
        }
    }

    fn try_upgrade(&mut self, index: usize) -> Result<String> {
        let count = self.buildings.len();
        let building = self
            .buildings
            .get(index)
            .ok_or(ColonyError::BuildingIndexOutOfRange { index, count })?;

        let cost = self.catalog.buildings.upgrade_cost(&building.kind, building.level);
        let kind = building.kind.clone();

        if !self.resources.spend(&cost) {
            return Err(ColonyError::InsufficientResources {
                action: format!("upgrade {}", kind),
                missing: self.resources.shortfall(&cost).to_string(),
            });
        }

        let building = &mut self.buildings[index];
        building.level += 1;
        tracing::debug!(kind = %kind, level = building.level, "building upgraded");
        Ok(format!("{} upgraded to level {}.", kind, building.level))
    }

    /// Knock the building at `index` down one level, removing it at level 1
    pub fn damage_building(&mut self, index: usize) -> DamageResult {
        let Some(building) = self.buildings.get_mut(index) else {
            return DamageResult::NoTarget;
        };

        if building.level > 1 {
            building.level -= 1;
            DamageResult::Damaged {
                kind: building.kind.clone(),
                new_level: building.level,
            }
        } else {
            let removed = self.buildings.remove(index);
            DamageResult::Destroyed { kind: removed.kind }
        }
    }

    /// Damage one building chosen uniformly at random
    pub fn damage_random_building(&mut self, rng: &mut impl Rng) -> String {
        if self.buildings.is_empty() {
            return DamageResult::NoTarget.message();
        }
        let index = rng.gen_range(0..self.buildings.len());
        self.damage_building(index).message()
    }
}
