//! Catalog bundle - the static game data a colony consults
//!
//! Defaults are hardcoded; a TOML file may replace either table:
//!
//! ```toml
//! [[buildings]]
//! name = "Mine"
//! base_cost = { Minerals = 50.0 }
//! upgrade_coefficients = { Minerals = 25.0, Energy = 10.0 }
//! production_per_level = { Minerals = 5.0 }
//!
//! [[projects]]
//! id = "geothermal_power"
//! name = "Geothermal Power"
//! cost = 250
//! unlocks_buildings = ["Geothermal Plant"]
//! ```

use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::colony::building::{BuildingCatalog, BuildingSpec};
use crate::colony::research::{ResearchCatalog, ResearchProject};
use crate::core::error::{ColonyError, Result};

/// Building and research tables, shared read-only between colonies
#[derive(Debug, Clone)]
pub struct Catalog {
    pub buildings: BuildingCatalog,
    pub research: ResearchCatalog,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            buildings: BuildingCatalog::with_defaults(),
            research: ResearchCatalog::with_defaults(),
        }
    }
}

static DEFAULT_CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();

impl Catalog {
    /// The built-in catalog, created once and shared
    pub fn shared_default() -> Arc<Catalog> {
        DEFAULT_CATALOG
            .get_or_init(|| Arc::new(Catalog::default()))
            .clone()
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from TOML; omitted tables keep the defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlCatalog = toml::from_str(content)?;
        let mut catalog = Self::default();

        if let Some(buildings) = data.buildings {
            let mut table = BuildingCatalog::new();
            for spec in buildings {
                if spec.name.trim().is_empty() {
                    return Err(ColonyError::Catalog("building with an empty name".into()));
                }
                table.add(spec);
            }
            catalog.buildings = table;
        }

        if let Some(projects) = data.projects {
            let mut table = ResearchCatalog::new();
            for project in projects {
                if project.id.trim().is_empty() {
                    return Err(ColonyError::Catalog("research project with an empty id".into()));
                }
                table.add(project);
            }
            catalog.research = table;
        }

        catalog.check_unlocks()?;
        Ok(catalog)
    }

    /// Every kind a project unlocks must exist in the building table
    fn check_unlocks(&self) -> Result<()> {
        for project in self.research.all() {
            if let Some(kind) = project
                .unlocks_buildings
                .iter()
                .find(|kind| self.buildings.get(kind).is_none())
            {
                return Err(ColonyError::Catalog(format!(
                    "project '{}' unlocks unknown building '{}'",
                    project.id, kind
                )));
            }
        }
        Ok(())
    }
}

/// TOML representation of a catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    buildings: Option<Vec<BuildingSpec>>,
    projects: Option<Vec<ResearchProject>>,
}
