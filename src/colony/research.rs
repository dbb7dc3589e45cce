//! Research projects - what research points can buy
//!
//! Projects are immutable catalog entries. Completing one unlocks building
//! kinds for future construction.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A research project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchProject {
    /// Unique identifier, e.g. "geothermal_power"
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Cost in research points
    pub cost: u32,
    #[serde(default)]
    pub description: String,
    /// Building kinds this project makes constructible
    #[serde(default)]
    pub unlocks_buildings: Vec<String>,
    /// Upgrade identifiers this project unlocks (reserved for future effects)
    #[serde(default)]
    pub unlocks_upgrades: Vec<String>,
}

/// Catalog of all research projects
#[derive(Debug, Clone, Default)]
pub struct ResearchCatalog {
    projects: Vec<ResearchProject>,
    index: AHashMap<String, usize>,
}

impl ResearchCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load default projects (hardcoded)
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(ResearchProject {
            id: "lab_efficiency_1".into(),
            name: "Basic Lab Efficiency".into(),
            cost: 100,
            description: "Improve research lab calibration to boost general research output \
                          slightly or enable further research."
                .into(),
            unlocks_buildings: vec![],
            unlocks_upgrades: vec![],
        });

        catalog.add(ResearchProject {
            id: "geothermal_power".into(),
            name: "Geothermal Power".into(),
            cost: 250,
            description: "Unlock the ability to construct Geothermal Power Plants for a \
                          significant energy boost."
                .into(),
            unlocks_buildings: vec!["Geothermal Plant".into()],
            unlocks_upgrades: vec![],
        });

        catalog.add(ResearchProject {
            id: "improved_extraction".into(),
            name: "Improved Mineral Extraction".into(),
            cost: 150,
            description: "Develop techniques to allow Mines to be upgraded further or operate \
                          more efficiently."
                .into(),
            unlocks_buildings: vec![],
            unlocks_upgrades: vec![],
        });

        catalog
    }

    /// Add a project, replacing any project with the same id
    pub fn add(&mut self, project: ResearchProject) {
        match self.index.get(&project.id) {
            Some(&i) => self.projects[i] = project,
            None => {
                self.index.insert(project.id.clone(), self.projects.len());
                self.projects.push(project);
            }
        }
    }

    /// Get a project by id
    pub fn get(&self, id: &str) -> Option<&ResearchProject> {
        self.index.get(id).and_then(|&i| self.projects.get(i))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get all projects in declaration order
    pub fn all(&self) -> &[ResearchProject] {
        &self.projects
    }

    /// Projects not yet completed
    pub fn available<'a>(
        &'a self,
        is_completed: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = &'a ResearchProject> + 'a {
        self.projects.iter().filter(move |p| !is_completed(&p.id))
    }
}
