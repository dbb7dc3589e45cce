//! Colony - the aggregate root of the simulation
//!
//! A colony owns its resource ledger, its buildings (in construction order),
//! its research progress and its event history. Every public mutator leaves
//! resource quantities non-negative. Validation failures never propagate as
//! panics: they are written to the event history and reported as `false`
//! (or an `Err` for `build`, which must carry a reason).

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::colony::building::BuildingInstance;
use crate::colony::catalog::Catalog;
use crate::colony::history::{EventLog, DEFAULT_MAX_HISTORY};
use crate::colony::ledger::ResourceLedger;
use crate::core::error::{ColonyError, Result};
use crate::core::types::{ENERGY, FOOD, MINERALS, RESEARCH_POINTS};

/// Resources a new colony lands with
pub const STARTER_RESOURCES: [(&str, f64); 4] = [
    (MINERALS, 50.0),
    (ENERGY, 60.0),
    (FOOD, 10.0),
    (RESEARCH_POINTS, 0.0),
];

/// Building kinds constructible without research
pub const STARTER_BUILDINGS: [&str; 4] = ["Mine", "Solar Panel", "Hydroponics Farm", "Research Lab"];

#[derive(Debug, Clone)]
pub struct Colony {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) resources: ResourceLedger,
    pub(crate) buildings: Vec<BuildingInstance>,
    pub(crate) turn_number: u64,
    pub(crate) event_history: EventLog,
    pub(crate) history_limit: usize,
    pub(crate) completed_research: BTreeSet<String>,
    pub(crate) unlocked_buildings: BTreeSet<String>,
}

impl Default for Colony {
    fn default() -> Self {
        Self::new()
    }
}

impl Colony {
    /// A fresh colony using the built-in catalog
    pub fn new() -> Self {
        Self::with_catalog(Catalog::shared_default())
    }

    /// A fresh colony using a custom catalog
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            resources: ResourceLedger::from_pairs(STARTER_RESOURCES),
            buildings: Vec::new(),
            turn_number: 1,
            event_history: EventLog::new(),
            history_limit: DEFAULT_MAX_HISTORY,
            completed_research: BTreeSet::new(),
            unlocked_buildings: STARTER_BUILDINGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) fn catalog_handle(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    // === RESOURCES ===

    pub fn get_resources(&self) -> &ResourceLedger {
        &self.resources
    }

    /// Add to a resource, creating the entry if absent
    pub fn add_resource(&mut self, resource: &str, amount: f64) {
        self.resources.add(resource, amount);
    }

    /// Remove up to `amount`, clamped at zero; returns what was removed
    pub fn drain_resource(&mut self, resource: &str, amount: f64) -> f64 {
        self.resources.drain(resource, amount)
    }

    pub fn has_enough(&self, cost: &ResourceLedger) -> bool {
        self.resources.has_enough(cost)
    }

    /// Deduct all of `cost` or nothing
    pub fn spend(&mut self, cost: &ResourceLedger) -> bool {
        self.resources.spend(cost)
    }

    // === BUILDINGS ===

    pub fn buildings(&self) -> &[BuildingInstance] {
        &self.buildings
    }

    /// Append a building without validation; callers check cost and unlocks
    pub fn add_building(&mut self, building: BuildingInstance) {
        self.buildings.push(building);
    }

    /// Sum of per-second production over all owned buildings
    ///
    /// A colony with no buildings yields an empty ledger.
    pub fn calculate_production_bonuses(&self) -> ResourceLedger {
        let mut bonuses = ResourceLedger::new();
        for building in &self.buildings {
            bonuses.absorb(&self.catalog.buildings.production(&building.kind, building.level));
        }
        bonuses
    }

    /// Whether a kind may be constructed, tolerant of spelling variants
    pub fn is_unlocked(&self, kind: &str) -> bool {
        let canonical = self.catalog.buildings.resolve_name(kind).unwrap_or(kind);
        self.unlocked_buildings.contains(canonical)
    }

    pub fn unlocked_buildings(&self) -> &BTreeSet<String> {
        &self.unlocked_buildings
    }

    // === RESEARCH ===

    pub fn completed_research(&self) -> &BTreeSet<String> {
        &self.completed_research
    }

    pub fn is_researched(&self, project_id: &str) -> bool {
        self.completed_research.contains(project_id)
    }

    /// Complete a research project, logging the outcome
    pub fn research_project(&mut self, project_id: &str) -> bool {
        match self.try_research(project_id) {
            Ok(message) => {
                self.log(message);
                true
            }
            Err(err) => {
                tracing::debug!(project = project_id, "research rejected: {}", err);
                self.log(err.to_string());
                false
            }
        }
    }

    fn try_research(&mut self, project_id: &str) -> Result<String> {
        let catalog = self.catalog_handle();
        let project = catalog
            .research
            .get(project_id)
            .ok_or_else(|| ColonyError::UnknownProject(project_id.to_string()))?;

        if self.completed_research.contains(project_id) {
            return Err(ColonyError::AlreadyResearched(project.name.clone()));
        }

        let cost = ResourceLedger::from_pairs([(RESEARCH_POINTS, f64::from(project.cost))]);
        if !self.resources.spend(&cost) {
            return Err(ColonyError::InsufficientResearchPoints {
                name: project.name.clone(),
                required: f64::from(project.cost),
                available: self.resources.get(RESEARCH_POINTS),
            });
        }

        self.completed_research.insert(project.id.clone());
        for kind in &project.unlocks_buildings {
            let canonical = catalog.buildings.resolve_name(kind).unwrap_or(kind);
            self.unlocked_buildings.insert(canonical.to_string());
        }

        tracing::debug!(project = project_id, cost = project.cost, "research complete");

        let unlocked = if project.unlocks_buildings.is_empty() {
            "None".to_string()
        } else {
            project.unlocks_buildings.join(", ")
        };
        Ok(format!("Research complete: {}. Unlocked: {}", project.name, unlocked))
    }

    // === HISTORY & TURNS ===

    /// Insert a message at the front of the history, keeping `max_history` entries
    pub fn add_event_to_history(&mut self, message: impl Into<String>, max_history: usize) {
        self.event_history.push(message, max_history);
    }

    /// Append to the history using the colony's own bound
    pub fn log(&mut self, message: impl Into<String>) {
        let limit = self.history_limit;
        self.event_history.push(message, limit);
    }

    pub fn event_history(&self) -> &EventLog {
        &self.event_history
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Change the history bound; existing entries beyond it are evicted
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit.max(1);
        let entries = self.event_history.to_vec();
        self.event_history = EventLog::from_entries(entries, self.history_limit);
    }

    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Bump the legacy turn counter
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
    }
}
