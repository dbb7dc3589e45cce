//! Colony <-> document conversion and save files
//!
//! Loading never fails loudly: anything unreadable or unparseable yields
//! `None` after a warning. Unknown building names are skipped.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::colony::building::BuildingInstance;
use crate::colony::catalog::Catalog;
use crate::colony::history::EventLog;
use crate::colony::ledger::ResourceLedger;
use crate::colony::state::{Colony, STARTER_BUILDINGS};
use crate::core::error::Result;
use crate::persistence::document::{BuildingEntry, ColonyDocument};

impl Colony {
    /// Full state as a persisted document
    pub fn to_document(&self) -> ColonyDocument {
        ColonyDocument {
            resources: self
                .resources
                .iter()
                .map(|(name, amount)| (name.to_string(), amount))
                .collect(),
            buildings: self
                .buildings
                .iter()
                .map(|b| BuildingEntry::Leveled {
                    name: b.kind.clone(),
                    level: i64::from(b.level),
                })
                .collect(),
            turn_number: self.turn_number,
            event_history: self.event_history.to_vec(),
            completed_research: self.completed_research.iter().cloned().collect(),
            unlocked_buildings: Some(self.unlocked_buildings.iter().cloned().collect()),
        }
    }

    /// Rebuild a colony from a document using the built-in catalog
    pub fn from_document(doc: ColonyDocument) -> Colony {
        from_document(doc, Catalog::shared_default())
    }
}

/// Rebuild a colony from a document against `catalog`
pub fn from_document(doc: ColonyDocument, catalog: Arc<Catalog>) -> Colony {
    let mut colony = Colony::with_catalog(Arc::clone(&catalog));

    let mut resources = ResourceLedger::new();
    for (name, amount) in &doc.resources {
        resources.set(name, *amount);
    }
    colony.resources = resources;

    for entry in &doc.buildings {
        match catalog.buildings.resolve_name(entry.name()) {
            Some(kind) => colony.add_building(BuildingInstance::with_level(kind, entry.level())),
            None => tracing::warn!(name = entry.name(), "skipping unknown building in save"),
        }
    }

    colony.turn_number = doc.turn_number;
    // The bound is not persisted; keep every saved line until a session sets it
    colony.history_limit = colony.history_limit.max(doc.event_history.len());
    colony.event_history = EventLog::from_entries(doc.event_history, colony.history_limit);

    colony.completed_research = doc
        .completed_research
        .into_iter()
        .filter(|id| catalog.research.contains(id))
        .collect();

    let canonical = |name: &str| {
        catalog
            .buildings
            .resolve_name(name)
            .unwrap_or(name)
            .to_string()
    };

    colony.unlocked_buildings = match doc.unlocked_buildings {
        Some(names) => names.iter().map(|n| canonical(n)).collect(),
        None => {
            // Older saves: starter set plus whatever completed research unlocks
            let mut unlocked: BTreeSet<String> =
                STARTER_BUILDINGS.iter().map(|s| s.to_string()).collect();
            for id in &colony.completed_research {
                if let Some(project) = catalog.research.get(id) {
                    unlocked.extend(project.unlocks_buildings.iter().map(|k| canonical(k)));
                }
            }
            unlocked
        }
    };

    colony
}

/// Serialize a colony as pretty JSON
pub fn to_json(colony: &Colony) -> Result<String> {
    Ok(serde_json::to_string_pretty(&colony.to_document())?)
}

/// Parse a colony from JSON, `None` if the text is not a colony document
pub fn from_json(content: &str) -> Option<Colony> {
    from_json_with_catalog(content, Catalog::shared_default())
}

pub fn from_json_with_catalog(content: &str, catalog: Arc<Catalog>) -> Option<Colony> {
    match parse_document(content) {
        Ok(doc) => Some(from_document(doc, catalog)),
        Err(err) => {
            tracing::warn!("save data could not be parsed: {}", err);
            None
        }
    }
}

/// Accept a full document, or a bare list of building names from the oldest saves
fn parse_document(content: &str) -> Result<ColonyDocument> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        let buildings: Vec<BuildingEntry> = serde_json::from_value(value)?;
        return Ok(ColonyDocument {
            buildings,
            ..ColonyDocument::default()
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Write a colony to `path` as JSON
pub fn save(colony: &Colony, path: &Path) -> Result<()> {
    let json = to_json(colony)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "colony saved");
    Ok(())
}

/// Read a colony from `path`, `None` if missing, unreadable or corrupted
pub fn load(path: &Path) -> Option<Colony> {
    load_with_catalog(path, Catalog::shared_default())
}

pub fn load_with_catalog(path: &Path, catalog: Arc<Catalog>) -> Option<Colony> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(path = %path.display(), "save file could not be read: {}", err);
            return None;
        }
    };
    let colony = from_json_with_catalog(&content, catalog)?;
    tracing::info!(path = %path.display(), "colony loaded");
    Some(colony)
}
