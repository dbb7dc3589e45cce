//! Colony layer - resources, buildings, research and history

pub mod building;
pub mod catalog;
pub mod construction;
pub mod history;
pub mod ledger;
pub mod research;
pub mod state;

pub use building::{BuildingCatalog, BuildingInstance, BuildingSpec};
pub use catalog::Catalog;
pub use construction::DamageResult;
pub use history::EventLog;
pub use ledger::ResourceLedger;
pub use research::{ResearchCatalog, ResearchProject};
pub use state::{Colony, STARTER_BUILDINGS, STARTER_RESOURCES};
