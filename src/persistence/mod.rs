//! Save and load colonies as JSON documents

pub mod codec;
pub mod document;

pub use codec::{from_document, from_json, from_json_with_catalog, load, load_with_catalog, save, to_json};
pub use document::{BuildingEntry, ColonyDocument};
