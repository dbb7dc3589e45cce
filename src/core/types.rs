//! Core type definitions used throughout the codebase

/// Simulated time in seconds, as supplied by the caller of a tick
pub type Seconds = f64;

/// Canonical resource names
pub const MINERALS: &str = "Minerals";
pub const ENERGY: &str = "Energy";
pub const FOOD: &str = "Food";
pub const RESEARCH_POINTS: &str = "ResearchPoints";

/// Strip whitespace and fold ASCII case so "GeothermalPlant" matches "Geothermal Plant"
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
