use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Unknown building type '{0}'.")]
    UnknownBuilding(String),

    #[error("{0} has not been unlocked yet.")]
    BuildingLocked(String),

    #[error("Not enough resources to {action}. Missing: {missing}")]
    InsufficientResources { action: String, missing: String },

    #[error("Invalid building index {index} (colony has {count} buildings).")]
    BuildingIndexOutOfRange { index: usize, count: usize },

    #[error("Error: Research project '{0}' not found.")]
    UnknownProject(String),

    #[error("Project '{0}' already researched.")]
    AlreadyResearched(String),

    #[error("Not enough Research Points for '{name}' (need {required:.1}, have {available:.1}).")]
    InsufficientResearchPoints {
        name: String,
        required: f64,
        available: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
