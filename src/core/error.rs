use thiserror::Error;

use crate::core::types::{BuildingId, EntityId};

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Building not found: {0}")]
    BuildingNotFound(BuildingId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
