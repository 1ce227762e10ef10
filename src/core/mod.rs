pub mod config;
pub mod error;
pub mod types;

pub use config::GuardConfig;
pub use error::{GuardError, Result};
pub use types::{BuildingId, ColonyId, Difficulty, EntityId, Position, Tick};
