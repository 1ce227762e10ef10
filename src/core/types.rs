//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// World-space position (x east, y up, z south)
pub type Position = glam::DVec3;

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for entities (guards, creatures, players)
///
/// Guards never hold a handle to another entity, only this id. It is
/// re-resolved against the world every tick, so a despawned target simply
/// stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to tell guards apart in logs
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

/// Identifier for a colony (the faction a guard defends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColonyId(pub u32);

/// Identifier for a building within the colony registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

impl std::fmt::Display for BuildingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "building#{}", self.0)
    }
}

/// World difficulty setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum Difficulty {
    Peaceful = 0,
    Easy = 1,
    #[default]
    Normal = 2,
    Hard = 3,
}

impl Difficulty {
    /// Numeric id used by damage formulas
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

/// Horizontal (xz-plane) distance between two positions
pub fn horizontal_distance(a: Position, b: Position) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_ids() {
        assert_eq!(Difficulty::Peaceful.id(), 0);
        assert_eq!(Difficulty::Hard.id(), 3);
        assert!(Difficulty::Hard > Difficulty::Normal);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 50.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_entity_id_display_is_short() {
        let id = EntityId::new();
        assert_eq!(id.to_string().len(), 8);
    }
}
