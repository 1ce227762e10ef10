//! Potential targets surfaced by a search

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Position};

/// Entity class, resolved once when the world reports the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Hostile,
    Other,
}

/// Creature family, used by type-specific enchantments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CreatureAttribute {
    #[default]
    Normal,
    Undead,
    Arthropod,
}

/// A candidate target; rebuilt every search and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetCandidate {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
}

impl TargetCandidate {
    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }
}
