//! Collaborator interfaces the guard AI consumes
//!
//! The host simulation owns the world, physics, pathfinding and the colony
//! registry. Guards only see it through these narrow traits, which keeps the
//! decision logic testable against a fixture world.

use serde::{Deserialize, Serialize};

use crate::combat::Projectile;
use crate::core::types::{BuildingId, ColonyId, Difficulty, EntityId, Position};
use crate::entity::{CreatureAttribute, EntityKind, GuardAgent, Inventory, TargetCandidate};

/// Axis-aligned box centred on a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryVolume {
    pub center: Position,
    pub half_extents: Position,
}

impl QueryVolume {
    /// Box with horizontal half-extent `radius` and vertical half-extent `height`
    pub fn around(center: Position, radius: f64, height: f64) -> Self {
        Self {
            center,
            half_extents: Position::new(radius, height, radius),
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }
}

/// What the world currently knows about an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub height: f64,
    pub creature: CreatureAttribute,
}

/// Faction actions gated by colony permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionAction {
    GuardsAttack,
}

/// Building type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    TownHall,
    GuardTower,
    Residence,
    Warehouse,
    Workshop,
    Farm,
}

/// A registered colony building
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub location: Position,
    pub level: u32,
}

pub trait SpatialQuery {
    /// Entities of `kind` inside `volume`, in a stable order for a given world state
    fn entities_in_volume(&self, volume: &QueryVolume, kind: EntityKind) -> Vec<TargetCandidate>;
}

pub trait Senses {
    /// Re-resolve an entity id; `None` once it has left the world
    fn locate(&self, entity: EntityId) -> Option<TrackedEntity>;

    fn is_alive(&self, entity: EntityId) -> bool;

    /// Line of sight from the guard to the entity
    fn can_see(&self, observer: &GuardAgent, entity: EntityId) -> bool;
}

pub trait Permissions {
    fn has_permission(&self, colony: ColonyId, player: EntityId, action: PermissionAction) -> bool;
}

pub trait Navigation {
    /// Step toward `target`; true once within `tolerance`. Never blocks.
    fn move_toward_with_path(&mut self, agent: &mut GuardAgent, target: Position, tolerance: f64) -> bool;

    /// Drop any path in progress
    fn clear_path(&mut self, agent: &GuardAgent);
}

pub trait Effects {
    fn spawn_projectile(&mut self, projectile: Projectile);

    fn play_sound(&mut self, at: Position, sound: &'static str, volume: f32, pitch: f32);
}

/// Effects of a hit on the struck entity
pub trait CombatTargets {
    fn apply_damage(&mut self, target: EntityId, amount: f64, source: EntityId);

    fn set_revenge_target(&mut self, target: EntityId, attacker: EntityId);

    fn ignite(&mut self, target: EntityId, seconds: u32);

    fn difficulty(&self) -> Difficulty;
}

/// Read-mostly view of the colony/building registry
pub trait ColonyRegistry {
    /// The colony's buildings, in a stable order
    fn buildings_of(&self, colony: ColonyId) -> Vec<Building>;

    fn building(&self, id: BuildingId) -> Option<Building>;

    /// Storage of a building, for restocking
    fn storage_mut(&mut self, id: BuildingId) -> Option<&mut Inventory>;
}

/// Everything a guard needs from the host
pub trait GuardWorld:
    SpatialQuery + Senses + Permissions + Navigation + Effects + CombatTargets + ColonyRegistry
{
}

impl<T> GuardWorld for T where
    T: SpatialQuery + Senses + Permissions + Navigation + Effects + CombatTargets + ColonyRegistry
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_contains_bounds() {
        let volume = QueryVolume::around(Position::ZERO, 5.0, 10.0);
        assert!(volume.contains(Position::new(5.0, -10.0, -5.0)));
        assert!(!volume.contains(Position::new(5.1, 0.0, 0.0)));
        assert!(!volume.contains(Position::new(0.0, 10.5, 0.0)));
    }

    #[test]
    fn test_volume_is_box_not_sphere() {
        let volume = QueryVolume::around(Position::ZERO, 5.0, 10.0);
        // Corner lies outside a radius-5 circle but inside the box
        assert!(volume.contains(Position::new(4.9, 0.0, 4.9)));
    }
}
