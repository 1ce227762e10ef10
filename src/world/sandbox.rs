//! In-memory world for scenario tests and the demo binary
//!
//! Implements every collaborator trait with plain collections. Entities are
//! kept in insertion order so spatial queries are reproducible. Projectiles
//! fly on a simple ballistic model when the host calls [`SandboxWorld::step`].

use ahash::{AHashMap, AHashSet};
use serde::Serialize;

use crate::combat::Projectile;
use crate::core::error::{GuardError, Result};
use crate::core::types::{horizontal_distance, BuildingId, ColonyId, Difficulty, EntityId, Position};
use crate::entity::{CreatureAttribute, EntityKind, GuardAgent, Inventory, TargetCandidate};
use crate::world::traits::{
    Building, BuildingKind, ColonyRegistry, CombatTargets, Effects, Navigation, PermissionAction,
    Permissions, QueryVolume, Senses, SpatialQuery, TrackedEntity,
};

/// Health of a freshly spawned creature
pub const DEFAULT_HEALTH: f64 = 20.0;

/// Standing height of a humanoid creature
pub const DEFAULT_HEIGHT: f64 = 1.8;

/// Storage slots of a building
pub const STORAGE_SIZE: usize = 27;

const GRAVITY: f64 = 0.05;
const DRAG: f64 = 0.99;
const HIT_RADIUS: f64 = 0.6;
const PROJECTILE_LIFETIME: u32 = 100;
const FLIGHT_SUBSTEPS: u32 = 4;
/// Game ticks per second, for converting arrow fire ticks to burn seconds
const TICKS_PER_SECOND: u32 = 20;

/// A non-guard entity living in the sandbox
#[derive(Debug, Clone, Serialize)]
pub struct SandboxEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub height: f64,
    pub creature: CreatureAttribute,
    pub health: f64,
    /// Cleared to simulate walls between guard and entity
    pub visible: bool,
    pub burning_seconds: u32,
    pub revenge_target: Option<EntityId>,
}

impl SandboxEntity {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// A played sound, recorded for inspection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundRecord {
    pub at: Position,
    pub sound: &'static str,
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone)]
struct Flight {
    projectile: Projectile,
    position: Position,
    velocity: Position,
    age: u32,
}

#[derive(Debug, Default)]
pub struct SandboxWorld {
    entities: Vec<SandboxEntity>,
    index: AHashMap<EntityId, usize>,
    buildings: Vec<(ColonyId, Building)>,
    storages: AHashMap<BuildingId, Inventory>,
    grants: AHashSet<(ColonyId, EntityId, PermissionAction)>,
    difficulty: Difficulty,
    next_building: u32,
    /// Navigation never makes progress while set
    pub paths_blocked: bool,
    /// Number of `clear_path` calls seen
    pub paths_cleared: usize,
    /// Every projectile ever spawned
    pub projectiles: Vec<Projectile>,
    pub sounds: Vec<SoundRecord>,
    flights: Vec<Flight>,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Add an entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, position: Position) -> EntityId {
        self.spawn_creature(kind, position, CreatureAttribute::Normal)
    }

    pub fn spawn_creature(
        &mut self,
        kind: EntityKind,
        position: Position,
        creature: CreatureAttribute,
    ) -> EntityId {
        let id = EntityId::new();
        self.index.insert(id, self.entities.len());
        self.entities.push(SandboxEntity {
            id,
            kind,
            position,
            height: DEFAULT_HEIGHT,
            creature,
            health: DEFAULT_HEALTH,
            visible: true,
            burning_seconds: 0,
            revenge_target: None,
        });
        id
    }

    /// Remove an entity from the world entirely (despawn)
    pub fn despawn(&mut self, id: EntityId) -> Result<SandboxEntity> {
        let slot = self.index.remove(&id).ok_or(GuardError::EntityNotFound(id))?;
        let removed = self.entities.remove(slot);
        for (i, entity) in self.entities.iter().enumerate().skip(slot) {
            self.index.insert(entity.id, i);
        }
        Ok(removed)
    }

    pub fn entity(&self, id: EntityId) -> Option<&SandboxEntity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut SandboxEntity> {
        self.index.get(&id).map(|&i| &mut self.entities[i])
    }

    pub fn set_visible(&mut self, id: EntityId, visible: bool) -> Result<()> {
        let entity = self.entity_mut(id).ok_or(GuardError::EntityNotFound(id))?;
        entity.visible = visible;
        Ok(())
    }

    pub fn kill(&mut self, id: EntityId) -> Result<()> {
        let entity = self.entity_mut(id).ok_or(GuardError::EntityNotFound(id))?;
        entity.health = 0.0;
        Ok(())
    }

    pub fn living_count(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == kind && e.is_alive())
            .count()
    }

    pub fn grant(&mut self, colony: ColonyId, player: EntityId, action: PermissionAction) {
        self.grants.insert((colony, player, action));
    }

    /// Register a building with empty storage
    pub fn add_building(
        &mut self,
        colony: ColonyId,
        kind: BuildingKind,
        location: Position,
        level: u32,
    ) -> BuildingId {
        self.next_building += 1;
        let id = BuildingId(self.next_building);
        self.buildings.push((colony, Building { id, kind, location, level }));
        self.storages.insert(id, Inventory::new(STORAGE_SIZE));
        id
    }

    pub fn storage(&self, id: BuildingId) -> Result<&Inventory> {
        self.storages.get(&id).ok_or(GuardError::BuildingNotFound(id))
    }

    /// Projectiles still in the air
    pub fn projectiles_in_flight(&self) -> usize {
        self.flights.len()
    }

    /// Advance projectiles one tick, returning the ids of entities hit
    pub fn step(&mut self) -> Vec<EntityId> {
        let mut hits = Vec::new();
        let mut flights = std::mem::take(&mut self.flights);

        flights.retain_mut(|flight| {
            // Sub-steps keep fast arrows from tunnelling through a target
            for _ in 0..FLIGHT_SUBSTEPS {
                flight.position += flight.velocity / FLIGHT_SUBSTEPS as f64;

                let struck = self.entities.iter().position(|e| {
                    e.is_alive()
                        && e.kind != EntityKind::Other
                        && horizontal_distance(e.position, flight.position) <= HIT_RADIUS
                        && flight.position.y >= e.position.y
                        && flight.position.y <= e.position.y + e.height
                });

                if let Some(i) = struck {
                    let target = &mut self.entities[i];
                    target.health -= flight.projectile.damage;
                    target.revenge_target = Some(flight.projectile.shooter);
                    if flight.projectile.fire_ticks > 0 {
                        target.burning_seconds = target.burning_seconds.max(flight.projectile.fire_ticks / TICKS_PER_SECOND);
                    }
                    hits.push(target.id);
                    return false;
                }
            }

            flight.velocity *= DRAG;
            flight.velocity.y -= GRAVITY;
            flight.age += 1;
            flight.age < PROJECTILE_LIFETIME
        });

        self.flights = flights;
        hits
    }
}

impl SpatialQuery for SandboxWorld {
    fn entities_in_volume(&self, volume: &QueryVolume, kind: EntityKind) -> Vec<TargetCandidate> {
        self.entities
            .iter()
            .filter(|e| e.kind == kind && volume.contains(e.position))
            .map(|e| TargetCandidate {
                id: e.id,
                kind: e.kind,
                position: e.position,
            })
            .collect()
    }
}

impl Senses for SandboxWorld {
    fn locate(&self, entity: EntityId) -> Option<TrackedEntity> {
        self.entity(entity).map(|e| TrackedEntity {
            id: e.id,
            kind: e.kind,
            position: e.position,
            height: e.height,
            creature: e.creature,
        })
    }

    fn is_alive(&self, entity: EntityId) -> bool {
        self.entity(entity).map(SandboxEntity::is_alive).unwrap_or(false)
    }

    fn can_see(&self, _observer: &GuardAgent, entity: EntityId) -> bool {
        self.entity(entity).map(|e| e.visible).unwrap_or(false)
    }
}

impl Permissions for SandboxWorld {
    fn has_permission(&self, colony: ColonyId, player: EntityId, action: PermissionAction) -> bool {
        self.grants.contains(&(colony, player, action))
    }
}

impl Navigation for SandboxWorld {
    fn move_toward_with_path(&mut self, agent: &mut GuardAgent, target: Position, tolerance: f64) -> bool {
        let remaining = agent.position.distance(target);
        if remaining <= tolerance {
            return true;
        }
        if self.paths_blocked {
            return false;
        }

        let stride = agent.move_speed.max(0.0);
        if stride >= remaining {
            agent.position = target;
        } else {
            let dir = (target - agent.position) / remaining;
            agent.position += dir * stride;
        }
        agent.position.distance(target) <= tolerance
    }

    fn clear_path(&mut self, _agent: &GuardAgent) {
        self.paths_cleared += 1;
    }
}

impl Effects for SandboxWorld {
    fn spawn_projectile(&mut self, projectile: Projectile) {
        self.flights.push(Flight {
            projectile,
            position: projectile.origin,
            velocity: projectile.velocity,
            age: 0,
        });
        self.projectiles.push(projectile);
    }

    fn play_sound(&mut self, at: Position, sound: &'static str, volume: f32, pitch: f32) {
        self.sounds.push(SoundRecord { at, sound, volume, pitch });
    }
}

impl CombatTargets for SandboxWorld {
    fn apply_damage(&mut self, target: EntityId, amount: f64, _source: EntityId) {
        if let Some(entity) = self.entity_mut(target) {
            entity.health -= amount;
        }
    }

    fn set_revenge_target(&mut self, target: EntityId, attacker: EntityId) {
        if let Some(entity) = self.entity_mut(target) {
            entity.revenge_target = Some(attacker);
        }
    }

    fn ignite(&mut self, target: EntityId, seconds: u32) {
        if let Some(entity) = self.entity_mut(target) {
            entity.burning_seconds = entity.burning_seconds.max(seconds);
        }
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl ColonyRegistry for SandboxWorld {
    fn buildings_of(&self, colony: ColonyId) -> Vec<Building> {
        self.buildings
            .iter()
            .filter(|(owner, _)| *owner == colony)
            .map(|(_, building)| *building)
            .collect()
    }

    fn building(&self, id: BuildingId) -> Option<Building> {
        self.buildings
            .iter()
            .find(|(_, building)| building.id == id)
            .map(|(_, building)| *building)
    }

    fn storage_mut(&mut self, id: BuildingId) -> Option<&mut Inventory> {
        self.storages.get_mut(&id)
    }
}
