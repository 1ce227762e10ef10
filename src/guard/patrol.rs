//! Patrol waypoint selection

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::Position;
use crate::entity::GuardAgent;
use crate::world::{BuildingKind, ColonyRegistry};

/// Pick the next patrol waypoint
///
/// Draws one of the colony's buildings uniformly. Guard posts are not
/// patrolled; drawing one sends the guard back to its own post instead.
/// Without a colony or a post the guard stays where it is.
pub fn next_waypoint<R, G>(agent: &GuardAgent, registry: &R, rng: &mut G) -> Position
where
    R: ColonyRegistry + ?Sized,
    G: Rng + ?Sized,
{
    let (Some(colony), Some(home_id)) = (agent.colony, agent.home) else {
        return agent.position;
    };
    let Some(home) = registry.building(home_id) else {
        return agent.position;
    };

    let buildings = registry.buildings_of(colony);
    match buildings.choose(rng) {
        Some(building) if building.kind == BuildingKind::GuardTower => home.location,
        Some(building) => building.location,
        None => agent.position,
    }
}
