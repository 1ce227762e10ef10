//! Target search and selection
//!
//! Searching gathers candidates from a box around the guard, hostiles first
//! and then players, in the order the world reports them. Selection walks
//! that list front to back, so ties always go to the earliest candidate.

use crate::core::config::GuardConfig;
use crate::entity::{EntityKind, GuardAgent, TargetCandidate};
use crate::guard::context::SearchContext;
use crate::guard::event::RejectReason;
use crate::world::{Building, Permissions, PermissionAction, QueryVolume, Senses, SpatialQuery};

/// Kinds a guard looks for, in scan order
const SEARCHED_KINDS: [EntityKind; 2] = [EntityKind::Hostile, EntityKind::Player];

/// Furthest a guard searches: base distance plus the home building's bonus
pub fn max_vision(config: &GuardConfig, home: Option<&Building>) -> f64 {
    let level = home.map(|b| b.level).unwrap_or(0);
    config.search.max_attack_distance + level as f64 * config.vision_bonus_per_level
}

/// Attacks allowed between restocks
pub fn attack_budget(config: &GuardConfig, home: Option<&Building>) -> u32 {
    let level = home.map(|b| b.level).unwrap_or(0);
    config.restock.max_attacks.saturating_add(level)
}

/// Radius for the next search after an empty one, or `None` once exhausted
///
/// Growth is clamped so the radius never passes `max_vision`.
pub fn next_radius(radius: f64, increment: f64, max_vision: f64) -> Option<f64> {
    if radius < max_vision {
        Some((radius + increment).min(max_vision))
    } else {
        None
    }
}

/// Candidates inside the search box, skipping ones already rejected this episode
pub fn search<W>(agent: &GuardAgent, world: &W, radius: f64, height: f64, context: &SearchContext) -> Vec<TargetCandidate>
where
    W: SpatialQuery + ?Sized,
{
    let volume = QueryVolume::around(agent.position, radius, height);
    SEARCHED_KINDS
        .iter()
        .flat_map(|&kind| world.entities_in_volume(&volume, kind))
        .filter(|candidate| !context.is_discarded(candidate.id))
        .collect()
}

/// Check one candidate; `Ok` means it may be hunted
pub fn evaluate<W>(agent: &GuardAgent, candidate: &TargetCandidate, world: &W) -> Result<(), RejectReason>
where
    W: Senses + Permissions + ?Sized,
{
    if candidate.is_player() {
        let allowed = agent
            .colony
            .map(|colony| world.has_permission(colony, candidate.id, PermissionAction::GuardsAttack))
            .unwrap_or(false);
        if !allowed {
            return Err(RejectReason::NoPermission);
        }
    }

    if !world.is_alive(candidate.id) {
        return Err(RejectReason::Dead);
    }
    if !world.can_see(agent, candidate.id) {
        return Err(RejectReason::NotVisible);
    }

    Ok(())
}
