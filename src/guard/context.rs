//! Per-guard mutable search state

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::types::{EntityId, Position};
use crate::entity::TargetCandidate;

/// Everything a guard remembers between ticks besides its state
#[derive(Debug, Clone)]
pub struct SearchContext {
    /// Current search radius, in `[start_radius, max_vision]`
    pub radius: f64,
    /// Candidates from the last search, in scan order
    pub candidates: VecDeque<TargetCandidate>,
    /// Candidates rejected during this episode
    pub discarded: AHashSet<EntityId>,
    /// Weak reference, re-resolved every tick
    pub target: Option<EntityId>,
    /// Attacks since the last restock
    pub attacks: u32,
    pub waypoint: Option<Position>,
    /// Ticks spent walking home for the current restock
    pub restock_wait: u32,
    /// Set once the guard has asked for its missing weapon
    pub equipment_requested: bool,
}

impl SearchContext {
    pub fn new(start_radius: f64) -> Self {
        Self {
            radius: start_radius,
            candidates: VecDeque::new(),
            discarded: AHashSet::new(),
            target: None,
            attacks: 0,
            waypoint: None,
            restock_wait: 0,
            equipment_requested: false,
        }
    }

    /// Reject a candidate for the rest of the episode
    pub fn discard(&mut self, id: EntityId) {
        self.discarded.insert(id);
    }

    pub fn is_discarded(&self, id: EntityId) -> bool {
        self.discarded.contains(&id)
    }

    /// Forget the episode's candidates and rejections
    pub fn end_episode(&mut self, start_radius: f64) {
        self.radius = start_radius;
        self.candidates.clear();
        self.discarded.clear();
    }

    pub fn drop_target(&mut self) -> Option<EntityId> {
        self.target.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_episode_resets_search_only() {
        let mut ctx = SearchContext::new(5.0);
        ctx.radius = 15.0;
        ctx.attacks = 7;
        ctx.discard(EntityId::new());

        ctx.end_episode(5.0);

        assert_eq!(ctx.radius, 5.0);
        assert!(ctx.discarded.is_empty());
        assert_eq!(ctx.attacks, 7);
    }

    #[test]
    fn test_drop_target_clears_reference() {
        let mut ctx = SearchContext::new(5.0);
        let id = EntityId::new();
        ctx.target = Some(id);
        assert_eq!(ctx.drop_target(), Some(id));
        assert!(ctx.target.is_none());
    }
}
