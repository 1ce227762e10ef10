//! Garrison - drives every guard of a colony
//!
//! The host calls [`Garrison::tick`] once per simulation tick. Guards run in
//! enlistment order and never see each other's changes mid-tick except
//! through the world.

use serde::Serialize;

use crate::core::config::GuardConfig;
use crate::core::types::{EntityId, Tick};
use crate::entity::GuardAgent;
use crate::guard::{GuardClass, GuardEvent, GuardState, GuardStateMachine};
use crate::world::GuardWorld;

/// Per-state head count and combat totals
#[derive(Debug, Clone, Default, Serialize)]
pub struct GarrisonSummary {
    pub tick: Tick,
    pub guards: usize,
    pub by_state: Vec<(GuardState, usize)>,
    /// Attacks since each guard's last restock, summed
    pub pending_attacks: u32,
    pub engaged: usize,
}

#[derive(Default)]
pub struct Garrison {
    guards: Vec<(GuardAgent, GuardStateMachine)>,
    current_tick: Tick,
}

impl Garrison {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hire `agent` as a guard and return its id
    pub fn enlist(&mut self, mut agent: GuardAgent, class: GuardClass, config: GuardConfig, seed: u64) -> EntityId {
        let machine = GuardStateMachine::new(class, config, &mut agent).with_seed(seed);
        let id = agent.id;
        tracing::info!(guard = %id, name = %agent.name, ?class, "guard enlisted");
        self.guards.push((agent, machine));
        id
    }

    /// Remove a guard, handing its agent back to the host
    pub fn dismiss(&mut self, id: EntityId) -> Option<GuardAgent> {
        let index = self.guards.iter().position(|(agent, _)| agent.id == id)?;
        let (agent, _) = self.guards.remove(index);
        Some(agent)
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn guards(&self) -> impl Iterator<Item = (&GuardAgent, &GuardStateMachine)> + '_ {
        self.guards.iter().map(|(agent, machine)| (agent, machine))
    }

    pub fn guard(&self, id: EntityId) -> Option<(&GuardAgent, &GuardStateMachine)> {
        self.guards()
            .find(|(agent, _)| agent.id == id)
    }

    /// Tick every guard once and collect what happened
    pub fn tick(&mut self, world: &mut dyn GuardWorld) -> Vec<GuardEvent> {
        let mut events = Vec::new();

        for (agent, machine) in &mut self.guards {
            machine.tick(agent, world);
            events.extend(machine.drain_events());
        }

        self.current_tick += 1;

        if !events.is_empty() {
            tracing::debug!(
                "Garrison tick {}: {} events from {} guards",
                self.current_tick,
                events.len(),
                self.guards.len()
            );
        }

        events
    }

    pub fn summary(&self) -> GarrisonSummary {
        let by_state = GuardState::ALL
            .iter()
            .map(|&state| {
                let count = self.guards.iter().filter(|(_, m)| m.state() == state).count();
                (state, count)
            })
            .filter(|&(_, count)| count > 0)
            .collect();

        GarrisonSummary {
            tick: self.current_tick,
            guards: self.guards.len(),
            by_state,
            pending_attacks: self.guards.iter().map(|(_, m)| m.attacks()).sum(),
            engaged: self.guards.iter().filter(|(_, m)| m.target().is_some()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::world::SandboxWorld;

    #[test]
    fn test_enlist_and_dismiss() {
        let mut garrison = Garrison::new();
        let id = garrison.enlist(GuardAgent::new("Vera", Position::ZERO), GuardClass::Melee, GuardConfig::default(), 1);
        assert_eq!(garrison.len(), 1);
        assert!(garrison.guard(id).is_some());

        let agent = garrison.dismiss(id);
        assert_eq!(agent.map(|a| a.name), Some("Vera".to_string()));
        assert!(garrison.is_empty());
        assert!(garrison.dismiss(id).is_none());
    }

    #[test]
    fn test_tick_advances_every_guard() {
        let mut world = SandboxWorld::new();
        let mut garrison = Garrison::new();
        for (i, name) in ["Wim", "Xia", "Yrsa"].into_iter().enumerate() {
            garrison.enlist(GuardAgent::new(name, Position::ZERO), GuardClass::Melee, GuardConfig::default(), i as u64);
        }

        let events = garrison.tick(&mut world);

        assert_eq!(garrison.current_tick(), 1);
        let changes = events
            .iter()
            .filter(|e| matches!(e, GuardEvent::StateChanged { to: GuardState::StartWorking, .. }))
            .count();
        assert_eq!(changes, 3);

        let summary = garrison.summary();
        assert_eq!(summary.by_state, vec![(GuardState::StartWorking, 3)]);
    }
}
