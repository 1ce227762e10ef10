//! Guard state machine
//!
//! One machine per guard. Each host tick either burns one tick of a pending
//! delay or runs the handler bound to the current state and commits the
//! transition it returns. Handlers are looked up from a table keyed by
//! state; the melee and ranged specializations plug in where weapons and
//! attacks differ.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::combat::{follow_speed, reload_time};
use crate::core::config::GuardConfig;
use crate::core::types::EntityId;
use crate::entity::{GuardAgent, ItemStack};
use crate::guard::acquisition::{self, attack_budget, max_vision, next_radius};
use crate::guard::context::SearchContext;
use crate::guard::equipment::{self, update_armor, withdraw_supplies, RestockReport};
use crate::guard::event::{GuardEvent, LossReason};
use crate::guard::patrol::next_waypoint;
use crate::guard::state::{GuardState, Transition};
use crate::world::{Building, GuardWorld};

/// Guard specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardClass {
    /// Swings whatever weapon-like item it has, or its fists
    Melee,
    /// Needs a bow to fight
    Ranged,
}

impl GuardClass {
    /// Item this class withdraws on restock and wields before searching
    pub fn required_weapon(&self) -> fn(&ItemStack) -> bool {
        match self {
            GuardClass::Melee => ItemStack::serves_as_weapon,
            GuardClass::Ranged => ItemStack::is_launcher,
        }
    }
}

/// Result of one host tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub state: GuardState,
    /// Ticks still to sit out
    pub delay: u32,
    /// False when the tick was consumed by a delay
    pub executed: bool,
}

type Handler = fn(&mut GuardStateMachine, &mut GuardAgent, &mut dyn GuardWorld) -> Transition;

pub struct GuardStateMachine {
    class: GuardClass,
    pub(super) state: GuardState,
    delay: u32,
    pub(super) context: SearchContext,
    pub(super) config: GuardConfig,
    pub(super) rng: ChaCha8Rng,
    pub(super) events: Vec<GuardEvent>,
}

impl GuardStateMachine {
    /// Take over `agent` as a guard of the given class
    ///
    /// Sets the agent's skill modifier to `2 * intelligence + strength` and
    /// lets it pick up loot.
    pub fn new(class: GuardClass, config: GuardConfig, agent: &mut GuardAgent) -> Self {
        agent.skill_modifier = 2 * agent.intelligence + agent.strength;
        agent.can_pick_up_loot = true;

        Self {
            class,
            state: GuardState::Idle,
            delay: 0,
            context: SearchContext::new(config.search.start_radius),
            config,
            rng: ChaCha8Rng::seed_from_u64(0),
            events: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn class(&self) -> GuardClass {
        self.class
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn target(&self) -> Option<EntityId> {
        self.context.target
    }

    pub fn attacks(&self) -> u32 {
        self.context.attacks
    }

    pub fn radius(&self) -> f64 {
        self.context.radius
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SearchContext {
        &mut self.context
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one host tick
    pub fn tick(&mut self, agent: &mut GuardAgent, world: &mut dyn GuardWorld) -> TickOutcome {
        if !agent.alive {
            return self.stand_down(agent);
        }

        if self.delay > 0 {
            self.delay -= 1;
            return TickOutcome {
                state: self.state,
                delay: self.delay,
                executed: false,
            };
        }

        update_armor(agent);

        let handler = Self::handler(self.state);
        let transition = handler(self, agent, world);
        self.commit(agent, transition)
    }

    fn handler(state: GuardState) -> Handler {
        match state {
            GuardState::Idle => Self::idle,
            GuardState::StartWorking => Self::start_working,
            GuardState::SearchTarget => Self::search_target,
            GuardState::GetTarget => Self::get_target,
            GuardState::HuntDownTarget => Self::hunt_down_target,
            GuardState::Patrol => Self::patrol,
            GuardState::Restock => Self::restock,
            GuardState::Gathering => Self::gathering,
        }
    }

    fn commit(&mut self, agent: &GuardAgent, transition: Transition) -> TickOutcome {
        let from = self.state;
        if transition.next != from {
            trace!(guard = %agent.id, %from, to = %transition.next, "state change");
            self.events.push(GuardEvent::StateChanged {
                guard: agent.id,
                from,
                to: transition.next,
            });
        }

        self.state = transition.next;
        self.delay = transition.delay;

        TickOutcome {
            state: self.state,
            delay: self.delay,
            executed: true,
        }
    }

    /// A dead guard drops its target and waits in SEARCH_TARGET
    fn stand_down(&mut self, agent: &GuardAgent) -> TickOutcome {
        if let Some(target) = self.context.drop_target() {
            self.events.push(GuardEvent::TargetLost {
                guard: agent.id,
                target,
                reason: LossReason::GuardDown,
            });
        }
        let outcome = self.commit(agent, Transition::to(GuardState::SearchTarget));
        TickOutcome {
            executed: false,
            ..outcome
        }
    }

    fn home_building(&self, agent: &GuardAgent, world: &dyn GuardWorld) -> Option<Building> {
        agent.home.and_then(|id| world.building(id))
    }

    fn base_delay(&self) -> u32 {
        self.config.search.base_delay
    }

    fn idle(&mut self, _agent: &mut GuardAgent, _world: &mut dyn GuardWorld) -> Transition {
        Transition::to(GuardState::StartWorking)
    }

    /// Both specializations start with a restock to pick up their kit
    fn start_working(&mut self, _agent: &mut GuardAgent, _world: &mut dyn GuardWorld) -> Transition {
        Transition::to(GuardState::Restock)
    }

    fn search_target(&mut self, agent: &mut GuardAgent, world: &mut dyn GuardWorld) -> Transition {
        let armed = match self.class {
            GuardClass::Melee => self.melee_arm(agent),
            GuardClass::Ranged => self.ranged_arm(agent),
        };
        if !armed {
            return Transition::after(GuardState::SearchTarget, self.base_delay());
        }

        let home = self.home_building(agent, &*world);
        let vision = max_vision(&self.config, home.as_ref());
        let found = acquisition::search(
            agent,
            &*world,
            self.context.radius,
            self.config.search.height_detection_range,
            &self.context,
        );

        if !found.is_empty() {
            trace!(guard = %agent.id, count = found.len(), radius = self.context.radius, "candidates found");
            self.context.candidates = found.into();
            return Transition::after(GuardState::GetTarget, self.base_delay());
        }

        match next_radius(self.context.radius, self.config.search.radius_increment, vision) {
            Some(radius) => {
                self.context.radius = radius;
                Transition::after(GuardState::SearchTarget, self.base_delay())
            }
            None => {
                self.context.radius = self.config.search.start_radius;
                Transition::after(GuardState::Patrol, self.base_delay())
            }
        }
    }

    fn get_target(&mut self, agent: &mut GuardAgent, world: &mut dyn GuardWorld) -> Transition {
        let Some(candidate) = self.context.candidates.pop_front() else {
            // Everything in range was turned down; look again, wider
            return Transition::to(GuardState::SearchTarget);
        };

        match acquisition::evaluate(agent, &candidate, &*world) {
            Ok(()) => {
                self.context.target = Some(candidate.id);
                self.context.candidates.clear();
                self.context.radius = self.config.search.start_radius;
                world.clear_path(agent);

                debug!(guard = %agent.id, target = %candidate.id, kind = ?candidate.kind, "target acquired");
                self.events.push(GuardEvent::TargetAcquired {
                    guard: agent.id,
                    target: candidate.id,
                    kind: candidate.kind,
                });
                Transition::to(GuardState::HuntDownTarget)
            }
            Err(reason) => {
                trace!(guard = %agent.id, candidate = %candidate.id, ?reason, "candidate rejected");
                self.context.discard(candidate.id);
                self.events.push(GuardEvent::CandidateRejected {
                    guard: agent.id,
                    candidate: candidate.id,
                    reason,
                });
                Transition::after(GuardState::GetTarget, self.base_delay())
            }
        }
    }

    fn hunt_down_target(&mut self, agent: &mut GuardAgent, world: &mut dyn GuardWorld) -> Transition {
        let Some(target_id) = self.context.target else {
            return Transition::to(GuardState::SearchTarget);
        };

        let Some(target) = world.locate(target_id) else {
            return self.lose_target(agent, target_id, LossReason::Gone);
        };
        if !world.is_alive(target_id) {
            return self.lose_target(agent, target_id, LossReason::Dead);
        }
        if !world.can_see(agent, target_id) {
            return self.lose_target(agent, target_id, LossReason::OutOfSight);
        }

        let home = self.home_building(agent, &*world);
        let budget = attack_budget(&self.config, home.as_ref());
        if self.context.attacks >= budget {
            debug!(guard = %agent.id, attacks = self.context.attacks, "attack budget spent");
            return Transition::to(GuardState::Restock);
        }

        if self.class == GuardClass::Ranged && !self.ranged_arm(agent) {
            return self.lose_target(agent, target_id, LossReason::Unarmed);
        }

        let (range, tolerance) = match self.class {
            GuardClass::Melee => (self.config.melee.min_attack_distance, self.config.melee.min_attack_distance),
            GuardClass::Ranged => (max_vision(&self.config, home.as_ref()), self.config.ranged.move_close),
        };

        if agent.distance_to(target.position) > range {
            agent.move_speed = follow_speed(&self.config.pursuit, agent.experience_level);
            world.move_toward_with_path(agent, target.position, tolerance);
            return Transition::to(GuardState::HuntDownTarget);
        }

        let base_reload = match self.class {
            GuardClass::Melee => {
                self.melee_attack(agent, world, &target);
                self.config.melee.base_reload_time
            }
            GuardClass::Ranged => {
                self.ranged_attack(agent, world, &target);
                self.config.ranged.base_reload_time
            }
        };
        self.context.attacks += 1;

        let reload = reload_time(base_reload, agent.experience_level);
        if self.context.attacks >= budget {
            Transition::after(GuardState::Restock, reload)
        } else {
            Transition::after(GuardState::HuntDownTarget, reload)
        }
    }

    fn lose_target(&mut self, agent: &mut GuardAgent, target: EntityId, reason: LossReason) -> Transition {
        self.context.drop_target();
        agent.move_speed = self.config.patrol.base_move_speed;

        debug!(guard = %agent.id, %target, ?reason, "target lost");
        self.events.push(GuardEvent::TargetLost {
            guard: agent.id,
            target,
            reason,
        });

        match reason {
            LossReason::Unarmed => Transition::to(GuardState::Gathering),
            _ => Transition::to(GuardState::SearchTarget),
        }
    }

    fn patrol(&mut self, agent: &mut GuardAgent, world: &mut dyn GuardWorld) -> Transition {
        agent.move_speed = self.config.patrol.base_move_speed;
        self.context.end_episode(self.config.search.start_radius);

        let waypoint = match self.context.waypoint {
            Some(waypoint) => waypoint,
            None => {
                let waypoint = next_waypoint(agent, &*world, &mut self.rng);
                trace!(guard = %agent.id, x = waypoint.x, z = waypoint.z, "new patrol waypoint");
                self.context.waypoint = Some(waypoint);
                waypoint
            }
        };

        if world.move_toward_with_path(agent, waypoint, self.config.patrol.path_close) {
            self.context.waypoint = None;
        }

        Transition::to(GuardState::SearchTarget)
    }

    fn restock(&mut self, agent: &mut GuardAgent, world: &mut dyn GuardWorld) -> Transition {
        let Some(home) = self.home_building(agent, &*world) else {
            self.finish_restock(agent, RestockReport::default());
            return Transition::to(GuardState::SearchTarget);
        };

        agent.move_speed = self.config.patrol.base_move_speed;
        if !world.move_toward_with_path(agent, home.location, self.config.patrol.path_close) {
            self.context.restock_wait += 1;
            if self.context.restock_wait < self.config.restock.restock_patience {
                return Transition::to(GuardState::Restock);
            }

            warn!(guard = %agent.id, home = %home.id, waited = self.context.restock_wait, "home unreachable, restock abandoned");
            self.events.push(GuardEvent::RestockAbandoned {
                guard: agent.id,
                home: home.id,
            });
            self.reset_after_restock();
            return Transition::to(GuardState::SearchTarget);
        }

        let weapon = self.class.required_weapon();
        let report = match world.storage_mut(home.id) {
            Some(storage) => withdraw_supplies(&mut agent.inventory, storage, weapon),
            None => RestockReport::default(),
        };
        update_armor(agent);
        equipment::wield_first(agent, weapon);

        self.finish_restock(agent, report);
        Transition::to(GuardState::SearchTarget)
    }

    fn finish_restock(&mut self, agent: &GuardAgent, report: RestockReport) {
        debug!(
            guard = %agent.id,
            armor = report.armor_taken,
            weapon = report.weapon_taken,
            "restocked"
        );
        self.events.push(GuardEvent::Restocked {
            guard: agent.id,
            armor_taken: report.armor_taken,
            weapon_taken: report.weapon_taken,
        });
        self.reset_after_restock();
    }

    fn reset_after_restock(&mut self) {
        self.context.attacks = 0;
        self.context.restock_wait = 0;
        self.context.end_episode(self.config.search.start_radius);
    }

    /// Out of ammunition; resupply at home
    fn gathering(&mut self, agent: &mut GuardAgent, _world: &mut dyn GuardWorld) -> Transition {
        trace!(guard = %agent.id, "heading home to resupply");
        Transition::to(GuardState::Restock)
    }

    pub(super) fn request_equipment(&mut self, agent: &GuardAgent) {
        if self.context.equipment_requested {
            return;
        }
        self.context.equipment_requested = true;
        debug!(guard = %agent.id, class = ?self.class, "no usable weapon, requesting one");
        self.events.push(GuardEvent::EquipmentRequested { guard: agent.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ColonyId, Position};
    use crate::entity::{EntityKind, Inventory};
    use crate::world::{BuildingKind, ColonyRegistry, SandboxWorld};

    fn melee_guard() -> (GuardAgent, GuardStateMachine) {
        let mut agent = GuardAgent::new("Nils", Position::ZERO).with_stats(3, 4);
        let machine = GuardStateMachine::new(GuardClass::Melee, GuardConfig::default(), &mut agent);
        (agent, machine)
    }

    /// Tick until a handler actually runs
    fn step(machine: &mut GuardStateMachine, agent: &mut GuardAgent, world: &mut SandboxWorld) -> TickOutcome {
        loop {
            let outcome = machine.tick(agent, world);
            if outcome.executed {
                return outcome;
            }
        }
    }

    #[test]
    fn test_construction_sets_skill_modifier() {
        let (agent, machine) = melee_guard();
        assert_eq!(agent.skill_modifier, 10);
        assert!(agent.can_pick_up_loot);
        assert_eq!(machine.state(), GuardState::Idle);
    }

    #[test]
    fn test_startup_runs_restock_first() {
        let (mut agent, mut machine) = melee_guard();
        let mut world = SandboxWorld::new();

        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::StartWorking);
        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::Restock);
        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::SearchTarget);
    }

    #[test]
    fn test_every_state_has_a_successor() {
        let mut world = SandboxWorld::new();
        for state in GuardState::ALL {
            let (mut agent, mut machine) = melee_guard();
            machine.state = state;
            let outcome = machine.tick(&mut agent, &mut world);
            assert!(outcome.executed, "{state} did not run");
        }
    }

    #[test]
    fn test_delay_suppresses_ticks() {
        let (mut agent, mut machine) = melee_guard();
        let mut world = SandboxWorld::new();
        machine.state = GuardState::SearchTarget;

        let first = machine.tick(&mut agent, &mut world);
        assert!(first.executed);
        assert_eq!(first.delay, 1);

        let skipped = machine.tick(&mut agent, &mut world);
        assert!(!skipped.executed);
        assert_eq!(machine.radius(), 10.0);

        assert!(machine.tick(&mut agent, &mut world).executed);
        assert_eq!(machine.radius(), 15.0);
    }

    #[test]
    fn test_dead_guard_drops_target() {
        let (mut agent, mut machine) = melee_guard();
        let mut world = SandboxWorld::new();
        let target = world.spawn(EntityKind::Hostile, Position::X);
        machine.state = GuardState::HuntDownTarget;
        machine.context.target = Some(target);
        agent.alive = false;

        let outcome = machine.tick(&mut agent, &mut world);

        assert_eq!(outcome.state, GuardState::SearchTarget);
        assert!(machine.target().is_none());
        assert!(machine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GuardEvent::TargetLost { reason: LossReason::GuardDown, .. })));
    }

    #[test]
    fn test_ranged_without_bow_waits_in_search() {
        let mut agent = GuardAgent::new("Olga", Position::ZERO);
        let mut machine = GuardStateMachine::new(GuardClass::Ranged, GuardConfig::default(), &mut agent);
        let mut world = SandboxWorld::new();
        world.spawn(EntityKind::Hostile, Position::X);
        machine.state = GuardState::SearchTarget;

        for _ in 0..3 {
            assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::SearchTarget);
        }
        let requests = machine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GuardEvent::EquipmentRequested { .. }))
            .count();
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_restock_waits_then_abandons() {
        let mut world = SandboxWorld::new();
        let colony = ColonyId(1);
        let home = world.add_building(colony, BuildingKind::GuardTower, Position::new(50.0, 0.0, 0.0), 0);
        world.paths_blocked = true;

        let mut agent = GuardAgent::new("Pia", Position::ZERO).stationed_at(colony, home);
        let mut config = GuardConfig::default();
        config.restock.restock_patience = 3;
        let mut machine = GuardStateMachine::new(GuardClass::Melee, config, &mut agent);
        machine.state = GuardState::Restock;
        machine.context.attacks = 50;

        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::Restock);
        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::Restock);
        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::SearchTarget);
        assert_eq!(machine.attacks(), 0);
        assert!(machine
            .drain_events()
            .iter()
            .any(|e| matches!(e, GuardEvent::RestockAbandoned { .. })));
    }

    #[test]
    fn test_restock_wields_withdrawn_weapon() {
        let mut world = SandboxWorld::new();
        let colony = ColonyId(1);
        let home = world.add_building(colony, BuildingKind::GuardTower, Position::ZERO, 1);
        if let Some(storage) = world.storage_mut(home) {
            *storage = Inventory::with_items(4, [ItemStack::bow(100)]);
        }

        let mut agent = GuardAgent::new("Quin", Position::ZERO).stationed_at(colony, home);
        let mut machine = GuardStateMachine::new(GuardClass::Ranged, GuardConfig::default(), &mut agent);
        machine.state = GuardState::Restock;

        assert_eq!(step(&mut machine, &mut agent, &mut world).state, GuardState::SearchTarget);
        assert!(agent.is_wielding(ItemStack::is_launcher));
    }
}
