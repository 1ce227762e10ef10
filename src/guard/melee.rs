//! Melee specialization: fights with any weapon-like item, or bare-handed

use rand::Rng;
use tracing::debug;

use crate::combat::constants::{BASIC_VOLUME, SOUND_MELEE_SWEEP};
use crate::combat::{random_pitch, resolve_melee_strike};
use crate::entity::{GuardAgent, ItemStack};
use crate::guard::equipment::wield_first;
use crate::guard::event::GuardEvent;
use crate::guard::machine::GuardStateMachine;
use crate::world::{GuardWorld, TrackedEntity};

impl GuardStateMachine {
    /// Wield a weapon if there is one; melee guards fight either way
    pub(super) fn melee_arm(&mut self, agent: &mut GuardAgent) -> bool {
        if wield_first(agent, ItemStack::serves_as_weapon) {
            self.context.equipment_requested = false;
        } else {
            self.request_equipment(agent);
        }
        true
    }

    pub(super) fn melee_attack(
        &mut self,
        agent: &mut GuardAgent,
        world: &mut dyn GuardWorld,
        target: &TrackedEntity,
    ) {
        let strike = resolve_melee_strike(&self.config.melee, agent.held_item(), target.creature);

        world.apply_damage(target.id, strike.damage, agent.id);
        world.set_revenge_target(target.id, agent.id);
        if let Some(seconds) = strike.ignite_seconds {
            world.ignite(target.id, seconds);
        }

        agent.add_experience(strike.experience);
        let pitch = random_pitch(self.rng.gen::<f64>());
        world.play_sound(agent.position, SOUND_MELEE_SWEEP, BASIC_VOLUME, pitch as f32);
        agent.damage_item_in_hand(strike.weapon_wear);

        debug!(guard = %agent.id, target = %target.id, damage = strike.damage, "melee hit");
        self.events.push(GuardEvent::MeleeHit {
            guard: agent.id,
            target: target.id,
            damage: strike.damage,
        });
    }
}
