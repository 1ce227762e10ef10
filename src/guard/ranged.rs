//! Ranged specialization: shoots arrows and cannot fight without a bow

use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::combat::constants::{ARROW_SPAWN_DROP, BASIC_VOLUME, SOUND_BOW_SHOT};
use crate::combat::{arrow_hit_chance, build_projectile, random_pitch, should_ignite, ShotInputs};
use crate::core::types::Position;
use crate::entity::{GuardAgent, ItemStack};
use crate::guard::equipment::wield_first;
use crate::guard::event::GuardEvent;
use crate::guard::machine::GuardStateMachine;
use crate::world::{GuardWorld, TrackedEntity};

impl GuardStateMachine {
    /// Wield a bow; false (and a one-off request) if the guard has none
    pub(super) fn ranged_arm(&mut self, agent: &mut GuardAgent) -> bool {
        if wield_first(agent, ItemStack::is_launcher) {
            self.context.equipment_requested = false;
            true
        } else {
            self.request_equipment(agent);
            false
        }
    }

    pub(super) fn ranged_attack(
        &mut self,
        agent: &mut GuardAgent,
        world: &mut dyn GuardWorld,
        target: &TrackedEntity,
    ) {
        let enchantments = agent.held_item().map(|s| s.enchantments).unwrap_or_default();
        let difficulty = world.difficulty();
        let noise: f64 = self.rng.sample(StandardNormal);
        let coin = self.rng.gen_bool(0.5);
        let config = &self.config.ranged;

        let inputs = ShotInputs {
            base_damage: config.damage_per_attack,
            difficulty,
            noise,
            power: enchantments.power,
            punch: enchantments.punch,
            ignite: should_ignite(agent.burning, difficulty, coin, enchantments.flame),
            speed: config.arrow_speed,
            inaccuracy: arrow_hit_chance(config.hit_chance_divider, agent.experience_level),
            fire_ticks: config.fire_ticks,
        };
        let origin = agent.eye_position() - Position::new(0.0, ARROW_SPAWN_DROP, 0.0);
        let arrow = build_projectile(agent.id, origin, target.position, target.height, &inputs);

        agent.add_experience(config.xp_per_arrow);
        let pitch = random_pitch(self.rng.gen::<f64>());
        world.play_sound(agent.position, SOUND_BOW_SHOT, BASIC_VOLUME, pitch as f32);
        world.spawn_projectile(arrow);

        debug!(guard = %agent.id, target = %target.id, damage = arrow.damage, "arrow loosed");
        self.events.push(GuardEvent::ArrowLoosed {
            guard: agent.id,
            target: target.id,
            damage: arrow.damage,
        });
    }
}
