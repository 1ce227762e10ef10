//! Melee strike resolution
//!
//! Pure: works out what a swing does. The guard state machine applies the
//! result through the world collaborators.

use crate::combat::constants::WEAPON_WEAR_PER_HIT;
use crate::combat::enchantment::{fire_aspect_seconds, modifier_for_creature};
use crate::core::config::MeleeConfig;
use crate::entity::{CreatureAttribute, ItemStack};

/// Outcome of one swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeStrike {
    pub damage: f64,
    /// Seconds the target burns for, if the weapon ignites
    pub ignite_seconds: Option<u32>,
    pub experience: f64,
    /// Durability the wielded weapon loses
    pub weapon_wear: u32,
}

/// Swing damage: base + sword damage + enchantment vs creature type
pub fn melee_damage(base: f64, held: Option<&ItemStack>, creature: CreatureAttribute) -> f64 {
    match held {
        Some(stack) => {
            base + stack.sword_damage() + modifier_for_creature(&stack.enchantments, creature)
        }
        None => base,
    }
}

pub fn resolve_melee_strike(
    config: &MeleeConfig,
    held: Option<&ItemStack>,
    creature: CreatureAttribute,
) -> MeleeStrike {
    MeleeStrike {
        damage: melee_damage(config.damage_per_attack, held, creature),
        ignite_seconds: held
            .and_then(|stack| fire_aspect_seconds(&stack.enchantments, config.fire_aspect_multiplier)),
        experience: config.xp_per_hit,
        weapon_wear: if held.is_some() { WEAPON_WEAR_PER_HIT } else { 0 },
    }
}
