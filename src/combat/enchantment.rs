//! Enchantment modifiers

use crate::combat::constants::{SHARPNESS_DAMAGE_PER_LEVEL, TYPED_ENCHANTMENT_DAMAGE_PER_LEVEL};
use crate::entity::{CreatureAttribute, Enchantments};

/// Extra melee damage a weapon's enchantments deal against a creature type
pub fn modifier_for_creature(enchantments: &Enchantments, creature: CreatureAttribute) -> f64 {
    let mut bonus = enchantments.sharpness as f64 * SHARPNESS_DAMAGE_PER_LEVEL;

    match creature {
        CreatureAttribute::Undead => {
            bonus += enchantments.smite as f64 * TYPED_ENCHANTMENT_DAMAGE_PER_LEVEL;
        }
        CreatureAttribute::Arthropod => {
            bonus += enchantments.bane_of_arthropods as f64 * TYPED_ENCHANTMENT_DAMAGE_PER_LEVEL;
        }
        CreatureAttribute::Normal => {}
    }

    bonus
}

/// Seconds a fire-aspect weapon sets its target alight for, if at all
pub fn fire_aspect_seconds(enchantments: &Enchantments, multiplier: u32) -> Option<u32> {
    match enchantments.fire_aspect {
        0 => None,
        level => Some(level as u32 * multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharpness_applies_to_everything() {
        let ench = Enchantments { sharpness: 2, ..Default::default() };
        assert_eq!(modifier_for_creature(&ench, CreatureAttribute::Normal), 2.5);
        assert_eq!(modifier_for_creature(&ench, CreatureAttribute::Undead), 2.5);
    }

    #[test]
    fn test_smite_only_against_undead() {
        let ench = Enchantments { smite: 1, ..Default::default() };
        assert_eq!(modifier_for_creature(&ench, CreatureAttribute::Undead), 2.5);
        assert_eq!(modifier_for_creature(&ench, CreatureAttribute::Arthropod), 0.0);
    }

    #[test]
    fn test_bane_only_against_arthropods() {
        let ench = Enchantments { bane_of_arthropods: 3, ..Default::default() };
        assert_eq!(modifier_for_creature(&ench, CreatureAttribute::Arthropod), 7.5);
        assert_eq!(modifier_for_creature(&ench, CreatureAttribute::Normal), 0.0);
    }

    #[test]
    fn test_fire_aspect_duration() {
        let ench = Enchantments { fire_aspect: 2, ..Default::default() };
        assert_eq!(fire_aspect_seconds(&ench, 4), Some(8));
        assert_eq!(fire_aspect_seconds(&Enchantments::none(), 4), None);
    }
}
