//! Combat constants - fixed values of the combat formulas
//!
//! Per-guard tunables (reload times, reach, experience) live in
//! `GuardConfig`; these are the formula shapes themselves.

// Ranged damage formula
pub const BASE_DAMAGE_MULTIPLIER: f64 = 2.0;
pub const RANDOM_DAMAGE_MULTIPLIER: f64 = 0.25;
pub const DIFFICULTY_DAMAGE_INCREASE: f64 = 0.11;
pub const POWER_DAMAGE_PER_LEVEL: f64 = 0.5;
pub const BASE_POWER_DAMAGE: f64 = 0.5;

// Melee enchantments
pub const SHARPNESS_DAMAGE_PER_LEVEL: f64 = 1.25;
pub const TYPED_ENCHANTMENT_DAMAGE_PER_LEVEL: f64 = 2.5;

// Ballistics
/// Upward aim per unit of horizontal distance to offset arrow drop
pub const ARC_COMPENSATION: f64 = 0.2;
/// Arrows aim at this fraction of the target's height
pub const AIM_HEIGHT_FRACTION: f64 = 1.0 / 3.0;
/// Arrows leave slightly below the shooter's eyes
pub const ARROW_SPAWN_DROP: f64 = 0.1;

// Sound
pub const BASIC_VOLUME: f32 = 1.0;
pub const BASE_PITCH: f64 = 0.8;
pub const PITCH_MULTIPLIER: f64 = 0.4;
pub const PITCH_DIVIDER: f64 = 1.0;
pub const SOUND_MELEE_SWEEP: &str = "entity.player.attack.sweep";
pub const SOUND_BOW_SHOT: &str = "random.bow";

/// Durability a melee weapon loses per swing
pub const WEAPON_WEAR_PER_HIT: u32 = 1;
