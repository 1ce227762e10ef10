pub mod cadence;
pub mod constants;
pub mod enchantment;
pub mod melee;
pub mod ranged;

pub use cadence::{follow_speed, random_pitch, reload_time};
pub use enchantment::{fire_aspect_seconds, modifier_for_creature};
pub use melee::{melee_damage, resolve_melee_strike, MeleeStrike};
pub use ranged::{
    arrow_hit_chance, build_projectile, projectile_heading, ranged_damage, should_ignite,
    Projectile, ShotInputs,
};
