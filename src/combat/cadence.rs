//! Attack cadence and movement pacing scaled by experience level

use crate::combat::constants::{BASE_PITCH, PITCH_DIVIDER, PITCH_MULTIPLIER};
use crate::core::config::PursuitConfig;

/// Ticks between attacks; higher levels attack more often
pub fn reload_time(base_reload: u32, level: u32) -> u32 {
    base_reload / level.saturating_add(1)
}

/// Walking speed while chasing a target
pub fn follow_speed(config: &PursuitConfig, level: u32) -> f64 {
    config.base_follow_speed + config.follow_speed_per_level * level as f64
}

/// Sound pitch for a uniform sample `unit` in [0, 1)
pub fn random_pitch(unit: f64) -> f64 {
    PITCH_DIVIDER / (unit * PITCH_MULTIPLIER + BASE_PITCH)
}
