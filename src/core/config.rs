//! Guard tunables with documented defaults
//!
//! Every number the guard AI uses lives here. A config file only needs to
//! name the values it overrides; missing sections fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GuardError, Result};

/// Target search tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Radius the guard starts searching in (world units)
    pub start_radius: f64,
    /// Amount the radius grows after each empty search
    ///
    /// Equal to the start radius by default, so radii step 5, 10, 15, 20.
    pub radius_increment: f64,
    /// Base max vision before the home building's bonus
    pub max_attack_distance: f64,
    /// Vertical half-extent of the search volume
    pub height_detection_range: f64,
    /// Delay (ticks) after every search and every rejected candidate
    pub base_delay: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_radius: 5.0,
            radius_increment: 5.0,
            max_attack_distance: 20.0,
            height_detection_range: 10.0,
            base_delay: 1,
        }
    }
}

/// Restock tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockConfig {
    /// Attacks before a restock, before the home building's level is added
    pub max_attacks: u32,
    /// Ticks of failed pathing home before a restock is abandoned
    pub restock_patience: u32,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            max_attacks: 50,
            restock_patience: 600,
        }
    }
}

/// Patrol tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Arrival tolerance around a waypoint
    pub path_close: f64,
    /// Walking speed while patrolling or idle
    pub base_move_speed: f64,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            path_close: 3.0,
            base_move_speed: 1.0,
        }
    }
}

/// Pursuit speed tunables shared by both specializations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    pub base_follow_speed: f64,
    /// Extra speed per experience level
    pub follow_speed_per_level: f64,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            base_follow_speed: 1.0,
            follow_speed_per_level: 0.25,
        }
    }
}

/// Melee guard tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Cooldown at level 0; divided by (level + 1)
    pub base_reload_time: u32,
    /// Reach of a swing
    pub min_attack_distance: f64,
    /// Damage of an unarmed swing
    pub damage_per_attack: f64,
    /// Seconds of fire per fire aspect level
    pub fire_aspect_multiplier: u32,
    pub xp_per_hit: f64,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            base_reload_time: 30,
            min_attack_distance: 2.0,
            damage_per_attack: 0.5,
            fire_aspect_multiplier: 4,
            xp_per_hit: 0.2,
        }
    }
}

/// Ranged guard tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedConfig {
    /// Cooldown at level 0; divided by (level + 1)
    pub base_reload_time: u32,
    /// Base arrow damage before the x2 multiplier
    pub damage_per_attack: f64,
    /// Tolerance when closing in on an out-of-range target
    pub move_close: f64,
    pub xp_per_arrow: f64,
    /// Divided by (level + 1) to get the arrow's inaccuracy
    pub hit_chance_divider: f64,
    pub arrow_speed: f64,
    /// Burn duration handed to flaming arrows
    pub fire_ticks: u32,
}

impl Default for RangedConfig {
    fn default() -> Self {
        Self {
            base_reload_time: 60,
            damage_per_attack: 2.0,
            move_close: 3.0,
            xp_per_arrow: 0.2,
            hit_chance_divider: 15.0,
            arrow_speed: 1.6,
            fire_ticks: 100,
        }
    }
}

/// Complete guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub restock: RestockConfig,
    #[serde(default)]
    pub patrol: PatrolConfig,
    #[serde(default)]
    pub pursuit: PursuitConfig,
    #[serde(default)]
    pub melee: MeleeConfig,
    #[serde(default)]
    pub ranged: RangedConfig,
    /// Bonus vision per level of the guard's home building
    #[serde(default = "default_vision_bonus")]
    pub vision_bonus_per_level: f64,
}

fn default_vision_bonus() -> f64 {
    5.0
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            restock: RestockConfig::default(),
            patrol: PatrolConfig::default(),
            pursuit: PursuitConfig::default(),
            melee: MeleeConfig::default(),
            ranged: RangedConfig::default(),
            vision_bonus_per_level: default_vision_bonus(),
        }
    }
}

impl GuardConfig {
    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GuardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        let numbers = [
            ("search.start_radius", search.start_radius),
            ("search.radius_increment", search.radius_increment),
            ("search.max_attack_distance", search.max_attack_distance),
            ("search.height_detection_range", search.height_detection_range),
            ("patrol.path_close", self.patrol.path_close),
            ("patrol.base_move_speed", self.patrol.base_move_speed),
            ("pursuit.base_follow_speed", self.pursuit.base_follow_speed),
            ("pursuit.follow_speed_per_level", self.pursuit.follow_speed_per_level),
            ("melee.min_attack_distance", self.melee.min_attack_distance),
            ("melee.damage_per_attack", self.melee.damage_per_attack),
            ("melee.xp_per_hit", self.melee.xp_per_hit),
            ("ranged.damage_per_attack", self.ranged.damage_per_attack),
            ("ranged.move_close", self.ranged.move_close),
            ("ranged.xp_per_arrow", self.ranged.xp_per_arrow),
            ("ranged.hit_chance_divider", self.ranged.hit_chance_divider),
            ("ranged.arrow_speed", self.ranged.arrow_speed),
            ("vision_bonus_per_level", self.vision_bonus_per_level),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GuardError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
        }

        if search.start_radius <= 0.0 || search.radius_increment <= 0.0 {
            return Err(GuardError::InvalidConfig(format!(
                "search radii must be positive (start {}, increment {})",
                search.start_radius, search.radius_increment
            )));
        }

        if search.start_radius > search.max_attack_distance {
            return Err(GuardError::InvalidConfig(format!(
                "start_radius ({}) exceeds max_attack_distance ({})",
                search.start_radius, search.max_attack_distance
            )));
        }

        if search.height_detection_range <= 0.0 {
            return Err(GuardError::InvalidConfig(format!(
                "height_detection_range ({}) must be positive",
                search.height_detection_range
            )));
        }

        if self.patrol.path_close < 0.0 || self.ranged.move_close < 0.0 || self.melee.min_attack_distance < 0.0 {
            return Err(GuardError::InvalidConfig(
                "arrival and attack distances must not be negative".into(),
            ));
        }

        if self.restock.max_attacks == 0 {
            return Err(GuardError::InvalidConfig(
                "max_attacks must allow at least one attack between restocks".into(),
            ));
        }

        if self.melee.base_reload_time == 0 || self.ranged.base_reload_time == 0 {
            return Err(GuardError::InvalidConfig(
                "reload times must be at least one tick".into(),
            ));
        }

        if self.vision_bonus_per_level < 0.0 {
            return Err(GuardError::InvalidConfig(format!(
                "vision_bonus_per_level ({}) must not be negative",
                self.vision_bonus_per_level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GuardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GuardConfig::from_toml_str(
            r#"
            [search]
            start_radius = 4.0

            [ranged]
            base_reload_time = 40
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.search.start_radius, 4.0);
        assert_eq!(config.search.radius_increment, 5.0);
        assert_eq!(config.ranged.base_reload_time, 40);
        assert_eq!(config.melee.base_reload_time, 30);
        assert_eq!(config.vision_bonus_per_level, 5.0);
    }

    #[test]
    fn test_start_radius_beyond_max_rejected() {
        let result = GuardConfig::from_toml_str(
            r#"
            [search]
            start_radius = 30.0
            "#,
        );
        assert!(matches!(result, Err(GuardError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_reload_rejected() {
        let mut config = GuardConfig::default();
        config.melee.base_reload_time = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut config = GuardConfig::default();
        config.search.start_radius = f64::NAN;
        assert!(matches!(config.validate(), Err(GuardError::InvalidConfig(_))));

        let mut config = GuardConfig::default();
        config.ranged.arrow_speed = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_ranges_rejected() {
        let mut config = GuardConfig::default();
        config.search.height_detection_range = -1.0;
        assert!(config.validate().is_err());

        let mut config = GuardConfig::default();
        config.patrol.path_close = -0.5;
        assert!(config.validate().is_err());

        let result = GuardConfig::from_toml_str(
            r#"
            [restock]
            max_attacks = 0
            "#,
        );
        assert!(matches!(result, Err(GuardError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = GuardConfig::from_toml_str("[search\nstart_radius = 1");
        assert!(matches!(result, Err(GuardError::ConfigParse(_))));
    }

    #[test]
    fn test_sample_config_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/guards/default.toml");
        let config = GuardConfig::load(&path).expect("sample config should load");
        assert_eq!(config.restock.max_attacks, 50);
    }
}
