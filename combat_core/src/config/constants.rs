//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::Validation("GameConstants already initialized".to_string()))
}

/// Initialize the global game constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::Validation("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Installs the defaults on first use if nothing was initialized.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    GAME_CONSTANTS.get().is_some()
}

/// Ensure constants are initialized with defaults (idempotent, useful for tests)
pub fn ensure_constants_initialized() {
    GAME_CONSTANTS.get_or_init(GameConstants::default);
}

/// Tunable rule constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub stats: StatConstants,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub movement: MovementConstants,
    #[serde(default)]
    pub events: EventConstants,
    #[serde(default)]
    pub ai: AiConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;
        let constants: GameConstants = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;
        constants.validate()?;
        Ok(constants)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let divisors = [
            self.stats.weapon_strength_divisor,
            self.stats.weapon_intellect_divisor,
            self.stats.unarmed_strength_divisor,
            self.stats.unarmed_intellect_divisor,
            self.combat.rage_taken_divisor,
        ];
        if divisors.iter().any(|&d| d <= 0) {
            return Err(ConfigError::Validation(
                "scaling divisors must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.combat.shield_wall_multiplier) {
            return Err(ConfigError::Validation(
                "shield_wall_multiplier must be within [0, 1]".to_string(),
            ));
        }
        if !(self.ai.critical_hp_pct <= self.ai.heal_hp_pct && self.ai.heal_hp_pct <= 1.0) {
            return Err(ConfigError::Validation(
                "ai.critical_hp_pct must not exceed ai.heal_hp_pct (max 1)".to_string(),
            ));
        }
        if self.ai.observe_duration <= 0.0 {
            return Err(ConfigError::Validation(
                "ai.observe_duration must be positive".to_string(),
            ));
        }
        if self.events.combat_log_lines == 0 {
            return Err(ConfigError::Validation(
                "combat_log_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Attribute to combat-stat conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatConstants {
    /// Max hp before stamina
    #[serde(default = "default_base_max_hp")]
    pub base_max_hp: f64,
    #[serde(default = "default_hp_per_stamina")]
    pub hp_per_stamina: f64,
    #[serde(default = "default_mana_per_intellect")]
    pub mana_per_intellect: f64,
    /// Strength per point of weapon damage for melee classes
    #[serde(default = "default_weapon_strength_divisor")]
    pub weapon_strength_divisor: i32,
    /// Intellect per point of weapon damage for casters
    #[serde(default = "default_weapon_intellect_divisor")]
    pub weapon_intellect_divisor: i32,
    #[serde(default = "default_unarmed_strength_divisor")]
    pub unarmed_strength_divisor: i32,
    #[serde(default = "default_unarmed_intellect_divisor")]
    pub unarmed_intellect_divisor: i32,
}

impl Default for StatConstants {
    fn default() -> Self {
        StatConstants {
            base_max_hp: 100.0,
            hp_per_stamina: 10.0,
            mana_per_intellect: 15.0,
            weapon_strength_divisor: 2,
            weapon_intellect_divisor: 4,
            unarmed_strength_divisor: 3,
            unarmed_intellect_divisor: 5,
        }
    }
}

fn default_base_max_hp() -> f64 {
    100.0
}
fn default_hp_per_stamina() -> f64 {
    10.0
}
fn default_mana_per_intellect() -> f64 {
    15.0
}
fn default_weapon_strength_divisor() -> i32 {
    2
}
fn default_weapon_intellect_divisor() -> i32 {
    4
}
fn default_unarmed_strength_divisor() -> i32 {
    3
}
fn default_unarmed_intellect_divisor() -> i32 {
    5
}

/// Damage, mitigation and resource generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Rage gained by the attacker per landed hit
    #[serde(default = "default_rage_per_hit")]
    pub rage_per_hit: f64,
    /// Rage gained by the defender is damage / this
    #[serde(default = "default_rage_taken_divisor")]
    pub rage_taken_divisor: i32,
    /// Damage multiplier while Shield Wall is up
    #[serde(default = "default_shield_wall_multiplier")]
    pub shield_wall_multiplier: f64,
    /// Minimum seconds between repeated rejection messages per unit and skill
    #[serde(default = "default_feedback_interval")]
    pub feedback_interval: f64,
    /// A projectile lands once this close to its target's center
    #[serde(default = "default_arrival_radius")]
    pub projectile_arrival_radius: f64,
    /// Distance at which the leader counts as engaged with its target
    #[serde(default = "default_aggro_range")]
    pub aggro_range: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            rage_per_hit: 15.0,
            rage_taken_divisor: 5,
            shield_wall_multiplier: 0.25,
            feedback_interval: 0.5,
            projectile_arrival_radius: 10.0,
            aggro_range: 300.0,
        }
    }
}

fn default_rage_per_hit() -> f64 {
    15.0
}
fn default_rage_taken_divisor() -> i32 {
    5
}
fn default_shield_wall_multiplier() -> f64 {
    0.25
}
fn default_feedback_interval() -> f64 {
    0.5
}
fn default_arrival_radius() -> f64 {
    10.0
}
fn default_aggro_range() -> f64 {
    300.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConstants {
    /// Charge stops this far from the target's center
    #[serde(default = "default_charge_stop_distance")]
    pub charge_stop_distance: f64,
    /// Debounce for player target cycling, in seconds
    #[serde(default = "default_tab_debounce")]
    pub tab_debounce: f64,
    /// How far inside the follow distance a follower may drift before backing off
    #[serde(default = "default_follow_slack")]
    pub follow_slack: f64,
}

impl Default for MovementConstants {
    fn default() -> Self {
        MovementConstants {
            charge_stop_distance: 40.0,
            tab_debounce: 0.2,
            follow_slack: 30.0,
        }
    }
}

fn default_charge_stop_distance() -> f64 {
    40.0
}
fn default_tab_debounce() -> f64 {
    0.2
}
fn default_follow_slack() -> f64 {
    30.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConstants {
    /// Floating text lifetime in seconds
    #[serde(default = "default_text_ttl")]
    pub floating_text_ttl: f64,
    /// Combat log lines kept
    #[serde(default = "default_log_lines")]
    pub combat_log_lines: usize,
}

impl Default for EventConstants {
    fn default() -> Self {
        EventConstants {
            floating_text_ttl: 1.0,
            combat_log_lines: 8,
        }
    }
}

fn default_text_ttl() -> f64 {
    1.0
}
fn default_log_lines() -> usize {
    8
}

/// Thresholds for the party AI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConstants {
    /// Healers treat anyone below this hp fraction as an emergency
    #[serde(default = "default_critical_hp_pct")]
    pub critical_hp_pct: f64,
    /// Below this hp fraction a unit counts as needing a heal
    #[serde(default = "default_heal_hp_pct")]
    pub heal_hp_pct: f64,
    /// Warriors raise Shield Wall below this hp fraction
    #[serde(default = "default_shield_wall_hp_pct")]
    pub shield_wall_hp_pct: f64,
    /// Party members that must need a heal before a healer novas
    #[serde(default = "default_nova_min_patients")]
    pub nova_min_patients: usize,
    /// Rogue stand-off behind its target
    #[serde(default = "default_backstab_distance")]
    pub backstab_distance: f64,
    /// Smallest angle off the target's facing that counts as behind, in degrees
    #[serde(default = "default_behind_arc")]
    pub behind_arc_degrees: f64,
    /// Extra distance past melee range before a rogue sprints
    #[serde(default = "default_sprint_margin")]
    pub sprint_margin: f64,
    /// Close enough to a movement goal to stop
    #[serde(default = "default_arrival_tolerance")]
    pub arrival_tolerance: f64,
    /// Seconds a warrior looks for enemies before idling again
    #[serde(default = "default_observe_duration")]
    pub observe_duration: f64,
}

impl Default for AiConstants {
    fn default() -> Self {
        AiConstants {
            critical_hp_pct: 0.5,
            heal_hp_pct: 0.7,
            shield_wall_hp_pct: 0.3,
            nova_min_patients: 2,
            backstab_distance: 60.0,
            behind_arc_degrees: 120.0,
            sprint_margin: 50.0,
            arrival_tolerance: 5.0,
            observe_duration: 1.5,
        }
    }
}

fn default_critical_hp_pct() -> f64 {
    0.5
}
fn default_heal_hp_pct() -> f64 {
    0.7
}
fn default_shield_wall_hp_pct() -> f64 {
    0.3
}
fn default_nova_min_patients() -> usize {
    2
}
fn default_backstab_distance() -> f64 {
    60.0
}
fn default_behind_arc() -> f64 {
    120.0
}
fn default_sprint_margin() -> f64 {
    50.0
}
fn default_arrival_tolerance() -> f64 {
    5.0
}
fn default_observe_duration() -> f64 {
    1.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.stats.hp_per_stamina - 10.0).abs() < f64::EPSILON);
        assert!((constants.stats.mana_per_intellect - 15.0).abs() < f64::EPSILON);
        assert!((constants.combat.shield_wall_multiplier - 0.25).abs() < f64::EPSILON);
        assert_eq!(constants.events.combat_log_lines, 8);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[combat]
rage_per_hit = 20

[events]
combat_log_lines = 12
"#;

        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert!((constants.combat.rage_per_hit - 20.0).abs() < f64::EPSILON);
        assert_eq!(constants.combat.rage_taken_divisor, 5);
        assert_eq!(constants.events.combat_log_lines, 12);
        assert!((constants.stats.base_max_hp - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_rejects_zero_divisor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[stats]\nweapon_strength_divisor = 0\n").unwrap();

        let result = GameConstants::load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_inverted_heal_thresholds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[ai]\ncritical_hp_pct = 0.9\nheal_hp_pct = 0.6\n").unwrap();

        let result = GameConstants::load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_constants_fall_back_to_defaults() {
        ensure_constants_initialized();
        assert!(constants_initialized());
        assert!(constants().stats.base_max_hp > 0.0);
    }
}
