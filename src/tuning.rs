//! Gameplay balance
//!
//! Every number that shapes a run lives here, grouped per concern. The
//! defaults are the canonical balance; a JSON file may override any subset
//! of fields.

use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Player ship tuning. Durations are in ticks, speeds in pixels per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    pub max_health: f32,
    pub max_energy: f32,
    /// Energy regained every tick
    pub energy_regen: f32,
    /// Collision box edge length
    pub size: f32,

    pub dash_cost: f32,
    pub dash_cooldown: u32,
    pub dash_invulnerability: u32,
    /// Instant displacement applied by a dash
    pub dash_distance: f32,

    pub fire_cost: f32,
    pub fire_cooldown: u32,
    /// Energy at or above which a shot becomes a 3-way spread
    pub spread_threshold: f32,
    /// Spread offset in degrees (shots go at -a, 0, +a)
    pub spread_degrees: f32,

    pub shield_cost: f32,
    pub shield_amount: f32,
    pub shield_cooldown: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 5.0,
            max_health: 100.0,
            max_energy: 100.0,
            energy_regen: 0.1,
            size: 40.0,
            dash_cost: 30.0,
            dash_cooldown: 60,
            dash_invulnerability: 15,
            dash_distance: 80.0,
            fire_cost: 5.0,
            fire_cooldown: 8,
            spread_threshold: 50.0,
            spread_degrees: 10.0,
            shield_cost: 20.0,
            shield_amount: 30.0,
            shield_cooldown: 180,
        }
    }
}

/// Permanent per-upgrade deltas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    pub max_level: u8,
    pub max_health: f32,
    pub max_energy: f32,
    pub speed: f32,
    pub damage: f32,
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            max_level: 5,
            max_health: 20.0,
            max_energy: 20.0,
            speed: 0.5,
            damage: 0.25,
        }
    }
}

/// Shadow behaviour tuning (level-independent part)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversaryTuning {
    pub size: f32,
    /// Ticks spent in each attack pattern before cycling
    pub pattern_duration: u32,
    pub orbit_radius: f32,
    /// Radians the orbit angle advances per pattern tick
    pub orbit_angular_speed: f32,
    pub aggressive_speed_scale: f32,
    pub spread_degrees: f32,
    /// Chip damage per tick of body contact
    pub contact_damage: f32,
}

impl Default for AdversaryTuning {
    fn default() -> Self {
        Self {
            size: 40.0,
            pattern_duration: 180,
            orbit_radius: 150.0,
            orbit_angular_speed: 0.05,
            aggressive_speed_scale: 1.5,
            spread_degrees: 15.0,
            contact_damage: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub player_speed: f32,
    pub adversary_speed: f32,
    pub size: f32,
    pub player_damage: f32,
    pub adversary_damage: f32,
    /// Ticks before an unobstructed projectile is culled
    pub lifetime: u32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            player_speed: 10.0,
            adversary_speed: 7.0,
            size: 8.0,
            player_damage: 10.0,
            adversary_damage: 5.0,
            lifetime: 240,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub size: f32,
    /// Ticks a power-up stays on the field
    pub lifetime: u32,
    /// Ticks between spawn rolls
    pub spawn_interval: u32,
    /// Distance kept from the arena edge when placing
    pub spawn_margin: f32,
    pub heal: f32,
    pub speed_multiplier: f32,
    pub speed_duration: u32,
    pub shield: f32,
    pub damage_multiplier: f32,
    pub damage_duration: u32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            size: 20.0,
            lifetime: 300,
            spawn_interval: 180,
            spawn_margin: 50.0,
            heal: 20.0,
            speed_multiplier: 1.5,
            speed_duration: 300,
            shield: 50.0,
            damage_multiplier: 2.0,
            damage_duration: 300,
        }
    }
}

/// One row of the difficulty table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBaseline {
    pub adversary_health: f32,
    pub adversary_speed: f32,
    pub shoot_delay: u32,
    /// Seconds
    pub time_limit: u32,
    pub power_up_chance: f32,
}

/// Difficulty table: fixed tunings for levels 1 and 2, linear growth after
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub tutorial: LevelBaseline,
    pub baseline: LevelBaseline,
    pub health_per_level: f32,
    pub speed_per_level: f32,
    pub shoot_delay_step: u32,
    pub min_shoot_delay: u32,
    pub time_limit_step: u32,
    pub min_time_limit: u32,
    pub power_up_chance_step: f32,
    pub max_power_up_chance: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            tutorial: LevelBaseline {
                adversary_health: 50.0,
                adversary_speed: 3.0,
                shoot_delay: 90,
                time_limit: 240,
                power_up_chance: 0.2,
            },
            baseline: LevelBaseline {
                adversary_health: 100.0,
                adversary_speed: 4.0,
                shoot_delay: 60,
                time_limit: 150,
                power_up_chance: 0.3,
            },
            health_per_level: 25.0,
            speed_per_level: 0.3,
            shoot_delay_step: 5,
            min_shoot_delay: 20,
            time_limit_step: 30,
            min_time_limit: 120,
            power_up_chance_step: 0.05,
            max_power_up_chance: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub hit: u64,
    pub power_up: u64,
    /// Multiplied by the new level on level clear
    pub level_bonus: u64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            hit: 10,
            power_up: 50,
            level_bonus: 1000,
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub upgrades: UpgradeTuning,
    pub adversary: AdversaryTuning,
    pub projectile: ProjectileTuning,
    pub power_up: PowerUpTuning,
    pub levels: LevelTuning,
    pub score: ScoreTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    /// Values the simulation cannot run with are reset, see [`Tuning::validate`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Self = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    /// Reset every unusable value to its default with a warning.
    /// Returns the number of fields corrected.
    ///
    /// Bodies must fit the arena, the power-up margin must leave room to
    /// place one, and every lifetime, interval and time limit must be at
    /// least one tick so its countdown can lapse.
    pub fn validate(&mut self) -> usize {
        let d = Self::default();
        let arena = ARENA_WIDTH.min(ARENA_HEIGHT);
        let bad_size = |v: f32| !(v.is_finite() && v >= 0.0 && v < arena);

        let mut fixed = 0;
        fixed += reset_if(
            bad_size(self.player.size),
            "player.size",
            &mut self.player.size,
            d.player.size,
        );
        fixed += reset_if(
            bad_size(self.adversary.size),
            "adversary.size",
            &mut self.adversary.size,
            d.adversary.size,
        );
        fixed += reset_if(
            bad_size(self.projectile.size),
            "projectile.size",
            &mut self.projectile.size,
            d.projectile.size,
        );
        fixed += reset_if(
            bad_size(self.power_up.size),
            "power_up.size",
            &mut self.power_up.size,
            d.power_up.size,
        );

        let margin = self.power_up.spawn_margin;
        fixed += reset_if(
            !(margin.is_finite() && margin >= 0.0 && margin < arena / 2.0),
            "power_up.spawn_margin",
            &mut self.power_up.spawn_margin,
            d.power_up.spawn_margin,
        );

        let p = &mut self.power_up;
        fixed += reset_if(
            p.spawn_interval == 0,
            "power_up.spawn_interval",
            &mut p.spawn_interval,
            d.power_up.spawn_interval,
        );
        fixed += reset_if(p.lifetime == 0, "power_up.lifetime", &mut p.lifetime, d.power_up.lifetime);
        let shot = &mut self.projectile;
        fixed += reset_if(
            shot.lifetime == 0,
            "projectile.lifetime",
            &mut shot.lifetime,
            d.projectile.lifetime,
        );

        let l = &mut self.levels;
        fixed += reset_if(
            l.tutorial.time_limit == 0,
            "levels.tutorial.time_limit",
            &mut l.tutorial.time_limit,
            d.levels.tutorial.time_limit,
        );
        fixed += reset_if(
            l.baseline.time_limit == 0,
            "levels.baseline.time_limit",
            &mut l.baseline.time_limit,
            d.levels.baseline.time_limit,
        );
        fixed += reset_if(
            l.min_time_limit == 0,
            "levels.min_time_limit",
            &mut l.min_time_limit,
            d.levels.min_time_limit,
        );

        fixed
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

fn reset_if<T: Debug>(bad: bool, field: &str, value: &mut T, fallback: T) -> usize {
    if !bad {
        return 0;
    }
    log::warn!("Tuning {} = {:?} is unusable, using {:?}", field, value, fallback);
    *value = fallback;
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "speed": 7.5 } }"#).unwrap();
        assert_eq!(tuning.player.speed, 7.5);
        assert_eq!(tuning.player.max_health, 100.0);
        assert_eq!(tuning.levels.tutorial.adversary_health, 50.0);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_from(Path::new("/definitely/not/here.json"));
        assert_eq!(tuning.adversary.pattern_duration, 180);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ nope").is_err());
    }

    #[test]
    fn test_defaults_need_no_correction() {
        assert_eq!(Tuning::default().validate(), 0);
    }

    #[test]
    fn test_oversized_margin_reset() {
        let tuning = Tuning::from_json(r#"{ "power_up": { "spawn_margin": 350 } }"#).unwrap();
        assert_eq!(tuning.power_up.spawn_margin, 50.0);
    }

    #[test]
    fn test_body_larger_than_arena_reset() {
        let tuning =
            Tuning::from_json(r#"{ "player": { "size": 700 }, "adversary": { "size": 600 } }"#).unwrap();
        assert_eq!(tuning.player.size, 40.0);
        assert_eq!(tuning.adversary.size, 40.0);
    }

    #[test]
    fn test_zero_time_limits_reset() {
        let tuning = Tuning::from_json(
            r#"{ "levels": {
                "tutorial": { "adversary_health": 50, "adversary_speed": 3, "shoot_delay": 90, "time_limit": 0, "power_up_chance": 0.2 },
                "min_time_limit": 0
            } }"#,
        )
        .unwrap();
        assert_eq!(tuning.levels.tutorial.time_limit, 240);
        assert_eq!(tuning.levels.min_time_limit, 120);
    }

    #[test]
    fn test_zero_intervals_reset() {
        let mut tuning = Tuning::default();
        tuning.power_up.spawn_interval = 0;
        tuning.power_up.lifetime = 0;
        tuning.projectile.lifetime = 0;
        assert_eq!(tuning.validate(), 3);
        assert_eq!(tuning.power_up.spawn_interval, 180);
        assert_eq!(tuning.power_up.lifetime, 300);
        assert_eq!(tuning.projectile.lifetime, 240);
    }
}
