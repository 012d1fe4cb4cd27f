//! The player's ship
//!
//! All actions are guarded by resource checks. An action that cannot be
//! paid for (energy, cooldown, upgrade cap) is a silent no-op and reports
//! `false`/`0` so the caller can tell it was declined.

use std::collections::BTreeMap;
use std::f32::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::adversary::Snapshot;
use super::collision::{Rect, absorb_damage, clamp_center_to_arena};
use super::powerup::PowerUpKind;
use super::projectile::{Projectile, Side, volley_angles};
use super::timer::Countdown;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, TRAIL_LENGTH};
use crate::direction_from_angle;
use crate::tuning::{PlayerTuning, PowerUpTuning, ProjectileTuning, UpgradeTuning};

/// Where the player (re)spawns at the start of each level
pub const PLAYER_START: Vec2 = Vec2::new(ARENA_WIDTH / 4.0, ARENA_HEIGHT / 2.0);

/// Stats that can be permanently upgraded between levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeStat {
    MaxHealth,
    MaxEnergy,
    Speed,
    Damage,
}

impl UpgradeStat {
    pub const ALL: [UpgradeStat; 4] = [
        UpgradeStat::MaxHealth,
        UpgradeStat::MaxEnergy,
        UpgradeStat::Speed,
        UpgradeStat::Damage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeStat::MaxHealth => "max_health",
            UpgradeStat::MaxEnergy => "max_energy",
            UpgradeStat::Speed => "speed",
            UpgradeStat::Damage => "damage",
        }
    }
}

impl fmt::Display for UpgradeStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "max_health" | "health" => Ok(UpgradeStat::MaxHealth),
            "max_energy" | "energy" => Ok(UpgradeStat::MaxEnergy),
            "speed" => Ok(UpgradeStat::Speed),
            "damage" => Ok(UpgradeStat::Damage),
            other => Err(format!("unknown upgrade stat: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Radians, 0 = +x
    pub facing: f32,
    pub size: f32,

    pub health: f32,
    pub max_health: f32,
    pub energy: f32,
    pub max_energy: f32,
    /// Soaks damage before health
    pub shield: f32,

    /// Speed without temporary boosts
    pub base_speed: f32,
    /// Effective speed (base × active boost)
    pub speed: f32,
    speed_factor: f32,
    /// Damage multiplier without temporary boosts
    pub base_damage_multiplier: f32,
    /// Effective damage multiplier
    pub damage_multiplier: f32,
    damage_factor: f32,

    pub dash_cooldown: Countdown,
    pub fire_cooldown: Countdown,
    pub shield_cooldown: Countdown,
    pub invulnerable: Countdown,
    pub speed_boost: Countdown,
    pub damage_boost: Countdown,

    /// Upgrade count per stat, each in [0, cap]
    pub upgrades: BTreeMap<UpgradeStat, u8>,
    /// Live shots fired by the player
    pub projectiles: Vec<Projectile>,
    /// Recent positions (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: PLAYER_START,
            facing: 0.0,
            size: tuning.size,
            health: tuning.max_health,
            max_health: tuning.max_health,
            energy: tuning.max_energy,
            max_energy: tuning.max_energy,
            shield: 0.0,
            base_speed: tuning.speed,
            speed: tuning.speed,
            speed_factor: 1.0,
            base_damage_multiplier: 1.0,
            damage_multiplier: 1.0,
            damage_factor: 1.0,
            dash_cooldown: Countdown::default(),
            fire_cooldown: Countdown::default(),
            shield_cooldown: Countdown::default(),
            invulnerable: Countdown::default(),
            speed_boost: Countdown::default(),
            damage_boost: Countdown::default(),
            upgrades: BTreeMap::new(),
            projectiles: Vec::new(),
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            facing: self.facing,
        }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable.is_active()
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn upgrade_level(&self, stat: UpgradeStat) -> u8 {
        self.upgrades.get(&stat).copied().unwrap_or(0)
    }

    fn refresh_stats(&mut self) {
        self.speed = self.base_speed * self.speed_factor;
        self.damage_multiplier = self.base_damage_multiplier * self.damage_factor;
    }

    fn clamp_to_arena(&mut self) {
        self.pos = clamp_center_to_arena(self.pos, self.size);
    }

    /// Per-tick bookkeeping: count timers down, undo lapsed boosts, regen energy
    pub fn tick_timers(&mut self, tuning: &PlayerTuning) {
        if self.speed_boost.tick() {
            self.speed_factor = 1.0;
            self.refresh_stats();
        }
        if self.damage_boost.tick() {
            self.damage_factor = 1.0;
            self.refresh_stats();
        }
        self.invulnerable.tick();
        self.dash_cooldown.tick();
        self.fire_cooldown.tick();
        self.shield_cooldown.tick();

        self.energy = (self.energy + tuning.energy_regen).min(self.max_energy);
    }

    /// Move by one tick of speed along an intent direction.
    ///
    /// Components are clamped to [-1, 1] and diagonals are scaled by √2⁄2 so
    /// diagonal travel covers the same distance as axial travel.
    pub fn move_by(&mut self, direction: Vec2) {
        let mut dir = direction.clamp(Vec2::NEG_ONE, Vec2::ONE);
        if dir.x != 0.0 && dir.y != 0.0 {
            dir *= FRAC_1_SQRT_2;
        }
        if dir != Vec2::ZERO {
            self.facing = dir.y.atan2(dir.x);
        }
        self.pos += dir * self.speed;
        self.clamp_to_arena();
    }

    /// Instant burst of movement with brief invulnerability
    pub fn dash(&mut self, direction: Vec2, tuning: &PlayerTuning) -> bool {
        if self.energy < tuning.dash_cost || self.dash_cooldown.is_active() {
            return false;
        }
        let dir = match direction.try_normalize() {
            Some(dir) => dir,
            None => direction_from_angle(self.facing),
        };

        self.energy -= tuning.dash_cost;
        let invulnerable = tuning.dash_invulnerability.max(self.invulnerable.remaining());
        self.invulnerable.set(invulnerable);
        self.dash_cooldown.set(tuning.dash_cooldown);
        self.pos += dir * tuning.dash_distance;
        self.clamp_to_arena();
        true
    }

    /// Fire along the facing direction. Returns the number of shots spawned.
    pub fn fire(&mut self, tuning: &PlayerTuning, projectiles: &ProjectileTuning) -> usize {
        if self.energy < tuning.fire_cost || self.fire_cooldown.is_active() {
            return 0;
        }
        let spread = self.energy >= tuning.spread_threshold;
        let angles = volley_angles(self.facing, tuning.spread_degrees, spread);
        for &angle in &angles {
            self.projectiles.push(Projectile::new(
                Side::Player,
                self.pos,
                angle,
                projectiles.player_speed,
                projectiles.player_damage,
                projectiles.size,
                projectiles.lifetime,
            ));
        }
        self.energy -= tuning.fire_cost;
        self.fire_cooldown.set(tuning.fire_cooldown);
        angles.len()
    }

    /// Shield ability: trade energy for a fixed shield
    pub fn raise_shield(&mut self, tuning: &PlayerTuning) -> bool {
        if self.energy < tuning.shield_cost || self.shield_cooldown.is_active() {
            return false;
        }
        self.energy -= tuning.shield_cost;
        self.shield = self.shield.max(tuning.shield_amount);
        self.shield_cooldown.set(tuning.shield_cooldown);
        true
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind, tuning: &PowerUpTuning) {
        match kind {
            PowerUpKind::Health => {
                self.health = (self.health + tuning.heal).min(self.max_health);
            }
            PowerUpKind::Energy => {
                self.energy = self.max_energy;
            }
            PowerUpKind::Speed => {
                self.speed_factor = tuning.speed_multiplier;
                self.speed_boost.set(tuning.speed_duration);
            }
            PowerUpKind::Shield => {
                self.shield = tuning.shield;
            }
            PowerUpKind::Damage => {
                self.damage_factor = tuning.damage_multiplier;
                self.damage_boost.set(tuning.damage_duration);
            }
        }
        self.refresh_stats();
    }

    /// Permanent stat increase. Returns false once the stat is capped.
    pub fn upgrade(&mut self, stat: UpgradeStat, tuning: &UpgradeTuning) -> bool {
        let level = self.upgrades.entry(stat).or_insert(0);
        if *level >= tuning.max_level {
            return false;
        }
        *level += 1;

        match stat {
            UpgradeStat::MaxHealth => {
                self.max_health += tuning.max_health;
                self.health = self.max_health;
            }
            UpgradeStat::MaxEnergy => {
                self.max_energy += tuning.max_energy;
                self.energy = self.max_energy;
            }
            UpgradeStat::Speed => self.base_speed += tuning.speed,
            UpgradeStat::Damage => self.base_damage_multiplier += tuning.damage,
        }
        self.refresh_stats();
        true
    }

    /// Shield first, then health
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        absorb_damage(&mut self.shield, &mut self.health, amount)
    }

    /// Record current position to trail
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Back to the spawn point for a new level. Stats and upgrades carry over;
    /// transient boosts and cooldowns do not.
    pub fn reset_for_level(&mut self) {
        self.pos = PLAYER_START;
        self.facing = 0.0;
        self.projectiles.clear();
        self.trail.clear();
        for timer in [
            &mut self.dash_cooldown,
            &mut self.fire_cooldown,
            &mut self.shield_cooldown,
            &mut self.invulnerable,
            &mut self.speed_boost,
            &mut self.damage_boost,
        ] {
            timer.clear();
        }
        self.speed_factor = 1.0;
        self.damage_factor = 1.0;
        self.refresh_stats();
    }
}
