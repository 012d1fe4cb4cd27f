//! Power-up spawning and expiry

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::GameState;
use super::timer::Countdown;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Heal a fixed amount
    Health,
    /// Refill energy
    Energy,
    /// Speed × `speed_multiplier` for `speed_duration` ticks, then back to base
    Speed,
    /// Set the shield to a fixed value
    Shield,
    /// Damage multiplier × `damage_multiplier` on top of the upgraded base,
    /// lapsing after `damage_duration` ticks (300 by default)
    Damage,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Energy,
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::Damage,
    ];
}

/// A pickup on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Ticks until it vanishes
    pub ttl: Countdown,
}

impl PowerUp {
    pub fn rect(&self, size: f32) -> Rect {
        Rect::from_center(self.pos, size)
    }
}

impl GameState {
    /// Expire stale power-ups, then roll for a new one when the spawn timer lapses
    pub fn update_power_ups(&mut self) {
        self.power_ups.retain_mut(|p| {
            let expired = p.ttl.tick();
            if expired {
                log::debug!("Power-up {} ({:?}) expired", p.id, p.kind);
            }
            !expired
        });

        if !self.power_up_timer.tick() {
            return;
        }
        let tuning = self.tuning.power_up.clone();
        self.power_up_timer.set(tuning.spawn_interval);

        let chance = self.config.power_up_chance.clamp(0.0, 1.0) as f64;
        if !self.rng.random_bool(chance) {
            return;
        }

        let margin = tuning.spawn_margin;
        let x = self.rng.random_range(margin..=ARENA_WIDTH - margin);
        let y = self.rng.random_range(margin..=ARENA_HEIGHT - margin);
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let id = self.next_entity_id();
        log::debug!("Spawned {:?} power-up {} at ({:.0}, {:.0})", kind, id, x, y);
        self.power_ups.push(PowerUp {
            id,
            kind,
            pos: Vec2::new(x, y),
            ttl: Countdown::new(tuning.lifetime),
        });
    }
}
