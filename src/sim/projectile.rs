//! Projectiles
//!
//! Shots fly in a straight line at the speed and angle they were created
//! with. Each one lives in the pool of the entity that fired it until it
//! leaves the arena, runs out of lifetime, or is consumed by a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::timer::Countdown;
use crate::direction_from_angle;

/// Which side fired a shot; a shot only damages the other side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Adversary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Who fired it. Only the other side can be hit.
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Damage before the shooter's multiplier
    pub damage: f32,
    pub size: f32,
    pub ttl: Countdown,
}

impl Projectile {
    pub fn new(
        side: Side,
        origin: Vec2,
        angle: f32,
        speed: f32,
        damage: f32,
        size: f32,
        lifetime: u32,
    ) -> Self {
        Self {
            side,
            pos: origin,
            vel: direction_from_angle(angle) * speed,
            damage,
            size,
            ttl: Countdown::new(lifetime),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Move one tick. Returns false once the shot should be culled.
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        let expired = self.ttl.tick() || !self.ttl.is_active();
        !expired && self.rect().within(&Rect::arena())
    }
}

/// Fire angles for a volley centred on `aim`, fanned by `offset_degrees`
pub fn volley_angles(aim: f32, offset_degrees: f32, spread: bool) -> Vec<f32> {
    if spread {
        let offset = offset_degrees.to_radians();
        vec![aim - offset, aim, aim + offset]
    } else {
        vec![aim]
    }
}

/// Advance every shot in a pool and drop the dead ones
pub fn update_pool(pool: &mut Vec<Projectile>) {
    pool.retain_mut(Projectile::advance);
}
