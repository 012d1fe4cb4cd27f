//! Collision detection and damage resolution
//!
//! Everything collides as an axis-aligned box; touching edges count as
//! overlap. `resolve` is the only place that moves health, shield and score
//! between the two sides, and it runs once per tick after all motion.

use glam::Vec2;

use super::events::{GameEvent, ParticleKind, SoundCue};
use super::projectile::Side;
use super::state::GameState;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Screen-shake ticks applied by body contact
const CONTACT_SHAKE_TICKS: u32 = 5;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The playfield
    pub fn arena() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        }
    }

    /// Overlap test, inclusive of shared edges
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// True if no part of `self` lies outside `bounds`
    #[inline]
    pub fn within(&self, bounds: &Rect) -> bool {
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && self.max.x <= bounds.max.x
            && self.max.y <= bounds.max.y
    }
}

/// Clamp a box centre so a box of `size` stays inside the arena
pub fn clamp_center_to_arena(center: Vec2, size: f32) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        center.x.clamp(half, ARENA_WIDTH - half),
        center.y.clamp(half, ARENA_HEIGHT - half),
    )
}

/// Shield soaks damage first; whatever it cannot hold spills into health.
/// Returns the health actually lost.
pub fn absorb_damage(shield: &mut f32, health: &mut f32, damage: f32) -> f32 {
    let damage = damage.max(0.0);
    let soaked = damage.min(*shield);
    *shield -= soaked;
    let overflow = damage - soaked;
    let before = *health;
    *health = (*health - overflow).max(0.0);
    before - *health
}

/// Resolve all contacts for this tick, in fixed order:
/// player shots, shadow shots, pickups, body contact.
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        tuning,
        player,
        adversary,
        power_ups,
        score,
        screen_shake,
        ..
    } = state;

    // Player projectiles vs shadow
    let shadow_box = adversary.rect();
    let multiplier = player.damage_multiplier;
    player.projectiles.retain(|shot| {
        if shot.side != Side::Player || !shot.rect().overlaps(&shadow_box) {
            return true;
        }
        adversary.take_damage(shot.damage * multiplier);
        *score += tuning.score.hit;
        events.push(GameEvent::Sound(SoundCue::HitLanded));
        events.push(GameEvent::Particles {
            pos: shot.pos,
            kind: ParticleKind::Player,
            count: 5,
        });
        false
    });

    // Shadow projectiles vs player
    let player_box = player.rect();
    let mut incoming = 0.0;
    adversary.projectiles.retain(|shot| {
        if shot.side != Side::Adversary || !shot.rect().overlaps(&player_box) {
            return true;
        }
        if !player.is_invulnerable() {
            incoming += shot.damage;
            events.push(GameEvent::Sound(SoundCue::HitLanded));
            events.push(GameEvent::Particles {
                pos: shot.pos,
                kind: ParticleKind::Shadow,
                count: 5,
            });
        }
        false
    });
    if incoming > 0.0 {
        player.take_damage(incoming);
    }

    // Pickups
    power_ups.retain(|power_up| {
        if !power_up.rect(tuning.power_up.size).overlaps(&player_box) {
            return true;
        }
        player.apply_power_up(power_up.kind, &tuning.power_up);
        *score += tuning.score.power_up;
        log::debug!("Collected {:?} power-up {}", power_up.kind, power_up.id);
        events.push(GameEvent::Sound(SoundCue::PowerupCollected));
        events.push(GameEvent::Particles {
            pos: power_up.pos,
            kind: ParticleKind::Pickup,
            count: 5,
        });
        false
    });

    // Body contact grinds the player down every tick it persists
    if player.rect().overlaps(&adversary.rect()) && !player.is_invulnerable() {
        player.take_damage(tuning.adversary.contact_damage);
        *screen_shake = CONTACT_SHAKE_TICKS;
        events.push(GameEvent::Particles {
            pos: player.pos,
            kind: ParticleKind::Shadow,
            count: 5,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::{PowerUp, PowerUpKind};
    use crate::sim::projectile::Projectile;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(7, Tuning::default(), 0);
        state.start_run();
        state
    }

    fn shot_at(side: Side, pos: Vec2, damage: f32) -> Projectile {
        Projectile::new(side, pos, 0.0, 0.0, damage, 8.0, 240)
    }

    #[test]
    fn test_rect_edge_touch_counts() {
        let a = Rect::from_center(Vec2::new(0.0, 0.0), 10.0);
        let b = Rect::from_center(Vec2::new(10.0, 0.0), 10.0);
        assert!(a.overlaps(&b));
        let c = Rect::from_center(Vec2::new(10.01, 0.0), 10.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_shield_overflow() {
        let mut shield = 10.0;
        let mut health = 100.0;
        let lost = absorb_damage(&mut shield, &mut health, 15.0);
        assert_eq!(shield, 0.0);
        assert_eq!(health, 95.0);
        assert_eq!(lost, 5.0);
    }

    #[test]
    fn test_shield_soaks_everything() {
        let mut shield = 30.0;
        let mut health = 80.0;
        absorb_damage(&mut shield, &mut health, 12.0);
        assert_eq!(shield, 18.0);
        assert_eq!(health, 80.0);
    }

    #[test]
    fn test_health_never_negative() {
        let mut shield = 0.0;
        let mut health = 3.0;
        absorb_damage(&mut shield, &mut health, 50.0);
        assert_eq!(health, 0.0);
    }

    #[test]
    fn test_shadow_shot_hits_player() {
        let mut state = playing_state();
        let pos = state.player.pos;
        state.adversary.projectiles.push(shot_at(Side::Adversary, pos, 5.0));
        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.player.health, 95.0);
        assert!(state.adversary.projectiles.is_empty());
        assert!(events.contains(&GameEvent::Sound(SoundCue::HitLanded)));
    }

    #[test]
    fn test_shot_never_hits_its_own_side() {
        let mut state = playing_state();
        let shadow_pos = state.adversary.pos;
        let player_pos = state.player.pos;
        state.player.projectiles.push(shot_at(Side::Adversary, shadow_pos, 10.0));
        state.adversary.projectiles.push(shot_at(Side::Player, player_pos, 10.0));
        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.adversary.health, state.adversary.max_health);
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_invulnerable_player_still_consumes_shot() {
        let mut state = playing_state();
        state.player.invulnerable.set(10);
        let pos = state.player.pos;
        state.adversary.projectiles.push(shot_at(Side::Adversary, pos, 5.0));
        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.player.health, 100.0);
        assert!(state.adversary.projectiles.is_empty());
    }

    #[test]
    fn test_player_shot_scaled_by_multiplier() {
        let mut state = playing_state();
        state.player.damage_multiplier = 2.0;
        let pos = state.adversary.pos;
        state.player.projectiles.push(shot_at(Side::Player, pos, 10.0));
        let before = state.adversary.health;
        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.adversary.health, before - 20.0);
        assert_eq!(state.score, 10);
        assert!(state.player.projectiles.is_empty());
    }

    #[test]
    fn test_each_shot_hits_once_per_pass() {
        let mut state = playing_state();
        let pos = state.adversary.pos;
        state.player.projectiles.push(shot_at(Side::Player, pos, 10.0));
        let before = state.adversary.health;
        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        resolve(&mut state, &mut events);
        assert_eq!(state.adversary.health, before - 10.0);
    }

    #[test]
    fn test_pickup_applies_and_scores() {
        let mut state = playing_state();
        state.player.health = 50.0;
        state.power_ups.push(PowerUp {
            id: 99,
            kind: PowerUpKind::Health,
            pos: state.player.pos,
            ttl: crate::sim::timer::Countdown::new(100),
        });
        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.player.health, 70.0);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.score, 50);
        assert!(events.contains(&GameEvent::Sound(SoundCue::PowerupCollected)));
    }

    #[test]
    fn test_contact_is_chip_damage_every_tick() {
        let mut state = playing_state();
        state.adversary.pos = state.player.pos;
        let mut events = Vec::new();
        for _ in 0..3 {
            resolve(&mut state, &mut events);
        }
        assert_eq!(state.player.health, 97.0);
        assert_eq!(state.screen_shake, CONTACT_SHAKE_TICKS);
    }
}
