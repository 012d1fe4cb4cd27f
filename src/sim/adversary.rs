//! The shadow and its attack-pattern state machine
//!
//! The shadow cycles Mirror → Orbit → Aggressive on a fixed tick cadence,
//! independent of anything the player does. Movement for every pattern goes
//! through the single `advance` function, and the firing style is picked by
//! the pattern active when the shot timer lapses.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, clamp_center_to_arena};
use super::events::{GameEvent, SoundCue};
use super::level::LevelConfig;
use super::projectile::{Projectile, Side, volley_angles};
use super::timer::Countdown;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, TRAIL_LENGTH};
use crate::tuning::{AdversaryTuning, ProjectileTuning};
use crate::{angle_towards, direction_from_angle, normalize_angle};

/// Where the shadow spawns at the start of each level
pub const ADVERSARY_START: Vec2 = Vec2::new(ARENA_WIDTH * 3.0 / 4.0, ARENA_HEIGHT / 2.0);

/// Read-only view of the player handed to the shadow each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub pos: Vec2,
    pub facing: f32,
}

/// Attack pattern with its per-pattern parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// Chase the player's reflection across the vertical midline
    Mirror,
    /// Circle the player at a fixed radius
    Orbit { radius: f32, angular_speed: f32 },
    /// Charge straight at the player
    Aggressive { speed_scale: f32 },
}

impl Pattern {
    /// The pattern that follows this one
    pub fn next(&self, tuning: &AdversaryTuning) -> Pattern {
        match self {
            Pattern::Mirror => Pattern::Orbit {
                radius: tuning.orbit_radius,
                angular_speed: tuning.orbit_angular_speed,
            },
            Pattern::Orbit { .. } => Pattern::Aggressive {
                speed_scale: tuning.aggressive_speed_scale,
            },
            Pattern::Aggressive { .. } => Pattern::Mirror,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Mirror => "mirror",
            Pattern::Orbit { .. } => "orbit",
            Pattern::Aggressive { .. } => "aggressive",
        }
    }
}

/// Step from `from` toward `to` by at most `step`; stays put when already there
fn step_towards(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return from;
    }
    from + delta / dist * step.min(dist)
}

/// Next shadow position for a pattern.
///
/// `timer` is the tick count inside the current pattern. Orbit is a pure
/// function of it; the other patterns move from `pos` at `speed`.
pub fn advance(pattern: &Pattern, timer: u32, pos: Vec2, player: Vec2, speed: f32) -> Vec2 {
    match *pattern {
        Pattern::Mirror => {
            let target = Vec2::new(ARENA_WIDTH - player.x, player.y);
            step_towards(pos, target, speed)
        }
        Pattern::Orbit {
            radius,
            angular_speed,
        } => player + direction_from_angle(timer as f32 * angular_speed) * radius,
        Pattern::Aggressive { speed_scale } => step_towards(pos, player, speed * speed_scale),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub facing: f32,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    /// Ticks between shots at this level
    pub shoot_delay: u32,
    pub pattern: Pattern,
    /// Ticks spent in the current pattern
    pub pattern_timer: u32,
    pub shoot_timer: Countdown,
    pub projectiles: Vec<Projectile>,
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Adversary {
    /// Fresh shadow for a level
    pub fn new(config: &LevelConfig, tuning: &AdversaryTuning) -> Self {
        Self {
            pos: ADVERSARY_START,
            facing: PI,
            size: tuning.size,
            health: config.adversary_health,
            max_health: config.adversary_health,
            speed: config.adversary_speed,
            shoot_delay: config.shoot_delay,
            pattern: Pattern::Mirror,
            pattern_timer: 0,
            shoot_timer: Countdown::new(config.shoot_delay),
            projectiles: Vec::new(),
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
    }

    /// Count the pattern timer and switch pattern at the cadence boundary
    pub fn advance_pattern(&mut self, tuning: &AdversaryTuning) {
        self.pattern_timer += 1;
        if self.pattern_timer >= tuning.pattern_duration {
            self.pattern = self.pattern.next(tuning);
            self.pattern_timer = 0;
            log::debug!("Shadow switches to {} pattern", self.pattern.name());
        }
    }

    /// One AI step: pattern cadence, movement, facing, and firing
    pub fn update(
        &mut self,
        player: &Snapshot,
        tuning: &AdversaryTuning,
        projectiles: &ProjectileTuning,
        events: &mut Vec<GameEvent>,
    ) {
        self.advance_pattern(tuning);

        let next = advance(&self.pattern, self.pattern_timer, self.pos, player.pos, self.speed);
        self.pos = clamp_center_to_arena(next, self.size);

        self.facing = match self.pattern {
            Pattern::Mirror => normalize_angle(PI - player.facing),
            _ => angle_towards(self.pos, player.pos),
        };

        self.trail.insert(0, self.pos);
        self.trail.truncate(TRAIL_LENGTH);

        if self.shoot_timer.tick() {
            self.shoot(player, tuning, projectiles, events);
            self.shoot_timer.set(self.shoot_delay);
        }
    }

    /// Fire a volley shaped by the current pattern. Returns the shot count.
    pub fn shoot(
        &mut self,
        player: &Snapshot,
        tuning: &AdversaryTuning,
        projectiles: &ProjectileTuning,
        events: &mut Vec<GameEvent>,
    ) -> usize {
        let angles = match self.pattern {
            // Straight across the arena toward the player's half
            Pattern::Mirror => {
                let aim = if player.pos.x < self.pos.x { PI } else { 0.0 };
                volley_angles(aim, tuning.spread_degrees, false)
            }
            Pattern::Orbit { .. } => {
                volley_angles(angle_towards(self.pos, player.pos), tuning.spread_degrees, true)
            }
            // Aimed once at fire time, never tracked afterwards
            Pattern::Aggressive { .. } => {
                volley_angles(angle_towards(self.pos, player.pos), tuning.spread_degrees, false)
            }
        };

        let reach = self.pos.distance(player.pos);
        for &angle in &angles {
            self.projectiles.push(Projectile::new(
                Side::Adversary,
                self.pos,
                angle,
                projectiles.adversary_speed,
                projectiles.adversary_damage,
                projectiles.size,
                projectiles.lifetime,
            ));
            events.push(GameEvent::Telegraph {
                from: self.pos,
                to: self.pos + direction_from_angle(angle) * reach,
            });
        }
        events.push(GameEvent::Sound(SoundCue::ShotFired));
        angles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn shadow() -> (Adversary, Tuning) {
        let tuning = Tuning::default();
        let config = LevelConfig::for_level(1, &tuning.levels);
        (Adversary::new(&config, &tuning.adversary), tuning)
    }

    fn snap(x: f32, y: f32) -> Snapshot {
        Snapshot {
            pos: Vec2::new(x, y),
            facing: 0.0,
        }
    }

    #[test]
    fn test_pattern_cycle_cadence() {
        let (mut a, t) = shadow();
        let period = t.adversary.pattern_duration;
        let expected = ["orbit", "aggressive", "mirror", "orbit"];
        for name in expected {
            assert_eq!(a.pattern_timer, 0);
            for _ in 0..period - 1 {
                a.advance_pattern(&t.adversary);
            }
            assert_ne!(a.pattern.name(), name);
            a.advance_pattern(&t.adversary);
            assert_eq!(a.pattern.name(), name);
        }
    }

    #[test]
    fn test_mirror_targets_reflection() {
        let target = Vec2::new(ARENA_WIDTH - 100.0, 200.0);
        let pos = advance(&Pattern::Mirror, 0, target, Vec2::new(100.0, 200.0), 4.0);
        assert_eq!(pos, target);

        let from = Vec2::new(ARENA_WIDTH - 100.0, 300.0);
        let pos = advance(&Pattern::Mirror, 0, from, Vec2::new(100.0, 200.0), 4.0);
        assert!((pos - Vec2::new(ARENA_WIDTH - 100.0, 296.0)).length() < 1e-4);
    }

    #[test]
    fn test_orbit_is_position_function() {
        let orbit = Pattern::Orbit {
            radius: 150.0,
            angular_speed: 0.05,
        };
        let player = Vec2::new(400.0, 300.0);
        let a = advance(&orbit, 10, Vec2::ZERO, player, 4.0);
        let b = advance(&orbit, 10, Vec2::new(999.0, 5.0), player, 4.0);
        assert_eq!(a, b);
        assert!((a.distance(player) - 150.0).abs() < 1e-3);
        let start = advance(&orbit, 0, Vec2::ZERO, player, 4.0);
        assert!((start - Vec2::new(550.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_aggressive_is_faster() {
        let aggressive = Pattern::Aggressive { speed_scale: 1.5 };
        let pos = advance(&aggressive, 0, Vec2::new(400.0, 300.0), Vec2::new(100.0, 300.0), 4.0);
        assert!((pos.x - 394.0).abs() < 1e-4);
    }

    #[test]
    fn test_mirror_fires_single_straight_shot() {
        let (mut a, t) = shadow();
        let mut events = Vec::new();
        let shots = a.shoot(&snap(100.0, 100.0), &t.adversary, &t.projectile, &mut events);
        assert_eq!(shots, 1);
        assert!(a.projectiles[0].vel.x < 0.0);
        assert!(a.projectiles[0].vel.y.abs() < 1e-4);
        assert!(events.contains(&GameEvent::Sound(SoundCue::ShotFired)));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Telegraph { .. })));
    }

    #[test]
    fn test_orbit_fires_spread() {
        let (mut a, t) = shadow();
        a.pattern = Pattern::Mirror.next(&t.adversary);
        let mut events = Vec::new();
        assert_eq!(a.shoot(&snap(100.0, 300.0), &t.adversary, &t.projectile, &mut events), 3);
        let telegraphs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Telegraph { .. }))
            .count();
        assert_eq!(telegraphs, 3);
    }

    #[test]
    fn test_aggressive_shot_aimed_at_player() {
        let (mut a, t) = shadow();
        a.pattern = Pattern::Aggressive { speed_scale: 1.5 };
        a.pos = Vec2::new(400.0, 300.0);
        let player = snap(400.0, 500.0);
        let mut events = Vec::new();
        a.shoot(&player, &t.adversary, &t.projectile, &mut events);
        let dir = a.projectiles[0].vel.normalize();
        assert!((dir - Vec2::Y).length() < 1e-4);
        let aimed_at_player = events.iter().any(|e| match e {
            GameEvent::Telegraph { to, .. } => to.distance(player.pos) < 1e-2,
            _ => false,
        });
        assert!(aimed_at_player);
    }

    #[test]
    fn test_shoots_on_delay() {
        let (mut a, t) = shadow();
        let player = snap(200.0, 300.0);
        let mut events = Vec::new();
        for _ in 0..a.shoot_delay - 1 {
            a.update(&player, &t.adversary, &t.projectile, &mut events);
        }
        assert!(a.projectiles.is_empty());
        a.update(&player, &t.adversary, &t.projectile, &mut events);
        assert_eq!(a.projectiles.len(), 1);
        assert_eq!(a.shoot_timer.remaining(), a.shoot_delay);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let (mut a, _) = shadow();
        a.take_damage(1_000.0);
        assert_eq!(a.health, 0.0);
        assert!(a.is_defeated());
    }
}
