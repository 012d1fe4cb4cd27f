//! Game state and core simulation types
//!
//! Every entity lives here, owned by exactly one field. Rendering and audio
//! read this between ticks; nothing outside `sim` mutates it mid-tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::Adversary;
use super::events::{GameEvent, ParticleKind};
use super::level::LevelConfig;
use super::player::Player;
use super::powerup::PowerUp;
use super::timer::Countdown;
use crate::consts::MAX_PARTICLES;
use crate::tuning::Tuning;

/// Ticks a particle lives
pub const PARTICLE_LIFE: u32 = 20;

/// Where the run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for a run to start
    Menu,
    /// Active gameplay
    Playing,
    /// Tick clock frozen; every timer keeps its value
    Paused,
    /// Shadow defeated, waiting on the upgrade choice
    LevelComplete { new_level: u32 },
    /// Run ended
    GameOver { score: u64 },
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Ticks remaining
    pub life: u32,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    /// Difficulty of the current level
    pub config: LevelConfig,
    pub score: u64,
    /// Best score known to the collaborator that persists it
    pub high_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks left before the level times out
    pub time_left: Countdown,
    pub phase: GamePhase,
    pub player: Player,
    pub adversary: Adversary,
    /// Active power-ups (sorted by id)
    pub power_ups: Vec<PowerUp>,
    /// Ticks until the next power-up spawn roll
    pub power_up_timer: Countdown,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Screen-shake ticks remaining
    pub screen_shake: u32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game. `high_score` is the persisted best from a previous session.
    pub fn new(seed: u64, mut tuning: Tuning, high_score: u64) -> Self {
        tuning.validate();
        let config = LevelConfig::for_level(1, &tuning.levels);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            score: 0,
            high_score,
            time_ticks: 0,
            time_left: Countdown::new(config.time_limit_ticks()),
            phase: GamePhase::Menu,
            player: Player::new(&tuning.player),
            adversary: Adversary::new(&config, &tuning.adversary),
            power_ups: Vec::new(),
            power_up_timer: Countdown::new(tuning.power_up.spawn_interval),
            particles: Vec::new(),
            screen_shake: 0,
            next_id: 1,
            config,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seconds left on the level clock, rounded up
    pub fn seconds_left(&self) -> u32 {
        self.time_left.remaining().div_ceil(crate::consts::TICKS_PER_SECOND)
    }

    /// Turn this tick's particle requests into live particles
    pub fn spawn_requested_particles(&mut self, events: &[GameEvent]) {
        for event in events {
            let GameEvent::Particles { pos, kind, count } = *event else {
                continue;
            };
            for _ in 0..count {
                if self.particles.len() >= MAX_PARTICLES {
                    return;
                }
                let vel = Vec2::new(
                    self.rng.random_range(-3.0..=3.0),
                    self.rng.random_range(-3.0..=3.0),
                );
                let size = self.rng.random_range(2.0..=4.0);
                self.particles.push(Particle {
                    pos,
                    vel,
                    kind,
                    life: PARTICLE_LIFE,
                    size,
                });
            }
        }
    }

    /// Drift particles and drop the spent ones
    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1, Tuning::default(), 1234);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.high_score, 1234);
        assert_eq!(state.level, 1);
        assert_eq!(state.seconds_left(), 240);
    }

    #[test]
    fn test_particles_live_fixed_ticks() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        let events = [GameEvent::Particles {
            pos: Vec2::new(100.0, 100.0),
            kind: ParticleKind::Pickup,
            count: 5,
        }];
        state.spawn_requested_particles(&events);
        assert_eq!(state.particles.len(), 5);
        for _ in 0..PARTICLE_LIFE - 1 {
            state.update_particles();
        }
        assert_eq!(state.particles.len(), 5);
        state.update_particles();
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_pool_is_bounded() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        let events = [GameEvent::Particles {
            pos: Vec2::ZERO,
            kind: ParticleKind::Explosion,
            count: MAX_PARTICLES as u32 * 2,
        }];
        state.spawn_requested_particles(&events);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_unusable_tuning_corrected_on_start() {
        let mut tuning = Tuning::default();
        tuning.player.size = 700.0;
        tuning.power_up.spawn_margin = 350.0;
        tuning.levels.tutorial.time_limit = 0;
        let mut state = GameState::new(3, tuning, 0);
        assert_eq!(state.player.size, 40.0);
        assert_eq!(state.tuning.power_up.spawn_margin, 50.0);
        assert_eq!(state.config.time_limit, 240);

        state.start_run();
        state.config.power_up_chance = 1.0;
        for _ in 0..state.tuning.power_up.spawn_interval {
            state.update_power_ups();
        }
        assert_eq!(state.power_ups.len(), 1);
    }
}
