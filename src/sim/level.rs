//! Difficulty table and run progression
//!
//! `LevelConfig::for_level` is a pure mapping from level index to tuning.
//! The `GameState` methods here drive the run lifecycle: start, level clear,
//! upgrade confirmation, arena reset, and run end.

use serde::{Deserialize, Serialize};

use super::adversary::Adversary;
use super::events::{GameEvent, ParticleKind, SoundCue};
use super::player::{Player, UpgradeStat};
use super::state::{GamePhase, GameState};
use crate::consts::TICKS_PER_SECOND;
use crate::tuning::{LevelBaseline, LevelTuning};

/// Difficulty for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub adversary_health: f32,
    pub adversary_speed: f32,
    /// Ticks between shadow volleys
    pub shoot_delay: u32,
    /// Seconds
    pub time_limit: u32,
    /// Chance per spawn roll that a power-up appears
    pub power_up_chance: f32,
}

impl LevelConfig {
    /// Level 1 is the tutorial tuning, level 2 the baseline; later levels
    /// scale linearly from the baseline with floors and caps.
    ///
    /// # Panics
    /// Levels start at 1. Level 0 means a caller broke the contract, as does
    /// tuning that makes the shadow's health, speed or power-up chance non-finite.
    pub fn for_level(level: u32, tuning: &LevelTuning) -> Self {
        assert!(level >= 1, "level index starts at 1, got {level}");

        let row = match level {
            1 => tuning.tutorial,
            2 => tuning.baseline,
            _ => {
                let steps = level - 2;
                let base = tuning.baseline;
                let n = steps as f32;
                LevelBaseline {
                    adversary_health: base.adversary_health + tuning.health_per_level * n,
                    adversary_speed: base.adversary_speed + tuning.speed_per_level * n,
                    shoot_delay: base
                        .shoot_delay
                        .saturating_sub(tuning.shoot_delay_step.saturating_mul(steps))
                        .max(tuning.min_shoot_delay),
                    time_limit: base
                        .time_limit
                        .saturating_sub(tuning.time_limit_step.saturating_mul(steps))
                        .max(tuning.min_time_limit),
                    power_up_chance: (base.power_up_chance + tuning.power_up_chance_step * n)
                        .min(tuning.max_power_up_chance),
                }
            }
        };
        assert!(
            row.adversary_health.is_finite()
                && row.adversary_speed.is_finite()
                && row.power_up_chance.is_finite(),
            "level {level} tuning is not finite: {row:?}"
        );

        Self {
            level,
            adversary_health: row.adversary_health,
            adversary_speed: row.adversary_speed,
            shoot_delay: row.shoot_delay.max(1),
            time_limit: row.time_limit,
            power_up_chance: row.power_up_chance.clamp(0.0, 1.0),
        }
    }

    pub fn time_limit_ticks(&self) -> u32 {
        self.time_limit.saturating_mul(TICKS_PER_SECOND)
    }
}

/// The upgrade collaborator's answer after a level clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeChoice {
    Stat(UpgradeStat),
    Decline,
    Quit,
}

impl GameState {
    /// Begin a fresh run at level 1. Only valid from the menu or after a run ends.
    pub fn start_run(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver { .. }) {
            return false;
        }
        self.level = 1;
        self.score = 0;
        self.time_ticks = 0;
        self.player = Player::new(&self.tuning.player);
        self.particles.clear();
        self.reset_arena();
        log::info!("Run started (seed {}, high score {})", self.seed, self.high_score);
        true
    }

    /// Fresh shadow from the current level's config, player back at spawn
    fn reset_arena(&mut self) {
        self.config = LevelConfig::for_level(self.level, &self.tuning.levels);
        self.adversary = Adversary::new(&self.config, &self.tuning.adversary);
        self.player.reset_for_level();
        self.power_ups.clear();
        self.power_up_timer.set(self.tuning.power_up.spawn_interval);
        self.time_left.set(self.config.time_limit_ticks());
        self.screen_shake = 0;
        self.phase = GamePhase::Playing;
        log::info!(
            "Level {}: shadow hp {}, speed {}, shoot delay {}, {}s",
            self.level,
            self.config.adversary_health,
            self.config.adversary_speed,
            self.config.shoot_delay,
            self.config.time_limit
        );
    }

    /// The shadow fell: advance the level, pay the bonus, wait for an upgrade choice
    pub(crate) fn complete_level(&mut self, events: &mut Vec<GameEvent>) {
        self.level += 1;
        let bonus = self.tuning.score.level_bonus * u64::from(self.level);
        self.score += bonus;

        events.push(GameEvent::Sound(SoundCue::EntityExploded));
        events.push(GameEvent::Particles {
            pos: self.adversary.pos,
            kind: ParticleKind::Explosion,
            count: 20,
        });
        events.push(GameEvent::LevelComplete {
            new_level: self.level,
        });
        self.phase = GamePhase::LevelComplete {
            new_level: self.level,
        };
        log::info!("Shadow defeated, advancing to level {} (+{})", self.level, bonus);
    }

    /// Apply the collaborator's upgrade decision and resume play.
    /// Ignored unless a level clear is pending.
    pub fn confirm_upgrade(&mut self, choice: UpgradeChoice) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !matches!(self.phase, GamePhase::LevelComplete { .. }) {
            return events;
        }
        match choice {
            UpgradeChoice::Stat(stat) => {
                if !self.player.upgrade(stat, &self.tuning.upgrades) {
                    log::debug!("Upgrade {} already at cap", stat);
                }
                self.reset_arena();
            }
            UpgradeChoice::Decline => self.reset_arena(),
            UpgradeChoice::Quit => self.end_run(&mut events),
        }
        events
    }

    /// Close the run and propose the high score
    pub(crate) fn end_run(&mut self, events: &mut Vec<GameEvent>) {
        let score = self.score;
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
        }
        self.phase = GamePhase::GameOver { score };
        events.push(GameEvent::GameOver {
            score,
            high_score: self.high_score,
            new_high_score,
        });
        log::info!("Run over at level {} with score {}", self.level, score);
    }

    /// Back to idle after a run
    pub fn return_to_menu(&mut self) {
        if matches!(self.phase, GamePhase::GameOver { .. }) {
            self.phase = GamePhase::Menu;
        }
    }
}
