//! Render feed
//!
//! A plain snapshot of everything a renderer or HUD needs, taken between
//! ticks. Serializable so a remote or scripted collaborator can consume it.

use glam::Vec2;
use serde::Serialize;

use super::powerup::PowerUpKind;
use super::projectile::Side;
use super::state::{GamePhase, GameState};
use crate::sim::events::ParticleKind;

#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub pos: Vec2,
    pub facing: f32,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShotView {
    pub pos: Vec2,
    pub side: Side,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub ticks_left: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub kind: ParticleKind,
    pub size: f32,
    /// 1.0 when fresh, fading to 0.0
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    pub seconds_left: u32,
    pub energy: f32,
    pub max_energy: f32,
    pub shield: f32,
    pub dash_cooldown: u32,
    pub shield_cooldown: u32,
    pub pattern: &'static str,
    pub screen_shake: u32,
}

/// Everything visible after a tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub player: EntityView,
    pub adversary: EntityView,
    pub shots: Vec<ShotView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub hud: Hud,
}

impl GameState {
    pub fn frame_view(&self) -> FrameView {
        let player = &self.player;
        let adversary = &self.adversary;
        let shots = player
            .projectiles
            .iter()
            .chain(&adversary.projectiles)
            .map(|p| ShotView {
                pos: p.pos,
                side: p.side,
            })
            .collect();

        FrameView {
            phase: self.phase,
            player: EntityView {
                pos: player.pos,
                facing: player.facing,
                size: player.size,
                health: player.health,
                max_health: player.max_health,
                trail: player.trail.clone(),
            },
            adversary: EntityView {
                pos: adversary.pos,
                facing: adversary.facing,
                size: adversary.size,
                health: adversary.health,
                max_health: adversary.max_health,
                trail: adversary.trail.clone(),
            },
            shots,
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    kind: p.kind,
                    ticks_left: p.ttl.remaining(),
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    kind: p.kind,
                    size: p.size,
                    alpha: p.life as f32 / super::state::PARTICLE_LIFE as f32,
                })
                .collect(),
            hud: Hud {
                level: self.level,
                score: self.score,
                high_score: self.high_score,
                seconds_left: self.seconds_left(),
                energy: player.energy,
                max_energy: player.max_energy,
                shield: player.shield,
                dash_cooldown: player.dash_cooldown.remaining(),
                shield_cooldown: player.shield_cooldown.remaining(),
                pattern: adversary.pattern.name(),
                screen_shake: self.screen_shake,
            },
        }
    }
}
