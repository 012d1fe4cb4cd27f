//! Side effects emitted by a tick
//!
//! The simulation never calls into audio, particles or UI directly. Each tick
//! returns a list of these records and collaborators consume them afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named sound cues for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    ShotFired,
    HitLanded,
    PowerupCollected,
    EntityExploded,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::ShotFired => "shot_fired",
            SoundCue::HitLanded => "hit_landed",
            SoundCue::PowerupCollected => "powerup_collected",
            SoundCue::EntityExploded => "entity_exploded",
        }
    }
}

/// Palette hint for spawned particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Player-side feedback (dash burst, shield)
    Player,
    /// Shadow-side feedback (hits on the player, contact)
    Shadow,
    /// Power-up pickup
    Pickup,
    /// Entity destroyed
    Explosion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Request a burst of `count` particles at `pos`
    Particles {
        pos: Vec2,
        kind: ParticleKind,
        count: u32,
    },
    /// Attack warning from the shooter toward its target
    Telegraph { from: Vec2, to: Vec2 },
    /// The shadow fell; the run waits for an upgrade choice
    LevelComplete { new_level: u32 },
    /// The run ended. `high_score` is the value to persist.
    GameOver {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Sound(cue) => Some(*cue),
            _ => None,
        }
    }
}
