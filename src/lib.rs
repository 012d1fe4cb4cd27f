//! Shadow Self - a two-actor arena duel against an AI shadow
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AI, projectiles, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `audio`: Routing of simulation sound cues to an optional playback sink
//! - `highscores`: The single persisted high score

pub mod audio;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation steps per second (the host loop paces ticks at this rate)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Arena dimensions (origin at top-left, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Maximum number of trail points kept per entity
    pub const TRAIL_LENGTH: usize = 10;

    /// Maximum live particles in the visual pool
    pub const MAX_PARTICLES: usize = 256;
}

/// Unit vector pointing along `angle` (radians, 0 = +x)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the vector from `from` to `to`
#[inline]
pub fn angle_towards(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(-1.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(-FRAC_PI_2) + FRAC_PI_2).abs() < 1e-6);
        assert!(normalize_angle(7.0) < PI);
    }

    #[test]
    fn test_angle_towards() {
        let a = angle_towards(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((a - FRAC_PI_2).abs() < 1e-6);
        let d = direction_from_angle(a);
        assert!(d.x.abs() < 1e-6 && (d.y - 1.0).abs() < 1e-6);
    }
}
