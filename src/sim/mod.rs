//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` is one step)
//! - Seeded RNG only
//! - Stable iteration order (pools keep insertion order)
//! - No rendering, audio or platform dependencies; side effects leave as `GameEvent`s

pub mod adversary;
pub mod collision;
pub mod events;
pub mod feed;
pub mod level;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod timer;

pub use adversary::{Adversary, Pattern, Snapshot, advance};
pub use collision::{Rect, absorb_damage};
pub use events::{GameEvent, ParticleKind, SoundCue};
pub use feed::FrameView;
pub use level::{LevelConfig, UpgradeChoice};
pub use player::{Player, UpgradeStat};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{Projectile, Side};
pub use state::{GamePhase, GameState, Particle};
pub use tick::{TickInput, tick};
pub use timer::Countdown;
