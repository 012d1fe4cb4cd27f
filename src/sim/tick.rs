//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is
//! one step; the host paces calls at `TICKS_PER_SECOND`.

use glam::Vec2;

use super::collision;
use super::events::{GameEvent, ParticleKind, SoundCue};
use super::projectile::update_pool;
use super::state::{GamePhase, GameState};
use crate::angle_towards;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent, each axis in [-1, 1]
    pub movement: Vec2,
    /// Point to face (mouse cursor); facing follows movement when absent
    pub aim: Option<Vec2>,
    /// Fire held
    pub fire: bool,
    /// Dash pressed
    pub dash: bool,
    /// Shield ability pressed
    pub shield: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep and return what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at tick {}", state.time_ticks);
                return events;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Only active play advances the clock
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.screen_shake = state.screen_shake.saturating_sub(1);

    update_player(state, input, &mut events);

    // Shadow reads a frozen view of the player
    let snapshot = state.player.snapshot();
    state.adversary.update(
        &snapshot,
        &state.tuning.adversary,
        &state.tuning.projectile,
        &mut events,
    );

    update_pool(&mut state.player.projectiles);
    update_pool(&mut state.adversary.projectiles);

    state.update_power_ups();
    state.update_particles();

    collision::resolve(state, &mut events);

    // Win/loss
    let out_of_time = state.time_left.tick();
    if state.adversary.is_defeated() {
        state.complete_level(&mut events);
    } else if state.player.is_defeated() || out_of_time {
        if state.player.is_defeated() {
            events.push(GameEvent::Sound(SoundCue::EntityExploded));
            events.push(GameEvent::Particles {
                pos: state.player.pos,
                kind: ParticleKind::Explosion,
                count: 20,
            });
        }
        state.end_run(&mut events);
    }

    state.spawn_requested_particles(&events);
    events
}

fn update_player(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.tick_timers(&tuning.player);
    player.move_by(input.movement);
    if let Some(aim) = input.aim {
        if aim != player.pos {
            player.facing = angle_towards(player.pos, aim);
        }
    }

    if input.dash && player.dash(input.movement, &tuning.player) {
        events.push(GameEvent::Particles {
            pos: player.pos,
            kind: ParticleKind::Player,
            count: 20,
        });
    }

    if input.shield && player.raise_shield(&tuning.player) {
        events.push(GameEvent::Particles {
            pos: player.pos,
            kind: ParticleKind::Player,
            count: 10,
        });
    }

    if input.fire && player.fire(&tuning.player, &tuning.projectile) > 0 {
        events.push(GameEvent::Sound(SoundCue::ShotFired));
    }

    player.record_trail();
}
