//! Shadow Self headless runner
//!
//! Drives the simulation with a scripted pilot at the fixed tick rate (as
//! fast as possible, no rendering), routes sound cues to the log, picks
//! upgrades in rotation, and persists the high score when the run ends.
//!
//! Usage: `shadow-self [seed] [max_ticks]`
//! Environment: `SHADOW_TUNING` (JSON tuning file), `SHADOW_HIGHSCORE`
//! (high score file, default `shadow_self_highscore.json`), `RUST_LOG`.

use std::path::PathBuf;

use glam::Vec2;

use shadow_self::audio::{AudioRouter, AudioSink};
use shadow_self::sim::{
    GameEvent, GamePhase, GameState, SoundCue, TickInput, UpgradeChoice, UpgradeStat, tick,
};
use shadow_self::{HighScore, Tuning};

/// Sink that writes cues to the log
struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::trace!("sound {} @ {:.2}", cue.name(), volume);
    }
}

/// Scripted pilot: track the shadow vertically, keep firing at it,
/// dash away when it closes in, raise the shield against incoming shots.
fn pilot(state: &GameState) -> TickInput {
    let me = state.player.pos;
    let shadow = state.adversary.pos;

    let dy = shadow.y - me.y;
    let mut movement = Vec2::new(0.0, dy.signum() * f32::from(dy.abs() > 8.0));
    let close = me.distance(shadow) < 120.0;
    if close {
        movement.x = -(shadow.x - me.x).signum();
    }

    let threatened = state
        .adversary
        .projectiles
        .iter()
        .any(|p| p.pos.distance(me) < 60.0);

    TickInput {
        movement,
        aim: Some(shadow),
        fire: true,
        dash: close,
        shield: threatened,
        pause: false,
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5AD0);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 10);

    let tuning = match std::env::var_os("SHADOW_TUNING") {
        Some(path) => Tuning::load_from(&PathBuf::from(path)),
        None => Tuning::default(),
    };
    let highscore_path = std::env::var_os("SHADOW_HIGHSCORE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("shadow_self_highscore.json"));
    let mut high_score = HighScore::load_from(&highscore_path);

    log::info!("Shadow Self (headless) starting with seed {}", seed);
    let mut state = GameState::new(seed, tuning, high_score.best);
    state.start_run();

    let router = AudioRouter::new();
    let mut sink = LogSink;
    let mut upgrades = UpgradeStat::ALL.iter().cycle();

    while state.time_ticks < max_ticks {
        let input = pilot(&state);
        let mut events = tick(&mut state, &input);

        if let GamePhase::LevelComplete { new_level } = state.phase {
            let choice = upgrades
                .next()
                .map_or(UpgradeChoice::Decline, |&stat| UpgradeChoice::Stat(stat));
            log::info!("Level {} reached, choosing {:?}", new_level, choice);
            events.extend(state.confirm_upgrade(choice));
        }

        router.dispatch(&events, Some(&mut sink as &mut dyn AudioSink));

        for event in &events {
            if let GameEvent::GameOver {
                score,
                high_score: best,
                new_high_score,
            } = event
            {
                log::info!("Game over: score {} (best {})", score, best);
                if *new_high_score && high_score.record(*best) {
                    if let Err(e) = high_score.save_to(&highscore_path) {
                        log::warn!("Failed to save high score: {}", e);
                    }
                }
            }
        }

        if matches!(state.phase, GamePhase::GameOver { .. }) {
            break;
        }
    }

    match serde_json::to_string_pretty(&state.frame_view()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final frame: {}", e),
    }
}
