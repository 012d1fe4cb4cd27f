//! Audio routing
//!
//! The simulation only names sounds. This module filters the cues out of a
//! tick's events, applies the volume settings, and hands them to whatever
//! playback backend the host provides. No backend means silence, never a
//! change in gameplay.

use crate::sim::{GameEvent, SoundCue};

/// Playback backend supplied by the host
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Volume settings and cue forwarding
#[derive(Debug, Clone)]
pub struct AudioRouter {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioRouter {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward every sound cue in `events` to the sink. Returns how many played.
    pub fn dispatch(&self, events: &[GameEvent], sink: Option<&mut dyn AudioSink>) -> usize {
        let Some(sink) = sink else { return 0 };
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return 0;
        }
        let mut played = 0;
        for cue in events.iter().filter_map(GameEvent::sound) {
            sink.play(cue, vol);
            played += 1;
        }
        played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundCue, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            self.0.push((cue, volume));
        }
    }

    fn sample_events() -> Vec<GameEvent> {
        vec![
            GameEvent::Sound(SoundCue::ShotFired),
            GameEvent::LevelComplete { new_level: 2 },
            GameEvent::Sound(SoundCue::EntityExploded),
        ]
    }

    #[test]
    fn test_dispatch_forwards_cues_only() {
        let router = AudioRouter::new();
        let mut sink = Recorder::default();
        let played = router.dispatch(&sample_events(), Some(&mut sink as &mut dyn AudioSink));
        assert_eq!(played, 2);
        assert_eq!(sink.0[0].0.name(), "shot_fired");
        assert_eq!(sink.0[1].0.name(), "entity_exploded");
        assert!((sink.0[0].1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_muted_and_missing_sink_are_silent() {
        let mut router = AudioRouter::new();
        assert_eq!(router.dispatch(&sample_events(), None), 0);
        router.set_muted(true);
        let mut sink = Recorder::default();
        assert_eq!(router.dispatch(&sample_events(), Some(&mut sink as &mut dyn AudioSink)), 0);
        assert!(sink.0.is_empty());
    }
}
