//! Persisted high score
//!
//! One number survives between sessions. The simulation reads it at startup
//! and proposes a new value when a run ends; this module stores it as a
//! small JSON file.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Keep the score if it beats the best. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from a JSON file; missing or unreadable files start fresh
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read high score {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<HighScore>(&json) {
            Ok(score) => {
                log::info!("Loaded high score {}", score.best);
                score
            }
            Err(e) => {
                log::warn!("Corrupt high score file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to a JSON file
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_only_improvements() {
        let mut hs = HighScore::new(500);
        assert!(!hs.record(500));
        assert!(!hs.record(10));
        assert!(hs.record(501));
        assert_eq!(hs.best, 501);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("shadow-self-hs-{}.json", std::process::id()));
        HighScore::new(4242).save_to(&path).unwrap();
        assert_eq!(HighScore::load_from(&path).best, 4242);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(HighScore::load_from(&path), HighScore::default());
        let _ = std::fs::remove_file(&path);
    }
}
