//! Tick-counted timers
//!
//! Every cooldown and timed effect in the simulation is a `Countdown`: a
//! non-negative tick count that drops by one per simulation step. The step
//! that brings it to zero reports the expiry exactly once, so effects are
//! torn down on the transition rather than re-applied every idle tick.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown(u32);

impl Countdown {
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Restart the countdown
    pub fn set(&mut self, ticks: u32) {
        self.0 = ticks;
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.0 > 0
    }

    /// Advance one tick. Returns true only on the step that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_reported_once() {
        let mut t = Countdown::new(2);
        assert!(!t.tick());
        assert!(t.tick());
        assert!(!t.tick());
        assert!(!t.tick());
        assert_eq!(t.remaining(), 0);
    }

    #[test]
    fn test_idle_timer_never_fires() {
        let mut t = Countdown::default();
        for _ in 0..10 {
            assert!(!t.tick());
        }
        assert!(!t.is_active());
    }
}
