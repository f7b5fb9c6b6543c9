//! Auto cycle through a fixed playlist

use embassy_time::{Duration, Instant};

use super::AnimationMode;

/// Modes visited by [`AnimationMode::Auto`], in order
pub const AUTO_SEQUENCE: [AnimationMode; 6] = [
    AnimationMode::Temperature,
    AnimationMode::Starfield,
    AnimationMode::Warp,
    AnimationMode::Nebula,
    AnimationMode::Matrix,
    AnimationMode::Fire,
];

/// Playlist position and switch timer of the auto mode
#[derive(Debug, Clone)]
pub struct AutoCycle {
    index: usize,
    started: Option<Instant>,
    interval: Duration,
}

impl AutoCycle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            index: 0,
            started: None,
            interval,
        }
    }

    /// Rewind to the first entry, starting its timer at `now`
    pub fn restart(&mut self, now: Instant) {
        self.index = 0;
        self.started = Some(now);
    }

    pub fn current(&self) -> AnimationMode {
        AUTO_SEQUENCE[self.index]
    }

    /// Move to the next entry once the current one had its time
    ///
    /// Returns the newly selected mode on a switch.
    pub fn advance_if_due(&mut self, now: Instant) -> Option<AnimationMode> {
        let started = *self.started.get_or_insert(now);
        if now.saturating_duration_since(started) < self.interval {
            return None;
        }
        self.started = Some(now);
        self.index = (self.index + 1) % AUTO_SEQUENCE.len();
        Some(self.current())
    }
}
