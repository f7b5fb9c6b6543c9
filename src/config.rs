//! Engine configuration

use embassy_time::Duration;

use crate::animation::AnimationMode;
use crate::color::Rgb;
use crate::controls::{DEFAULT_COLOR, Speed};

/// Timing knobs of the scheduler and its collaborators
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Time each animation stays on screen in auto mode
    pub auto_cycle: Duration,
    /// Soft deadline for feeding the watchdog
    pub watchdog_feed: Duration,
    /// Sleep requested at the end of every scheduler pass
    pub pass_yield: Duration,
    /// How long network association may take before giving up
    pub association_timeout: Duration,
    /// Corner blink period while associating
    pub association_blink: Duration,
    /// Poll period of the association loop
    pub association_poll: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            auto_cycle: Duration::from_secs(10),
            watchdog_feed: Duration::from_secs(1),
            pass_yield: Duration::from_millis(10),
            association_timeout: Duration::from_secs(30),
            association_blink: Duration::from_millis(200),
            association_poll: Duration::from_millis(100),
        }
    }
}

/// Configuration for the scheduler
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Mode selected at start-up
    pub mode: AnimationMode,
    pub speed: Speed,
    /// Initially selected color for the color picker and drawing
    pub color: Rgb,
    /// Seed for the animations' random number generator
    pub seed: u64,
    pub timings: Timings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: AnimationMode::Auto,
            speed: Speed::NORMAL,
            color: DEFAULT_COLOR,
            seed: 0x5eed_1ed5,
            timings: Timings::default(),
        }
    }
}
