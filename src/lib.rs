#![no_std]

pub mod animation;
pub mod association;
pub mod channel;
pub mod color;
pub mod config;
pub mod control;
pub mod controls;
pub mod grid;
pub mod housekeeping;
pub mod indicator;
#[cfg(feature = "esp32-log")]
pub mod logging;
pub mod math8;
pub mod render;
pub mod scheduler;
pub mod sensor;
pub mod sink;

pub use animation::{AnimationMode, AnimationSlot};
pub use config::{EngineConfig, Timings};
pub use control::{ControlChannel, ControlError, ControlIntent, ControlReceiver, ControlSender};
pub use controls::{Controls, DrawingGrid, Speed};
pub use grid::{COLS, PIXEL_COUNT, ROWS, map_to_index};
pub use housekeeping::{Duties, Housekeeper, Housekeeping, Service, Watchdog};
pub use scheduler::{PassResult, Scheduler};
pub use sensor::{Reading, Sensor, SensorError};
pub use sink::{FrameBuffer, SmartLedsSink};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Write-only target representing the physical LED output
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait.
pub trait FramebufferSink {
    /// Set the pixel at a physical strip offset
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Turn every pixel off (not transmitted until [`flush`](Self::flush))
    fn clear(&mut self);

    /// Transmit the buffered frame to the strip
    fn flush(&mut self);
}

/// Source of wall-clock time for the scheduler
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the `embassy-time` driver of the target
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
