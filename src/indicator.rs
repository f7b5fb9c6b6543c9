//! Connection status shown on the four corner pixels

use embassy_time::{Duration, Instant};
use libm::sinf;

use crate::animation::Pacer;
use crate::color::{BLACK, Rgb};
use crate::grid::{COLS, Cell, ROWS};
use crate::math8::unit8;
use crate::render::Canvas;

#[allow(clippy::cast_possible_wrap)]
pub const CORNERS: [Cell; 4] = [
    Cell::new(0, 0),
    Cell::new(COLS as i32 - 1, 0),
    Cell::new(0, ROWS as i32 - 1),
    Cell::new(COLS as i32 - 1, ROWS as i32 - 1),
];

const PULSE_STEP: Duration = Duration::from_millis(50);
const PULSE_PERIOD: u8 = 100;
const PULSE_BASE: f32 = 32.0;
const PULSE_DEPTH: f32 = 32.0;
/// Roughly 2π / [`PULSE_PERIOD`]
const PULSE_RATE: f32 = 0.0628;

const FLASH_DURATION: Duration = Duration::from_millis(100);
const DISCONNECTED_COLOR: Rgb = Rgb { r: 127, g: 0, b: 0 };
const RECONNECTED_COLOR: Rgb = Rgb { r: 0, g: 127, b: 0 };

/// Paint all four corners and leave the rest of the frame untouched
pub fn paint_corners(canvas: &mut Canvas<'_>, color: Rgb) {
    for corner in CORNERS {
        canvas.plot(corner, color);
    }
}

/// Brightness of the provisioning pulse at `phase` (0-99)
pub fn pulse_level(phase: u8) -> u8 {
    unit8(PULSE_BASE + PULSE_DEPTH * sinf(f32::from(phase) * PULSE_RATE))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    /// Link lost (red)
    Disconnected,
    /// Link back (green)
    Reconnected,
}

impl Flash {
    const fn color(self) -> Rgb {
        match self {
            Self::Disconnected => DISCONNECTED_COLOR,
            Self::Reconnected => RECONNECTED_COLOR,
        }
    }
}

/// Non-blocking corner indicator
///
/// Call [`pulse`](Self::pulse) repeatedly while provisioning, and
/// [`update`](Self::update) every pass to end flashes on time.
#[derive(Debug, Clone, Default)]
pub struct StatusIndicator {
    phase: u8,
    pacer: Pacer,
    flash_started: Option<Instant>,
}

impl StatusIndicator {
    pub const fn new() -> Self {
        Self {
            phase: 0,
            pacer: Pacer::new(),
            flash_started: None,
        }
    }

    /// Step the purple provisioning pulse; returns `true` if a frame was sent
    pub fn pulse(&mut self, now: Instant, canvas: &mut Canvas<'_>) -> bool {
        if !self.pacer.ready(now, PULSE_STEP) {
            return false;
        }
        self.phase = (self.phase + 1) % PULSE_PERIOD;

        let level = pulse_level(self.phase);
        paint_corners(
            canvas,
            Rgb {
                r: level,
                g: 0,
                b: level,
            },
        );
        canvas.flush();
        true
    }

    /// Light the corners; they go dark again on a later [`update`](Self::update)
    pub fn flash(&mut self, flash: Flash, now: Instant, canvas: &mut Canvas<'_>) {
        log::debug!("status flash {flash:?}");
        paint_corners(canvas, flash.color());
        canvas.flush();
        self.flash_started = Some(now);
    }

    /// End a flash whose time is up; returns `true` if the corners were cleared
    pub fn update(&mut self, now: Instant, canvas: &mut Canvas<'_>) -> bool {
        let Some(started) = self.flash_started else {
            return false;
        };
        if now.saturating_duration_since(started) < FLASH_DURATION {
            return false;
        }
        paint_corners(canvas, BLACK);
        canvas.flush();
        self.flash_started = None;
        true
    }

    pub const fn is_flashing(&self) -> bool {
        self.flash_started.is_some()
    }

    pub const fn phase(&self) -> u8 {
        self.phase
    }
}
