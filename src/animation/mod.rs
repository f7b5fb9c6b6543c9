//! Animation system with compile-time known variants
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each animation implements the `Animation` trait and owns its state, so
//! every activation starts from a clean slate.

mod auto;
mod color_picker;
mod draw;
mod fire;
mod lines;
mod matrix_rain;
mod nebula;
mod red;
mod starfield;
mod temperature;
mod warp;

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;

pub use auto::{AUTO_SEQUENCE, AutoCycle};
pub use color_picker::ColorPickerAnimation;
pub use draw::DrawAnimation;
pub use fire::{FireAnimation, heat_color};
pub use lines::{Endpoint, LinesAnimation};
pub use matrix_rain::{MatrixRainAnimation, TRAIL_LENGTH, tail_color};
pub use nebula::{NebulaAnimation, nebula_color};
pub use red::{AllRedAnimation, DIM_RED};
pub use starfield::{STARFIELD_POOL_SIZE, StarfieldAnimation};
pub use temperature::{EPSILON as TEMPERATURE_EPSILON, TemperatureAnimation, wave_row};
pub use warp::{WARP_POOL_SIZE, WarpAnimation, warp_position};

use crate::channel::Signal;
use crate::controls::{Controls, Speed};
use crate::render::Canvas;
use crate::sensor::Sensor;

const MODE_NAME_TEMPERATURE: &str = "temperature";
const MODE_NAME_LINES: &str = "lines";
const MODE_NAME_STARFIELD: &str = "starfield";
const MODE_NAME_WARP: &str = "warp";
const MODE_NAME_NEBULA: &str = "nebula";
const MODE_NAME_RED: &str = "red";
const MODE_NAME_AUTO: &str = "auto";
const MODE_NAME_MATRIX: &str = "matrix";
const MODE_NAME_FIRE: &str = "fire";
const MODE_NAME_COLOR_PICKER: &str = "color_picker";
const MODE_NAME_DRAW: &str = "draw";

const MODE_ID_TEMPERATURE: u8 = 0;
const MODE_ID_LINES: u8 = 1;
const MODE_ID_STARFIELD: u8 = 2;
const MODE_ID_WARP: u8 = 3;
const MODE_ID_NEBULA: u8 = 4;
const MODE_ID_RED: u8 = 5;
const MODE_ID_AUTO: u8 = 6;
const MODE_ID_MATRIX: u8 = 7;
const MODE_ID_FIRE: u8 = 8;
const MODE_ID_COLOR_PICKER: u8 = 9;
const MODE_ID_DRAW: u8 = 10;

/// Housekeeping grain meaning "on every scheduler pass"
pub const EVERY_PASS: Duration = Duration::from_millis(0);

pub trait Animation {
    /// Longest time this animation may go without servicing housekeeping
    const HOUSEKEEPING_GRAIN: Duration = EVERY_PASS;

    /// Advance one frame if the animation's own interval has elapsed
    ///
    /// Safe to call on every scheduler pass.
    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>);

    /// Reset animation state
    fn reset(&mut self) {}
}

/// Callback used by long-running ticks to let housekeeping run
pub trait YieldPoint {
    fn yield_now(&mut self);
}

/// Yield point that never services anything
#[derive(Debug, Default)]
pub struct NoYield;

impl YieldPoint for NoYield {
    fn yield_now(&mut self) {}
}

/// Everything an animation may touch during one tick
pub struct TickContext<'a> {
    pub canvas: Canvas<'a>,
    pub controls: &'a mut Controls,
    pub rng: &'a mut SmallRng,
    pub sensor: &'a mut dyn Sensor,
    yielder: &'a mut dyn YieldPoint,
    cancel: &'a Signal,
}

impl<'a> TickContext<'a> {
    pub fn new(
        canvas: Canvas<'a>,
        controls: &'a mut Controls,
        rng: &'a mut SmallRng,
        sensor: &'a mut dyn Sensor,
        yielder: &'a mut dyn YieldPoint,
        cancel: &'a Signal,
    ) -> Self {
        Self {
            canvas,
            controls,
            rng,
            sensor,
            yielder,
            cancel,
        }
    }

    pub fn speed(&self) -> Speed {
        self.controls.speed()
    }

    /// Speed-adjusted frame interval
    pub fn interval(&self, base: Duration) -> Duration {
        self.speed().interval(base)
    }

    /// Give housekeeping a chance to run in the middle of a frame
    pub fn yield_now(&mut self) {
        self.yielder.yield_now();
    }

    /// Check if a mode change is waiting; remaining frame work should be skipped
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_raised() || self.controls.has_requested_mode()
    }
}

/// Gate that opens once per interval
#[derive(Debug, Clone, Copy, Default)]
pub struct Pacer {
    last: Option<Instant>,
}

impl Pacer {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns `true` (and restarts the interval) when a frame is due
    ///
    /// The first call after construction or reset is always due.
    pub fn ready(&mut self, now: Instant, interval: Duration) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Animation slot - enum containing all concrete animations
#[derive(Debug, Clone)]
pub enum AnimationSlot {
    Temperature(TemperatureAnimation),
    Lines(LinesAnimation),
    Starfield(StarfieldAnimation),
    Warp(WarpAnimation),
    Nebula(NebulaAnimation),
    Red(AllRedAnimation),
    Matrix(MatrixRainAnimation),
    Fire(FireAnimation),
    ColorPicker(ColorPickerAnimation),
    Draw(DrawAnimation),
}

/// Known modes that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AnimationMode {
    Temperature = MODE_ID_TEMPERATURE,
    Lines = MODE_ID_LINES,
    Starfield = MODE_ID_STARFIELD,
    Warp = MODE_ID_WARP,
    Nebula = MODE_ID_NEBULA,
    Red = MODE_ID_RED,
    /// Rotates through [`AUTO_SEQUENCE`]
    #[default]
    Auto = MODE_ID_AUTO,
    Matrix = MODE_ID_MATRIX,
    Fire = MODE_ID_FIRE,
    ColorPicker = MODE_ID_COLOR_PICKER,
    Draw = MODE_ID_DRAW,
}

impl AnimationMode {
    pub const ALL: [Self; 11] = [
        Self::Temperature,
        Self::Lines,
        Self::Starfield,
        Self::Warp,
        Self::Nebula,
        Self::Red,
        Self::Auto,
        Self::Matrix,
        Self::Fire,
        Self::ColorPicker,
        Self::Draw,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_TEMPERATURE => Self::Temperature,
            MODE_ID_LINES => Self::Lines,
            MODE_ID_STARFIELD => Self::Starfield,
            MODE_ID_WARP => Self::Warp,
            MODE_ID_NEBULA => Self::Nebula,
            MODE_ID_RED => Self::Red,
            MODE_ID_AUTO => Self::Auto,
            MODE_ID_MATRIX => Self::Matrix,
            MODE_ID_FIRE => Self::Fire,
            MODE_ID_COLOR_PICKER => Self::ColorPicker,
            MODE_ID_DRAW => Self::Draw,
            _ => return None,
        })
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Build a fresh animation for a concrete mode; `None` for [`Self::Auto`]
    pub fn to_slot(self) -> Option<AnimationSlot> {
        Some(match self {
            Self::Temperature => AnimationSlot::Temperature(TemperatureAnimation::new()),
            Self::Lines => AnimationSlot::Lines(LinesAnimation::new()),
            Self::Starfield => AnimationSlot::Starfield(StarfieldAnimation::new()),
            Self::Warp => AnimationSlot::Warp(WarpAnimation::new()),
            Self::Nebula => AnimationSlot::Nebula(NebulaAnimation::new()),
            Self::Red => AnimationSlot::Red(AllRedAnimation::new()),
            Self::Matrix => AnimationSlot::Matrix(MatrixRainAnimation::new()),
            Self::Fire => AnimationSlot::Fire(FireAnimation::new()),
            Self::ColorPicker => AnimationSlot::ColorPicker(ColorPickerAnimation::new()),
            Self::Draw => AnimationSlot::Draw(DrawAnimation::new()),
            Self::Auto => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => MODE_NAME_TEMPERATURE,
            Self::Lines => MODE_NAME_LINES,
            Self::Starfield => MODE_NAME_STARFIELD,
            Self::Warp => MODE_NAME_WARP,
            Self::Nebula => MODE_NAME_NEBULA,
            Self::Red => MODE_NAME_RED,
            Self::Auto => MODE_NAME_AUTO,
            Self::Matrix => MODE_NAME_MATRIX,
            Self::Fire => MODE_NAME_FIRE,
            Self::ColorPicker => MODE_NAME_COLOR_PICKER,
            Self::Draw => MODE_NAME_DRAW,
        }
    }

    /// Human readable name shown by the control page
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Lines => "Qix Lines",
            Self::Starfield => "Starfield",
            Self::Warp => "Star Warp",
            Self::Nebula => "Nebula Swirl",
            Self::Red => "All Red (10%)",
            Self::Auto => "Auto Cycle",
            Self::Matrix => "Matrix Rain",
            Self::Fire => "Fire Effect",
            Self::ColorPicker => "Color Picker",
            Self::Draw => "Draw Mode",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }
}

impl AnimationSlot {
    /// Advance the current animation
    pub fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        match self {
            Self::Temperature(animation) => animation.tick(now, ctx),
            Self::Lines(animation) => animation.tick(now, ctx),
            Self::Starfield(animation) => animation.tick(now, ctx),
            Self::Warp(animation) => animation.tick(now, ctx),
            Self::Nebula(animation) => animation.tick(now, ctx),
            Self::Red(animation) => animation.tick(now, ctx),
            Self::Matrix(animation) => animation.tick(now, ctx),
            Self::Fire(animation) => animation.tick(now, ctx),
            Self::ColorPicker(animation) => animation.tick(now, ctx),
            Self::Draw(animation) => animation.tick(now, ctx),
        }
    }

    /// Reset the animation state
    pub fn reset(&mut self) {
        match self {
            Self::Temperature(animation) => Animation::reset(animation),
            Self::Lines(animation) => Animation::reset(animation),
            Self::Starfield(animation) => Animation::reset(animation),
            Self::Warp(animation) => Animation::reset(animation),
            Self::Nebula(animation) => Animation::reset(animation),
            Self::Red(animation) => Animation::reset(animation),
            Self::Matrix(animation) => Animation::reset(animation),
            Self::Fire(animation) => Animation::reset(animation),
            Self::ColorPicker(animation) => Animation::reset(animation),
            Self::Draw(animation) => Animation::reset(animation),
        }
    }

    /// Get the mode for external observation
    pub fn mode(&self) -> AnimationMode {
        match self {
            Self::Temperature(_) => AnimationMode::Temperature,
            Self::Lines(_) => AnimationMode::Lines,
            Self::Starfield(_) => AnimationMode::Starfield,
            Self::Warp(_) => AnimationMode::Warp,
            Self::Nebula(_) => AnimationMode::Nebula,
            Self::Red(_) => AnimationMode::Red,
            Self::Matrix(_) => AnimationMode::Matrix,
            Self::Fire(_) => AnimationMode::Fire,
            Self::ColorPicker(_) => AnimationMode::ColorPicker,
            Self::Draw(_) => AnimationMode::Draw,
        }
    }

    /// Derived from each animation's `Animation::HOUSEKEEPING_GRAIN`
    pub fn housekeeping_grain(&self) -> Duration {
        match self {
            Self::Temperature(_) => TemperatureAnimation::HOUSEKEEPING_GRAIN,
            Self::Lines(_) => LinesAnimation::HOUSEKEEPING_GRAIN,
            Self::Starfield(_) => StarfieldAnimation::HOUSEKEEPING_GRAIN,
            Self::Warp(_) => WarpAnimation::HOUSEKEEPING_GRAIN,
            Self::Nebula(_) => NebulaAnimation::HOUSEKEEPING_GRAIN,
            Self::Red(_) => AllRedAnimation::HOUSEKEEPING_GRAIN,
            Self::Matrix(_) => MatrixRainAnimation::HOUSEKEEPING_GRAIN,
            Self::Fire(_) => FireAnimation::HOUSEKEEPING_GRAIN,
            Self::ColorPicker(_) => ColorPickerAnimation::HOUSEKEEPING_GRAIN,
            Self::Draw(_) => DrawAnimation::HOUSEKEEPING_GRAIN,
        }
    }
}
