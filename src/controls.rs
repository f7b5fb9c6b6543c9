//! Process-wide state shared by the scheduler and every animation
//!
//! Only the scheduler holds a `&mut Controls` outside of a tick; external
//! requests reach it through [`crate::Scheduler`] methods or the control
//! channel.

use embassy_time::Duration;

use crate::animation::AnimationMode;
use crate::color::{BLACK, Rgb, rgb_from_u32};
use crate::grid::{COLS, ROWS};
use crate::sensor::Reading;

/// Default selected color (green)
pub const DEFAULT_COLOR: Rgb = rgb_from_u32(0x00_FF_00);

/// Global animation speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f32);

impl Speed {
    pub const MIN: f32 = 0.2;
    pub const MAX: f32 = 3.0;
    pub const NORMAL: Self = Self(1.0);

    /// Create a speed, clamping into [`Speed::MIN`]..=[`Speed::MAX`]
    ///
    /// `NaN` falls back to normal speed.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::NORMAL;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Check if `value` is accepted without clamping
    pub fn accepts(value: f32) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }

    pub const fn value(self) -> f32 {
        self.0
    }

    /// Base interval divided by the multiplier, rounded to the microsecond
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn interval(self, base: Duration) -> Duration {
        let micros = libm::roundf(base.as_micros() as f32 / self.0);
        Duration::from_micros(micros as u64)
    }

    /// Scale a per-step increment
    pub fn step(self, base: f32) -> f32 {
        base * self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// User-authored 32x7 picture shown by the draw mode
///
/// Black cells are off. The grid outlives mode changes.
#[derive(Debug, Clone)]
pub struct DrawingGrid {
    cells: [[Rgb; ROWS]; COLS],
    dirty: bool,
}

impl DrawingGrid {
    pub const fn new() -> Self {
        Self {
            cells: [[BLACK; ROWS]; COLS],
            dirty: true,
        }
    }

    /// Color of a cell, `None` outside the grid
    pub fn get(&self, col: i32, row: i32) -> Option<Rgb> {
        let (col, row) = Self::position(col, row)?;
        Some(self.cells[col][row])
    }

    /// Set one cell; out-of-range cells are ignored
    ///
    /// Returns `true` if the cell was on the grid.
    pub fn set(&mut self, col: i32, row: i32, color: Rgb) -> bool {
        let Some((col, row)) = Self::position(col, row) else {
            return false;
        };
        self.cells[col][row] = color;
        self.dirty = true;
        true
    }

    /// Turn every cell off
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Set every cell to one color
    pub fn fill(&mut self, color: Rgb) {
        for column in &mut self.cells {
            column.fill(color);
        }
        self.dirty = true;
    }

    /// Replace the picture with a one-cell frame around the edge
    pub fn border(&mut self, color: Rgb) {
        self.clear();
        for (col, column) in self.cells.iter_mut().enumerate() {
            for (row, cell) in column.iter_mut().enumerate() {
                if row == 0 || row == ROWS - 1 || col == 0 || col == COLS - 1 {
                    *cell = color;
                }
            }
        }
    }

    /// Iterate over lit cells as `(col, row, color)`
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn lit_cells(&self) -> impl Iterator<Item = (i32, i32, Rgb)> + '_ {
        self.cells.iter().enumerate().flat_map(|(col, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, color)| **color != BLACK)
                .map(move |(row, color)| (col as i32, row as i32, *color))
        })
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and lower the redraw flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    #[allow(clippy::cast_sign_loss)]
    fn position(col: i32, row: i32) -> Option<(usize, usize)> {
        let col = usize::try_from(col).ok().filter(|col| *col < COLS)?;
        let row = usize::try_from(row).ok().filter(|row| *row < ROWS)?;
        Some((col, row))
    }
}

impl Default for DrawingGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Last accepted sensor reading
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Telemetry {
    reading: Option<Reading>,
}

impl Telemetry {
    pub fn record(&mut self, reading: Reading) {
        self.reading = Some(reading);
    }

    pub fn temperature(&self) -> Option<f32> {
        self.reading.map(|reading| reading.temperature)
    }

    pub fn humidity(&self) -> Option<f32> {
        self.reading.map(|reading| reading.humidity)
    }
}

/// Shared engine state
#[derive(Debug, Clone)]
pub struct Controls {
    speed: Speed,
    color: Rgb,
    grid: DrawingGrid,
    telemetry: Telemetry,
    requested_mode: Option<AnimationMode>,
}

impl Controls {
    pub fn new(speed: Speed, color: Rgb) -> Self {
        Self {
            speed,
            color,
            grid: DrawingGrid::new(),
            telemetry: Telemetry::default(),
            requested_mode: None,
        }
    }

    pub const fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Currently selected color
    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub const fn grid(&self) -> &DrawingGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut DrawingGrid {
        &mut self.grid
    }

    pub const fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut Telemetry {
        &mut self.telemetry
    }

    /// Queue a mode change for the next scheduler pass
    ///
    /// A later request in the same pass replaces an earlier one.
    pub fn request_mode(&mut self, mode: AnimationMode) {
        self.requested_mode = Some(mode);
    }

    pub fn take_requested_mode(&mut self) -> Option<AnimationMode> {
        self.requested_mode.take()
    }

    pub const fn has_requested_mode(&self) -> bool {
        self.requested_mode.is_some()
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(Speed::NORMAL, DEFAULT_COLOR)
    }
}
