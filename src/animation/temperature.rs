//! Temperature readout
//!
//! Samples the sensor once per period and shows the reading as `NN.N°C`.
//! The display only changes when the value moved by more than
//! [`EPSILON`], so sensor noise does not flicker the digits. While the
//! sensor fails, or reports a value the readout cannot show, a red wave
//! scrolls across the panel instead.

use embassy_time::{Duration, Instant};
use libm::{fabsf, sinf};

use super::{Animation, Pacer, TickContext};
use crate::color::Rgb;
use crate::grid::{COLS, Cell};
use crate::render::{DecimalDigits, draw_temperature};

/// Sensor sampling period; independent of the speed multiplier
const SENSOR_PERIOD: Duration = Duration::from_secs(1);

/// Smallest change in °C that triggers a redraw
pub const EPSILON: f32 = 0.1;

const WAVE_STEP: Duration = Duration::from_millis(200);
const WAVE_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };
const WAVE_BASELINE: i32 = 3;
const WAVE_FREQUENCY: f32 = 0.5;
const WAVE_AMPLITUDE: f32 = 1.5;

#[allow(clippy::cast_possible_wrap)]
const WAVE_PERIOD: i32 = COLS as i32;

/// Row of the error wave at column `x` for a scroll `offset`
#[allow(clippy::cast_possible_truncation)]
pub fn wave_row(x: i32, offset: i32) -> i32 {
    WAVE_BASELINE + (sinf((x + offset) as f32 * WAVE_FREQUENCY) * WAVE_AMPLITUDE) as i32
}

#[derive(Debug, Clone, Default)]
pub struct TemperatureAnimation {
    /// Value currently on the panel
    shown: Option<f32>,
    failing: bool,
    sensor_pacer: Pacer,
    wave_pacer: Pacer,
    wave_offset: i32,
}

impl TemperatureAnimation {
    pub const fn new() -> Self {
        Self {
            shown: None,
            failing: false,
            sensor_pacer: Pacer::new(),
            wave_pacer: Pacer::new(),
            wave_offset: 0,
        }
    }

    pub const fn shown(&self) -> Option<f32> {
        self.shown
    }

    pub const fn is_failing(&self) -> bool {
        self.failing
    }

    fn sample(&mut self, ctx: &mut TickContext<'_>) {
        let reading = match ctx.sensor.try_read() {
            Ok(reading) => reading,
            Err(err) => {
                if self.enter_failure() {
                    log::warn!("temperature unavailable: {err}");
                }
                return;
            }
        };

        ctx.controls.telemetry_mut().record(reading);
        if !DecimalDigits::covers(reading.temperature) {
            if self.enter_failure() {
                log::warn!("temperature {:.1} C outside display range", reading.temperature);
            }
            return;
        }
        self.failing = false;

        let changed = self
            .shown
            .is_none_or(|shown| fabsf(reading.temperature - shown) > EPSILON);
        if changed {
            log::debug!("temperature {:.1} C", reading.temperature);
            self.shown = Some(reading.temperature);
            ctx.canvas.clear();
            draw_temperature(&mut ctx.canvas, reading.temperature);
            ctx.canvas.flush();
        }
    }

    /// Switch to the error wave; returns `true` on the first failure in a row
    fn enter_failure(&mut self) -> bool {
        let first = !self.failing;
        if first {
            self.wave_pacer.reset();
        }
        self.failing = true;
        self.shown = None;
        first
    }

    fn draw_wave(&mut self, ctx: &mut TickContext<'_>) {
        self.wave_offset = (self.wave_offset + 1) % WAVE_PERIOD;

        ctx.canvas.clear();
        for x in 0..WAVE_PERIOD {
            ctx.canvas
                .plot(Cell::new(x, wave_row(x, self.wave_offset)), WAVE_COLOR);
        }
        ctx.canvas.flush();
    }
}

impl Animation for TemperatureAnimation {
    const HOUSEKEEPING_GRAIN: Duration = Duration::from_millis(100);

    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if ctx.is_cancelled() {
            return;
        }
        if self.sensor_pacer.ready(now, SENSOR_PERIOD) {
            self.sample(ctx);
            ctx.yield_now();
        }
        if self.failing && self.wave_pacer.ready(now, WAVE_STEP) {
            self.draw_wave(ctx);
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
