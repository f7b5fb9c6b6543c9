//! Nebula swirl
//!
//! Every cell is colored from its polar coordinates around the panel
//! center: a rotating spiral plus a radial wave gives the intensity, three
//! phase-shifted sines give the hue.

use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};
use libm::{atan2f, sinf, sqrtf};

use super::{Animation, Pacer, TickContext};
use crate::color::{Rgb, nebula_bias};
use crate::grid::{CENTER_X, CENTER_Y, COLS, Cell, ROWS};
use crate::math8::unit8;

const BASE_INTERVAL: Duration = Duration::from_millis(80);

const ROTATION_STEP: f32 = 0.08;
const PHASE_STEP: f32 = 0.05;
const SPIRAL_TWIST: f32 = 0.3;
const RADIAL_FREQUENCY: f32 = 0.8;
const HUE_TWIST: f32 = 0.2;
const CHANNEL_SHIFT: f32 = 2.094;
const FALLOFF_REACH: f32 = 1.5;
const THRESHOLD: f32 = 0.1;

/// Color of the cell at (`col`, `row`) for a rotation and color phase
///
/// Returns `None` for cells too dim to draw.
pub fn nebula_color(col: i32, row: i32, rotation: f32, phase: f32) -> Option<Rgb> {
    let dx = col as f32 - CENTER_X;
    let dy = row as f32 - CENTER_Y;
    let distance = sqrtf(dx * dx + dy * dy);
    let angle = atan2f(dy, dx);

    let arm = angle + rotation + distance * SPIRAL_TWIST;
    let spiral = sinf(arm * 3.0) + sinf(arm * 2.0);
    let radial = sinf(distance * RADIAL_FREQUENCY + rotation * 2.0);
    let falloff = (1.0 - distance / (CENTER_X.max(CENTER_Y) * FALLOFF_REACH)).clamp(0.0, 1.0);
    let intensity = ((spiral + radial + 2.0) / 4.0).clamp(0.0, 1.0) * falloff;

    if intensity <= THRESHOLD {
        return None;
    }

    let hue = angle + phase + distance * HUE_TWIST;
    let channel = |shift: f32| unit8((sinf(hue + shift) + 1.0) * 127.0 * intensity);
    Some(nebula_bias(Rgb {
        r: channel(0.0),
        g: channel(CHANNEL_SHIFT),
        b: channel(CHANNEL_SHIFT * 2.0),
    }))
}

#[derive(Debug, Clone, Default)]
pub struct NebulaAnimation {
    rotation: f32,
    phase: f32,
    pacer: Pacer,
}

impl NebulaAnimation {
    pub const fn new() -> Self {
        Self {
            rotation: 0.0,
            phase: 0.0,
            pacer: Pacer::new(),
        }
    }

    /// Current `(rotation, phase)`, both in `0..TAU`
    pub const fn angles(&self) -> (f32, f32) {
        (self.rotation, self.phase)
    }
}

impl Animation for NebulaAnimation {
    const HOUSEKEEPING_GRAIN: Duration = Duration::from_millis(600);

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if !self.pacer.ready(now, ctx.interval(BASE_INTERVAL)) {
            return;
        }

        let speed = ctx.speed();
        self.rotation = (self.rotation + speed.step(ROTATION_STEP)) % TAU;
        self.phase = (self.phase + speed.step(PHASE_STEP)) % TAU;

        ctx.canvas.clear();
        for col in 0..COLS as i32 {
            if ctx.is_cancelled() {
                return;
            }
            for row in 0..ROWS as i32 {
                if let Some(color) = nebula_color(col, row, self.rotation, self.phase) {
                    ctx.canvas.plot(Cell::new(col, row), color);
                }
            }
            ctx.yield_now();
        }
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
