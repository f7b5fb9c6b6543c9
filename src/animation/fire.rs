//! Calm fire
//!
//! A one-dimensional cellular automaton per column: the bottom cell is
//! ignited at random, heat rises as the decayed average of the two cells
//! below, and the bottom cools every frame.

use embassy_time::{Duration, Instant};
use rand::Rng;

use super::{Animation, Pacer, TickContext};
use crate::color::Rgb;
use crate::grid::{COLS, Cell, ROWS};
use crate::math8::clamp8;

const BASE_INTERVAL: Duration = Duration::from_millis(80);

const IGNITION_PERCENT: u8 = 20;
const MIN_SPARK: i32 = 50;
const MAX_SPARK: i32 = 140;
const MAX_FLICKER: i32 = 30;
const MIN_COOLING: i32 = 40;
const MAX_COOLING: i32 = 100;

/// Warm color ramp: red dominant, blue capped low
pub fn heat_color(heat: u8) -> Rgb {
    Rgb {
        r: heat,
        g: heat / 2,
        b: (heat / 12).min(60),
    }
}

#[derive(Debug, Clone)]
pub struct FireAnimation {
    /// Heat per column, index 0 is the bottom cell
    heat: [[u8; ROWS]; COLS],
    pacer: Pacer,
}

impl Default for FireAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl FireAnimation {
    pub const fn new() -> Self {
        Self {
            heat: [[0; ROWS]; COLS],
            pacer: Pacer::new(),
        }
    }

    pub const fn heat(&self) -> &[[u8; ROWS]; COLS] {
        &self.heat
    }
}

impl Animation for FireAnimation {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if ctx.is_cancelled() || !self.pacer.ready(now, ctx.interval(BASE_INTERVAL)) {
            return;
        }

        ctx.canvas.clear();
        for (col, column) in (0..).zip(self.heat.iter_mut()) {
            if ctx.rng.gen_range(0..100u8) < IGNITION_PERCENT {
                column[0] = clamp8(i32::from(column[0]) + ctx.rng.gen_range(MIN_SPARK..MAX_SPARK));
            }

            for row in (1..ROWS).rev() {
                let below = i32::from(column[row - 1]);
                let further = if row > 1 { i32::from(column[row - 2]) } else { 0 };
                let flicker = ctx.rng.gen_range(0..MAX_FLICKER);
                column[row] = clamp8((below + further) / 2 - flicker);
            }

            column[0] = clamp8(i32::from(column[0]) - ctx.rng.gen_range(MIN_COOLING..MAX_COOLING));

            for (height, heat) in (0..).zip(column.iter()) {
                let row = ROWS as i32 - 1 - height;
                ctx.canvas.plot(Cell::new(col, row), heat_color(*heat));
            }
        }
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
