//! Matrix rain
//!
//! One falling head per column with a short green tail. Heads restart above
//! the panel at random heights and with a random delay, so columns never
//! fall in lockstep.

use embassy_time::{Duration, Instant};
use rand::Rng;

use super::{Animation, Pacer, TickContext};
use crate::color::Rgb;
use crate::grid::{COLS, Cell, ROWS};

const BASE_INTERVAL: Duration = Duration::from_millis(90);

/// Lit cells per column, head included
pub const TRAIL_LENGTH: u8 = 3;
const HEAD_COLOR: Rgb = Rgb {
    r: 180,
    g: 255,
    b: 180,
};
const TAIL_GREEN: u8 = 200;
const TAIL_FADE: u8 = 50;
const RESET_PERCENT: u8 = 40;

#[allow(clippy::cast_possible_wrap)]
const BOTTOM: i32 = ROWS as i32;

/// Green level of the tail cell `distance` rows behind the head
pub const fn tail_color(distance: u8) -> Rgb {
    Rgb {
        r: 0,
        g: TAIL_GREEN.saturating_sub(TAIL_FADE * distance),
        b: 0,
    }
}

#[derive(Debug, Clone)]
pub struct MatrixRainAnimation {
    /// Head row per column; negative rows are above the panel
    heads: [i32; COLS],
    seeded: bool,
    pacer: Pacer,
}

impl Default for MatrixRainAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixRainAnimation {
    pub const fn new() -> Self {
        Self {
            heads: [0; COLS],
            seeded: false,
            pacer: Pacer::new(),
        }
    }

    pub const fn heads(&self) -> &[i32; COLS] {
        &self.heads
    }
}

impl Animation for MatrixRainAnimation {
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if ctx.is_cancelled() || !self.pacer.ready(now, ctx.interval(BASE_INTERVAL)) {
            return;
        }

        if !self.seeded {
            for head in &mut self.heads {
                *head = -ctx.rng.gen_range(1..=7);
            }
            self.seeded = true;
        }

        ctx.canvas.clear();
        for (col, head) in (0..).zip(self.heads.iter_mut()) {
            *head += 1;
            if *head > BOTTOM + ctx.rng.gen_range(2..4)
                && ctx.rng.gen_range(0..100u8) < RESET_PERCENT
            {
                *head = -ctx.rng.gen_range(1..7);
            }

            ctx.canvas.plot(Cell::new(col, *head), HEAD_COLOR);
            for distance in 1..TRAIL_LENGTH {
                ctx.canvas.plot(
                    Cell::new(col, *head - i32::from(distance)),
                    tail_color(distance),
                );
            }
        }
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
