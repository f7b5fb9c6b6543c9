//! Horizontal starfield
//!
//! Stars enter at the left edge on a random row and drift right at their
//! own speed until they leave the panel.

use embassy_time::{Duration, Instant};
use rand::Rng;

use super::{Animation, Pacer, TickContext};
use crate::color::gray;
use crate::grid::{COLS, Cell, ROWS, contains};

const BASE_INTERVAL: Duration = Duration::from_millis(80);

/// Maximum number of stars on screen at once
pub const STARFIELD_POOL_SIZE: usize = 16;

const DEFAULT_SPAWN_PERCENT: u8 = 30;
const MIN_STEP: f32 = 0.2;
const STEP_RANGE: f32 = 0.8;
const MIN_BRIGHTNESS: u8 = 50;
const BRIGHTNESS_RANGE: u8 = 150;
const SPAWN_X: f32 = -1.0;

#[derive(Debug, Clone, Copy, Default)]
struct Star {
    x: f32,
    row: i32,
    step: f32,
    brightness: u8,
    active: bool,
}

#[derive(Debug, Clone)]
pub struct StarfieldAnimation {
    stars: [Star; STARFIELD_POOL_SIZE],
    spawn_percent: u8,
    pacer: Pacer,
}

impl Default for StarfieldAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl StarfieldAnimation {
    pub fn new() -> Self {
        Self {
            stars: [Star::default(); STARFIELD_POOL_SIZE],
            spawn_percent: DEFAULT_SPAWN_PERCENT,
            pacer: Pacer::new(),
        }
    }

    /// Set the chance (0-100) of spawning a star on each frame
    #[must_use]
    pub fn with_spawn_percent(mut self, percent: u8) -> Self {
        self.spawn_percent = percent.min(100);
        self
    }

    /// Number of stars currently on their way across the panel
    pub fn active_count(&self) -> usize {
        self.stars.iter().filter(|star| star.active).count()
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn spawn(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.rng.gen_range(0..100u8) >= self.spawn_percent {
            return;
        }
        let Some(star) = self.stars.iter_mut().find(|star| !star.active) else {
            return;
        };

        let fraction = f32::from(ctx.rng.gen_range(0..100u8)) / 100.0;
        *star = Star {
            x: SPAWN_X,
            row: ctx.rng.gen_range(0..ROWS as i32),
            step: ctx.speed().step(MIN_STEP + fraction * STEP_RANGE),
            brightness: MIN_BRIGHTNESS + ctx.rng.gen_range(0..BRIGHTNESS_RANGE),
            active: true,
        };
    }
}

impl Animation for StarfieldAnimation {
    const HOUSEKEEPING_GRAIN: Duration = Duration::from_millis(500);

    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if !self.pacer.ready(now, ctx.interval(BASE_INTERVAL)) {
            return;
        }

        self.spawn(ctx);
        ctx.canvas.clear();

        for star in self.stars.iter_mut().filter(|star| star.active) {
            star.x += star.step;
            if star.x >= COLS as f32 {
                star.active = false;
                continue;
            }
            let y = star.row as f32;
            if contains(star.x, y) {
                ctx.canvas
                    .plot(Cell::from_position(star.x, y), gray(star.brightness));
            }
        }

        if ctx.is_cancelled() {
            return;
        }
        ctx.yield_now();
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        self.stars = [Star::default(); STARFIELD_POOL_SIZE];
        self.pacer.reset();
    }
}
