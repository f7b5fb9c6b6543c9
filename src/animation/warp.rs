//! Star warp
//!
//! Stars burst out of the panel center. Position grows with the square of
//! the star's life, so they accelerate toward the edges, each dragging two
//! fading ghosts behind it.

use embassy_time::{Duration, Instant};
use libm::fabsf;
use rand::Rng;

use super::{Animation, Pacer, TickContext};
use crate::color::{gray, scale_brightness};
use crate::grid::{CENTER_X, CENTER_Y, Cell, contains};

const BASE_INTERVAL: Duration = Duration::from_millis(60);

/// Maximum number of warp stars alive at once
pub const WARP_POOL_SIZE: usize = 24;

const SPAWN_PERCENT: u8 = 40;
const MIN_LIFE_STEP: f32 = 0.05;
const LIFE_STEP_RANGE: f32 = 0.1;
const MIN_BRIGHTNESS: u8 = 60;
const BRIGHTNESS_RANGE: u8 = 120;
const MIN_DIRECTION: f32 = 0.3;
const FORCED_DIRECTION: f32 = 0.8;
const TRAVEL_SCALE: f32 = 20.0;

/// Head plus ghosts
const TRAIL_LENGTH: u8 = 3;
const TRAIL_LIFE_OFFSET: f32 = 0.02;
const TRAIL_FADE: f32 = 0.4;
const LIFE_FADE: f32 = 0.2;

/// Position of a star `life` (0.0-1.0) into its flight
pub fn warp_position(origin: (f32, f32), direction: (f32, f32), life: f32) -> (f32, f32) {
    let travel = life * life * TRAVEL_SCALE;
    (
        origin.0 + direction.0 * travel,
        origin.1 + direction.1 * travel,
    )
}

#[derive(Debug, Clone, Copy, Default)]
struct WarpStar {
    origin: (f32, f32),
    direction: (f32, f32),
    life: f32,
    life_step: f32,
    brightness: u8,
    active: bool,
}

#[derive(Debug, Clone)]
pub struct WarpAnimation {
    stars: [WarpStar; WARP_POOL_SIZE],
    pacer: Pacer,
}

impl Default for WarpAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl WarpAnimation {
    pub fn new() -> Self {
        Self {
            stars: [WarpStar::default(); WARP_POOL_SIZE],
            pacer: Pacer::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.stars.iter().filter(|star| star.active).count()
    }

    fn spawn(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.rng.gen_range(0..100u8) >= SPAWN_PERCENT {
            return;
        }
        let Some(star) = self.stars.iter_mut().find(|star| !star.active) else {
            return;
        };

        let origin = (
            CENTER_X + f32::from(ctx.rng.gen_range(-2..3i8)) * 0.5,
            CENTER_Y + f32::from(ctx.rng.gen_range(-1..2i8)) * 0.5,
        );
        let mut dx = f32::from(ctx.rng.gen_range(-100..=100i8)) / 50.0;
        let dy = f32::from(ctx.rng.gen_range(-100..=100i8)) / 50.0;
        if fabsf(dx) < MIN_DIRECTION {
            dx = if dx < 0.0 {
                -FORCED_DIRECTION
            } else {
                FORCED_DIRECTION
            };
        }
        let step_fraction = f32::from(ctx.rng.gen_range(0..50u8)) / 100.0;

        *star = WarpStar {
            origin,
            direction: (dx, dy),
            life: 0.0,
            life_step: ctx
                .speed()
                .step(MIN_LIFE_STEP + step_fraction * LIFE_STEP_RANGE),
            brightness: MIN_BRIGHTNESS + ctx.rng.gen_range(0..BRIGHTNESS_RANGE),
            active: true,
        };
    }
}

impl Animation for WarpAnimation {
    const HOUSEKEEPING_GRAIN: Duration = Duration::from_millis(500);

    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if !self.pacer.ready(now, ctx.interval(BASE_INTERVAL)) {
            return;
        }

        self.spawn(ctx);
        ctx.canvas.clear();

        for star in self.stars.iter_mut().filter(|star| star.active) {
            star.life += star.life_step;
            if star.life >= 1.0 {
                star.active = false;
                continue;
            }

            let life_fade = 1.0 - star.life * LIFE_FADE;
            for trail in 0..TRAIL_LENGTH {
                let trail = f32::from(trail);
                let life = star.life - trail * TRAIL_LIFE_OFFSET;
                if life <= 0.0 {
                    break;
                }
                let (x, y) = warp_position(star.origin, star.direction, life);
                if !contains(x, y) {
                    continue;
                }
                let fade = (1.0 - trail * TRAIL_FADE) * life_fade;
                ctx.canvas.plot(
                    Cell::from_position(x, y),
                    scale_brightness(gray(star.brightness), fade),
                );
            }
        }

        if ctx.is_cancelled() {
            return;
        }
        ctx.yield_now();
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
