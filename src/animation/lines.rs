//! Qix-style bouncing lines
//!
//! Two segments whose endpoints drift independently and bounce off the
//! panel edges. No randomness: the same start always gives the same motion.

use embassy_time::{Duration, Instant};

use super::{Animation, Pacer, TickContext};
use crate::color::Rgb;
use crate::grid::{COLS, ROWS};
use crate::render::draw_line;

const BASE_INTERVAL: Duration = Duration::from_millis(50);

const MAX_X: f32 = (COLS - 1) as f32;
const MAX_Y: f32 = (ROWS - 1) as f32;

const CYAN: Rgb = Rgb { r: 0, g: 100, b: 100 };
const MAGENTA: Rgb = Rgb { r: 100, g: 0, b: 100 };

/// Moving point with elastic reflection at the grid boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Endpoint {
    const fn new(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self { x, y, dx, dy }
    }

    fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;

        if self.x <= 0.0 || self.x >= MAX_X {
            self.dx = -self.dx;
            self.x = self.x.clamp(0.0, MAX_X);
        }
        if self.y <= 0.0 || self.y >= MAX_Y {
            self.dy = -self.dy;
            self.y = self.y.clamp(0.0, MAX_Y);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Endpoint,
    end: Endpoint,
    color: Rgb,
}

impl Segment {
    fn advance(&mut self) {
        self.start.advance();
        self.end.advance();
    }
}

const INITIAL_SEGMENTS: [Segment; 2] = [
    Segment {
        start: Endpoint::new(16.0, 3.5, 0.3, 0.2),
        end: Endpoint::new(24.0, 2.0, -0.4, 0.3),
        color: CYAN,
    },
    Segment {
        start: Endpoint::new(8.0, 1.0, 0.5, 0.1),
        end: Endpoint::new(12.0, 5.5, -0.2, -0.4),
        color: MAGENTA,
    },
];

#[derive(Debug, Clone)]
pub struct LinesAnimation {
    segments: [Segment; 2],
    pacer: Pacer,
}

impl Default for LinesAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl LinesAnimation {
    pub const fn new() -> Self {
        Self {
            segments: INITIAL_SEGMENTS,
            pacer: Pacer::new(),
        }
    }

    /// Current endpoints of both segments as `(start, end)` pairs
    pub fn endpoints(&self) -> [(Endpoint, Endpoint); 2] {
        self.segments.map(|segment| (segment.start, segment.end))
    }
}

impl Animation for LinesAnimation {
    const HOUSEKEEPING_GRAIN: Duration = Duration::from_millis(500);

    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if !self.pacer.ready(now, ctx.interval(BASE_INTERVAL)) {
            return;
        }

        ctx.canvas.clear();
        for segment in &mut self.segments {
            if ctx.is_cancelled() {
                return;
            }
            segment.advance();
            draw_line(
                &mut ctx.canvas,
                segment.start.x,
                segment.start.y,
                segment.end.x,
                segment.end.y,
                segment.color,
            );
            ctx.yield_now();
        }
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
