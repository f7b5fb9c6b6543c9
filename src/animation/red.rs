//! Solid dim red

use embassy_time::{Duration, Instant};

use super::{Animation, TickContext};
use crate::color::Rgb;

/// Red at 10 % of full scale
pub const DIM_RED: Rgb = Rgb { r: 25, g: 0, b: 0 };

/// Paints the whole panel once per activation, then idles
#[derive(Debug, Clone, Default)]
pub struct AllRedAnimation {
    painted: bool,
}

impl AllRedAnimation {
    pub const fn new() -> Self {
        Self { painted: false }
    }

    pub const fn is_painted(&self) -> bool {
        self.painted
    }
}

impl Animation for AllRedAnimation {
    const HOUSEKEEPING_GRAIN: Duration = Duration::from_millis(100);

    fn tick(&mut self, _now: Instant, ctx: &mut TickContext<'_>) {
        if self.painted || ctx.is_cancelled() {
            return;
        }
        ctx.canvas.fill(DIM_RED);
        ctx.canvas.flush();
        self.painted = true;
    }

    fn reset(&mut self) {
        self.painted = false;
    }
}
