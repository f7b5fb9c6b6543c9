//! Solid fill with the selected color

use embassy_time::{Duration, Instant};

use super::{Animation, Pacer, TickContext};

/// Refresh period; not affected by the speed multiplier
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Default)]
pub struct ColorPickerAnimation {
    pacer: Pacer,
}

impl ColorPickerAnimation {
    pub const fn new() -> Self {
        Self {
            pacer: Pacer::new(),
        }
    }
}

impl Animation for ColorPickerAnimation {
    fn tick(&mut self, now: Instant, ctx: &mut TickContext<'_>) {
        if ctx.is_cancelled() || !self.pacer.ready(now, REFRESH_INTERVAL) {
            return;
        }
        let color = ctx.controls.color();
        ctx.canvas.fill(color);
        ctx.canvas.flush();
    }

    fn reset(&mut self) {
        self.pacer.reset();
    }
}
