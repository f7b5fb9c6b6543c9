//! User drawing
//!
//! Shows the shared [`DrawingGrid`](crate::controls::DrawingGrid) verbatim.
//! Redraws only when the grid changed, plus once right after activation.

use embassy_time::Instant;

use super::{Animation, TickContext};
use crate::grid::Cell;

#[derive(Debug, Clone, Default)]
pub struct DrawAnimation {
    shown: bool,
}

impl DrawAnimation {
    pub const fn new() -> Self {
        Self { shown: false }
    }
}

impl Animation for DrawAnimation {
    fn tick(&mut self, _now: Instant, ctx: &mut TickContext<'_>) {
        if ctx.is_cancelled() {
            return;
        }
        let dirty = ctx.controls.grid_mut().take_dirty();
        if self.shown && !dirty {
            return;
        }

        ctx.canvas.clear();
        for (col, row, color) in ctx.controls.grid().lit_cells() {
            ctx.canvas.plot(Cell::new(col, row), color);
        }
        ctx.canvas.flush();
        self.shown = true;
    }

    fn reset(&mut self) {
        self.shown = false;
    }
}
