//! Rendering primitives
//!
//! [`Canvas`] is the only way renderers touch the framebuffer: all cell
//! addressing goes through [`crate::grid::map_to_index`].

pub mod font;
pub mod line;

pub use font::{DecimalDigits, Glyph, draw_glyph, draw_temperature};
pub use line::{LinePoints, draw_line};

use crate::FramebufferSink;
use crate::color::Rgb;
use crate::grid::{Cell, PIXEL_COUNT, map_to_index};

/// Drawing surface over a [`FramebufferSink`]
pub struct Canvas<'a> {
    sink: &'a mut dyn FramebufferSink,
}

impl<'a> Canvas<'a> {
    pub fn new(sink: &'a mut dyn FramebufferSink) -> Self {
        Self { sink }
    }

    /// Set a cell, clamping out-of-range coordinates onto the nearest edge
    pub fn set(&mut self, col: i32, row: i32, color: Rgb) {
        self.sink.set_pixel(map_to_index(col, row), color);
    }

    /// Set a cell only if it lies on the grid
    ///
    /// Returns `false` when the cell was skipped.
    pub fn plot(&mut self, cell: Cell, color: Rgb) -> bool {
        if !cell.is_visible() {
            return false;
        }
        self.sink.set_pixel(cell.index(), color);
        true
    }

    /// Set every physical pixel to one color
    pub fn fill(&mut self, color: Rgb) {
        for index in 0..PIXEL_COUNT {
            self.sink.set_pixel(index, color);
        }
    }

    pub fn clear(&mut self) {
        self.sink.clear();
    }

    /// Push the frame to the strip
    ///
    /// Transmission is timing sensitive, so it runs inside a critical section.
    pub fn flush(&mut self) {
        critical_section::with(|_| self.sink.flush());
    }

    /// Clear and immediately transmit an empty frame
    pub fn blank(&mut self) {
        self.clear();
        self.flush();
    }
}
