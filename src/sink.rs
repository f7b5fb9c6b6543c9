//! Framebuffer sinks
//!
//! [`FrameBuffer`] is a plain in-memory pixel store. [`SmartLedsSink`] pairs
//! one with any `smart-leds` driver and pushes the whole strip on flush.

use smart_leds::SmartLedsWrite;

use crate::FramebufferSink;
use crate::color::{BLACK, Rgb};
use crate::grid::PIXEL_COUNT;

/// In-memory framebuffer addressed by physical strip offset
#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize = PIXEL_COUNT> {
    pixels: [Rgb; N],
    flushes: u32,
}

impl<const N: usize> FrameBuffer<N> {
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; N],
            flushes: 0,
        }
    }

    /// Current pixel contents in strip order
    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    /// Color at a strip offset, `None` past the end
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Number of completed flushes
    pub const fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// Check if every pixel is off
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|pixel| *pixel == BLACK)
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FramebufferSink for FrameBuffer<N> {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    fn flush(&mut self) {
        self.flushes = self.flushes.wrapping_add(1);
    }
}

/// Sink that streams the buffered frame to a `smart-leds` driver
///
/// Driver errors are counted and logged; a dropped frame is simply
/// replaced by the next one.
pub struct SmartLedsSink<W, const N: usize = PIXEL_COUNT> {
    driver: W,
    buffer: FrameBuffer<N>,
    write_errors: u32,
}

impl<W, const N: usize> SmartLedsSink<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(driver: W) -> Self {
        Self {
            driver,
            buffer: FrameBuffer::new(),
            write_errors: 0,
        }
    }

    /// Number of flushes the driver rejected
    pub const fn write_errors(&self) -> u32 {
        self.write_errors
    }

    pub const fn buffer(&self) -> &FrameBuffer<N> {
        &self.buffer
    }

    pub fn driver_mut(&mut self) -> &mut W {
        &mut self.driver
    }
}

impl<W, const N: usize> FramebufferSink for SmartLedsSink<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.buffer.set_pixel(index, color);
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn flush(&mut self) {
        let frame = self.buffer.pixels().iter().copied();
        if self.driver.write(frame).is_err() {
            self.write_errors = self.write_errors.wrapping_add(1);
            log::warn!("led driver rejected frame ({} errors)", self.write_errors);
            return;
        }
        self.buffer.flush();
    }
}
