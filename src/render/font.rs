//! Bitmap digits and the temperature readout layout
//!
//! Glyphs are stored row-major, one byte per row, with the leftmost column
//! in the highest used bit.

use super::Canvas;
use crate::color::{Rgb, gray};
use crate::grid::Cell;

/// Number of lit rows in every glyph
pub const GLYPH_HEIGHT: usize = 5;

const DIGIT_COLOR: Rgb = Rgb {
    r: 0,
    g: 255,
    b: 100,
};
const POINT_COLOR: Rgb = Rgb {
    r: 255,
    g: 100,
    b: 0,
};
const UNIT_COLOR: Rgb = gray(255);

/// Top row of the readout
pub const GLYPH_Y: i32 = 1;
const TENS_X: i32 = 2;
const UNITS_X: i32 = 9;
const TENTHS_X: i32 = 17;
/// Left column of the tens, units and tenths digits
pub const DIGIT_COLUMNS: [i32; 3] = [TENS_X, UNITS_X, TENTHS_X];
const POINT: (i32, i32) = (15, 5);
const DEGREE_X: i32 = 24;
const CELSIUS_X: i32 = 27;

/// A monochrome bitmap glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: u8,
    pub rows: [u8; GLYPH_HEIGHT],
}

impl Glyph {
    const fn digit(rows: [u8; GLYPH_HEIGHT]) -> Self {
        Self { width: 5, rows }
    }

    /// Check if the pixel at (`x`, `y`) inside the glyph is lit
    pub const fn is_lit(&self, x: u8, y: usize) -> bool {
        if x >= self.width || y >= GLYPH_HEIGHT {
            return false;
        }
        self.rows[y] & (1 << (self.width - 1 - x)) != 0
    }
}

pub const DIGITS: [Glyph; 10] = [
    Glyph::digit([0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
    Glyph::digit([0b00100, 0b01100, 0b00100, 0b00100, 0b01110]),
    Glyph::digit([0b01110, 0b10001, 0b00110, 0b01000, 0b11111]),
    Glyph::digit([0b01110, 0b10001, 0b00110, 0b10001, 0b01110]),
    Glyph::digit([0b10010, 0b10010, 0b11111, 0b00010, 0b00010]),
    Glyph::digit([0b11111, 0b10000, 0b11110, 0b00001, 0b11110]),
    Glyph::digit([0b01110, 0b10000, 0b11110, 0b10001, 0b01110]),
    Glyph::digit([0b11111, 0b00001, 0b00010, 0b00100, 0b00100]),
    Glyph::digit([0b01110, 0b10001, 0b01110, 0b10001, 0b01110]),
    Glyph::digit([0b01110, 0b10001, 0b01111, 0b00001, 0b01110]),
];

pub const DEGREE: Glyph = Glyph {
    width: 2,
    rows: [0b11, 0b11, 0, 0, 0],
};

pub const CELSIUS: Glyph = Glyph {
    width: 3,
    rows: [0b111, 0b100, 0b100, 0b100, 0b111],
};

/// A value split into the three displayed digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalDigits {
    /// Tens digit, `None` when suppressed
    pub tens: Option<u8>,
    pub units: u8,
    pub tenths: u8,
}

impl DecimalDigits {
    /// Check if `value` rounds to something the readout can show (0.0 to 99.9)
    pub fn covers(value: f32) -> bool {
        value > -0.05 && value < 99.95
    }

    /// Round to one decimal place and split into digits
    ///
    /// The readout covers 0.0 to 99.9; values outside are clamped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_value(value: f32) -> Self {
        let scaled = if value.is_nan() {
            0.0
        } else {
            (value * 10.0 + 0.5).clamp(0.0, 999.0)
        };
        let tenths_total = scaled as u16;

        let tens = (tenths_total / 100 % 10) as u8;
        Self {
            tens: (tens > 0 || tenths_total >= 100).then_some(tens),
            units: (tenths_total / 10 % 10) as u8,
            tenths: (tenths_total % 10) as u8,
        }
    }
}

/// Draw a glyph with its top-left corner at (`x`, `y`); off-grid pixels are skipped
pub fn draw_glyph(canvas: &mut Canvas<'_>, glyph: &Glyph, x: i32, y: i32, color: Rgb) {
    for (gy, row) in (0..GLYPH_HEIGHT).zip(y..) {
        for gx in 0..glyph.width {
            if glyph.is_lit(gx, gy) {
                canvas.plot(Cell::new(x + i32::from(gx), row), color);
            }
        }
    }
}

/// Draw a temperature readout such as `23.5°C`
pub fn draw_temperature(canvas: &mut Canvas<'_>, value: f32) {
    let digits = DecimalDigits::from_value(value);

    if let Some(tens) = digits.tens {
        draw_glyph(canvas, &DIGITS[usize::from(tens)], TENS_X, GLYPH_Y, DIGIT_COLOR);
    }
    draw_glyph(
        canvas,
        &DIGITS[usize::from(digits.units)],
        UNITS_X,
        GLYPH_Y,
        DIGIT_COLOR,
    );
    canvas.set(POINT.0, POINT.1, POINT_COLOR);
    draw_glyph(
        canvas,
        &DIGITS[usize::from(digits.tenths)],
        TENTHS_X,
        GLYPH_Y,
        DIGIT_COLOR,
    );

    draw_glyph(canvas, &DEGREE, DEGREE_X, GLYPH_Y, UNIT_COLOR);
    draw_glyph(canvas, &CELSIUS, CELSIUS_X, GLYPH_Y, UNIT_COLOR);
}
