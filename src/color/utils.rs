use crate::{color::Rgb, math8::unit8};

/// Universal "off" color
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// White at the given level
pub const fn gray(level: u8) -> Rgb {
    Rgb {
        r: level,
        g: level,
        b: level,
    }
}

/// Scale every channel by `factor`, clamping the result to 0-255
pub fn scale_brightness(color: Rgb, factor: f32) -> Rgb {
    Rgb {
        r: unit8(f32::from(color.r) * factor),
        g: unit8(f32::from(color.g) * factor),
        b: unit8(f32::from(color.b) * factor),
    }
}

/// Pull red toward blue and blue toward the biased red
///
/// Gives rainbow hues a purple/pink cast. The blue mix uses the already
/// biased red channel.
#[allow(clippy::cast_possible_truncation)]
pub const fn nebula_bias(color: Rgb) -> Rgb {
    let r = ((color.r as u16 * 2 + color.b as u16) / 3) as u8;
    let b = ((color.b as u16 * 3 + r as u16) / 4) as u8;
    Rgb { r, g: color.g, b }
}
