mod utils;

use smart_leds::RGB8;
pub use utils::{BLACK, gray, nebula_bias, rgb_from_u32, rgb_to_u32, scale_brightness};

pub type Rgb = RGB8;
