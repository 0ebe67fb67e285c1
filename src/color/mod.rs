mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};
pub use utils::{blend_colors, fill, hsv2rgb, rgb_from_u32, scale_color, wheel};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// All channels off
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };
