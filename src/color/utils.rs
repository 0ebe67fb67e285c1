pub use smart_leds::hsv::hsv2rgb;

use crate::{color::Rgb, math8::{blend8, scale8}};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Map a position on the 0-255 color wheel to a fully saturated color.
///
/// The wheel runs green -> red -> blue -> green.
pub const fn wheel(pos: u8) -> Rgb {
    if pos < 85 {
        Rgb {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        }
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb {
            r: 255 - pos * 3,
            g: 0,
            b: pos * 3,
        }
    } else {
        let pos = pos - 170;
        Rgb {
            r: 0,
            g: pos * 3,
            b: 255 - pos * 3,
        }
    }
}

/// Set every LED to `color`
pub fn fill(leds: &mut [Rgb], color: Rgb) {
    for led in leds {
        *led = color;
    }
}
