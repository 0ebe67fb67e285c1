use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Calculate progress (0-255) of `elapsed` within `duration`, clamped to 255.
///
/// A zero-length duration counts as already complete.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_ticks() == 0 || elapsed.as_ticks() >= duration.as_ticks() {
        return 255;
    }

    ((elapsed.as_ticks() as u128 * 255) / duration.as_ticks() as u128) as u8
}

/// Number of whole `parts` of `duration` that fit in `elapsed`, capped at `parts`.
///
/// `floor(elapsed / (duration / parts))` computed without intermediate rounding.
#[allow(clippy::cast_possible_truncation)]
pub const fn portions(elapsed: Duration, duration: Duration, parts: usize) -> usize {
    if duration.as_ticks() == 0 {
        return parts;
    }
    let done = (elapsed.as_ticks() as u128 * parts as u128) / duration.as_ticks() as u128;
    if done >= parts as u128 {
        parts
    } else {
        done as usize
    }
}

/// Scale a 0-100 percentage onto `0..=count`, rounding down.
pub const fn percent_of(percent: u8, count: usize) -> usize {
    let percent = if percent > 100 { 100 } else { percent };
    count * percent as usize / 100
}
