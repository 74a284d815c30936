//! Color constants and alpha compositing for RGB565 targets.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! The format carries no alpha channel, so a translucent fill is composited
//! against a known opaque backdrop before it is written to the display.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::IntoStorage;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Default fill color of the indicator.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Simulator title and status text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Used for error log lines.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Used for info log lines.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0). Used for warning log lines.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Pale moon yellow. A pleasant fill on dark backgrounds.
pub const MOON: Rgb565 = Rgb565::new(31, 58, 20);

/// Night sky blue for the background disc.
pub const NIGHT: Rgb565 = Rgb565::new(2, 6, 10);

/// Dark gray for secondary text and debug lines.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

// =============================================================================
// Compositing
// =============================================================================

/// Composite `fill` over an opaque `backdrop` with coverage `alpha`.
///
/// `alpha` is clamped to `0.0..=1.0`. Uses 8-bit fixed-point per channel;
/// `alpha = 0` returns `backdrop` and `alpha = 1` returns `fill` exactly.
pub fn blend_rgb565(
    backdrop: Rgb565,
    fill: Rgb565,
    alpha: f32,
) -> Rgb565 {
    let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    let a_fixed = (a * 256.0) as i32;
    if a_fixed == 0 {
        return backdrop;
    }
    if a_fixed >= 256 {
        return fill;
    }

    let (from_r, from_g, from_b) = channels(backdrop);
    let (to_r, to_g, to_b) = channels(fill);

    let mix = |from: i32, to: i32| from + (((to - from) * a_fixed) >> 8);

    let r = mix(from_r, to_r).clamp(0, 31);
    let g = mix(from_g, to_g).clamp(0, 63);
    let b = mix(from_b, to_b).clamp(0, 31);

    Rgb565::new(r as u8, g as u8, b as u8)
}

/// Split a color into its raw 5/6/5 channels.
fn channels(color: Rgb565) -> (i32, i32, i32) {
    let raw = color.into_storage();
    (
        i32::from((raw >> 11) & 0x1F),
        i32::from((raw >> 5) & 0x3F),
        i32::from(raw & 0x1F),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
