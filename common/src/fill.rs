//! Fill color of the moon: fade in, opaque plateau, fade out.
//!
//! With `half = cycle / 2` the fade windows are the first and last quarter of
//! the cycle:
//!
//! ```text
//! alpha
//!   1 ┤      ┌─────────────┐
//!     │     ╱               ╲
//!     │    ╱                 ╲
//!   0 ┤───╱                   ╲───
//!     └──┬──────┬─────────────┬──────┬
//!        0   half*0.5     half*1.5  cycle
//! ```

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::blend_rgb565;
use crate::phase::reduce_phase;

/// A base color with an opacity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FillColor {
    /// Base color.
    pub color: Rgb565,
    /// Opacity, 0 = invisible, 1 = fully opaque.
    pub alpha: f32,
}

impl FillColor {
    /// Fully opaque color.
    #[inline]
    pub const fn opaque(color: Rgb565) -> Self { Self { color, alpha: 1.0 } }

    /// Fully transparent color (the Idle fill).
    #[inline]
    pub const fn transparent(color: Rgb565) -> Self { Self { color, alpha: 0.0 } }

    /// Whether nothing would be painted with this fill.
    #[inline]
    pub fn is_invisible(self) -> bool { !(self.alpha > 0.0) }

    /// Composite this fill onto an opaque backdrop color.
    #[inline]
    pub fn blend_over(
        self,
        backdrop: Rgb565,
    ) -> Rgb565 {
        blend_rgb565(backdrop, self.color, self.alpha)
    }
}

/// Fill color for an elapsed time.
///
/// `phase` is reduced into the cycle first, so any elapsed time is accepted.
/// `cycle` must be positive.
pub fn fill_color_at(
    phase: f32,
    cycle: f32,
    base: Rgb565,
) -> FillColor {
    let phase = reduce_phase(phase, cycle);
    let half = cycle / 2.0;

    let lower = half * 0.5;
    let upper = half * 2.0 - half * 0.5;

    let alpha = if phase < lower {
        phase / lower
    } else if phase > upper {
        1.0 - (phase - upper) / lower
    } else {
        1.0
    };

    FillColor {
        color: base,
        alpha: alpha.clamp(0.0, 1.0),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
