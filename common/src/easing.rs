//! Logistic (sigmoid) easing used to pace the moon's morph.
//!
//! The input interval is mapped linearly onto the fixed logistic domain
//! `[-LOGISTIC_DOMAIN, LOGISTIC_DOMAIN]`, passed through `1 / (1 + e^-x)` and
//! mapped back onto the output interval. The result is an S-curve: slow start,
//! fast middle, slow end.
//!
//! ```text
//!   upper_y ┤                 ▁▂▃▄▅▆▇█
//!           │              ▂▄▆
//!           │            ▃▆
//!           │         ▂▅▇
//!   lower_y ┤█▇▆▅▄▃▂▁▁
//!           └──────────────────────────
//!         lower_x                 upper_x
//! ```
//!
//! The sigmoid output is normalized by its values at the two domain ends, so the
//! curve lands exactly on `lower_y` at `lower_x` and on `upper_y` at `upper_x`
//! instead of stopping 0.25% short of each end.

use libm::expf;

/// Half-width of the logistic input domain. `lower_x` maps to `-6`, `upper_x` to `6`.
pub const LOGISTIC_DOMAIN: f32 = 6.0;

/// Standard logistic function.
#[inline]
fn logistic(x: f32) -> f32 { 1.0 / (1.0 + expf(-x)) }

/// Remap `x` from `[lower_x, upper_x]` onto `[lower_y, upper_y]` along an S-curve.
///
/// Monotonic non-decreasing in `x`. Inputs outside `[lower_x, upper_x]` extrapolate
/// through the same formula and saturate just past the output bounds.
/// An empty or inverted input interval returns `lower_y`.
pub fn logistic_remap(
    x: f32,
    lower_x: f32,
    upper_x: f32,
    lower_y: f32,
    upper_y: f32,
) -> f32 {
    let span = upper_x - lower_x;
    if !(span > 0.0) {
        return lower_y;
    }

    // X scaling onto the logistic domain
    let scaled_x = (x - lower_x) / span * (2.0 * LOGISTIC_DOMAIN) - LOGISTIC_DOMAIN;

    // Logistic, normalized so the domain ends hit 0 and 1 exactly
    let floor = logistic(-LOGISTIC_DOMAIN);
    let ceil = logistic(LOGISTIC_DOMAIN);
    let y = (logistic(scaled_x) - floor) / (ceil - floor);

    // Y scaling
    lower_y * (1.0 - y) + upper_y * y
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    // -------------------------------------------------------------------------
    // Fixed Points
    // -------------------------------------------------------------------------

    #[test]
    fn test_remap_endpoints() {
        assert_eq!(logistic_remap(0.0, 0.0, 2.0, 0.0, 2.0), 0.0, "Lower bound is a fixed point");
        assert!(
            (logistic_remap(2.0, 0.0, 2.0, 0.0, 2.0) - 2.0).abs() < EPSILON,
            "Upper bound is a fixed point"
        );
    }

    #[test]
    fn test_remap_endpoints_offset_ranges() {
        let low = logistic_remap(-3.0, -3.0, 5.0, 10.0, 20.0);
        let high = logistic_remap(5.0, -3.0, 5.0, 10.0, 20.0);
        assert!((low - 10.0).abs() < EPSILON, "lower_x should map to lower_y, got {low}");
        assert!((high - 20.0).abs() < EPSILON, "upper_x should map to upper_y, got {high}");
    }

    #[test]
    fn test_remap_midpoint_is_centre() {
        let mid = logistic_remap(1.0, 0.0, 2.0, 0.0, 2.0);
        assert!((mid - 1.0).abs() < EPSILON, "Sigmoid is symmetric around the centre, got {mid}");
    }

    // -------------------------------------------------------------------------
    // Shape
    // -------------------------------------------------------------------------

    #[test]
    fn test_remap_monotonic() {
        let mut previous = f32::MIN;
        for i in 0..=1000 {
            let x = i as f32 * 0.002;
            let y = logistic_remap(x, 0.0, 2.0, 0.0, 2.0);
            assert!(y >= previous, "remap decreased at x={x}: {y} < {previous}");
            previous = y;
        }
    }

    #[test]
    fn test_remap_slow_at_edges_fast_in_middle() {
        let step = 0.05;
        let edge = logistic_remap(step, 0.0, 2.0, 0.0, 2.0) - logistic_remap(0.0, 0.0, 2.0, 0.0, 2.0);
        let middle = logistic_remap(1.0 + step, 0.0, 2.0, 0.0, 2.0) - logistic_remap(1.0, 0.0, 2.0, 0.0, 2.0);
        assert!(middle > edge * 5.0, "Middle ({middle}) should move much faster than the edge ({edge})");
    }

    #[test]
    fn test_remap_extrapolates_and_saturates() {
        let below = logistic_remap(-100.0, 0.0, 2.0, 0.0, 2.0);
        let above = logistic_remap(100.0, 0.0, 2.0, 0.0, 2.0);
        assert!(below.is_finite() && above.is_finite(), "Extreme inputs must stay finite");
        assert!(below <= 0.0 && below > -0.01, "Below-range input saturates just under lower_y");
        assert!(above >= 2.0 && above < 2.01, "Above-range input saturates just over upper_y");
    }

    #[test]
    fn test_remap_degenerate_interval() {
        assert_eq!(logistic_remap(1.0, 2.0, 2.0, 0.5, 3.0), 0.5, "Empty interval returns lower_y");
        assert_eq!(logistic_remap(1.0, 3.0, 2.0, 0.5, 3.0), 0.5, "Inverted interval returns lower_y");
    }
}
