//! Reduction of elapsed time into a single animation cycle.
//!
//! Both the outline and the fill are functions of the phase only, never of a
//! frame counter, so late or dropped frames cause a visual jump but no drift.

use libm::floorf;

use crate::easing::logistic_remap;

/// Reduce an elapsed time (seconds) into `[0, cycle)`.
///
/// Euclidean remainder: negative and arbitrarily large inputs land inside the
/// cycle. A non-finite `raw` yields `0.0`. `cycle` must be positive; callers
/// hold a [`CycleDuration`](crate::config::CycleDuration).
pub fn reduce_phase(
    raw: f32,
    cycle: f32,
) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }

    let reduced = raw - cycle * floorf(raw / cycle);

    // A tiny negative raw rounds up to exactly `cycle`; it belongs to the start.
    if reduced >= cycle || reduced < 0.0 { 0.0 } else { reduced }
}

/// Reduce an elapsed time and pace it along the logistic curve.
///
/// The remap uses `[0, cycle]` as both domain and range, so the eased phase is
/// still a position inside the same cycle.
pub fn eased_phase(
    raw: f32,
    cycle: f32,
) -> f32 {
    let phase = reduce_phase(raw, cycle);
    logistic_remap(phase, 0.0, cycle, 0.0, cycle)
}

// =============================================================================
// Unit Tests
// =============================================================================
