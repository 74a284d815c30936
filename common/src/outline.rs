//! Procedural outline of the moon for a given phase.
//!
//! The outline is one closed contour built from a half-circle arc and a cubic
//! curve sharing the top and bottom points of the frame:
//!
//! ```text
//!            top (L/2, 0)
//!         ╭──────●──────╮
//!        ╱       ┊       ╲        arc:   half circle, clockwise (right half)
//!       │   curve┊        ● move    in the first half of the cycle, counter-
//!        ╲       ┊       ╱          clockwise (left half) in the second
//!         ╰──────●──────╯
//!            bottom (L/2, L)     curve: bottom -> top, both control points at
//!                                       x = L/2 + t * L * CONTROL_REACH
//! ```
//!
//! `t` runs from `1` to `-1` across each half of the cycle. At `t = 1` the curve
//! hugs the right edge, at `t = 0` it is a straight diameter, at `t = -1` it hugs
//! the left edge. Combined with the arc flipping sides at the half-cycle this
//! sweeps from nothing, through a crescent, to a full disc and back.

use core::f32::consts::{FRAC_PI_2, TAU};

use heapless::Vec;
use libm::{cosf, sinf};

use crate::config::{ARC_SEGMENTS, CONTROL_INSET, CONTROL_REACH, CURVE_SEGMENTS, FrameSize, MAX_VERTICES};
use crate::phase::eased_phase;

// =============================================================================
// Path Types
// =============================================================================

/// A point in frame-local pixel space (origin at the frame's top-left, y down).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointF {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels (grows downwards).
    pub y: f32,
}

impl PointF {
    /// Create a point.
    #[inline]
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }

    /// Rotate around `pivot` by `angle` radians (positive = clockwise on screen).
    pub fn rotated_about(
        self,
        pivot: Self,
        angle: f32,
    ) -> Self {
        let (sin, cos) = (sinf(angle), cosf(angle));
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

/// Direction in which an arc is swept, as seen on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sweep {
    /// Top to bottom via the right side.
    Clockwise,
    /// Top to bottom via the left side.
    CounterClockwise,
}

/// One step of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PathSegment {
    /// Begin the contour.
    MoveTo(PointF),
    /// Circular arc. A straight line joins the current point to the arc start.
    Arc {
        /// Centre of the circle.
        center: PointF,
        /// Radius in pixels.
        radius: f32,
        /// Start angle in radians, 0 = +x axis, growing clockwise on screen.
        start_angle: f32,
        /// End angle in radians.
        end_angle: f32,
        /// Direction travelled from start to end.
        sweep: Sweep,
    },
    /// Cubic Bézier curve from the current point.
    CubicTo {
        /// First control point.
        ctrl1: PointF,
        /// Second control point.
        ctrl2: PointF,
        /// End point.
        to: PointF,
    },
    /// Straight line back to the contour start.
    Close,
}

// =============================================================================
// Outline
// =============================================================================

/// Closed silhouette of the moon for one frame.
///
/// Always exactly four segments: move, arc, cubic, close.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    segments: [PathSegment; 4],
    frame: FrameSize,
    bulge: f32,
    sweep: Sweep,
}

/// Build the outline for an elapsed time.
///
/// `phase` is any elapsed time in seconds; it is reduced into the cycle and
/// eased before the geometry is derived. `cycle` must be positive.
pub fn outline_at(
    phase: f32,
    cycle: f32,
    frame: FrameSize,
) -> Outline {
    let eased = eased_phase(phase, cycle);
    let half_cycle = cycle / 2.0;
    let first_half = eased < half_cycle;

    let local = if first_half { eased } else { eased - half_cycle };
    let bulge = -(2.0 / half_cycle) * local + 1.0;
    let sweep = if first_half { Sweep::Clockwise } else { Sweep::CounterClockwise };

    Outline::with_bulge(frame, bulge, sweep)
}

impl Outline {
    /// The Idle rest shape: the outline at phase zero (no visible area).
    pub fn rest(frame: FrameSize) -> Self { Self::with_bulge(frame, 1.0, Sweep::Clockwise) }

    /// Build the outline for a control-point offset `t` and arc direction.
    pub fn with_bulge(
        frame: FrameSize,
        bulge: f32,
        sweep: Sweep,
    ) -> Self {
        let length = frame.length();
        let half = length / 2.0;
        let center = PointF::new(half, half);

        let control_x = half + bulge * (length * CONTROL_REACH);

        Self {
            segments: [
                PathSegment::MoveTo(PointF::new(length, half)),
                PathSegment::Arc {
                    center,
                    radius: half,
                    start_angle: -FRAC_PI_2,
                    end_angle: FRAC_PI_2,
                    sweep,
                },
                PathSegment::CubicTo {
                    ctrl1: PointF::new(control_x, length - CONTROL_INSET * length),
                    ctrl2: PointF::new(control_x, CONTROL_INSET * length),
                    to: PointF::new(half, 0.0),
                },
                PathSegment::Close,
            ],
            frame,
            bulge,
            sweep,
        }
    }

    /// Path segments in drawing order.
    #[inline]
    pub fn segments(&self) -> &[PathSegment] { &self.segments }

    /// Frame the outline was built for.
    #[inline]
    pub const fn frame(&self) -> FrameSize { self.frame }

    /// Horizontal control-point offset `t` in `[-1, 1]`.
    #[inline]
    pub const fn bulge(&self) -> f32 { self.bulge }

    /// Side of the frame the arc covers.
    #[inline]
    pub const fn sweep(&self) -> Sweep { self.sweep }

    /// Whether the path is a single contour: one leading move and a final close.
    pub fn is_closed(&self) -> bool {
        let moves = self
            .segments
            .iter()
            .filter(|segment| matches!(segment, PathSegment::MoveTo(_)))
            .count();
        moves == 1
            && matches!(self.segments.first(), Some(PathSegment::MoveTo(_)))
            && matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Rotate the whole outline around the frame centre by `angle` radians.
    pub fn rotated(
        &self,
        angle: f32,
    ) -> Self {
        if angle == 0.0 {
            return *self;
        }

        let half = self.frame.length() / 2.0;
        let pivot = PointF::new(half, half);
        let mut rotated = *self;

        for segment in &mut rotated.segments {
            *segment = match *segment {
                PathSegment::MoveTo(p) => PathSegment::MoveTo(p.rotated_about(pivot, angle)),
                PathSegment::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    sweep,
                } => PathSegment::Arc {
                    center: center.rotated_about(pivot, angle),
                    radius,
                    start_angle: start_angle + angle,
                    end_angle: end_angle + angle,
                    sweep,
                },
                PathSegment::CubicTo { ctrl1, ctrl2, to } => PathSegment::CubicTo {
                    ctrl1: ctrl1.rotated_about(pivot, angle),
                    ctrl2: ctrl2.rotated_about(pivot, angle),
                    to: to.rotated_about(pivot, angle),
                },
                PathSegment::Close => PathSegment::Close,
            };
        }

        rotated
    }

    /// Approximate the contour by a closed polygon for rasterization.
    ///
    /// The closing edge from the last vertex back to the first is implicit.
    pub fn flatten(&self) -> Vec<PointF, MAX_VERTICES> {
        let mut vertices: Vec<PointF, MAX_VERTICES> = Vec::new();
        let mut current = PointF::default();

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    vertices.push(p).ok();
                    current = p;
                }
                PathSegment::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    sweep,
                } => {
                    let delta = sweep_angle(start_angle, end_angle, sweep);
                    for i in 0..=ARC_SEGMENTS {
                        let theta = start_angle + delta * (i as f32 / ARC_SEGMENTS as f32);
                        let p = PointF::new(center.x + radius * cosf(theta), center.y + radius * sinf(theta));
                        vertices.push(p).ok();
                        current = p;
                    }
                }
                PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                    let from = current;
                    for i in 1..=CURVE_SEGMENTS {
                        let p = cubic_point(from, ctrl1, ctrl2, to, i as f32 / CURVE_SEGMENTS as f32);
                        vertices.push(p).ok();
                    }
                    current = to;
                }
                PathSegment::Close => {}
            }
        }

        vertices
    }
}

// =============================================================================
// Geometry Helpers
// =============================================================================

/// Signed angle travelled from `start` to `end` in the given direction.
fn sweep_angle(
    start: f32,
    end: f32,
    sweep: Sweep,
) -> f32 {
    let normalize = |angle: f32| {
        let wrapped = angle % TAU;
        if wrapped <= 0.0 { wrapped + TAU } else { wrapped }
    };
    match sweep {
        Sweep::Clockwise => normalize(end - start),
        Sweep::CounterClockwise => -normalize(start - end),
    }
}

/// Point on a cubic Bézier at parameter `t`.
fn cubic_point(
    p0: PointF,
    p1: PointF,
    p2: PointF,
    p3: PointF,
    t: f32,
) -> PointF {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    PointF::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::*;

    const CYCLE: f32 = 2.0;

    fn frame() -> FrameSize { FrameSize::square(100).unwrap() }

    /// Shoelace area of the flattened polygon, in square pixels.
    fn area(outline: &Outline) -> f32 {
        let vertices = outline.flatten();
        let n = vertices.len();
        let mut twice_area = 0.0;
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            twice_area += a.x * b.y - b.x * a.y;
        }
        (twice_area / 2.0).abs()
    }

    fn full_disc_area() -> f32 { PI * 50.0 * 50.0 }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    #[test]
    fn test_outline_always_single_closed_contour() {
        for i in 0..200 {
            let phase = i as f32 * 0.0137 - 0.5;
            let outline = outline_at(phase, CYCLE, frame());
            assert!(outline.is_closed(), "Outline at phase {phase} is not a single closed contour");
            assert_eq!(outline.segments().len(), 4);
        }
    }

    #[test]
    fn test_outline_starts_at_right_middle() {
        let outline = outline_at(0.3, CYCLE, frame());
        assert_eq!(outline.segments()[0], PathSegment::MoveTo(PointF::new(100.0, 50.0)));
        match outline.segments()[2] {
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                assert_eq!(to, PointF::new(50.0, 0.0), "Curve ends at top centre");
                assert_eq!(ctrl1.x, ctrl2.x, "Both control points share the same x");
                assert!((ctrl1.y - 95.0).abs() < 1e-4, "First control point is 5% above the bottom");
                assert!((ctrl2.y - 5.0).abs() < 1e-4, "Second control point is 5% below the top");
            }
            other => panic!("Expected a cubic segment, got {other:?}"),
        }
    }

    #[test]
    fn test_flatten_fills_vertex_buffer() {
        let vertices = outline_at(0.7, CYCLE, frame()).flatten();
        assert_eq!(vertices.len(), MAX_VERTICES);
        let last = vertices[vertices.len() - 1];
        assert!((last.x - 50.0).abs() < 1e-3 && last.y.abs() < 1e-3, "Polygon ends at top centre");
    }

    // -------------------------------------------------------------------------
    // Phase Behaviour
    // -------------------------------------------------------------------------

    #[test]
    fn test_zero_phase_is_rest_shape() {
        assert_eq!(outline_at(0.0, CYCLE, frame()), Outline::rest(frame()));
        assert_eq!(outline_at(CYCLE, CYCLE, frame()), Outline::rest(frame()), "A full cycle returns to rest");
    }

    #[test]
    fn test_rest_shape_has_no_visible_area() {
        let rest = area(&Outline::rest(frame()));
        assert!(rest < full_disc_area() * 0.1, "Rest shape area {rest} should be near zero");
    }

    #[test]
    fn test_half_cycle_is_full_disc() {
        let outline = outline_at(1.0, CYCLE, frame());
        assert!(
            (outline.bulge().abs() - 1.0).abs() < 1e-4,
            "Half cycle should sit at the t = ±1 extremum, got {}",
            outline.bulge()
        );
        let disc = area(&outline);
        assert!(disc > full_disc_area() * 0.9, "Half-cycle area {disc} should be close to a full disc");
    }

    #[test]
    fn test_sweep_flips_at_half_cycle() {
        assert_eq!(outline_at(0.5, CYCLE, frame()).sweep(), Sweep::Clockwise);
        assert_eq!(outline_at(1.5, CYCLE, frame()).sweep(), Sweep::CounterClockwise);
    }

    #[test]
    fn test_bulge_stays_in_unit_range() {
        for i in 0..400 {
            let t = outline_at(i as f32 * 0.005, CYCLE, frame()).bulge();
            assert!((-1.0 - 1e-4..=1.0 + 1e-4).contains(&t), "Bulge {t} escaped [-1, 1]");
        }
    }

    #[test]
    fn test_zero_bulge_is_half_disc() {
        // t = 0 puts both control points on the vertical diameter: a straight edge
        let outline = Outline::with_bulge(frame(), 0.0, Sweep::Clockwise);
        let half_disc = area(&outline);
        let expected = full_disc_area() / 2.0;
        assert!((half_disc - expected).abs() < expected * 0.05, "Expected a half disc, got {half_disc}");
    }

    #[test]
    fn test_visible_area_grows_then_shrinks() {
        let early = area(&outline_at(0.6, CYCLE, frame()));
        let middle = area(&outline_at(1.0, CYCLE, frame()));
        let late = area(&outline_at(1.4, CYCLE, frame()));
        assert!(early < middle, "Crescent should grow towards the half cycle");
        assert!(late < middle, "Crescent should shrink after the half cycle");
    }

    #[test]
    fn test_reduction_matches_equivalent_phase() {
        // 2.375 and 0.375 are exact in binary, so the reduction is exact too
        assert_eq!(outline_at(2.375, CYCLE, frame()), outline_at(0.375, CYCLE, frame()));
        // 2.35 is not exact; the reduced value differs from 0.35 by a rounding error
        let a = outline_at(2.35, CYCLE, frame());
        let b = outline_at(0.35, CYCLE, frame());
        assert!((a.bulge() - b.bulge()).abs() < 1e-5);
        assert_eq!(a.sweep(), b.sweep());
    }

    // -------------------------------------------------------------------------
    // Rotation
    // -------------------------------------------------------------------------

    #[test]
    fn test_rotation_zero_is_identity() {
        let outline = outline_at(0.8, CYCLE, frame());
        assert_eq!(outline.rotated(0.0), outline);
    }

    #[test]
    fn test_rotation_preserves_area_and_topology() {
        let outline = outline_at(0.8, CYCLE, frame());
        let rotated = outline.rotated(FRAC_PI_2);
        assert!(rotated.is_closed());
        assert!((area(&outline) - area(&rotated)).abs() < 1.0, "Rotation must not change the area");
    }

    #[test]
    fn test_rotation_quarter_turn_moves_start_to_bottom() {
        let rotated = Outline::rest(frame()).rotated(FRAC_PI_2);
        match rotated.segments()[0] {
            PathSegment::MoveTo(p) => {
                assert!((p.x - 50.0).abs() < 1e-3 && (p.y - 100.0).abs() < 1e-3, "Got {p:?}");
            }
            other => panic!("Expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_sweep_angle_directions() {
        assert!((sweep_angle(-FRAC_PI_2, FRAC_PI_2, Sweep::Clockwise) - PI).abs() < 1e-5);
        assert!((sweep_angle(-FRAC_PI_2, FRAC_PI_2, Sweep::CounterClockwise) + PI).abs() < 1e-5);
    }
}
