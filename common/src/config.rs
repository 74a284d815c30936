//! Indicator configuration: validated value types and tuning constants.
//!
//! Every setting that feeds a division or the outline geometry is wrapped in a
//! validated newtype so invalid values are rejected once, at the boundary:
//!
//! - [`CycleDuration`]: positive, finite length of one animation cycle
//! - [`FrameSize`]: non-empty, square bounding frame
//!
//! [`IndicatorConfig`] bundles the user-facing settings. Defaults: 2 second
//! cycle, black fill, clear background, no rotation.

use core::time::Duration;

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::BLACK;
use crate::error::IndicatorError;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Default length of one full morph + fade cycle, in seconds.
pub const DEFAULT_CYCLE_SECS: f32 = 2.0;

/// Phase (as a fraction of the cycle) rendered by the design-time preview.
/// At 35% the shape is a clearly visible crescent at full opacity.
pub const PREVIEW_PHASE_FRACTION: f32 = 0.35;

// =============================================================================
// Geometry Configuration
// =============================================================================

/// Horizontal reach of the cubic control points, as a fraction of the frame size.
/// With this reach the curve approximates a half circle at `t = ±1`.
pub const CONTROL_REACH: f32 = 0.6667;

/// Vertical inset of the control points from the top and bottom edges.
pub const CONTROL_INSET: f32 = 0.05;

/// Line segments used to approximate the half-circle arc when flattening.
pub const ARC_SEGMENTS: usize = 32;

/// Line segments used to approximate the cubic curve when flattening.
pub const CURVE_SEGMENTS: usize = 24;

/// Capacity of a flattened outline: move point, arc vertices, curve vertices.
pub const MAX_VERTICES: usize = 1 + (ARC_SEGMENTS + 1) + CURVE_SEGMENTS;

// =============================================================================
// Validated Values
// =============================================================================

/// Length of one animation cycle in seconds. Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleDuration(f32);

impl CycleDuration {
    /// Validate a cycle duration in seconds.
    ///
    /// # Errors
    /// [`IndicatorError::InvalidCycleDuration`] for zero, negative, subnormal, NaN
    /// or infinite values.
    pub fn new(secs: f32) -> Result<Self, IndicatorError> {
        // Subnormal cycles overflow `2 / half` in the outline math.
        if secs.is_normal() && secs > 0.0 {
            Ok(Self(secs))
        } else {
            Err(IndicatorError::InvalidCycleDuration(secs))
        }
    }

    /// Duration in seconds.
    #[inline]
    pub const fn secs(self) -> f32 { self.0 }

    /// Position of `elapsed` inside the cycle.
    ///
    /// Reduced in integer nanoseconds, so elapsed times a whole number of cycles
    /// apart give bit-identical results however long the indicator has run.
    pub fn reduce(
        self,
        elapsed: Duration,
    ) -> Duration {
        let cycle = Duration::try_from_secs_f32(self.0)
            .map_or(u128::MAX, |d| d.as_nanos())
            .max(1);
        let nanos = elapsed.as_nanos() % cycle;
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

impl Default for CycleDuration {
    fn default() -> Self { Self(DEFAULT_CYCLE_SECS) }
}

/// Edge length of the square bounding frame, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameSize(u32);

impl FrameSize {
    /// Validate a square frame edge length.
    ///
    /// # Errors
    /// [`IndicatorError::EmptyFrame`] when `edge` is zero.
    pub const fn square(edge: u32) -> Result<Self, IndicatorError> {
        if edge == 0 {
            Err(IndicatorError::EmptyFrame)
        } else {
            Ok(Self(edge))
        }
    }

    /// Validate the bounds reported by the drawable surface.
    ///
    /// # Errors
    /// [`IndicatorError::EmptyFrame`] if either dimension is zero,
    /// [`IndicatorError::NonSquareFrame`] if width and height differ.
    pub const fn from_size(size: Size) -> Result<Self, IndicatorError> {
        if size.width == 0 || size.height == 0 {
            Err(IndicatorError::EmptyFrame)
        } else if size.width != size.height {
            Err(IndicatorError::NonSquareFrame {
                width: size.width,
                height: size.height,
            })
        } else {
            Ok(Self(size.width))
        }
    }

    /// Edge length in pixels.
    #[inline]
    pub const fn edge(self) -> u32 { self.0 }

    /// Edge length as a float, for path geometry.
    #[inline]
    pub const fn length(self) -> f32 { self.0 as f32 }

    /// Frame dimensions as an embedded-graphics [`Size`].
    #[inline]
    pub const fn size(self) -> Size { Size::new(self.0, self.0) }
}

// =============================================================================
// Indicator Settings
// =============================================================================

/// User-facing settings of an indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorConfig {
    /// Length of one full cycle.
    pub cycle: CycleDuration,
    /// Base color of the animated shape.
    pub fill_color: Rgb565,
    /// Static disc behind the shape. `None` leaves the surface visible.
    pub background_color: Option<Rgb565>,
    /// Static rotation of the outline around the frame centre, in radians.
    pub rotation: f32,
}

impl IndicatorConfig {
    /// Settings with a specific cycle duration.
    pub fn with_cycle(
        mut self,
        cycle: CycleDuration,
    ) -> Self {
        self.cycle = cycle;
        self
    }

    /// Settings with a specific fill color.
    pub const fn with_fill_color(
        mut self,
        color: Rgb565,
    ) -> Self {
        self.fill_color = color;
        self
    }

    /// Settings with a background disc color.
    pub const fn with_background_color(
        mut self,
        color: Option<Rgb565>,
    ) -> Self {
        self.background_color = color;
        self
    }

    /// Settings with a static rotation in radians.
    pub const fn with_rotation(
        mut self,
        radians: f32,
    ) -> Self {
        self.rotation = radians;
        self
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            cycle: CycleDuration::default(),
            fill_color: BLACK,
            background_color: None,
            rotation: 0.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
