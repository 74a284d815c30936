//! Precondition violations caught at the indicator's boundary.
//!
//! The indicator is a deterministic numeric pipeline, so the only failures are
//! inputs that would otherwise turn into NaN or degenerate geometry. They are
//! rejected here instead of being propagated into rendering.

use thiserror::Error;

/// Errors returned when configuring or attaching an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// Cycle duration was zero, negative or not finite.
    #[error("cycle duration must be a positive, finite number of seconds (got {0})")]
    InvalidCycleDuration(f32),

    /// Static rotation was NaN or infinite.
    #[error("rotation must be a finite number of radians (got {0})")]
    InvalidRotation(f32),

    /// Bounding frame has no area.
    #[error("indicator frame is empty")]
    EmptyFrame,

    /// Bounding frame is not square; the outline geometry assumes width == height.
    #[error("indicator frame must be square (got {width}x{height})")]
    NonSquareFrame {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },
}
