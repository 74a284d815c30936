//! Moon-phase activity indicator - platform-agnostic core.
//!
//! A looping "busy" animation: a moon waxes from nothing to a full disc and
//! wanes back over one cycle, with an eased phase, a procedural outline and a
//! fading fill. The drive shell ([`MoonIndicator`]) owns the Idle/Running state
//! and pushes each frame to a [`RenderSink`]; the host supplies the frame
//! callback through a [`FrameScheduler`].
//!
//! - [`easing`]: logistic remap curve
//! - [`phase`]: cycle reduction and eased phase
//! - [`outline`]: moon silhouette for a phase
//! - [`fill`]: fill opacity for a phase
//! - [`shell`]: Idle/Running state machine and host seams
//! - [`widgets`]: embedded-graphics layer that draws the indicator
//! - [`config`]: defaults and validated settings
//! - [`log_buffer`]: per-indicator log ring
//!
//! # Testing
//!
//! Tests run with `std` enabled (via `cfg_attr`), the library itself is `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pure math ===
pub mod easing;
pub mod fill;
pub mod outline;
pub mod phase;

// === Settings and diagnostics ===
pub mod colors;
pub mod config;
pub mod error;
pub mod log_buffer;

// === Drive shell and drawing ===
pub mod shell;
pub mod widgets;

// Re-export commonly used items
pub use config::{CycleDuration, FrameSize, IndicatorConfig};
pub use error::IndicatorError;
pub use fill::{FillColor, fill_color_at};
pub use log_buffer::{LogBuffer, LogEntry, LogLevel};
pub use outline::{Outline, PathSegment, PointF, Sweep, outline_at};
pub use phase::{eased_phase, reduce_phase};
pub use shell::{Backdrop, DriveState, FrameScheduler, MoonIndicator, RenderSink};
pub use widgets::ShapeLayer;
