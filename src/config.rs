//! Simulator layout and timing constants.
//!
//! Positions are pre-computed `const` values so the render loop does no layout
//! arithmetic. The indicator frame is centred horizontally below the title.
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │            Moon Indicator          │  Title
//! │────────────────────────────────────│  Divider
//! │              ╭──────╮              │
//! │              │  ◐   │              │  Indicator frame (MAX_FRAME_EDGE)
//! │              ╰──────╯              │
//! │ RUN  t=0.73s  a=1.00  rot=15       │  Status line
//! │ [I] 0ms Attached 120px, cycle 2s   │
//! │ [I] 0ms Animation started          │  Log panel
//! └────────────────────────────────────┘
//! ```

use std::time::Duration;

use embedded_graphics::prelude::Point;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (same panel as the firmware target: 320x240).
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Window and PNG upscaling factor.
pub const PIXEL_SCALE: u32 = 2;

// =============================================================================
// Indicator Layout
// =============================================================================

/// Top of the indicator frame.
pub const FRAME_TOP: i32 = 38;

/// Largest indicator edge that fits between the title and the status line.
pub const MAX_FRAME_EDGE: u32 = 128;

/// Smallest indicator edge accepted on the command line.
pub const MIN_FRAME_EDGE: u32 = 8;

/// Default indicator edge.
pub const DEFAULT_FRAME_EDGE: u32 = 120;

/// Top-left corner of an indicator frame of `edge` pixels.
pub const fn frame_origin(edge: u32) -> Point {
    Point::new(CENTER_X - (edge / 2) as i32, FRAME_TOP + ((MAX_FRAME_EDGE - edge) / 2) as i32)
}

// =============================================================================
// Text Layout
// =============================================================================

/// Title baseline position (horizontally centred).
pub const TITLE_POS: Point = Point::new(CENTER_X, 22);

/// Divider line below the title.
pub const DIVIDER_START: Point = Point::new(10, 30);

/// Divider line end.
pub const DIVIDER_END: Point = Point::new(SCREEN_WIDTH as i32 - 10, 30);

/// Left margin of the status line and log panel.
pub const TEXT_X: i32 = 10;

/// Status line baseline.
pub const STATUS_Y: i32 = 180;

/// First log line baseline.
pub const LOG_START_Y: i32 = 194;

/// Vertical spacing between log lines.
pub const LOG_LINE_HEIGHT: i32 = 11;

/// Number of log lines shown.
pub const LOG_LINES: usize = 4;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time in window mode (~50 FPS). The loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Default headless frame rate.
pub const DEFAULT_FPS: u32 = 30;

/// Rotation step applied by the `R` key, in degrees.
pub const ROTATION_STEP_DEG: f32 = 15.0;
