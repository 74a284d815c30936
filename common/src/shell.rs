//! The drive shell: owns the on/off state and the cycle origin of one indicator.
//!
//! The shell never talks to a display or a clock directly. It is handed two
//! capabilities:
//!
//! - a [`FrameScheduler`] that starts and cancels a recurring per-frame callback
//!   (a display link, a vsync interrupt, a timer task, or a test fake)
//! - a [`RenderSink`] that retains the latest backdrop, rotation, outline and fill
//!   and paints them (an embedded-graphics layer, or a recording fake)
//!
//! The host forwards every scheduler tick to [`MoonIndicator::on_frame`] with a
//! monotonic timestamp. All timing is derived from `timestamp - origin`, so
//! irregular frame pacing never accumulates drift.
//!
//! # State Machine
//!
//! ```text
//!             start() / set_animating(true)
//!   ┌──────┐ ───────────────────────────────▶ ┌─────────────────────┐
//!   │ Idle │                                  │ Running { origin? } │ ◀─┐ on_frame(ts)
//!   └──────┘ ◀─────────────────────────────── └─────────────────────┘ ──┘ (anchors origin
//!             stop() / set_animating(false)                               on first tick)
//! ```
//!
//! Repeated `start()` while running and `stop()` while idle are no-ops: only a
//! real edge begins a new origin or cancels the callback.

use core::time::Duration;

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb565;

use crate::config::{CycleDuration, FrameSize, IndicatorConfig, PREVIEW_PHASE_FRACTION};
use crate::error::IndicatorError;
use crate::fill::{FillColor, fill_color_at};
use crate::log_buffer::{LogBuffer, log_debug, log_info, log_warn};
use crate::outline::{Outline, outline_at};

// =============================================================================
// Capabilities
// =============================================================================

/// Recurring per-frame callback registration.
pub trait FrameScheduler {
    /// Token identifying one registration.
    type Handle;

    /// Begin delivering frames. The host calls [`MoonIndicator::on_frame`] for
    /// each one until the returned handle is cancelled.
    fn request_frames(&mut self) -> Self::Handle;

    /// Stop delivering frames for `handle`. No frame may be delivered afterwards.
    fn cancel(
        &mut self,
        handle: Self::Handle,
    );
}

/// Static disc drawn behind the moon: the oval inscribed in the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backdrop {
    /// Frame the disc is inscribed in.
    pub frame: FrameSize,
    /// Disc color; `None` leaves the surface visible.
    pub color: Option<Rgb565>,
}

/// Destination of everything the indicator renders.
///
/// A sink retains what it was last given; the shell re-submits the outline and
/// fill on every frame and pushes the backdrop and rotation whenever they change.
pub trait RenderSink {
    /// Replace the backdrop disc.
    fn set_backdrop(
        &mut self,
        backdrop: Backdrop,
    );

    /// Replace the static rotation (radians) applied to submitted outlines.
    fn set_rotation(
        &mut self,
        radians: f32,
    );

    /// Replace the moon outline and its fill.
    fn submit(
        &mut self,
        outline: &Outline,
        fill: FillColor,
    );
}

// =============================================================================
// Drive State
// =============================================================================

/// Animation state of a [`MoonIndicator`].
#[derive(Debug, PartialEq, Eq)]
pub enum DriveState<H> {
    /// Not animating; the rest shape is shown with a transparent fill.
    Idle,
    /// Receiving frames.
    Running {
        /// Scheduler registration to cancel on stop.
        handle: H,
        /// Timestamp of the first frame since the last start.
        origin: Option<Duration>,
    },
}

impl<H> DriveState<H> {
    /// Whether frames are being delivered.
    #[inline]
    pub const fn is_running(&self) -> bool { matches!(self, Self::Running { .. }) }

    /// Cycle origin, once the first frame after a start has arrived.
    #[inline]
    pub const fn origin(&self) -> Option<Duration> {
        match self {
            Self::Running { origin, .. } => *origin,
            Self::Idle => None,
        }
    }
}

// =============================================================================
// Moon Indicator
// =============================================================================

/// A moon phase activity indicator bound to a scheduler and a render sink.
pub struct MoonIndicator<S: FrameScheduler, R: RenderSink> {
    config: IndicatorConfig,
    frame: FrameSize,
    state: DriveState<S::Handle>,
    scheduler: S,
    sink: R,
    /// Outline currently shown, before rotation.
    outline: Outline,
    fill: FillColor,
    /// Position inside the cycle of the last rendered frame, in seconds.
    elapsed: f32,
    /// Timestamp of the most recent frame, for log entries.
    last_seen_ms: u32,
    log: LogBuffer,
}

impl<S: FrameScheduler, R: RenderSink> MoonIndicator<S, R> {
    /// Attach an indicator to a surface of `bounds`.
    ///
    /// The sink immediately receives the backdrop, the rotation and the rest
    /// shape with a transparent fill.
    ///
    /// # Errors
    /// [`IndicatorError::EmptyFrame`] or [`IndicatorError::NonSquareFrame`] for
    /// unusable bounds, [`IndicatorError::InvalidRotation`] for a non-finite
    /// rotation.
    pub fn new(
        config: IndicatorConfig,
        bounds: Size,
        scheduler: S,
        sink: R,
    ) -> Result<Self, IndicatorError> {
        let frame = FrameSize::from_size(bounds)?;
        if !config.rotation.is_finite() {
            return Err(IndicatorError::InvalidRotation(config.rotation));
        }
        let mut indicator = Self {
            config,
            frame,
            state: DriveState::Idle,
            scheduler,
            sink,
            outline: Outline::rest(frame),
            fill: FillColor::transparent(config.fill_color),
            elapsed: 0.0,
            last_seen_ms: 0,
            log: LogBuffer::new(),
        };

        indicator.push_backdrop();
        indicator.sink.set_rotation(config.rotation);
        indicator.clean();
        log_info!(
            indicator.log,
            0,
            "Attached {}px, cycle {}s",
            frame.edge(),
            config.cycle.secs()
        );

        Ok(indicator)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Begin animating. No-op while already running.
    ///
    /// The cycle origin is cleared; the next frame becomes the new origin.
    pub fn start(&mut self) {
        if self.state.is_running() {
            log_debug!(self.log, self.last_seen_ms, "start ignored: running");
            return;
        }
        let handle = self.scheduler.request_frames();
        self.state = DriveState::Running { handle, origin: None };
        log_info!(self.log, self.last_seen_ms, "Animation started");
    }

    /// Stop animating and return to the rest shape. No-op while idle.
    ///
    /// The frame callback is cancelled before this returns, so no frame can
    /// mutate the indicator afterwards.
    pub fn stop(&mut self) {
        match core::mem::replace(&mut self.state, DriveState::Idle) {
            DriveState::Running { handle, .. } => {
                self.scheduler.cancel(handle);
                self.clean();
                log_info!(self.log, self.last_seen_ms, "Animation stopped");
            }
            DriveState::Idle => {
                log_debug!(self.log, self.last_seen_ms, "stop ignored: idle");
            }
        }
    }

    /// Edge-triggered on/off switch: only a change of value starts or stops.
    pub fn set_animating(
        &mut self,
        animating: bool,
    ) {
        if animating {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Whether the indicator is running.
    #[inline]
    pub const fn is_animating(&self) -> bool { self.state.is_running() }

    /// Handle one scheduler tick at a monotonic `timestamp`.
    ///
    /// The first tick after a start anchors the cycle origin. Ticks while idle
    /// are ignored. A timestamp earlier than the origin counts as zero elapsed.
    /// The elapsed time is reduced into the cycle before it becomes `f32`.
    pub fn on_frame(
        &mut self,
        timestamp: Duration,
    ) {
        let DriveState::Running { origin, .. } = &mut self.state else {
            return;
        };

        let anchored = origin.is_none();
        let origin = *origin.get_or_insert(timestamp);

        self.last_seen_ms = timestamp.as_millis() as u32;
        if anchored {
            log_debug!(self.log, self.last_seen_ms, "Cycle origin at {}ms", self.last_seen_ms);
        }

        let elapsed = timestamp.saturating_sub(origin);
        self.render_at(self.config.cycle.reduce(elapsed).as_secs_f32());
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Change the base fill color. Takes effect from the next frame.
    pub fn set_fill_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.fill_color = color;
    }

    /// Change the backdrop disc color and push it to the sink immediately.
    pub fn set_fill_background_color(
        &mut self,
        color: Option<Rgb565>,
    ) {
        self.config.background_color = color;
        self.push_backdrop();
    }

    /// Change the static rotation and push it to the sink immediately.
    pub fn set_rotation_angle(
        &mut self,
        radians: f32,
    ) {
        if !radians.is_finite() {
            log_warn!(self.log, self.last_seen_ms, "Rejected rotation {}", radians);
            return;
        }
        self.config.rotation = radians;
        self.sink.set_rotation(radians);
    }

    /// Change the cycle duration. Takes effect from the next frame.
    ///
    /// # Errors
    /// [`IndicatorError::InvalidCycleDuration`] for non-positive or non-finite
    /// values; the previous duration stays in effect.
    pub fn set_cycle_duration(
        &mut self,
        secs: f32,
    ) -> Result<(), IndicatorError> {
        match CycleDuration::new(secs) {
            Ok(cycle) => {
                self.config.cycle = cycle;
                log_info!(self.log, self.last_seen_ms, "Cycle set to {}s", secs);
                Ok(())
            }
            Err(err) => {
                log_warn!(self.log, self.last_seen_ms, "Rejected cycle {}s", secs);
                Err(err)
            }
        }
    }

    /// Adopt new surface bounds, re-pushing the backdrop and current frame.
    ///
    /// # Errors
    /// [`IndicatorError::EmptyFrame`] or [`IndicatorError::NonSquareFrame`];
    /// the previous frame size stays in effect.
    pub fn resize(
        &mut self,
        bounds: Size,
    ) -> Result<(), IndicatorError> {
        let frame = match FrameSize::from_size(bounds) {
            Ok(frame) => frame,
            Err(err) => {
                log_warn!(self.log, self.last_seen_ms, "Rejected bounds {}x{}", bounds.width, bounds.height);
                return Err(err);
            }
        };

        self.frame = frame;
        self.push_backdrop();
        if self.state.is_running() {
            self.render_at(self.elapsed);
        } else {
            self.clean();
        }
        Ok(())
    }

    /// Render the static design-time frame (35% into the cycle).
    ///
    /// Only while idle; a running indicator is left untouched.
    pub fn preview(&mut self) {
        if self.state.is_running() {
            return;
        }
        self.render_at(self.config.cycle.secs() * PREVIEW_PHASE_FRACTION);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current settings.
    #[inline]
    pub const fn config(&self) -> &IndicatorConfig { &self.config }

    /// Current frame size.
    #[inline]
    pub const fn frame_size(&self) -> FrameSize { self.frame }

    /// Current animation state.
    #[inline]
    pub const fn state(&self) -> &DriveState<S::Handle> { &self.state }

    /// Position inside the cycle of the last rendered frame, in seconds (0 at rest).
    #[inline]
    pub const fn elapsed(&self) -> f32 { self.elapsed }

    /// Outline currently shown, before rotation.
    #[inline]
    pub const fn outline(&self) -> &Outline { &self.outline }

    /// Fill currently shown.
    #[inline]
    pub const fn fill(&self) -> FillColor { self.fill }

    /// The render sink.
    #[inline]
    pub const fn sink(&self) -> &R { &self.sink }

    /// The render sink, mutably (e.g. to draw it).
    #[inline]
    pub fn sink_mut(&mut self) -> &mut R { &mut self.sink }

    /// The frame scheduler.
    #[inline]
    pub const fn scheduler(&self) -> &S { &self.scheduler }

    /// The frame scheduler, mutably (e.g. to pump its ticks).
    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut S { &mut self.scheduler }

    /// Log of transitions and rejected settings.
    #[inline]
    pub const fn log(&self) -> &LogBuffer { &self.log }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn render_at(
        &mut self,
        elapsed: f32,
    ) {
        let cycle = self.config.cycle.secs();
        self.elapsed = elapsed;
        self.outline = outline_at(elapsed, cycle, self.frame);
        self.fill = fill_color_at(elapsed, cycle, self.config.fill_color);
        self.sink.submit(&self.outline, self.fill);
    }

    /// Reset to the Idle rest state: phase zero, transparent fill.
    fn clean(&mut self) {
        self.elapsed = 0.0;
        self.outline = Outline::rest(self.frame);
        self.fill = FillColor::transparent(self.config.fill_color);
        self.sink.submit(&self.outline, self.fill);
    }

    fn push_backdrop(&mut self) {
        self.sink.set_backdrop(Backdrop {
            frame: self.frame,
            color: self.config.background_color,
        });
    }
}

impl<S: FrameScheduler, R: RenderSink> Drop for MoonIndicator<S, R> {
    fn drop(&mut self) {
        if let DriveState::Running { handle, .. } = core::mem::replace(&mut self.state, DriveState::Idle) {
            self.scheduler.cancel(handle);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
