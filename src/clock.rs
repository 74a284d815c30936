//! Frame scheduler for the simulator.
//!
//! The clock stands in for a display link: while a registration is
//! outstanding, every [`FrameClock::tick`] yields a monotonic timestamp for the
//! indicator. Timestamps come either from the wall clock (window mode) or from
//! a virtual clock advanced by a fixed step per tick (headless export), so
//! exported frames are identical from run to run.

use std::time::{Duration, Instant};

use moon_indicator_common::FrameScheduler;

/// Registration token returned by [`FrameClock::request_frames`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(u32);

/// Source of tick timestamps.
#[derive(Clone, Copy, Debug)]
enum Pacing {
    /// Time since `epoch`.
    RealTime { epoch: Instant },
    /// `now` advances by `step` on every tick.
    Fixed { step: Duration, now: Duration },
}

/// Monotonic frame clock implementing [`FrameScheduler`].
#[derive(Debug)]
pub struct FrameClock {
    pacing: Pacing,
    active: Option<FrameHandle>,
    next_handle: u32,
}

impl FrameClock {
    /// Clock driven by [`Instant`], starting now.
    pub fn real_time() -> Self { Self::with_pacing(Pacing::RealTime { epoch: Instant::now() }) }

    /// Virtual clock advancing `1 / fps` seconds per tick.
    pub fn fixed(fps: u32) -> Self {
        let step = Duration::from_secs(1) / fps.max(1);
        Self::with_pacing(Pacing::Fixed {
            step,
            now: Duration::ZERO,
        })
    }

    const fn with_pacing(pacing: Pacing) -> Self {
        Self {
            pacing,
            active: None,
            next_handle: 0,
        }
    }

    /// Current clock time.
    pub fn now(&self) -> Duration {
        match self.pacing {
            Pacing::RealTime { epoch } => epoch.elapsed(),
            Pacing::Fixed { now, .. } => now,
        }
    }

    /// Whether frames are being delivered.
    #[inline]
    pub const fn is_active(&self) -> bool { self.active.is_some() }

    /// Advance one frame.
    ///
    /// Returns the timestamp to hand to the indicator, or `None` while no
    /// registration is outstanding. Virtual time advances either way.
    pub fn tick(&mut self) -> Option<Duration> {
        let timestamp = self.now();
        if let Pacing::Fixed { step, now } = &mut self.pacing {
            *now += *step;
        }
        self.active.map(|_| timestamp)
    }
}

impl FrameScheduler for FrameClock {
    type Handle = FrameHandle;

    fn request_frames(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.active = Some(handle);
        tracing::debug!(handle = handle.0, "frame callback registered");
        handle
    }

    fn cancel(
        &mut self,
        handle: FrameHandle,
    ) {
        if self.active == Some(handle) {
            self.active = None;
            tracing::debug!(handle = handle.0, "frame callback cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances_per_tick() {
        let mut clock = FrameClock::fixed(50);
        let handle = clock.request_frames();

        assert_eq!(clock.tick(), Some(Duration::ZERO));
        assert_eq!(clock.tick(), Some(Duration::from_millis(20)));
        assert_eq!(clock.tick(), Some(Duration::from_millis(40)));

        clock.cancel(handle);
        assert!(!clock.is_active());
    }

    #[test]
    fn test_inactive_clock_yields_nothing() {
        let mut clock = FrameClock::fixed(10);
        assert_eq!(clock.tick(), None, "No frames before a request");

        let handle = clock.request_frames();
        clock.cancel(handle);
        assert_eq!(clock.tick(), None, "No frames after cancel");
        assert_eq!(clock.now(), Duration::from_millis(200), "Virtual time keeps running");
    }

    #[test]
    fn test_stale_handle_does_not_cancel() {
        let mut clock = FrameClock::fixed(10);
        let first = clock.request_frames();
        clock.cancel(first);
        let second = clock.request_frames();
        assert_ne!(first, second);

        clock.cancel(first);
        assert!(clock.is_active(), "Cancelling an old handle keeps the new registration");
        clock.cancel(second);
        assert!(!clock.is_active());
    }

    #[test]
    fn test_real_time_clock_is_monotonic() {
        let mut clock = FrameClock::real_time();
        clock.request_frames();
        let a = clock.tick().unwrap();
        let b = clock.tick().unwrap();
        assert!(b >= a);
    }
}
