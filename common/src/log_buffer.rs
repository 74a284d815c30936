//! Per-indicator diagnostic log.
//!
//! Every state transition and rejected setting of a [`MoonIndicator`] is recorded
//! in a small ring so a host can show it on screen or forward it to its own
//! logger. With the `defmt` feature the entries are also emitted through `defmt`
//! at the matching level.
//!
//! Levels map to panel colors: trace and debug lines are gray, info green,
//! warnings yellow and errors red.
//!
//! [`MoonIndicator`]: crate::shell::MoonIndicator

use core::fmt;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{Deque, String};

use crate::colors::{GRAY, GREEN, RED, YELLOW};

/// Entries retained before the oldest is overwritten.
pub const LOG_ENTRIES: usize = 16;

/// Capacity of one message, in bytes.
pub const LOG_MSG_LEN: usize = 48;

/// Severity of a [`LogEntry`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    /// No-op transitions and re-anchoring.
    Debug = 1,
    /// Start, stop, attach, accepted settings.
    #[default]
    Info = 2,
    /// Rejected settings.
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Panel color for this level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace | Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// One-letter tag shown in front of a panel line.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry with level, message, timestamp and sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Message, cut at the last whole character that fits.
    pub message: String<LOG_MSG_LEN>,
    /// Milliseconds since the host's frame clock epoch (last frame seen).
    pub timestamp_ms: u32,
    /// Monotonic counter over every entry ever pushed, including dropped ones.
    pub seq: u32,
}

impl LogEntry {
    /// Create a new entry; `seq` is assigned when pushed.
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u32,
    ) -> Self {
        let mut text: String<LOG_MSG_LEN> = String::new();
        Truncating::new(&mut text).push_str(message);
        Self {
            level,
            message: text,
            timestamp_ms,
            seq: 0,
        }
    }
}

/// `fmt::Write` into a fixed string that keeps the prefix that fits.
///
/// A plain `heapless::String` rejects a whole formatted piece when it does not
/// fit; this writer fills up to capacity instead and never reports an error.
pub struct Truncating<'a, const N: usize> {
    buf: &'a mut String<N>,
    full: bool,
}

impl<'a, const N: usize> Truncating<'a, N> {
    pub fn new(buf: &'a mut String<N>) -> Self { Self { buf, full: false } }

    fn push_str(
        &mut self,
        s: &str,
    ) {
        if self.full {
            return;
        }
        for c in s.chars() {
            if self.buf.push(c).is_err() {
                self.full = true;
                return;
            }
        }
    }
}

impl<const N: usize> fmt::Write for Truncating<'_, N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

/// Circular buffer of log entries. The oldest entry is dropped when full.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: Deque<LogEntry, LOG_ENTRIES>,
    next_seq: u32,
}

impl LogBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            next_seq: 0,
        }
    }

    /// Push an entry, dropping the oldest if the buffer is full.
    pub fn push(
        &mut self,
        mut entry: LogEntry,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        entry.seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.push_back(entry).ok();
    }

    /// Number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether no entries are held.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Sequence number the next pushed entry will get.
    #[inline]
    pub const fn next_seq(&self) -> u32 { self.next_seq }

    /// Retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// Entries pushed at or after sequence number `seq`, oldest first.
    ///
    /// Lets a host forward only what it has not seen yet.
    pub fn since(
        &self,
        seq: u32,
    ) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |entry| entry.seq >= seq)
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&LogEntry> { self.entries.back() }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Format a message into `$buffer` at the given level.
///
/// `$buffer` is a [`LogBuffer`] place expression, `$ts` the timestamp in ms.
macro_rules! log_at {
    ($level:ident, $buffer:expr, $ts:expr, $($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!($crate::log_buffer::Truncating::new(&mut buf), $($arg)*);
        $buffer.push($crate::log_buffer::LogEntry::new(
            $crate::log_buffer::LogLevel::$level,
            buf.as_str(),
            $ts,
        ));
        #[cfg(feature = "defmt")]
        $crate::log_buffer::emit_defmt($crate::log_buffer::LogLevel::$level, buf.as_str());
    }};
}

/// Log a message at Info level.
macro_rules! log_info {
    ($buffer:expr, $ts:expr, $($arg:tt)*) => { $crate::log_buffer::log_at!(Info, $buffer, $ts, $($arg)*) };
}

/// Log a message at Warn level.
macro_rules! log_warn {
    ($buffer:expr, $ts:expr, $($arg:tt)*) => { $crate::log_buffer::log_at!(Warn, $buffer, $ts, $($arg)*) };
}

/// Log a message at Debug level.
macro_rules! log_debug {
    ($buffer:expr, $ts:expr, $($arg:tt)*) => { $crate::log_buffer::log_at!(Debug, $buffer, $ts, $($arg)*) };
}

pub(crate) use {log_at, log_debug, log_info, log_warn};

/// Forward an already formatted entry to defmt.
#[cfg(feature = "defmt")]
pub fn emit_defmt(
    level: LogLevel,
    message: &str,
) {
    match level {
        LogLevel::Trace => defmt::trace!("{=str}", message),
        LogLevel::Debug => defmt::debug!("{=str}", message),
        LogLevel::Info => defmt::info!("{=str}", message),
        LogLevel::Warn => defmt::warn!("{=str}", message),
        LogLevel::Error => defmt::error!("{=str}", message),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
