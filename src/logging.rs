//! Bridge from the indicator's log buffer to `tracing`.

use color_eyre::Result;
use moon_indicator_common::{LogBuffer, LogLevel};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the error report hook and the `RUST_LOG`-filtered subscriber.
pub fn init() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
    Ok(())
}

/// Forwards log entries that have not been forwarded yet.
#[derive(Debug, Default)]
pub struct LogForwarder {
    next_seq: u32,
}

impl LogForwarder {
    /// Emit every entry pushed since the last call. Returns how many were emitted.
    pub fn forward(
        &mut self,
        log: &LogBuffer,
    ) -> usize {
        let mut forwarded = 0;
        for entry in log.since(self.next_seq) {
            let message = entry.message.as_str();
            let at_ms = entry.timestamp_ms;
            match entry.level {
                LogLevel::Trace => tracing::trace!(at_ms, "{message}"),
                LogLevel::Debug => tracing::debug!(at_ms, "{message}"),
                LogLevel::Info => tracing::info!(at_ms, "{message}"),
                LogLevel::Warn => tracing::warn!(at_ms, "{message}"),
                LogLevel::Error => tracing::error!(at_ms, "{message}"),
            }
            forwarded += 1;
        }
        self.next_seq = log.next_seq();
        forwarded
    }
}
