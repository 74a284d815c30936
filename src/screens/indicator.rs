//! Main simulator screen: title, indicator, status line and log panel.
//!
//! The indicator itself is drawn by its [`ShapeLayer`]; this screen only adds
//! the surrounding text. The status line shows the drive state, the phase as a
//! fraction of the cycle, the fill alpha and the static rotation. The log panel
//! shows the newest entries of the indicator's own log in their level colors.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Line;
use embedded_graphics::text::Text;
use heapless::String;
use moon_indicator_common::colors::BLACK;
use moon_indicator_common::{FrameScheduler, LogEntry, MoonIndicator, ShapeLayer, reduce_phase};

use crate::config::{
    DIVIDER_END,
    DIVIDER_START,
    LOG_LINE_HEIGHT,
    LOG_LINES,
    LOG_START_Y,
    STATUS_Y,
    TEXT_X,
    TITLE_POS,
};
use crate::styles::{CENTERED, DIVIDER_STYLE, LEFT_ALIGNED, LOG_FONT, STATUS_STYLE, TITLE_STYLE};

/// Redraw the whole screen for the indicator's current state.
pub fn draw_indicator_screen<D, S>(
    display: &mut D,
    indicator: &MoonIndicator<S, ShapeLayer>,
) where
    D: DrawTarget<Color = Rgb565>,
    S: FrameScheduler,
{
    display.clear(BLACK).ok();

    Text::with_text_style("Moon Indicator", TITLE_POS, TITLE_STYLE, CENTERED)
        .draw(display)
        .ok();
    Line::new(DIVIDER_START, DIVIDER_END)
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();

    indicator.sink().draw(display).ok();

    let status = status_line(indicator);
    Text::with_text_style(&status, Point::new(TEXT_X, STATUS_Y), STATUS_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let log = indicator.log();
    let skip = log.len().saturating_sub(LOG_LINES);
    for (i, entry) in log.iter().skip(skip).enumerate() {
        let line = log_line(entry);
        let style = MonoTextStyle::new(LOG_FONT, entry.level.color());
        let y_pos = LOG_START_Y + i as i32 * LOG_LINE_HEIGHT;
        Text::with_text_style(&line, Point::new(TEXT_X, y_pos), style, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }
}

/// `RUN  p=0.36  a=1.00  rot=15`
fn status_line<S: FrameScheduler>(indicator: &MoonIndicator<S, ShapeLayer>) -> String<48> {
    let state = if indicator.is_animating() { "RUN " } else { "IDLE" };
    let cycle = indicator.config().cycle.secs();
    let phase = reduce_phase(indicator.elapsed(), cycle) / cycle;
    let mut line: String<48> = String::new();
    let _ = write!(
        line,
        "{state}  p={phase:.2}  a={:.2}  rot={:.0}",
        indicator.fill().alpha,
        indicator.config().rotation.to_degrees()
    );
    line
}

/// `[I] 1200ms Animation started`
fn log_line(entry: &LogEntry) -> String<64> {
    let mut line: String<64> = String::new();
    let _ = write!(line, "[{}] {}ms {}", entry.level.prefix(), entry.timestamp_ms, entry.message);
    line
}
