//! Pre-computed static text and line styles.
//!
//! Styles are `const` so the render loop never rebuilds them. Log lines need
//! a per-level color, so [`LOG_FONT`] is exposed for
//! `MonoTextStyle::new(LOG_FONT, level.color())`.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Alignment, TextStyle, TextStyleBuilder};
use moon_indicator_common::colors::{GRAY, WHITE};
use profont::PROFONT_18_POINT;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Used for the title.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for the status line and log panel.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Fonts and Styles
// =============================================================================

/// Small font for log lines (6x10 pixels).
pub const LOG_FONT: &MonoFont = &FONT_6X10;

/// Title text (`ProFont` 18pt).
pub const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);

/// Status line text.
pub const STATUS_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Divider below the title.
pub const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);
