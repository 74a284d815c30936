//! Simulator screens.
//!
//! - **Indicator** ([`indicator`]): the animated moon with its status line and log panel

mod indicator;

pub use indicator::draw_indicator_screen;
