// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive

//! Moon Indicator Simulator.
//!
//! Drives a [`MoonIndicator`] from a [`FrameClock`] and renders it with
//! `embedded-graphics-simulator` on the same 320x240 surface the firmware
//! targets.
//!
//! # Modes
//!
//! - **Headless** (default): a virtual clock advances `1 / --fps` seconds per
//!   frame and every frame is written to `--out-dir/frame_NNNN.png`. Output is
//!   deterministic.
//! - **Window** (`--window`, needs the `window` cargo feature): real-time
//!   clock and an SDL window.
//! - **Preview** (`--preview`): the idle design-time frame, 35% into the cycle,
//!   written once to `--out-dir/preview.png`.
//!
//! The screen is only redrawn when the indicator layer or its log changed.
//!
//! # Controls (Window Mode)
//!
//! | Key | Action |
//! |-----|--------|
//! | `Space` | Toggle animation on/off |
//! | `R` | Rotate the moon by 15° |
//! | `Q` | Quit |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.
//!
//! # Logging
//!
//! The indicator records its own transitions; they are forwarded to `tracing`
//! after every frame. Set `RUST_LOG=debug` to see scheduler and no-op events.

mod cli;
mod clock;
mod config;
mod logging;
mod screens;
mod styles;

use std::fs;
use std::path::Path;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use moon_indicator_common::colors::BLACK;
use moon_indicator_common::{MoonIndicator, ShapeLayer};
use tracing::info;

use crate::cli::Cli;
use crate::clock::FrameClock;
use crate::config::{PIXEL_SCALE, SCREEN_HEIGHT, SCREEN_WIDTH, frame_origin};
use crate::logging::LogForwarder;
use crate::screens::draw_indicator_screen;

type Indicator = MoonIndicator<FrameClock, ShapeLayer>;

fn main() -> Result<()> {
    logging::init()?;
    let cli = Cli::parse();

    let clock = if cli.window { FrameClock::real_time() } else { FrameClock::fixed(cli.fps) };
    let layer = ShapeLayer::new(frame_origin(cli.size), BLACK);
    let indicator = MoonIndicator::new(cli.indicator_config(), Size::new(cli.size, cli.size), clock, layer)
        .wrap_err("failed to attach indicator")?;

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(PIXEL_SCALE).build();

    if cli.preview {
        run_preview(&cli, indicator, &mut display, &output_settings)
    } else if cli.window {
        run_window(indicator, &mut display, &output_settings)
    } else {
        run_headless(&cli, indicator, &mut display, &output_settings)
    }
}

/// Advance the indicator by one scheduler tick, if frames are requested.
///
/// Returns whether the screen needs a redraw.
fn pump(
    indicator: &mut Indicator,
    forwarder: &mut LogForwarder,
) -> bool {
    if let Some(timestamp) = indicator.scheduler_mut().tick() {
        indicator.on_frame(timestamp);
    }
    let forwarded = forwarder.forward(indicator.log());
    let layer_changed = indicator.sink_mut().take_dirty();
    layer_changed || forwarded > 0
}

fn save_png(
    display: &SimulatorDisplay<Rgb565>,
    output_settings: &OutputSettings,
    path: &Path,
) -> Result<()> {
    display
        .to_rgb_output_image(output_settings)
        .save_png(path)
        .wrap_err_with(|| format!("failed to write {}", path.display()))
}

// =============================================================================
// Headless Export
// =============================================================================

fn run_headless(
    cli: &Cli,
    mut indicator: Indicator,
    display: &mut SimulatorDisplay<Rgb565>,
    output_settings: &OutputSettings,
) -> Result<()> {
    fs::create_dir_all(&cli.out_dir).wrap_err_with(|| format!("failed to create {}", cli.out_dir.display()))?;

    let mut forwarder = LogForwarder::default();
    indicator.start();

    for frame in 0..cli.frames {
        if pump(&mut indicator, &mut forwarder) {
            draw_indicator_screen(display, &indicator);
        }
        save_png(display, output_settings, &cli.out_dir.join(format!("frame_{frame:04}.png")))?;
    }

    indicator.stop();
    forwarder.forward(indicator.log());
    info!(frames = cli.frames, dir = %cli.out_dir.display(), "export finished");
    Ok(())
}

fn run_preview(
    cli: &Cli,
    mut indicator: Indicator,
    display: &mut SimulatorDisplay<Rgb565>,
    output_settings: &OutputSettings,
) -> Result<()> {
    fs::create_dir_all(&cli.out_dir).wrap_err_with(|| format!("failed to create {}", cli.out_dir.display()))?;

    indicator.preview();
    LogForwarder::default().forward(indicator.log());
    draw_indicator_screen(display, &indicator);

    let path = cli.out_dir.join("preview.png");
    save_png(display, output_settings, &path)?;
    info!(path = %path.display(), "preview written");
    Ok(())
}

// =============================================================================
// Interactive Window
// =============================================================================

#[cfg(feature = "window")]
fn run_window(
    mut indicator: Indicator,
    display: &mut SimulatorDisplay<Rgb565>,
    output_settings: &OutputSettings,
) -> Result<()> {
    use std::thread;
    use std::time::Instant;

    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{SimulatorEvent, Window};

    use crate::config::{FRAME_TIME, ROTATION_STEP_DEG};

    let mut window = Window::new("Moon Indicator", output_settings);
    let mut forwarder = LogForwarder::default();
    indicator.start();

    loop {
        let frame_start = Instant::now();

        if pump(&mut indicator, &mut forwarder) {
            draw_indicator_screen(display, &indicator);
        }
        window.update(display);

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Space => {
                            let animating = indicator.is_animating();
                            indicator.set_animating(!animating);
                        }
                        Keycode::R => {
                            let angle = indicator.config().rotation + ROTATION_STEP_DEG.to_radians();
                            indicator.set_rotation_angle(angle);
                        }
                        Keycode::Q => return Ok(()),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

#[cfg(not(feature = "window"))]
fn run_window(
    _indicator: Indicator,
    _display: &mut SimulatorDisplay<Rgb565>,
    _output_settings: &OutputSettings,
) -> Result<()> {
    color_eyre::eyre::bail!("window mode needs the `window` feature (cargo run --features window)")
}
