//! Command line options.

use std::path::PathBuf;

use clap::Parser;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use moon_indicator_common::config::DEFAULT_CYCLE_SECS;
use moon_indicator_common::{CycleDuration, IndicatorConfig};

use crate::config::{DEFAULT_FPS, DEFAULT_FRAME_EDGE, MAX_FRAME_EDGE, MIN_FRAME_EDGE};

/// Moon phase activity indicator simulator.
///
/// Renders the indicator headless into numbered PNG frames, or into an
/// interactive window when built with the `window` feature.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Length of one wax/wane cycle in seconds.
    #[arg(long, default_value_t = DEFAULT_CYCLE_SECS, value_parser = parse_cycle)]
    pub cycle_duration: f32,

    /// Edge of the square indicator frame in pixels.
    #[arg(
        long,
        default_value_t = DEFAULT_FRAME_EDGE,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_FRAME_EDGE)..=i64::from(MAX_FRAME_EDGE)),
    )]
    pub size: u32,

    /// Static rotation of the moon in degrees.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, value_parser = parse_rotation)]
    pub rotation: f32,

    /// Number of frames to export in headless mode.
    #[arg(long, default_value_t = 60)]
    pub frames: u32,

    /// Frame rate of the virtual clock in headless mode.
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Directory receiving `frame_NNNN.png` files.
    #[arg(long, default_value = "frames")]
    pub out_dir: PathBuf,

    /// Fill color as `#RRGGBB`.
    #[arg(long, default_value = "#F8E8A0", value_parser = parse_color)]
    pub fill: Rgb565,

    /// Background disc color as `#RRGGBB`, or `none`.
    #[arg(long, default_value = "#102030", value_parser = parse_background)]
    pub background: Background,

    /// Open an interactive window instead of exporting frames.
    #[arg(long)]
    pub window: bool,

    /// Write a single idle preview frame to `--out-dir/preview.png` and exit.
    #[arg(long, conflicts_with = "window")]
    pub preview: bool,
}

/// Background disc choice; `None` leaves the screen visible behind the moon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Background(pub Option<Rgb565>);

impl Cli {
    /// Indicator settings derived from the options.
    ///
    /// The cycle was validated while parsing; an invalid value falls back to the default.
    pub fn indicator_config(&self) -> IndicatorConfig {
        IndicatorConfig::default()
            .with_cycle(CycleDuration::new(self.cycle_duration).unwrap_or_default())
            .with_fill_color(self.fill)
            .with_background_color(self.background.0)
            .with_rotation(self.rotation.to_radians())
    }
}

fn parse_cycle(value: &str) -> Result<f32, String> {
    let secs: f32 = value.parse().map_err(|e| format!("{e}"))?;
    CycleDuration::new(secs).map(CycleDuration::secs).map_err(|e| e.to_string())
}

fn parse_rotation(value: &str) -> Result<f32, String> {
    let degrees: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(format!("rotation must be a finite number of degrees, got {value:?}"))
    }
}

fn parse_color(value: &str) -> Result<Rgb565, String> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected #RRGGBB, got {value:?}"));
    }
    let channel = |range: core::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color {value:?}"))
    };
    let rgb = Rgb888::new(channel(0..2)?, channel(2..4)?, channel(4..6)?);
    Ok(Rgb565::from(rgb))
}

fn parse_background(value: &str) -> Result<Background, String> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(Background(None));
    }
    parse_color(value).map(|color| Background(Some(color)))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["moon-indicator"]).unwrap();
        assert_eq!(cli.cycle_duration, DEFAULT_CYCLE_SECS);
        assert_eq!(cli.size, DEFAULT_FRAME_EDGE);
        assert!(!cli.window);
        assert!(!cli.preview);
        assert!(cli.background.0.is_some(), "Simulator shows a background disc by default");
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FFFFFF").unwrap(), Rgb565::WHITE);
        assert_eq!(parse_color("000000").unwrap(), Rgb565::BLACK);
        assert_eq!(parse_color("#ff0000").unwrap(), Rgb565::RED);
        assert!(parse_color("#FFF").is_err(), "Short form is not accepted");
        assert!(parse_color("#GG0000").is_err());
    }

    #[test]
    fn test_parse_background_none() {
        assert_eq!(parse_background("none").unwrap(), Background(None));
        assert_eq!(parse_background("#000000").unwrap(), Background(Some(Rgb565::BLACK)));
    }

    #[test]
    fn test_invalid_cycle_rejected() {
        for bad in ["0", "-1.5", "nan", "inf", "abc"] {
            assert!(
                Cli::try_parse_from(["moon-indicator", "--cycle-duration", bad]).is_err(),
                "Cycle {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_rotation_rejected() {
        for bad in ["nan", "inf", "-inf"] {
            assert!(
                Cli::try_parse_from(["moon-indicator", "--rotation", bad]).is_err(),
                "Rotation {bad} should be rejected"
            );
        }
        assert!(Cli::try_parse_from(["moon-indicator", "--rotation", "-45"]).is_ok());
    }

    #[test]
    fn test_preview_conflicts_with_window() {
        let cli = Cli::try_parse_from(["moon-indicator", "--preview"]).unwrap();
        assert!(cli.preview);
        assert!(Cli::try_parse_from(["moon-indicator", "--preview", "--window"]).is_err());
    }

    #[test]
    fn test_size_range_enforced() {
        assert!(Cli::try_parse_from(["moon-indicator", "--size", "4"]).is_err());
        assert!(Cli::try_parse_from(["moon-indicator", "--size", "500"]).is_err());
        assert!(Cli::try_parse_from(["moon-indicator", "--size", "64"]).is_ok());
    }

    #[test]
    fn test_indicator_config_converts_degrees() {
        let cli = Cli::try_parse_from(["moon-indicator", "--rotation", "-90", "--cycle-duration", "3"]).unwrap();
        let config = cli.indicator_config();
        assert!((config.rotation + core::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(config.cycle.secs(), 3.0);
    }
}
