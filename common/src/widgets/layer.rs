//! Retained-mode layer that paints the indicator onto any RGB565 target.
//!
//! The layer keeps the last backdrop, rotation, outline and fill it was given
//! (it is the [`RenderSink`] of a [`MoonIndicator`]) and draws them as an
//! embedded-graphics [`Drawable`]:
//!
//! 1. clear the frame square to the surface color
//! 2. draw the backdrop disc, if it has a color
//! 3. fill the rotated outline, blended over the backdrop by the fill's alpha
//!
//! A dirty flag records whether anything changed since the last
//! [`ShapeLayer::take_dirty`], so hosts can skip flushing unchanged frames.
//!
//! [`MoonIndicator`]: crate::shell::MoonIndicator

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::primitives::{draw_disc, fill_polygon};
use crate::fill::FillColor;
use crate::outline::Outline;
use crate::shell::{Backdrop, RenderSink};

/// Drawable layer holding the indicator's latest render state.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeLayer {
    origin: Point,
    surface: Rgb565,
    backdrop: Option<Backdrop>,
    rotation: f32,
    outline: Option<Outline>,
    fill: FillColor,
    dirty: bool,
}

impl ShapeLayer {
    /// Create an empty layer whose frame starts at `origin` on a `surface` colored target.
    pub const fn new(
        origin: Point,
        surface: Rgb565,
    ) -> Self {
        Self {
            origin,
            surface,
            backdrop: None,
            rotation: 0.0,
            outline: None,
            fill: FillColor::transparent(surface),
            dirty: true,
        }
    }

    /// Rotation currently applied to outlines, in radians.
    #[inline]
    pub const fn rotation(&self) -> f32 { self.rotation }

    /// Whether anything changed since the last call; clears the flag.
    pub fn take_dirty(&mut self) -> bool { core::mem::replace(&mut self.dirty, false) }

    /// Screen area covered by the layer's frame.
    pub fn bounding_box(&self) -> Rectangle {
        let size = self
            .backdrop
            .map(|b| b.frame.size())
            .or_else(|| self.outline.map(|o| o.frame().size()))
            .unwrap_or_else(Size::zero);
        Rectangle::new(self.origin, size)
    }

    /// Color under the moon: the backdrop disc, or the bare surface.
    fn backdrop_color(&self) -> Rgb565 {
        self.backdrop
            .and_then(|b| b.color)
            .unwrap_or(self.surface)
    }
}

impl RenderSink for ShapeLayer {
    fn set_backdrop(
        &mut self,
        backdrop: Backdrop,
    ) {
        if self.backdrop != Some(backdrop) {
            self.backdrop = Some(backdrop);
            self.dirty = true;
        }
    }

    fn set_rotation(
        &mut self,
        radians: f32,
    ) {
        if self.rotation != radians {
            self.rotation = radians;
            self.dirty = true;
        }
    }

    fn submit(
        &mut self,
        outline: &Outline,
        fill: FillColor,
    ) {
        if self.outline.as_ref() != Some(outline) || self.fill != fill {
            self.outline = Some(*outline);
            self.fill = fill;
            self.dirty = true;
        }
    }
}

impl Drawable for ShapeLayer {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(
        &self,
        target: &mut D,
    ) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = self.bounding_box();
        if area.size == Size::zero() {
            return Ok(());
        }
        target.fill_solid(&area, self.surface)?;

        if let Some(Backdrop { frame, color: Some(color) }) = self.backdrop {
            draw_disc(target, self.origin, frame.edge(), color)?;
        }

        if let Some(outline) = &self.outline {
            if self.fill.is_invisible() {
                return Ok(());
            }
            let color = self.fill.blend_over(self.backdrop_color());
            let vertices = outline.rotated(self.rotation).flatten();
            fill_polygon(target, self.origin, &vertices, color)?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::colors::{BLACK, MOON, NIGHT, WHITE};
    use crate::config::FrameSize;
    use crate::outline::{Sweep, outline_at};

    const EDGE: usize = 40;

    /// In-memory RGB565 framebuffer.
    struct Canvas {
        pixels: [[Rgb565; EDGE]; EDGE],
    }

    impl Canvas {
        fn new(color: Rgb565) -> Self { Self { pixels: [[color; EDGE]; EDGE] } }

        fn count(
            &self,
            color: Rgb565,
        ) -> usize {
            self.pixels.iter().flatten().filter(|&&p| p == color).count()
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size { Size::new(EDGE as u32, EDGE as u32) }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..EDGE as i32).contains(&point.x) && (0..EDGE as i32).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color;
                }
            }
            Ok(())
        }
    }

    fn frame() -> FrameSize { FrameSize::square(EDGE as u32).unwrap() }

    fn layer_with(
        outline: Outline,
        fill: FillColor,
        background: Option<Rgb565>,
    ) -> ShapeLayer {
        let mut layer = ShapeLayer::new(Point::zero(), WHITE);
        layer.set_backdrop(Backdrop {
            frame: frame(),
            color: background,
        });
        layer.submit(&outline, fill);
        layer
    }

    fn disc_pixels() -> usize { (core::f32::consts::PI * 20.0 * 20.0) as usize }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    #[test]
    fn test_full_disc_covers_frame_circle() {
        let outline = outline_at(1.0, 2.0, frame());
        let layer = layer_with(outline, FillColor::opaque(BLACK), None);
        let mut canvas = Canvas::new(NIGHT);
        layer.draw(&mut canvas).unwrap();

        let moon = canvas.count(BLACK);
        assert!(moon > disc_pixels() * 9 / 10, "Full moon painted only {moon} pixels");
        assert_eq!(canvas.count(NIGHT), 0, "Frame area is cleared to the surface first");
    }

    #[test]
    fn test_rest_shape_paints_almost_nothing() {
        let layer = layer_with(Outline::rest(frame()), FillColor::opaque(BLACK), None);
        let mut canvas = Canvas::new(WHITE);
        layer.draw(&mut canvas).unwrap();
        assert!(canvas.count(BLACK) < disc_pixels() / 10);
    }

    #[test]
    fn test_transparent_fill_paints_nothing() {
        let outline = outline_at(1.0, 2.0, frame());
        let layer = layer_with(outline, FillColor::transparent(BLACK), Some(NIGHT));
        let mut canvas = Canvas::new(WHITE);
        layer.draw(&mut canvas).unwrap();
        assert_eq!(canvas.count(BLACK), 0);
        assert!(canvas.count(NIGHT) > disc_pixels() * 9 / 10, "Backdrop disc is still drawn");
    }

    #[test]
    fn test_half_alpha_blends_over_backdrop() {
        let outline = Outline::with_bulge(frame(), -1.0, Sweep::Clockwise);
        let fill = FillColor { color: MOON, alpha: 0.5 };
        let layer = layer_with(outline, fill, Some(NIGHT));
        let mut canvas = Canvas::new(WHITE);
        layer.draw(&mut canvas).unwrap();

        let blended = fill.blend_over(NIGHT);
        assert_ne!(blended, MOON);
        assert_ne!(blended, NIGHT);
        assert_eq!(canvas.pixels[EDGE / 2][EDGE / 2], blended, "Centre pixel is the blended fill");
    }

    #[test]
    fn test_half_disc_sits_on_the_right() {
        let outline = Outline::with_bulge(frame(), 0.0, Sweep::Clockwise);
        let layer = layer_with(outline, FillColor::opaque(BLACK), None);
        let mut canvas = Canvas::new(WHITE);
        layer.draw(&mut canvas).unwrap();

        let row = EDGE / 2;
        assert_eq!(canvas.pixels[row][EDGE - 3], BLACK, "Right side is lit");
        assert_eq!(canvas.pixels[row][2], WHITE, "Left side is dark");
    }

    #[test]
    fn test_rotation_turns_the_half_disc() {
        let outline = Outline::with_bulge(frame(), 0.0, Sweep::Clockwise);
        let mut layer = layer_with(outline, FillColor::opaque(BLACK), None);
        layer.set_rotation(core::f32::consts::PI);
        let mut canvas = Canvas::new(WHITE);
        layer.draw(&mut canvas).unwrap();

        let row = EDGE / 2;
        assert_eq!(canvas.pixels[row][2], BLACK, "Half a turn moves the lit side to the left");
        assert_eq!(canvas.pixels[row][EDGE - 3], WHITE);
    }

    // -------------------------------------------------------------------------
    // Retained State
    // -------------------------------------------------------------------------

    #[test]
    fn test_dirty_flag_tracks_changes() {
        let mut layer = layer_with(Outline::rest(frame()), FillColor::transparent(BLACK), None);
        assert!(layer.take_dirty());
        assert!(!layer.take_dirty(), "Flag clears after being taken");

        layer.submit(&Outline::rest(frame()), FillColor::transparent(BLACK));
        assert!(!layer.take_dirty(), "Identical submission is not a change");

        layer.set_rotation(0.3);
        assert!(layer.take_dirty());
        assert_eq!(layer.rotation(), 0.3);
    }

    #[test]
    fn test_bounding_box_follows_frame_and_origin() {
        let mut layer = ShapeLayer::new(Point::new(5, 7), WHITE);
        assert_eq!(layer.bounding_box().size, Size::zero(), "Nothing retained yet");
        layer.set_backdrop(Backdrop { frame: frame(), color: None });
        assert_eq!(layer.bounding_box(), Rectangle::new(Point::new(5, 7), Size::new(40, 40)));
    }

    #[test]
    fn test_empty_layer_draws_nothing() {
        let layer = ShapeLayer::new(Point::zero(), BLACK);
        let mut canvas = Canvas::new(WHITE);
        layer.draw(&mut canvas).unwrap();
        assert_eq!(canvas.count(WHITE), EDGE * EDGE);
    }
}
