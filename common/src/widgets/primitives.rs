//! Low-level drawing primitives for the indicator layer.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use heapless::Vec;
use libm::ceilf;

use crate::config::MAX_VERTICES;
use crate::outline::PointF;

/// Draw a filled disc inscribed in the square at `top_left` with edge `diameter`.
pub fn draw_disc<D>(
    display: &mut D,
    top_left: Point,
    diameter: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if diameter == 0 {
        return Ok(());
    }
    Circle::new(top_left, diameter)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}

/// Fill a closed polygon (even-odd rule), offset by `origin`.
///
/// Pixels are sampled at their centres, one horizontal span per crossing pair,
/// so coincident edges travelled in opposite directions cancel out.
/// Returns the number of pixels covered, before clipping by the target.
/// Polygons with non-finite vertices paint nothing.
pub fn fill_polygon<D>(
    display: &mut D,
    origin: Point,
    vertices: &[PointF],
    color: Rgb565,
) -> Result<u32, D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if vertices.len() < 3 || vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
        return Ok(0);
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v.y), hi.max(v.y)));

    let first_row = ceilf(min_y - 0.5) as i32;
    let last_row = ceilf(max_y - 0.5) as i32;
    let mut painted = 0u32;

    for row in first_row..last_row {
        let sample_y = row as f32 + 0.5;
        let mut crossings: Vec<f32, MAX_VERTICES> = Vec::new();

        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            if (a.y <= sample_y) != (b.y <= sample_y) {
                let x = a.x + (sample_y - a.y) * (b.x - a.x) / (b.y - a.y);
                crossings.push(x).ok();
            }
        }

        crossings.sort_unstable_by(|l, r| l.total_cmp(r));

        for span in crossings.chunks_exact(2) {
            let start = ceilf(span[0] - 0.5) as i32;
            let end = ceilf(span[1] - 0.5) as i32;
            if end <= start {
                continue;
            }
            let width = (end - start) as u32;
            display.fill_solid(
                &Rectangle::new(origin + Point::new(start, row), Size::new(width, 1)),
                color,
            )?;
            painted += width;
        }
    }

    Ok(painted)
}
