//! Widget components for drawing the indicator.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod layer;
mod primitives;

pub use layer::ShapeLayer;
pub use primitives::{draw_disc, fill_polygon};
