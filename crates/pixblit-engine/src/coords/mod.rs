//! Geometry shared by the blit path.
//!
//! Display sizes are physical pixels with a top-left origin. Scale factors are
//! applied to the full-viewport quad in normalized device coordinates.

mod scale;
mod vec2;
mod viewport;

pub use scale::fit_scale;
pub use vec2::Vec2;
pub use viewport::{DisplaySize, ViewportState};
