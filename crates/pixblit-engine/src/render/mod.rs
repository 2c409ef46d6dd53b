//! GPU side of the display.
//!
//! The pixmap lives in a single 2D texture that is drawn onto a full-viewport
//! quad, scaled to keep its aspect ratio. Everything goes through
//! [`GlBackend`](crate::gl::GlBackend) so the pipeline runs against any GL
//! implementation.
//!
//! Convention:
//! - Quad vertices are in NDC; `texLoc` is in source pixels, top-left origin.
//! - The fragment stage snaps to texel centers and blends only across edges.

mod blitter;
mod geometry;
mod program;
pub mod shaders;

pub use blitter::{Blitter, BLEND_BORDER};
pub use program::{build_program, BlitProgram, ShaderError, ShaderStage, MAX_INFO_LOG};
