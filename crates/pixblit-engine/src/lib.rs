//! Pixblit engine crate.
//!
//! Shows a software RGBA pixmap in a resizable window. Pixels are written on
//! the CPU, uploaded to a GL texture on [`Display::flush`] and drawn on
//! [`Display::render`] as an aspect-preserving quad with antialiased texel
//! edges.

pub mod coords;
pub mod device;
pub mod display;
pub mod gl;
pub mod logging;
pub mod render;

mod pixmap;

pub use display::{AspectReference, Display, DisplayConfig};
pub use pixmap::Pixmap;
