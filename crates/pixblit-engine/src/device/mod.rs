//! GL context + window surface management.
//!
//! This module is responsible for:
//! - claiming the process-wide windowing subsystem
//! - negotiating a GL profile (3.2 core, falling back to 2.1 compatibility)
//! - creating the window, its GL surface and context, and making it current

mod context;
mod error;
mod profile;
mod subsystem;

pub(crate) use context::{GlWindowSurface, PendingWindow};
pub use error::InitError;
pub use profile::{negotiate, Profile};
pub use subsystem::Subsystem;
