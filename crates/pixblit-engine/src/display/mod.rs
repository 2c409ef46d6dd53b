//! The public display: a window showing a software pixmap.
//!
//! A `Display` owns the pixmap, the window with its current GL context and the
//! blitter drawing the pixmap into it. Callers write pixels, call
//! [`Display::flush`] to upload them and [`Display::render`] to present.

mod config;

pub use config::{AspectReference, DisplayConfig};

use anyhow::{Context, Result};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::coords::{DisplaySize, ViewportState};
use crate::device::{negotiate, GlWindowSurface, PendingWindow, Profile, Subsystem};
use crate::gl::GlowBackend;
use crate::pixmap::Pixmap;
use crate::render::Blitter;

/// A live window + GL context displaying a [`Pixmap`].
///
/// Dropping the display (or calling [`uninit`](Self::uninit)) deletes the GPU
/// objects, destroys the context and window and releases the windowing
/// subsystem for the next display.
pub struct Display {
    // Field order is teardown order: GL objects are deleted in `drop` while the
    // context is still current, then context, surface and window go, and the
    // subsystem claim is released last.
    blitter: Blitter<GlowBackend>,
    gl_window: GlWindowSurface,
    pixmap: Pixmap,
    profile: Profile,
    _subsystem: Subsystem,
}

impl Display {
    /// Opens a resizable `window_w`×`window_h` window showing a zeroed
    /// `pixmap_w`×`pixmap_h` pixmap. Other settings use [`DisplayConfig`] defaults.
    ///
    /// Must be called from a running event loop (e.g. in
    /// `ApplicationHandler::resumed`).
    pub fn init(
        event_loop: &ActiveEventLoop,
        title: &str,
        window_w: u32,
        window_h: u32,
        pixmap_w: u32,
        pixmap_h: u32,
    ) -> Result<Self> {
        Self::with_config(
            event_loop,
            DisplayConfig {
                title: title.to_string(),
                window_size: (window_w, window_h),
                pixmap_size: (pixmap_w, pixmap_h),
                ..DisplayConfig::default()
            },
        )
    }

    /// Creates a display from an explicit configuration.
    ///
    /// The root cause of a failure is an [`InitError`](crate::device::InitError)
    /// or a [`ShaderError`](crate::render::ShaderError). Everything created
    /// before the failing step is released again.
    pub fn with_config(event_loop: &ActiveEventLoop, config: DisplayConfig) -> Result<Self> {
        config.validate().context("invalid display configuration")?;

        let subsystem = Subsystem::acquire().context("failed to claim windowing subsystem")?;

        let (window_w, window_h) = config.window_size;
        let window_size = DisplaySize::new(window_w, window_h);
        let (profile, pending) = negotiate(|profile| {
            PendingWindow::create(event_loop, &config.title, window_size, profile)
        })
        .context("failed to create window and GL context")?;

        let (pixmap_w, pixmap_h) = config.pixmap_size;
        let pixmap = Pixmap::new(pixmap_w, pixmap_h).context("failed to allocate pixmap")?;

        let gl_window = pending
            .make_current(config.vsync)
            .context("failed to make GL context current")?;

        // SAFETY: `make_current` left the context current on this thread, and the
        // backend never outlives `gl_window` (both are owned by the display, and
        // `GlowBackend` is not `Send`).
        let gl = unsafe { GlowBackend::load(|symbol| gl_window.get_proc_address(symbol)) };
        let (version, renderer) = gl.driver_info();
        log::info!("GL version {version} ({renderer})");

        let viewport = ViewportState::new(window_size, config.image_aspect());
        let blitter = Blitter::new(gl, profile, &pixmap, viewport)
            .context("failed to create GPU resources")?;

        log::debug!(
            "display ready: window {window_w}x{window_h}, pixmap {pixmap_w}x{pixmap_h}, {profile}"
        );

        Ok(Self {
            blitter,
            gl_window,
            pixmap,
            profile,
            _subsystem: subsystem,
        })
    }

    /// Uploads the whole pixmap to the GPU texture.
    ///
    /// Pixel writes are not visible until flushed; rendering never flushes.
    pub fn flush(&self) {
        self.blitter.flush(&self.pixmap);
    }

    /// Draws the last flushed pixmap and presents it.
    ///
    /// Applies a pending resize first. A failed buffer swap drops the frame.
    pub fn render(&mut self) {
        if let Some(size) = self.blitter.apply_pending_resize() {
            self.gl_window.resize(size);
        }
        self.blitter.draw();

        if let Err(e) = self.gl_window.swap_buffers() {
            log::warn!("buffer swap failed, frame dropped: {e}");
        }
    }

    /// Records new window dimensions; applied by the next [`render`](Self::render).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.blitter.request_resize(DisplaySize::new(width, height));
    }

    /// Releases GPU objects, context, window and the windowing subsystem.
    pub fn uninit(self) {
        drop(self);
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.as_bytes()
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.pixmap.as_bytes_mut()
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[inline]
    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Pixmap width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Pixmap height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    #[inline]
    pub fn is_legacy(&self) -> bool {
        self.profile.is_legacy()
    }

    #[inline]
    pub fn window(&self) -> &Window {
        self.gl_window.window()
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        self.blitter.release();
        log::debug!("display released");
    }
}
