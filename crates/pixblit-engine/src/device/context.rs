use std::ffi::{c_void, CStr};
use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributes, ContextAttributesBuilder, GlProfile, NotCurrentContext,
    NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::coords::DisplaySize;

use super::{InitError, Profile};

/// A window plus a GL context that has not been made current yet.
///
/// Dropping it destroys the window, which is how a failed profile attempt is
/// unwound before the next one.
pub(crate) struct PendingWindow {
    window: Window,
    config: Config,
    context: NotCurrentContext,
}

impl PendingWindow {
    /// Creates a resizable window and a GL context for `profile`.
    pub(crate) fn create(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: DisplaySize,
        profile: Profile,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(size.width, size.height))
            .with_resizable(true);

        let template = ConfigTemplateBuilder::new().prefer_hardware_accelerated(Some(true));

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create window: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window.window_handle().ok().map(|h| h.as_raw());
        let context_attrs = context_attributes(profile, raw_handle);

        // SAFETY: `raw_handle` comes from `window`, which outlives the context
        // (both are owned by the returned value and later by `GlWindowSurface`).
        let context = unsafe { config.display().create_context(&config, &context_attrs) }
            .with_context(|| format!("failed to create {profile} context"))?;

        Ok(Self {
            window,
            config,
            context,
        })
    }

    /// Creates the window surface and makes the context current on this thread.
    pub(crate) fn make_current(self, vsync: bool) -> Result<GlWindowSurface, InitError> {
        let Self {
            window,
            config,
            context,
        } = self;

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| InitError::SurfaceCreation(e.to_string()))?;

        // SAFETY: the surface is stored next to `window` and dropped before it.
        let surface = unsafe { config.display().create_window_surface(&config, &surface_attrs) }
            .map_err(|e| InitError::SurfaceCreation(e.to_string()))?;

        let context = context
            .make_current(&surface)
            .map_err(|e| InitError::SurfaceCreation(e.to_string()))?;

        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("swap interval {interval:?} refused: {e}");
        }

        Ok(GlWindowSurface {
            context,
            surface,
            window,
        })
    }
}

/// Window, surface and current GL context.
///
/// Field order is drop order: context, then surface, then window.
pub(crate) struct GlWindowSurface {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindowSurface {
    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    /// Resolves a GL entry point for the function table loader.
    pub(crate) fn get_proc_address(&self, symbol: &CStr) -> *const c_void {
        self.context.display().get_proc_address(symbol)
    }

    /// Resizes the drawable to match the viewport. Degenerate sizes are skipped.
    pub(crate) fn resize(&self, size: DisplaySize) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.surface.resize(&self.context, w, h);
    }

    /// Presents the back buffer.
    pub(crate) fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }
}

fn context_attributes(profile: Profile, raw_handle: Option<RawWindowHandle>) -> ContextAttributes {
    let (major, minor) = profile.gl_version();
    let gl_profile = match profile {
        Profile::Modern => GlProfile::Core,
        Profile::Legacy => GlProfile::Compatibility,
    };

    ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
        .with_profile(gl_profile)
        .build(raw_handle)
}

/// Picks the config with the fewest samples; the blit needs no multisampling.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() < best.num_samples() { c } else { best })
        // glutin reports an error instead of calling the picker with no configs.
        .expect("glutin yields at least one matching config")
}
