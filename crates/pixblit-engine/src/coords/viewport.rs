use super::{fit_scale, Vec2};

/// Window (viewport) size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// `width / height`, or `None` for a degenerate (minimized) size.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        self.is_valid()
            .then(|| self.width as f32 / self.height as f32)
    }
}

/// Tracks the applied and requested display sizes plus the aspect ratios that
/// drive letterboxing.
///
/// Resize notifications only record a request. The request is applied by
/// [`reconcile`](Self::reconcile), which the renderer calls once per frame, so
/// any number of notifications between frames costs one viewport update.
#[derive(Debug, Clone)]
pub struct ViewportState {
    current: DisplaySize,
    requested: DisplaySize,
    image_aspect: f32,
    screen_aspect: f32,
}

impl ViewportState {
    /// `window` is the size the window was created with; `image_aspect` is the
    /// reference aspect the quad is kept at.
    pub fn new(window: DisplaySize, image_aspect: f32) -> Self {
        Self {
            current: window,
            requested: window,
            image_aspect,
            screen_aspect: window.aspect().unwrap_or(image_aspect),
        }
    }

    /// Records a resize notification. Nothing is applied until the next reconcile.
    #[inline]
    pub fn request(&mut self, size: DisplaySize) {
        self.requested = size;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.current != self.requested
    }

    /// Adopts the requested size if it differs from the current one.
    ///
    /// Returns the newly applied size, or `None` when nothing changed. A
    /// degenerate size is still adopted (so the viewport follows the window) but
    /// keeps the previous screen aspect.
    pub fn reconcile(&mut self) -> Option<DisplaySize> {
        if !self.is_pending() {
            return None;
        }

        self.current = self.requested;
        if let Some(aspect) = self.current.aspect() {
            self.screen_aspect = aspect;
        }
        Some(self.current)
    }

    /// Quad scale for the current aspects.
    #[inline]
    pub fn scale(&self) -> Vec2 {
        fit_scale(self.image_aspect, self.screen_aspect)
    }

    #[inline]
    pub fn current(&self) -> DisplaySize {
        self.current
    }

    #[inline]
    pub fn requested(&self) -> DisplaySize {
        self.requested
    }

    #[inline]
    pub fn image_aspect(&self) -> f32 {
        self.image_aspect
    }

    #[inline]
    pub fn screen_aspect(&self) -> f32 {
        self.screen_aspect
    }
}
