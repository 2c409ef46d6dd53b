use crate::device::InitError;

/// Which aspect ratio the displayed image is kept at.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum AspectReference {
    /// The window's aspect at creation time.
    ///
    /// A pixmap whose aspect differs from the initial window is stretched to
    /// the window's proportions and keeps them through later resizes.
    #[default]
    Window,
    /// The pixmap's own aspect, so square source pixels stay square.
    Pixmap,
}

/// Initialization parameters for a [`Display`](super::Display).
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub title: String,

    /// Initial window size in physical pixels.
    pub window_size: (u32, u32),

    /// Pixmap size in pixels. Fixed for the display's lifetime.
    pub pixmap_size: (u32, u32),

    /// Wait for vertical blank on buffer swap.
    ///
    /// This value is a hint; drivers may refuse it.
    pub vsync: bool,

    pub aspect_reference: AspectReference,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "pixblit".to_string(),
            window_size: (800, 600),
            pixmap_size: (320, 240),
            vsync: true,
            aspect_reference: AspectReference::Window,
        }
    }
}

impl DisplayConfig {
    /// Rejects zero window or pixmap dimensions.
    pub fn validate(&self) -> Result<(), InitError> {
        for (width, height) in [self.window_size, self.pixmap_size] {
            if width == 0 || height == 0 {
                return Err(InitError::InvalidDimensions { width, height });
            }
        }
        Ok(())
    }

    /// Reference aspect (`width / height`) the quad is kept at.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn image_aspect(&self) -> f32 {
        let (w, h) = match self.aspect_reference {
            AspectReference::Window => self.window_size,
            AspectReference::Pixmap => self.pixmap_size,
        };
        w as f32 / h as f32
    }
}
