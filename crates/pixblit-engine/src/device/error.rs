use std::fmt;

/// Root cause of a failed [`Display`](crate::Display) initialization.
///
/// Init errors reach the caller wrapped in `anyhow::Error` with step context;
/// use `downcast_ref::<InitError>()` to branch on the cause.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InitError {
    /// A window or pixmap dimension was zero, or the pixmap byte size overflows.
    InvalidDimensions { width: u32, height: u32 },
    /// The windowing subsystem is already held by another live display.
    SubsystemUnavailable,
    /// Neither the core nor the legacy profile produced a GL context.
    ContextCreation(String),
    /// The GL context could not be bound to the window surface.
    SurfaceCreation(String),
    /// The pixel buffer could not be allocated.
    Allocation { bytes: usize },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions {width}x{height}")
            }
            InitError::SubsystemUnavailable => {
                f.write_str("windowing subsystem unavailable: another display is live")
            }
            InitError::ContextCreation(msg) => write!(f, "could not initialize display: {msg}"),
            InitError::SurfaceCreation(msg) => write!(f, "could not create window surface: {msg}"),
            InitError::Allocation { bytes } => {
                write!(f, "could not allocate {bytes} byte pixel buffer")
            }
        }
    }
}

impl std::error::Error for InitError {}
