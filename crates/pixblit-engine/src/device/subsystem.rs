use std::sync::atomic::{AtomicBool, Ordering};

use super::InitError;

static LIVE: AtomicBool = AtomicBool::new(false);

/// Process-wide claim on the windowing subsystem.
///
/// Exactly one display may be live at a time. The claim is taken at the start
/// of init and released when the guard drops, after the window and GL context
/// are gone.
#[derive(Debug)]
pub struct Subsystem {
    _private: (),
}

impl Subsystem {
    pub fn acquire() -> Result<Self, InitError> {
        LIVE.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| InitError::SubsystemUnavailable)?;
        log::debug!("windowing subsystem acquired");
        Ok(Self { _private: () })
    }

    /// Whether a display currently holds the subsystem.
    pub fn is_live() -> bool {
        LIVE.load(Ordering::Acquire)
    }
}

impl Drop for Subsystem {
    fn drop(&mut self) {
        LIVE.store(false, Ordering::Release);
        log::debug!("windowing subsystem released");
    }
}
