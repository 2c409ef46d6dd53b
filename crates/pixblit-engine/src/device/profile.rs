use std::fmt;

use crate::render::shaders::{ShaderSources, LEGACY_SOURCES, MODERN_SOURCES};

use super::InitError;

/// GL capability level negotiated at init.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Profile {
    /// OpenGL 3.2 core profile, GLSL 1.50, vertex array objects required.
    Modern,
    /// OpenGL 2.1 compatibility profile, GLSL 1.20, no vertex array objects.
    Legacy,
}

impl Profile {
    /// Profiles in the order they are attempted.
    pub const NEGOTIATION_ORDER: [Profile; 2] = [Profile::Modern, Profile::Legacy];

    /// Requested `(major, minor)` context version.
    #[inline]
    pub const fn gl_version(self) -> (u8, u8) {
        match self {
            Profile::Modern => (3, 2),
            Profile::Legacy => (2, 1),
        }
    }

    /// Shader pair written for this profile's GLSL dialect.
    #[inline]
    pub const fn shader_sources(self) -> &'static ShaderSources {
        match self {
            Profile::Modern => &MODERN_SOURCES,
            Profile::Legacy => &LEGACY_SOURCES,
        }
    }

    /// Whether attribute state must live in a vertex array object.
    #[inline]
    pub const fn uses_vertex_array(self) -> bool {
        matches!(self, Profile::Modern)
    }

    #[inline]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Profile::Legacy)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.gl_version();
        match self {
            Profile::Modern => write!(f, "OpenGL {major}.{minor} core"),
            Profile::Legacy => write!(f, "OpenGL {major}.{minor} compatibility"),
        }
    }
}

/// Runs `try_create` for the modern profile, then once more for the legacy
/// profile if the first attempt failed.
///
/// A modern-profile failure is logged and not surfaced. When both attempts fail
/// the error carries both driver diagnostics.
pub fn negotiate<T, E, F>(mut try_create: F) -> Result<(Profile, T), InitError>
where
    E: fmt::Display,
    F: FnMut(Profile) -> Result<T, E>,
{
    let mut failures = Vec::with_capacity(Profile::NEGOTIATION_ORDER.len());

    for profile in Profile::NEGOTIATION_ORDER {
        match try_create(profile) {
            Ok(created) => {
                log::info!("created {profile} context");
                return Ok((profile, created));
            }
            Err(e) => {
                log::warn!("{profile} context unavailable: {e:#}");
                failures.push(format!("{profile}: {e:#}"));
            }
        }
    }

    let msg = failures.join("; ");
    log::error!("could not initialize display: {msg}");
    Err(InitError::ContextCreation(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_success_skips_legacy() {
        let mut attempts = Vec::new();
        let (profile, value) = negotiate(|p| {
            attempts.push(p);
            Ok::<_, String>(42)
        })
        .unwrap();

        assert_eq!(profile, Profile::Modern);
        assert_eq!(value, 42);
        assert_eq!(attempts, vec![Profile::Modern]);
    }

    #[test]
    fn modern_failure_falls_back_to_legacy() {
        let mut attempts = Vec::new();
        let (profile, _) = negotiate(|p| {
            attempts.push(p);
            match p {
                Profile::Modern => Err("GLXBadFBConfig"),
                Profile::Legacy => Ok(()),
            }
        })
        .unwrap();

        assert_eq!(profile, Profile::Legacy);
        assert!(profile.is_legacy());
        assert_eq!(attempts, vec![Profile::Modern, Profile::Legacy]);
    }

    #[test]
    fn both_failures_report_both_diagnostics() {
        let err = negotiate(|p| Err::<(), _>(format!("no {:?}", p))).unwrap_err();
        let InitError::ContextCreation(msg) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert!(msg.contains("no Modern"));
        assert!(msg.contains("no Legacy"));
    }

    #[test]
    fn profile_capabilities() {
        assert!(Profile::Modern.uses_vertex_array());
        assert!(!Profile::Legacy.uses_vertex_array());
        assert_eq!(Profile::Modern.gl_version(), (3, 2));
        assert_eq!(Profile::Legacy.gl_version(), (2, 1));
        assert!(Profile::Modern.shader_sources().vertex.starts_with("#version 150"));
        assert!(Profile::Legacy.shader_sources().vertex.starts_with("#version 120"));
    }
}
