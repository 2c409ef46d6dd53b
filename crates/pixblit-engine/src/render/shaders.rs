//! GLSL source pairs for the blit program.
//!
//! Both pairs compute the same edge-antialiased nearest-texel lookup; they only
//! differ in how inputs, varyings and the fragment output are declared.

/// Vertex + fragment stage text for one profile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// GLSL 1.50 (core profile): `in`/`out` variables and a declared fragment output.
pub const MODERN_SOURCES: ShaderSources = ShaderSources {
    vertex: include_str!("shaders/blit_150.vert"),
    fragment: include_str!("shaders/blit_150.frag"),
};

/// GLSL 1.20 (compatibility profile): `attribute`/`varying` and `gl_FragColor`.
pub const LEGACY_SOURCES: ShaderSources = ShaderSources {
    vertex: include_str!("shaders/blit_120.vert"),
    fragment: include_str!("shaders/blit_120.frag"),
};

/// Parameter names looked up after linking.
pub(crate) const ATTR_POS: &str = "pos";
pub(crate) const UNIFORM_BLEND_BORDER: &str = "blendBorder";
pub(crate) const UNIFORM_SCALE: &str = "scale";
pub(crate) const UNIFORM_TEX: &str = "tex";
pub(crate) const UNIFORM_TEX_DIM: &str = "texDim";
