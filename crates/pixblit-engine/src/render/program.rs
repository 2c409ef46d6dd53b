use std::fmt;

use crate::coords::Vec2;
use crate::gl::GlBackend;

use super::shaders::{
    ShaderSources, ATTR_POS, UNIFORM_BLEND_BORDER, UNIFORM_SCALE, UNIFORM_TEX, UNIFORM_TEX_DIM,
};

/// Diagnostic logs are cut to this many bytes.
pub const MAX_INFO_LOG: usize = 4096;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    #[inline]
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ShaderError {
    /// The driver refused to allocate a shader or program object.
    Create(String),
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
    /// A linked program lacks one of the blit parameters.
    MissingParameter(&'static str),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Create(msg) => write!(f, "failed to create GL object: {msg}"),
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed: {log}")
            }
            ShaderError::Link { log } => write!(f, "program linker failed: {log}"),
            ShaderError::MissingParameter(name) => {
                write!(f, "program has no active parameter `{name}`")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Compiles both stages and links them into a program.
///
/// Stage objects never outlive this call: a failed compile releases the stages
/// compiled so far, and after linking both stages are detached and deleted
/// whatever the link status. Diagnostics are logged at `error`.
pub fn build_program<G: GlBackend>(
    gl: &G,
    sources: &ShaderSources,
) -> Result<G::Program, ShaderError> {
    let vs = compile_stage(gl, ShaderStage::Vertex, sources.vertex)?;
    let fs = match compile_stage(gl, ShaderStage::Fragment, sources.fragment) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(vs);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(p) => p,
        Err(e) => {
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(ShaderError::Create(e));
        }
    };

    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    gl.link_program(program);
    let linked = gl.get_program_link_status(program);

    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !linked {
        let log = truncate_log(gl.get_program_info_log(program));
        log::error!("program linker failed:\n{log}");
        gl.delete_program(program);
        return Err(ShaderError::Link { log });
    }

    Ok(program)
}

fn compile_stage<G: GlBackend>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl
        .create_shader(stage.gl_enum())
        .map_err(ShaderError::Create)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = truncate_log(gl.get_shader_info_log(shader));
        log::error!("{stage} shader compilation failed:\n{log}");
        gl.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

/// Cuts `log` to at most [`MAX_INFO_LOG`] bytes on a char boundary.
pub(crate) fn truncate_log(mut log: String) -> String {
    if log.len() > MAX_INFO_LOG {
        let mut end = MAX_INFO_LOG;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}

/// Linked blit program with its parameter locations resolved.
pub struct BlitProgram<G: GlBackend> {
    program: G::Program,
    pos: u32,
    blend_border: G::UniformLocation,
    scale: G::UniformLocation,
    tex: G::UniformLocation,
    tex_dim: G::UniformLocation,
}

impl<G: GlBackend> BlitProgram<G> {
    /// Builds the program and caches the `pos` attribute and the four uniform
    /// locations. The program is deleted if any of them is missing.
    pub fn new(gl: &G, sources: &ShaderSources) -> Result<Self, ShaderError> {
        let program = build_program(gl, sources)?;

        match Self::locate(gl, program) {
            Ok(p) => Ok(p),
            Err(e) => {
                log::error!("{e}");
                gl.delete_program(program);
                Err(e)
            }
        }
    }

    fn locate(gl: &G, program: G::Program) -> Result<Self, ShaderError> {
        let uniform = |name: &'static str| {
            gl.get_uniform_location(program, name)
                .ok_or(ShaderError::MissingParameter(name))
        };

        Ok(Self {
            program,
            pos: gl
                .get_attrib_location(program, ATTR_POS)
                .ok_or(ShaderError::MissingParameter(ATTR_POS))?,
            blend_border: uniform(UNIFORM_BLEND_BORDER)?,
            scale: uniform(UNIFORM_SCALE)?,
            tex: uniform(UNIFORM_TEX)?,
            tex_dim: uniform(UNIFORM_TEX_DIM)?,
        })
    }

    /// Location of the `pos` vertex attribute.
    #[inline]
    pub fn pos_attribute(&self) -> u32 {
        self.pos
    }

    /// Activates the program and sets every uniform for one draw.
    pub fn activate(
        &self,
        gl: &G,
        blend_border: f32,
        scale: Vec2,
        texture_unit: i32,
        tex_dim: Vec2,
    ) {
        gl.use_program(Some(self.program));
        gl.uniform_1_f32(Some(&self.blend_border), blend_border);
        gl.uniform_2_f32(Some(&self.scale), scale.x, scale.y);
        gl.uniform_1_i32(Some(&self.tex), texture_unit);
        gl.uniform_2_f32(Some(&self.tex_dim), tex_dim.x, tex_dim.y);
    }

    pub fn deactivate(&self, gl: &G) {
        gl.use_program(None);
    }

    pub fn delete(self, gl: &G) {
        gl.delete_program(self.program);
    }
}
