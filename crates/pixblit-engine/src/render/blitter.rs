use anyhow::{Context, Result};

use crate::coords::{DisplaySize, Vec2, ViewportState};
use crate::device::Profile;
use crate::gl::{gl_size, GlBackend};
use crate::pixmap::Pixmap;

use super::geometry::QuadGeometry;
use super::program::BlitProgram;

/// Width of the smoothed band at texel edges, in screen pixels.
pub const BLEND_BORDER: f32 = 0.7;

/// Texture unit the pixmap texture is sampled from.
const TEXTURE_UNIT: i32 = 0;

/// Pixmap texture storage. Alpha is accepted on upload and dropped.
const TEXTURE_INTERNAL_FORMAT: i32 = glow::RGB as i32;

/// GPU side of a display: the pixmap texture, the blit program and the quad.
///
/// All GL objects are created by [`new`](Self::new) and deleted by
/// [`release`](Self::release); after release every operation is a no-op.
pub struct Blitter<G: GlBackend> {
    gl: G,
    profile: Profile,
    tex_width: u32,
    tex_height: u32,
    viewport: ViewportState,
    resources: Option<Resources<G>>,
}

struct Resources<G: GlBackend> {
    texture: G::Texture,
    program: BlitProgram<G>,
    quad: QuadGeometry<G>,
}

impl<G: GlBackend> Blitter<G> {
    /// Creates the quad, a texture initialized from `pixmap` and the program for
    /// `profile`. On failure everything created so far is deleted.
    pub fn new(gl: G, profile: Profile, pixmap: &Pixmap, viewport: ViewportState) -> Result<Self> {
        let quad = QuadGeometry::new(&gl, profile)
            .map_err(anyhow::Error::msg)
            .context("failed to create quad geometry")?;

        let texture = match gl.create_texture() {
            Ok(t) => t,
            Err(e) => {
                quad.delete(&gl);
                return Err(anyhow::Error::msg(e).context("failed to create pixmap texture"));
            }
        };
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        upload(&gl, pixmap);
        gl.bind_texture(glow::TEXTURE_2D, None);

        let program = match BlitProgram::new(&gl, profile.shader_sources()) {
            Ok(p) => p,
            Err(e) => {
                gl.delete_texture(texture);
                quad.delete(&gl);
                return Err(anyhow::Error::new(e)
                    .context(format!("failed to build {profile} blit program")));
            }
        };

        Ok(Self {
            gl,
            profile,
            tex_width: pixmap.width(),
            tex_height: pixmap.height(),
            viewport,
            resources: Some(Resources {
                texture,
                program,
                quad,
            }),
        })
    }

    #[inline]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    #[inline]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[inline]
    pub fn gl(&self) -> &G {
        &self.gl
    }

    /// Records a resize; applied by the next [`draw`](Self::draw).
    #[inline]
    pub fn request_resize(&mut self, size: DisplaySize) {
        self.viewport.request(size);
    }

    /// Applies a pending resize to the GL viewport. Returns the applied size.
    pub fn apply_pending_resize(&mut self) -> Option<DisplaySize> {
        self.resources.as_ref()?;

        let size = self.viewport.reconcile()?;
        self.gl
            .viewport(0, 0, gl_size(size.width), gl_size(size.height));
        log::debug!(
            "viewport {}x{}, screen aspect {}",
            size.width,
            size.height,
            self.viewport.screen_aspect()
        );
        Some(size)
    }

    /// Uploads the whole pixmap to the texture.
    ///
    /// A pixmap of a different size than the texture is ignored.
    pub fn flush(&self, pixmap: &Pixmap) {
        let Some(res) = &self.resources else { return };
        if (pixmap.width(), pixmap.height()) != (self.tex_width, self.tex_height) {
            log::warn!(
                "flush skipped: pixmap {}x{} does not match texture {}x{}",
                pixmap.width(),
                pixmap.height(),
                self.tex_width,
                self.tex_height
            );
            return;
        }

        self.gl.bind_texture(glow::TEXTURE_2D, Some(res.texture));
        upload(&self.gl, pixmap);
        self.gl.bind_texture(glow::TEXTURE_2D, None);
    }

    /// Draws the scaled quad into the current framebuffer. Does not present.
    pub fn draw(&mut self) {
        if self.resources.is_none() {
            return;
        }
        self.apply_pending_resize();
        let scale = self.viewport.scale();

        let Some(res) = &self.resources else { return };
        let gl = &self.gl;
        let pos = res.program.pos_attribute();

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(glow::COLOR_BUFFER_BIT);

        res.quad.bind(gl, pos);

        gl.bind_texture(glow::TEXTURE_2D, Some(res.texture));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);

        let tex_dim = Vec2::new(self.tex_width as f32, self.tex_height as f32);
        res.program
            .activate(gl, BLEND_BORDER, scale, TEXTURE_UNIT, tex_dim);

        gl.draw_arrays(glow::TRIANGLE_STRIP, 0, res.quad.vertex_count());

        res.program.deactivate(gl);
        gl.bind_texture(glow::TEXTURE_2D, None);
        res.quad.unbind(gl, pos);
    }

    /// Deletes the program, texture and quad. Idempotent.
    pub fn release(&mut self) {
        let Some(res) = self.resources.take() else { return };
        res.program.delete(&self.gl);
        self.gl.delete_texture(res.texture);
        res.quad.delete(&self.gl);
        log::debug!("blitter resources released");
    }
}

/// Uploads `pixmap` into the texture bound to `TEXTURE_2D`.
fn upload<G: GlBackend>(gl: &G, pixmap: &Pixmap) {
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        TEXTURE_INTERNAL_FORMAT,
        gl_size(pixmap.width()),
        gl_size(pixmap.height()),
        0,
        glow::RGBA,
        glow::UNSIGNED_BYTE,
        Some(pixmap.as_bytes()),
    );
}
