use bytemuck::{Pod, Zeroable};

use crate::device::Profile;
use crate::gl::GlBackend;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // NDC
}

/// Full-viewport quad as a 4-vertex triangle strip.
pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [1.0, -1.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0] },
    QuadVertex { pos: [-1.0, 1.0] },
];

/// Static quad vertex buffer, plus the vertex array object the core profile
/// requires around attribute state.
pub(super) struct QuadGeometry<G: GlBackend> {
    vbo: G::Buffer,
    vao: Option<G::VertexArray>,
}

impl<G: GlBackend> QuadGeometry<G> {
    pub(super) fn new(gl: &G, profile: Profile) -> Result<Self, String> {
        let vao = if profile.uses_vertex_array() {
            Some(gl.create_vertex_array()?)
        } else {
            None
        };

        let vbo = match gl.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                if let Some(vao) = vao {
                    gl.delete_vertex_array(vao);
                }
                return Err(e);
            }
        };

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(Self { vbo, vao })
    }

    #[inline]
    pub(super) fn vertex_count(&self) -> i32 {
        QUAD_VERTICES.len() as i32
    }

    /// Binds the quad and points attribute `pos` at it (2 tightly packed floats).
    ///
    /// The legacy profile never touches vertex array entry points; 2.1 drivers
    /// need not export them.
    pub(super) fn bind(&self, gl: &G, pos: u32) {
        if let Some(vao) = self.vao {
            gl.bind_vertex_array(Some(vao));
        }
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
        gl.vertex_attrib_pointer_f32(pos, 2, glow::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(pos);
    }

    pub(super) fn unbind(&self, gl: &G, pos: u32) {
        gl.disable_vertex_attrib_array(pos);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        if self.vao.is_some() {
            gl.bind_vertex_array(None);
        }
    }

    pub(super) fn delete(self, gl: &G) {
        gl.delete_buffer(self.vbo);
        if let Some(vao) = self.vao {
            gl.delete_vertex_array(vao);
        }
    }
}
