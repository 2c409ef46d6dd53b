//! Capture backend for tests.
//!
//! Records every state-changing call, tracks live GL objects per kind and keeps
//! the last image uploaded to each texture so tests can read it back. Shader
//! sources without a `#version` directive fail to compile; linking can be forced
//! to fail. Parameter lookups succeed when the name occurs in a linked source.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use super::GlBackend;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum ObjectKind {
    Shader,
    Program,
    Buffer,
    Texture,
    VertexArray,
}

pub(crate) const ALL_KINDS: [ObjectKind; 5] = [
    ObjectKind::Shader,
    ObjectKind::Program,
    ObjectKind::Buffer,
    ObjectKind::Texture,
    ObjectKind::VertexArray,
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(u32),
    BindBuffer(u32, Option<u32>),
    BufferData { target: u32, len: usize, usage: u32 },
    BindVertexArray(Option<u32>),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableAttrib(u32),
    DisableAttrib(u32),
    BindTexture(u32, Option<u32>),
    TexImage {
        texture: Option<u32>,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
    },
    TexParameter(u32, u32, i32),
    UseProgram(Option<u32>),
    Uniform1f(String, f32),
    Uniform2f(String, f32, f32),
    Uniform1i(String, i32),
    DrawArrays(u32, i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MockUniform(pub String);

#[derive(Debug, Clone)]
pub(crate) struct TextureImage {
    pub internal_format: i32,
    pub width: i32,
    pub height: i32,
    pub data: Vec<u8>,
}

#[derive(Default)]
struct ShaderState {
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct ProgramState {
    attached: Vec<u32>,
    linked_sources: Vec<String>,
    linked: bool,
    attribs: Vec<String>,
}

#[derive(Default)]
struct State {
    next_id: u32,
    live: HashMap<ObjectKind, BTreeSet<u32>>,
    created: HashMap<ObjectKind, usize>,
    deleted: HashMap<ObjectKind, usize>,
    invalid_deletes: usize,
    shaders: HashMap<u32, ShaderState>,
    programs: HashMap<u32, ProgramState>,
    textures: HashMap<u32, TextureImage>,
    bound_texture: Option<u32>,
    fail_link: bool,
    calls: Vec<Call>,
}

impl State {
    fn create(&mut self, kind: ObjectKind) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.live.entry(kind).or_default().insert(id);
        *self.created.entry(kind).or_default() += 1;
        id
    }

    fn delete(&mut self, kind: ObjectKind, id: u32) {
        if self.live.entry(kind).or_default().remove(&id) {
            *self.deleted.entry(kind).or_default() += 1;
        } else {
            self.invalid_deletes += 1;
        }
    }
}

/// Cloneable handle; clones share the same recorded state.
#[derive(Clone, Default)]
pub(crate) struct MockGl {
    state: Rc<RefCell<State>>,
}

impl MockGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every subsequent `link_program` reports failure.
    pub(crate) fn failing_link() -> Self {
        let gl = Self::new();
        gl.state.borrow_mut().fail_link = true;
        gl
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn live(&self, kind: ObjectKind) -> usize {
        self.state.borrow().live.get(&kind).map_or(0, |s| s.len())
    }

    pub(crate) fn created(&self, kind: ObjectKind) -> usize {
        self.state.borrow().created.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn deleted(&self, kind: ObjectKind) -> usize {
        self.state.borrow().deleted.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn invalid_deletes(&self) -> usize {
        self.state.borrow().invalid_deletes
    }

    /// Asserts that every created object was deleted exactly once.
    pub(crate) fn assert_no_leaks(&self) {
        for kind in ALL_KINDS {
            assert_eq!(self.live(kind), 0, "leaked {kind:?} objects");
            assert_eq!(self.created(kind), self.deleted(kind), "{kind:?} create/delete mismatch");
        }
        assert_eq!(self.invalid_deletes(), 0, "deleted objects that were not live");
    }

    pub(crate) fn texture_image(&self, texture: u32) -> Option<TextureImage> {
        self.state.borrow().textures.get(&texture).cloned()
    }

    pub(crate) fn bound_texture(&self) -> Option<u32> {
        self.state.borrow().bound_texture
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlBackend for MockGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type VertexArray = u32;
    type UniformLocation = MockUniform;

    fn create_shader(&self, _shader_type: u32) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let id = s.create(ObjectKind::Shader);
        s.shaders.insert(id, ShaderState::default());
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            sh.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            sh.compiled = sh.source.trim_start().starts_with("#version");
        }
    }

    fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|sh| sh.compiled)
    }

    fn get_shader_info_log(&self, shader: u32) -> String {
        if self.get_shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: missing #version directive".to_string()
        }
    }

    fn delete_shader(&self, shader: u32) {
        let mut s = self.state.borrow_mut();
        s.delete(ObjectKind::Shader, shader);
        s.shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let id = s.create(ObjectKind::Program);
        s.programs.insert(id, ProgramState::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        let fail_link = s.fail_link;
        let Some(attached) = s.programs.get(&program).map(|p| p.attached.clone()) else {
            return;
        };
        let sources: Vec<(String, bool)> = attached
            .iter()
            .filter_map(|id| s.shaders.get(id))
            .map(|sh| (sh.source.clone(), sh.compiled))
            .collect();
        let linked = !fail_link && sources.len() == 2 && sources.iter().all(|(_, ok)| *ok);
        if let Some(p) = s.programs.get_mut(&program) {
            p.linked = linked;
            p.linked_sources = sources.into_iter().map(|(src, _)| src).collect();
        }
    }

    fn get_program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn get_program_info_log(&self, program: u32) -> String {
        if self.get_program_link_status(program) {
            String::new()
        } else {
            "error: linking failed".to_string()
        }
    }

    fn delete_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        s.delete(ObjectKind::Program, program);
        s.programs.remove(&program);
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn get_attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        let p = s.programs.get_mut(&program)?;
        if !p.linked || !p.linked_sources.iter().any(|src| src.contains(name)) {
            return None;
        }
        let index = match p.attribs.iter().position(|a| a == name) {
            Some(i) => i,
            None => {
                p.attribs.push(name.to_string());
                p.attribs.len() - 1
            }
        };
        u32::try_from(index).ok()
    }

    fn get_uniform_location(&self, program: u32, name: &str) -> Option<MockUniform> {
        let s = self.state.borrow();
        let p = s.programs.get(&program)?;
        (p.linked && p.linked_sources.iter().any(|src| src.contains(name)))
            .then(|| MockUniform(name.to_string()))
    }

    fn uniform_1_f32(&self, location: Option<&MockUniform>, x: f32) {
        if let Some(loc) = location {
            self.record(Call::Uniform1f(loc.0.clone(), x));
        }
    }

    fn uniform_2_f32(&self, location: Option<&MockUniform>, x: f32, y: f32) {
        if let Some(loc) = location {
            self.record(Call::Uniform2f(loc.0.clone(), x, y));
        }
    }

    fn uniform_1_i32(&self, location: Option<&MockUniform>, x: i32) {
        if let Some(loc) = location {
            self.record(Call::Uniform1i(loc.0.clone(), x));
        }
    }

    fn create_buffer(&self) -> Result<u32, String> {
        Ok(self.state.borrow_mut().create(ObjectKind::Buffer))
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.state.borrow_mut().delete(ObjectKind::Buffer, buffer);
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        Ok(self.state.borrow_mut().create(ObjectKind::VertexArray))
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.state
            .borrow_mut()
            .delete(ObjectKind::VertexArray, vertex_array);
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::DisableAttrib(index));
    }

    fn create_texture(&self) -> Result<u32, String> {
        Ok(self.state.borrow_mut().create(ObjectKind::Texture))
    }

    fn bind_texture(&self, target: u32, texture: Option<u32>) {
        let mut s = self.state.borrow_mut();
        s.bound_texture = texture;
        s.calls.push(Call::BindTexture(target, texture));
    }

    fn tex_image_2d(
        &self,
        _target: u32,
        _level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) {
        let mut s = self.state.borrow_mut();
        let texture = s.bound_texture;
        if let Some(id) = texture {
            let len = (width.max(0) as usize) * (height.max(0) as usize) * 4;
            let data = pixels.map_or_else(|| vec![0; len], <[u8]>::to_vec);
            s.textures.insert(
                id,
                TextureImage {
                    internal_format,
                    width,
                    height,
                    data,
                },
            );
        }
        s.calls.push(Call::TexImage {
            texture,
            internal_format,
            width,
            height,
            format,
            ty,
        });
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter(target, parameter, value));
    }

    fn delete_texture(&self, texture: u32) {
        let mut s = self.state.borrow_mut();
        s.delete(ObjectKind::Texture, texture);
        s.textures.remove(&texture);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }
}
