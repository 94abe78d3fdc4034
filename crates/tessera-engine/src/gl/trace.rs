use crate::coords::ColorRgba;

use super::program::{self, ProgramLayout};
use super::slots::Slots;
use super::{
    Buffer, DrawMode, GlContext, GlError, Program, TexParameter, Texture, TexturedQuad, Uniform,
};

/// One recorded `GlContext` call.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    ClearColor(ColorRgba),
    Clear,
    CreateProgram(Program),
    DeleteProgram(Program),
    UseProgram(Program),
    Uniform2f(Uniform, [f32; 2]),
    Uniform4f(Uniform, [f32; 4]),
    CreateBuffer(Buffer),
    BindBuffer(Buffer),
    BufferData { len: usize },
    DeleteBuffer(Buffer),
    DrawArrays { mode: DrawMode, first: u32, count: u32 },
    CreateTexture(Texture),
    BindTexture(Texture),
    TexImage2D { width: u32, height: u32 },
    TexParameter(TexParameter),
    DrawTexture(TexturedQuad),
    DeleteTexture(Texture),
    Present,
}

/// `GlContext` that records calls instead of drawing.
///
/// Programs are still compiled and reflected, so uniform lookups and compile
/// errors behave as they do on a GPU. Object lifetimes are tracked so callers
/// can check that everything they created was released.
#[derive(Debug, Default)]
pub struct TraceGl {
    calls: Vec<GlCall>,
    programs: Slots<ProgramLayout>,
    buffers: Slots<()>,
    textures: Slots<()>,
    fail_programs: bool,
}

impl TraceGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context on which every `create_program` fails to link.
    pub fn failing_programs() -> Self {
        Self {
            fail_programs: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Returns and forgets the calls recorded so far.
    pub fn take_calls(&mut self) -> Vec<GlCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn live_programs(&self) -> usize {
        self.programs.live()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.live()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.live()
    }

    /// Records the end of a frame.
    pub fn present(&mut self) {
        self.calls.push(GlCall::Present);
    }
}

impl GlContext for TraceGl {
    fn clear_color(&mut self, color: ColorRgba) {
        self.calls.push(GlCall::ClearColor(color));
    }

    fn clear(&mut self) {
        self.calls.push(GlCall::Clear);
    }

    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<Program, GlError> {
        if self.fail_programs {
            return Err(GlError::Link("program creation disabled on this context".into()));
        }
        let layout = program::link(vertex_src, fragment_src)?;
        let p = Program(self.programs.insert(layout));
        self.calls.push(GlCall::CreateProgram(p));
        Ok(p)
    }

    fn delete_program(&mut self, program: Program) {
        self.programs.remove(program.0);
        self.calls.push(GlCall::DeleteProgram(program));
    }

    fn use_program(&mut self, program: Program) {
        self.calls.push(GlCall::UseProgram(program));
    }

    fn get_uniform_location(&self, program: Program, name: &str) -> Option<Uniform> {
        self.programs.get(program.0)?.uniform(name)
    }

    fn uniform2f(&mut self, uniform: Uniform, x: f32, y: f32) {
        self.calls.push(GlCall::Uniform2f(uniform, [x, y]));
    }

    fn uniform4f(&mut self, uniform: Uniform, x: f32, y: f32, z: f32, w: f32) {
        self.calls.push(GlCall::Uniform4f(uniform, [x, y, z, w]));
    }

    fn create_buffer(&mut self) -> Buffer {
        let b = Buffer(self.buffers.insert(()));
        self.calls.push(GlCall::CreateBuffer(b));
        b
    }

    fn bind_buffer(&mut self, buffer: Buffer) {
        self.calls.push(GlCall::BindBuffer(buffer));
    }

    fn buffer_data(&mut self, data: &[u8]) {
        self.calls.push(GlCall::BufferData { len: data.len() });
    }

    fn delete_buffer(&mut self, buffer: Buffer) {
        self.buffers.remove(buffer.0);
        self.calls.push(GlCall::DeleteBuffer(buffer));
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        self.calls.push(GlCall::DrawArrays { mode, first, count });
    }

    fn create_texture(&mut self) -> Texture {
        let t = Texture(self.textures.insert(()));
        self.calls.push(GlCall::CreateTexture(t));
        t
    }

    fn bind_texture(&mut self, texture: Texture) {
        self.calls.push(GlCall::BindTexture(texture));
    }

    fn tex_image_2d(&mut self, width: u32, height: u32, _rgba: &[u8]) {
        self.calls.push(GlCall::TexImage2D { width, height });
    }

    fn tex_parameter(&mut self, param: TexParameter) {
        self.calls.push(GlCall::TexParameter(param));
    }

    fn draw_texture(&mut self, quad: &TexturedQuad) {
        self.calls.push(GlCall::DrawTexture(*quad));
    }

    fn delete_texture(&mut self, texture: Texture) {
        self.textures.remove(texture.0);
        self.calls.push(GlCall::DeleteTexture(texture));
    }
}
