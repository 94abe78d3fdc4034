//! Immediate-mode graphics facade.
//!
//! `GlContext` exposes the small GL-style surface applications draw with:
//! programs, vertex buffers, uniforms, textures and draw calls. Objects are
//! plain handles; deleting a handle twice or using a deleted handle is ignored.
//!
//! Backends:
//! - `WgpuGl` records calls into the current frame of a wgpu surface
//! - `TraceGl` records calls into a list, for headless runs and tests
//!
//! Programs are WGSL vertex/fragment pairs. The uniform block at
//! `@group(0) @binding(0)` is shared by both stages and its members are
//! addressed through `get_uniform_location`. Vertex inputs are read from the
//! bound buffer, tightly packed in `@location` order.

mod error;
mod images;
mod program;
mod slots;
mod trace;
mod wgpu_gl;

pub use error::{GlError, ShaderStage};
pub use images::{Image, Images};
pub use trace::{GlCall, TraceGl};
pub use wgpu_gl::WgpuGl;

use crate::coords::ColorRgba;

/// Handle to a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Program(pub(crate) u32);

/// Handle to a vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Buffer(pub(crate) u32);

/// Handle to a 2D RGBA texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Texture(pub(crate) u32);

/// Location of a member of a program's uniform block.
///
/// `offset` and `size` are in bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Uniform {
    pub(crate) offset: u32,
    pub(crate) size: u32,
}

/// Primitive assembly mode for `draw_arrays`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Wrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

/// Sampling state of the bound texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TexParameter {
    MagFilter(Filter),
    MinFilter(Filter),
    WrapS(Wrap),
    WrapT(Wrap),
}

/// Sampler configuration accumulated from `TexParameter`s.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SamplerParams {
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            mag_filter: Filter::Linear,
            min_filter: Filter::Linear,
            wrap_s: Wrap::Repeat,
            wrap_t: Wrap::Repeat,
        }
    }
}

impl SamplerParams {
    pub fn apply(&mut self, param: TexParameter) {
        match param {
            TexParameter::MagFilter(f) => self.mag_filter = f,
            TexParameter::MinFilter(f) => self.min_filter = f,
            TexParameter::WrapS(w) => self.wrap_s = w,
            TexParameter::WrapT(w) => self.wrap_t = w,
        }
    }
}

/// Placement of the bound texture on screen.
///
/// Corners are in clip space. The fourth corner is implied, so the quad may
/// be any parallelogram. `uv_min`/`uv_max` select the source region.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexturedQuad {
    pub top_left: [f32; 2],
    pub top_right: [f32; 2],
    pub bottom_left: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// GL-style drawing surface.
///
/// Calls made outside a frame start one; `WgpuGl::present` (through the
/// host's publish) ends it.
pub trait GlContext {
    fn clear_color(&mut self, color: ColorRgba);

    /// Clears the color target to the current clear color.
    fn clear(&mut self);

    /// Compiles and links a program from WGSL vertex and fragment sources.
    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<Program, GlError>;

    fn delete_program(&mut self, program: Program);

    fn use_program(&mut self, program: Program);

    fn get_uniform_location(&self, program: Program, name: &str) -> Option<Uniform>;

    /// Sets a `vec2<f32>` uniform of the program in use.
    fn uniform2f(&mut self, uniform: Uniform, x: f32, y: f32);

    /// Sets a `vec4<f32>` uniform of the program in use.
    fn uniform4f(&mut self, uniform: Uniform, x: f32, y: f32, z: f32, w: f32);

    fn create_buffer(&mut self) -> Buffer;

    fn bind_buffer(&mut self, buffer: Buffer);

    /// Replaces the contents of the bound buffer.
    fn buffer_data(&mut self, data: &[u8]);

    fn delete_buffer(&mut self, buffer: Buffer);

    /// Draws `count` vertices of the bound buffer with the program in use.
    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32);

    fn create_texture(&mut self) -> Texture;

    fn bind_texture(&mut self, texture: Texture);

    /// Replaces the storage of the bound texture with `rgba` (`width * height * 4` bytes).
    fn tex_image_2d(&mut self, width: u32, height: u32, rgba: &[u8]);

    fn tex_parameter(&mut self, param: TexParameter);

    /// Draws the bound texture.
    fn draw_texture(&mut self, quad: &TexturedQuad);

    fn delete_texture(&mut self, texture: Texture);
}
