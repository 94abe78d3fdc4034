//! Per-visible-period GPU state and the frame it draws.

use tessera_engine::coords::{ColorRgba, Vec2};
use tessera_engine::debug::Fps;
use tessera_engine::event::SizeEvent;
use tessera_engine::gl::{
    Buffer, DrawMode, Filter, GlContext, Image, Images, Program, TexParameter, Uniform, Wrap,
};

use crate::bitmap::{self, SCATTER_PER_FRAME};
use crate::config::BasicConfig;
use crate::rng::XorShift;

/// Side of the quad in clip-space units.
const SQUARE: f32 = 0.057;

/// Quad corners as a triangle strip, 3 floats per vertex.
#[rustfmt::skip]
const QUAD: [f32; 12] = [
    0.0,    SQUARE, 0.0, // top left
    0.0,    0.0,    0.0, // bottom left
    SQUARE, SQUARE, 0.0, // top right
    SQUARE, 0.0,    0.0, // bottom right
];
const VERTEX_COUNT: u32 = 4;

const QUAD_COLOR: ColorRgba = ColorRgba::new(0.0, 0.6, 0.0, 1.0);
/// Where the quad's origin sits, in 0..1 window units from the top-left.
const QUAD_OFFSET: (f32, f32) = (0.5, 0.5);

pub(crate) const VERTEX_SHADER: &str = r#"
struct Params {
    color: vec4<f32>,
    offset: vec2<f32>,
}
@group(0) @binding(0) var<uniform> params: Params;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    // offset is in 0..1 with y down; clip space is -1..1 with y up.
    let shift = vec2<f32>(2.0 * params.offset.x - 1.0, 1.0 - 2.0 * params.offset.y);
    return vec4<f32>(position.xy + shift, position.z, 1.0);
}
"#;

pub(crate) const FRAGMENT_SHADER: &str = r#"
struct Params {
    color: vec4<f32>,
    offset: vec2<f32>,
}
@group(0) @binding(0) var<uniform> params: Params;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return params.color;
}
"#;

/// GPU objects and CPU state that live while the window is visible.
pub struct Scene {
    program: Program,
    buffer: Buffer,
    color: Option<Uniform>,
    offset: Option<Uniform>,
    images: Images,
    fps: Fps,
    bitmap: Image,
    rng: XorShift,
}

impl Scene {
    /// Creates the program, the quad buffer, the bitmap and the FPS overlay.
    ///
    /// Returns `None` if the program fails to build; nothing else is created
    /// in that case.
    pub fn start(ctx: &mut dyn GlContext, config: &BasicConfig) -> Option<Self> {
        let program = match ctx.create_program(VERTEX_SHADER, FRAGMENT_SHADER) {
            Ok(p) => p,
            Err(e) => {
                log::error!("error creating GL program: {e}");
                return None;
            }
        };

        let buffer = ctx.create_buffer();
        ctx.bind_buffer(buffer);
        ctx.buffer_data(bytemuck::cast_slice(&QUAD));

        let color = ctx.get_uniform_location(program, "color");
        let offset = ctx.get_uniform_location(program, "offset");

        let mut images = Images::new();
        let fps = Fps::with_system_font(config.font_path.as_deref());

        let mut bitmap = images.new_image(ctx, bitmap::WIDTH, bitmap::HEIGHT);
        bitmap::seed(&mut bitmap.rgba);

        if let Some(path) = &config.snapshot_path {
            match bitmap::save_png(&bitmap.rgba, path) {
                Ok(()) => log::debug!("bitmap snapshot written to {}", path.display()),
                Err(e) => log::warn!("{e:#}"),
            }
        }

        let rng = config.seed.map_or_else(XorShift::from_entropy, XorShift::new);

        Some(Self {
            program,
            buffer,
            color,
            offset,
            images,
            fps,
            bitmap,
            rng,
        })
    }

    /// Draws one frame. GL errors are not checked.
    pub fn paint(&mut self, ctx: &mut dyn GlContext, size: &SizeEvent) {
        ctx.clear_color(ColorRgba::white());
        ctx.clear();

        ctx.use_program(self.program);
        ctx.bind_buffer(self.buffer);

        bitmap::scatter(&mut self.bitmap.rgba, &mut self.rng, SCATTER_PER_FRAME);
        self.bitmap.upload(ctx);

        ctx.tex_parameter(TexParameter::MagFilter(Filter::Nearest));
        ctx.tex_parameter(TexParameter::MinFilter(Filter::Nearest));
        ctx.tex_parameter(TexParameter::WrapS(Wrap::ClampToEdge));
        ctx.tex_parameter(TexParameter::WrapT(Wrap::ClampToEdge));

        let quarter_w = (size.width_px / 4) as f32;
        let quarter_h = (size.height_px / 4) as f32;
        self.bitmap.draw(
            ctx,
            size,
            Vec2::zero(),
            Vec2::new(quarter_w, 0.0),
            Vec2::new(0.0, quarter_h),
            self.bitmap.bounds(),
        );

        if let Some(u) = self.color {
            let [r, g, b, a] = QUAD_COLOR.to_array();
            ctx.uniform4f(u, r, g, b, a);
        }
        if let Some(u) = self.offset {
            ctx.uniform2f(u, QUAD_OFFSET.0, QUAD_OFFSET.1);
        }
        ctx.draw_arrays(DrawMode::TriangleStrip, 0, VERTEX_COUNT);

        self.fps.draw(ctx, &mut self.images, size);
    }

    /// Deletes every GPU object the scene created.
    pub fn stop(mut self, ctx: &mut dyn GlContext) {
        ctx.delete_program(self.program);
        ctx.delete_buffer(self.buffer);
        self.fps.release(ctx, &mut self.images);
        self.images.release(ctx);
    }
}
