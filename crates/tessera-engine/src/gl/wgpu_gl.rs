use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::coords::ColorRgba;
use crate::device::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};

use super::program::{self, AttribFormat, ProgramLayout};
use super::slots::Slots;
use super::{
    Buffer, DrawMode, Filter, GlContext, GlError, Program, SamplerParams, TexParameter, Texture,
    TexturedQuad, Uniform, Wrap,
};

// ── object storage ────────────────────────────────────────────────────────

struct ProgramSlot {
    layout: ProgramLayout,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<DrawMode, wgpu::RenderPipeline>,
    /// CPU copy of the uniform block, uploaded with every draw.
    uniforms: Vec<u8>,
}

#[derive(Default)]
struct BufferSlot {
    buffer: Option<wgpu::Buffer>,
    len: u64,
}

#[derive(Default)]
struct TextureSlot {
    storage: Option<(wgpu::Texture, wgpu::TextureView)>,
    width: u32,
    height: u32,
    params: SamplerParams,
}

struct ImagePipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

// ── context ───────────────────────────────────────────────────────────────

/// `GlContext` drawing into a window surface through wgpu.
///
/// Each draw call is recorded as its own render pass into the current frame's
/// encoder, in call order. The frame is acquired by the first call that needs
/// it and ends with [`present`](Self::present). Texture uploads and buffer data
/// take effect for the whole frame they are made in.
///
/// When the surface cannot produce a frame (minimized window, lost surface)
/// the remaining calls of that frame are dropped.
pub struct WgpuGl {
    gpu: Gpu,
    frame: Option<GpuFrame>,
    frame_skipped: bool,
    clear_color: ColorRgba,

    programs: Slots<ProgramSlot>,
    buffers: Slots<BufferSlot>,
    textures: Slots<TextureSlot>,

    current_program: Option<Program>,
    bound_buffer: Option<Buffer>,
    bound_texture: Option<Texture>,

    image: Option<ImagePipeline>,
    samplers: HashMap<SamplerParams, wgpu::Sampler>,
}

impl WgpuGl {
    /// Creates a context drawing into `window`.
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window, init).await?;

        Ok(Self {
            gpu,
            frame: None,
            frame_skipped: false,
            clear_color: ColorRgba::default(),
            programs: Slots::default(),
            buffers: Slots::default(),
            textures: Slots::default(),
            current_program: None,
            bound_buffer: None,
            bound_texture: None,
            image: None,
            samplers: HashMap::new(),
        })
    }

    /// Submits everything recorded since the last present and shows it.
    pub fn present(&mut self) {
        self.frame_skipped = false;
        if let Some(frame) = self.frame.take() {
            self.gpu.submit(frame);
        }
    }

    /// Acquires the frame on first use. Returns false if this frame is being dropped.
    fn ensure_frame(&mut self) -> bool {
        if self.frame.is_some() {
            return true;
        }
        if self.frame_skipped {
            return false;
        }

        self.gpu.sync_size();
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            self.frame_skipped = true;
            return false;
        }

        match self.gpu.begin_frame() {
            Ok(frame) => {
                self.frame = Some(frame);
                true
            }
            Err(err) => {
                if self.gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                    log::error!("GPU surface is out of memory; frames will be dropped");
                }
                self.frame_skipped = true;
                false
            }
        }
    }

    fn ensure_image_pipeline(&mut self) {
        if self.image.is_some() {
            return;
        }

        let device = self.gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera image shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/image.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera image bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<QuadUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera image pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tessera image pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(color_target(self.gpu.surface_format()))],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.image = Some(ImagePipeline {
            pipeline,
            bind_group_layout,
        });
    }

    fn write_uniform(&mut self, uniform: Uniform, values: &[f32]) {
        let Some(program) = self.current_program else {
            log::debug!("uniform set with no program in use");
            return;
        };
        let Some(slot) = self.programs.get_mut(program.0) else { return };

        let bytes: &[u8] = bytemuck::cast_slice(values);
        let start = uniform.offset as usize;
        let end = start + bytes.len();
        if bytes.len() > uniform.size as usize || end > slot.uniforms.len() {
            log::debug!(
                "uniform write of {} bytes does not fit member at offset {} (size {})",
                bytes.len(),
                uniform.offset,
                uniform.size
            );
            return;
        }

        slot.uniforms[start..end].copy_from_slice(bytes);
    }
}

impl GlContext for WgpuGl {
    fn clear_color(&mut self, color: ColorRgba) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        let c = self.clear_color;
        if !self.ensure_frame() {
            return;
        }
        let Some(frame) = self.frame.as_mut() else { return };

        let load = wgpu::LoadOp::Clear(wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        });
        let _rpass = color_pass(frame, "tessera clear", load);
    }

    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<Program, GlError> {
        let layout = program::link(vertex_src, fragment_src)?;
        let device = self.gpu.device();

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera vertex shader"),
            source: wgpu::ShaderSource::Wgsl(vertex_src.into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera fragment shader"),
            source: wgpu::ShaderSource::Wgsl(fragment_src.into()),
        });

        let bind_group_layout = layout.uniforms.as_ref().map(|block| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("tessera program bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(block.size as u64),
                    },
                    count: None,
                }],
            })
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera program pipeline layout"),
            bind_group_layouts: &bind_group_layouts,
            immediate_size: 0,
        });

        let uniforms = vec![0u8; layout.uniform_size() as usize];
        let id = self.programs.insert(ProgramSlot {
            layout,
            vertex,
            fragment,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            uniforms,
        });

        Ok(Program(id))
    }

    fn delete_program(&mut self, program: Program) {
        self.programs.remove(program.0);
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    fn use_program(&mut self, program: Program) {
        self.current_program = Some(program);
    }

    fn get_uniform_location(&self, program: Program, name: &str) -> Option<Uniform> {
        self.programs.get(program.0)?.layout.uniform(name)
    }

    fn uniform2f(&mut self, uniform: Uniform, x: f32, y: f32) {
        self.write_uniform(uniform, &[x, y]);
    }

    fn uniform4f(&mut self, uniform: Uniform, x: f32, y: f32, z: f32, w: f32) {
        self.write_uniform(uniform, &[x, y, z, w]);
    }

    fn create_buffer(&mut self) -> Buffer {
        Buffer(self.buffers.insert(BufferSlot::default()))
    }

    fn bind_buffer(&mut self, buffer: Buffer) {
        self.bound_buffer = Some(buffer);
    }

    fn buffer_data(&mut self, data: &[u8]) {
        let Some(buffer) = self.bound_buffer else {
            log::debug!("buffer_data with no buffer bound");
            return;
        };
        let Some(slot) = self.buffers.get_mut(buffer.0) else { return };

        slot.len = data.len() as u64;
        slot.buffer = (!data.is_empty()).then(|| {
            self.gpu
                .device()
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("tessera vertex buffer"),
                    contents: data,
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
    }

    fn delete_buffer(&mut self, buffer: Buffer) {
        self.buffers.remove(buffer.0);
        if self.bound_buffer == Some(buffer) {
            self.bound_buffer = None;
        }
    }

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        if count == 0 {
            return;
        }
        let Some(program) = self.current_program else {
            log::debug!("draw_arrays with no program in use");
            return;
        };
        if !self.ensure_frame() {
            return;
        }

        let format = self.gpu.surface_format();
        let device = self.gpu.device();
        let Some(slot) = self.programs.get_mut(program.0) else { return };

        // Vertex source, when the program reads any attributes.
        let stride = slot.layout.stride() as u64;
        let vertex_buffer = if stride == 0 {
            None
        } else {
            let Some(bslot) = self.bound_buffer.and_then(|b| self.buffers.get(b.0)) else {
                log::debug!("draw_arrays with no vertex buffer bound");
                return;
            };
            let needed = (first as u64 + count as u64) * stride;
            match &bslot.buffer {
                Some(buf) if needed <= bslot.len => Some(buf),
                _ => {
                    log::warn!(
                        "draw_arrays reads {needed} bytes but the bound buffer holds {}",
                        bslot.len
                    );
                    return;
                }
            }
        };

        let pipeline = slot.pipelines.entry(mode).or_insert_with(|| {
            program_pipeline(
                device,
                &slot.layout,
                &slot.vertex,
                &slot.fragment,
                &slot.pipeline_layout,
                mode,
                format,
            )
        });

        let bind_group = slot.bind_group_layout.as_ref().map(|bgl| {
            let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tessera program ubo"),
                contents: &slot.uniforms,
                usage: wgpu::BufferUsages::UNIFORM,
            });
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("tessera program bind group"),
                layout: bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                }],
            })
        });

        let Some(frame) = self.frame.as_mut() else { return };
        let mut rpass = color_pass(frame, "tessera draw arrays", wgpu::LoadOp::Load);
        rpass.set_pipeline(pipeline);
        if let Some(bg) = &bind_group {
            rpass.set_bind_group(0, bg, &[]);
        }
        if let Some(vb) = vertex_buffer {
            rpass.set_vertex_buffer(0, vb.slice(..));
        }
        rpass.draw(first..first + count, 0..1);
    }

    fn create_texture(&mut self) -> Texture {
        Texture(self.textures.insert(TextureSlot::default()))
    }

    fn bind_texture(&mut self, texture: Texture) {
        self.bound_texture = Some(texture);
    }

    fn tex_image_2d(&mut self, width: u32, height: u32, rgba: &[u8]) {
        let Some(texture) = self.bound_texture else {
            log::debug!("tex_image_2d with no texture bound");
            return;
        };
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            log::warn!("tex_image_2d expected {expected} bytes for {width}x{height}, got {}", rgba.len());
            return;
        }

        let device = self.gpu.device();
        let queue = self.gpu.queue();
        let Some(slot) = self.textures.get_mut(texture.0) else { return };

        if width == 0 || height == 0 {
            slot.storage = None;
            slot.width = 0;
            slot.height = 0;
            return;
        }

        if slot.storage.is_none() || slot.width != width || slot.height != height {
            let tex = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("tessera texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
            slot.storage = Some((tex, view));
            slot.width = width;
            slot.height = height;
        }

        let Some((tex, _)) = &slot.storage else { return };
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn tex_parameter(&mut self, param: TexParameter) {
        let Some(texture) = self.bound_texture else { return };
        if let Some(slot) = self.textures.get_mut(texture.0) {
            slot.params.apply(param);
        }
    }

    fn draw_texture(&mut self, quad: &TexturedQuad) {
        let Some(texture) = self.bound_texture else {
            log::debug!("draw_texture with no texture bound");
            return;
        };
        if !self.ensure_frame() {
            return;
        }
        self.ensure_image_pipeline();

        let Some(slot) = self.textures.get(texture.0) else { return };
        let Some((_, view)) = &slot.storage else {
            log::trace!("draw_texture on a texture with no storage");
            return;
        };
        let Some(image) = &self.image else { return };

        let device = self.gpu.device();
        let params = slot.params;
        let sampler = self
            .samplers
            .entry(params)
            .or_insert_with(|| create_sampler(device, params));

        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tessera image ubo"),
            contents: bytemuck::bytes_of(&QuadUniform::from(quad)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera image bind group"),
            layout: &image.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&*sampler),
                },
            ],
        });

        let Some(frame) = self.frame.as_mut() else { return };
        let mut rpass = color_pass(frame, "tessera image pass", wgpu::LoadOp::Load);
        rpass.set_pipeline(&image.pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..4, 0..1);
    }

    fn delete_texture(&mut self, texture: Texture) {
        self.textures.remove(texture.0);
        if self.bound_texture == Some(texture) {
            self.bound_texture = None;
        }
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

fn color_pass<'e>(
    frame: &'e mut GpuFrame,
    label: &str,
    load: wgpu::LoadOp<wgpu::Color>,
) -> wgpu::RenderPass<'e> {
    frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

fn color_target(format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    }
}

fn program_pipeline(
    device: &wgpu::Device,
    layout: &ProgramLayout,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
    pipeline_layout: &wgpu::PipelineLayout,
    mode: DrawMode,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let mut offset = 0u64;
    let attributes: Vec<wgpu::VertexAttribute> = layout
        .attributes
        .iter()
        .map(|a| {
            let attr = wgpu::VertexAttribute {
                format: vertex_format(a.format),
                offset,
                shader_location: a.location,
            };
            offset += a.format.size() as u64;
            attr
        })
        .collect();

    let buffers = if attributes.is_empty() {
        Vec::new()
    } else {
        vec![wgpu::VertexBufferLayout {
            array_stride: layout.stride() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        }]
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("tessera program pipeline"),
        layout: Some(pipeline_layout),
        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some(layout.vertex_entry.as_str()),
            compilation_options: Default::default(),
            buffers: &buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment,
            entry_point: Some(layout.fragment_entry.as_str()),
            compilation_options: Default::default(),
            targets: &[Some(color_target(format))],
        }),
        primitive: wgpu::PrimitiveState {
            topology: topology(mode),
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_sampler(device: &wgpu::Device, params: SamplerParams) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("tessera sampler"),
        address_mode_u: address_mode(params.wrap_s),
        address_mode_v: address_mode(params.wrap_t),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter_mode(params.mag_filter),
        min_filter: filter_mode(params.min_filter),
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}

fn topology(mode: DrawMode) -> wgpu::PrimitiveTopology {
    match mode {
        DrawMode::Points => wgpu::PrimitiveTopology::PointList,
        DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
        DrawMode::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
        DrawMode::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
    }
}

fn vertex_format(format: AttribFormat) -> wgpu::VertexFormat {
    match format {
        AttribFormat::Float32 => wgpu::VertexFormat::Float32,
        AttribFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
        AttribFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
        AttribFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
    }
}

fn filter_mode(filter: Filter) -> wgpu::FilterMode {
    match filter {
        Filter::Nearest => wgpu::FilterMode::Nearest,
        Filter::Linear => wgpu::FilterMode::Linear,
    }
}

fn address_mode(wrap: Wrap) -> wgpu::AddressMode {
    match wrap {
        Wrap::Repeat => wgpu::AddressMode::Repeat,
        Wrap::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
        Wrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform block of `shaders/image.wgsl` (48 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadUniform {
    top_left: [f32; 2],
    top_right: [f32; 2],
    bottom_left: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    _pad: [f32; 2],
}

impl From<&TexturedQuad> for QuadUniform {
    fn from(q: &TexturedQuad) -> Self {
        Self {
            top_left: q.top_left,
            top_right: q.top_right,
            bottom_left: q.bottom_left,
            uv_min: q.uv_min,
            uv_max: q.uv_max,
            _pad: [0.0; 2],
        }
    }
}
