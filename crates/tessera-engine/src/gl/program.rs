//! Program compilation and interface reflection.
//!
//! Sources are parsed and validated with naga before any GPU object is created,
//! so compile errors surface as `GlError` instead of device validation panics.

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, Module, ResourceBinding, Scalar, TypeInner, VectorSize};

use super::{GlError, ShaderStage, Uniform};

/// Vertex input format. Only `f32` scalars and vectors are accepted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum AttribFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
}

impl AttribFormat {
    pub(crate) fn size(self) -> u32 {
        match self {
            AttribFormat::Float32 => 4,
            AttribFormat::Float32x2 => 8,
            AttribFormat::Float32x3 => 12,
            AttribFormat::Float32x4 => 16,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Attribute {
    pub name: String,
    pub location: u32,
    pub format: AttribFormat,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct UniformMember {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

/// Layout of the uniform block at `@group(0) @binding(0)`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct UniformBlock {
    /// Size in bytes, rounded up to 16.
    pub size: u32,
    pub members: Vec<UniformMember>,
}

impl UniformBlock {
    /// Combines the views of the block declared by two stages.
    ///
    /// Members with the same name must agree on offset and size.
    fn merge(mut self, other: UniformBlock) -> Result<UniformBlock, GlError> {
        for m in other.members {
            match self.members.iter().find(|own| own.name == m.name) {
                Some(own) if own.offset != m.offset || own.size != m.size => {
                    return Err(GlError::Link(format!(
                        "uniform `{}` has different layouts in the vertex and fragment stages",
                        m.name
                    )));
                }
                Some(_) => {}
                None => self.members.push(m),
            }
        }
        self.size = self.size.max(other.size);
        Ok(self)
    }
}

/// Reflected interface of a linked program.
#[derive(Debug, Clone)]
pub(crate) struct ProgramLayout {
    pub vertex_entry: String,
    pub fragment_entry: String,
    /// Sorted by location.
    pub attributes: Vec<Attribute>,
    pub uniforms: Option<UniformBlock>,
}

impl ProgramLayout {
    /// Byte stride of one vertex in the bound buffer.
    pub(crate) fn stride(&self) -> u32 {
        self.attributes.iter().map(|a| a.format.size()).sum()
    }

    pub(crate) fn uniform(&self, name: &str) -> Option<Uniform> {
        let block = self.uniforms.as_ref()?;
        block.members.iter().find(|m| m.name == name).map(|m| Uniform {
            offset: m.offset,
            size: m.size,
        })
    }

    pub(crate) fn uniform_size(&self) -> u32 {
        self.uniforms.as_ref().map_or(0, |b| b.size)
    }
}

/// Compiles both stages and reflects the combined interface.
pub(crate) fn link(vertex_src: &str, fragment_src: &str) -> Result<ProgramLayout, GlError> {
    let vs = compile(ShaderStage::Vertex, vertex_src)?;
    let fs = compile(ShaderStage::Fragment, fragment_src)?;

    let vertex_ep = vs
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Vertex)
        .ok_or_else(|| GlError::Link("vertex source has no @vertex entry point".into()))?;

    let fragment_ep = fs
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga::ShaderStage::Fragment)
        .ok_or_else(|| GlError::Link("fragment source has no @fragment entry point".into()))?;

    let mut attributes = Vec::new();
    for arg in &vertex_ep.function.arguments {
        match (&arg.binding, &vs.types[arg.ty].inner) {
            (Some(Binding::Location { location, .. }), _) => {
                let name = arg.name.clone().unwrap_or_default();
                attributes.push(attribute(&vs, name, *location, arg.ty)?);
            }
            (Some(Binding::BuiltIn(_)), _) => {}
            (None, TypeInner::Struct { members, .. }) => {
                for m in members {
                    if let Some(Binding::Location { location, .. }) = &m.binding {
                        let name = m.name.clone().unwrap_or_default();
                        attributes.push(attribute(&vs, name, *location, m.ty)?);
                    }
                }
            }
            (None, _) => {}
        }
    }
    attributes.sort_by_key(|a| a.location);

    let uniforms = match (uniform_block(&vs)?, uniform_block(&fs)?) {
        (Some(a), Some(b)) => Some(a.merge(b)?),
        (a, b) => a.or(b),
    };

    Ok(ProgramLayout {
        vertex_entry: vertex_ep.name.clone(),
        fragment_entry: fragment_ep.name.clone(),
        attributes,
        uniforms,
    })
}

fn compile(stage: ShaderStage, src: &str) -> Result<Module, GlError> {
    let module = naga::front::wgsl::parse_str(src).map_err(|e| GlError::Compile {
        stage,
        log: e.emit_to_string(src),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| GlError::Compile {
            stage,
            log: e.emit_to_string(src),
        })?;

    Ok(module)
}

fn attribute(
    module: &Module,
    name: String,
    location: u32,
    ty: naga::Handle<naga::Type>,
) -> Result<Attribute, GlError> {
    let format = match module.types[ty].inner {
        TypeInner::Scalar(s) if s == Scalar::F32 => AttribFormat::Float32,
        TypeInner::Vector { size, scalar } if scalar == Scalar::F32 => match size {
            VectorSize::Bi => AttribFormat::Float32x2,
            VectorSize::Tri => AttribFormat::Float32x3,
            VectorSize::Quad => AttribFormat::Float32x4,
        },
        _ => {
            return Err(GlError::Link(format!(
                "vertex input `{name}` at location {location} is not an f32 scalar or vector"
            )));
        }
    };

    Ok(Attribute {
        name,
        location,
        format,
    })
}

fn uniform_block(module: &Module) -> Result<Option<UniformBlock>, GlError> {
    let gctx = module.to_ctx();
    let mut block = None;

    for (_, var) in module.global_variables.iter() {
        let Some(binding) = &var.binding else { continue };

        if var.space != AddressSpace::Uniform || *binding != (ResourceBinding { group: 0, binding: 0 }) {
            return Err(GlError::Link(format!(
                "unsupported resource `{}` at group {} binding {}; only a uniform block at group 0 binding 0 is allowed",
                var.name.as_deref().unwrap_or("?"),
                binding.group,
                binding.binding
            )));
        }

        let inner = &module.types[var.ty].inner;
        let (members, span) = match inner {
            TypeInner::Struct { members, span } => (
                members
                    .iter()
                    .map(|m| UniformMember {
                        name: m.name.clone().unwrap_or_default(),
                        offset: m.offset,
                        size: module.types[m.ty].inner.size(gctx),
                    })
                    .collect(),
                *span,
            ),
            other => {
                let size = other.size(gctx);
                let member = UniformMember {
                    name: var.name.clone().unwrap_or_default(),
                    offset: 0,
                    size,
                };
                (vec![member], size)
            }
        };

        block = Some(UniformBlock {
            size: span.next_multiple_of(16),
            members,
        });
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
struct Uniforms {
    color: vec4<f32>,
    offset: vec2<f32>,
}
@group(0) @binding(0) var<uniform> u: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position + vec3<f32>(u.offset, 0.0), 1.0);
}
"#;

    const FS: &str = r#"
struct Uniforms {
    color: vec4<f32>,
}
@group(0) @binding(0) var<uniform> u: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return u.color;
}
"#;

    #[test]
    fn reflects_uniform_offsets_across_stages() {
        let layout = link(VS, FS).unwrap();

        let color = layout.uniform("color").unwrap();
        assert_eq!((color.offset, color.size), (0, 16));

        let offset = layout.uniform("offset").unwrap();
        assert_eq!((offset.offset, offset.size), (16, 8));

        assert_eq!(layout.uniform_size(), 32);
        assert!(layout.uniform("missing").is_none());
    }

    #[test]
    fn reflects_vertex_inputs() {
        let layout = link(VS, FS).unwrap();
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].name, "position");
        assert_eq!(layout.attributes[0].format, AttribFormat::Float32x3);
        assert_eq!(layout.stride(), 12);
        assert_eq!(layout.vertex_entry, "vs_main");
        assert_eq!(layout.fragment_entry, "fs_main");
    }

    #[test]
    fn syntax_error_reports_the_failing_stage() {
        let err = link(VS, "@fragment fn fs_main( -> {").unwrap_err();
        assert!(matches!(err, GlError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let err = link(VS, VS).unwrap_err();
        assert!(matches!(err, GlError::Link(_)));
    }

    #[test]
    fn conflicting_uniform_layouts_fail_to_link() {
        let fs = r#"
struct Uniforms {
    offset: vec2<f32>,
}
@group(0) @binding(0) var<uniform> u: Uniforms;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(u.offset, 0.0, 1.0);
}
"#;
        let err = link(VS, fs).unwrap_err();
        assert!(matches!(err, GlError::Link(_)));
    }

    #[test]
    fn programs_without_uniforms_have_no_block() {
        let vs = "@vertex fn main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> { return vec4<f32>(p, 0.0, 1.0); }";
        let fs = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let layout = link(vs, fs).unwrap();
        assert!(layout.uniforms.is_none());
        assert_eq!(layout.stride(), 8);
    }
}
