use std::fmt;

/// Shader stage a diagnostic refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Error returned by [`GlContext::create_program`](super::GlContext::create_program).
#[derive(Debug, Clone)]
pub enum GlError {
    /// Source failed to parse or validate. `log` holds the compiler diagnostic.
    Compile { stage: ShaderStage, log: String },
    /// Both stages compiled but cannot be combined.
    Link(String),
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::Compile { stage, log } => write!(f, "{stage} shader compile error: {log}"),
            GlError::Link(msg) => write!(f, "program link error: {msg}"),
        }
    }
}

impl std::error::Error for GlError {}
