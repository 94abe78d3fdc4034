//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the window, creates a `WgpuGl` for every
//! visible period and feeds the application its `Event`s.

mod host;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
