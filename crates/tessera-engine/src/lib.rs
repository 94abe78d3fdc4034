//! Tessera engine crate.
//!
//! Platform runtime, host event model and a GL-style drawing facade over
//! wgpu, plus the small helpers demo applications build on (images, FPS
//! overlay, timing, logging).

pub mod coords;
pub mod core;
pub mod debug;
pub mod device;
pub mod event;
pub mod gl;
pub mod logging;
pub mod text;
pub mod time;
pub mod window;
