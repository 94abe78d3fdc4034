//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and presenting them

mod context;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
