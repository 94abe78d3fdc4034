//! Frame timing.
//!
//! - `FrameClock` produces a `FrameTime` per presented frame
//! - `FpsCounter` turns those ticks into a frames-per-second figure

mod fps_counter;
mod frame_clock;

pub use fps_counter::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
