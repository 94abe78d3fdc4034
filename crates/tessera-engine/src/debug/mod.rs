//! On-screen diagnostics.

mod fps;

pub use fps::Fps;
