//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! applications: the runtime delivers `Event`s one at a time and the
//! application answers through a `Host`.

mod app;
mod host;

pub use app::App;
pub use host::Host;
