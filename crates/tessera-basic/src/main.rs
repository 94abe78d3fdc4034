//! Minimal demo: a bitmap that fills with random black pixels, a small green
//! quad and an FPS counter, redrawn as fast as the display presents.
//!
//! Escape quits. `TESSERA_SNAPSHOT`, `TESSERA_SEED` and `TESSERA_FONT` tune
//! the demo; `RUST_LOG` the logging.

mod app;
mod bitmap;
mod config;
mod rng;
mod scene;

use anyhow::Result;
use winit::dpi::LogicalSize;

use tessera_engine::device::GpuInit;
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::window::{Runtime, RuntimeConfig};

use crate::app::Basic;
use crate::config::BasicConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = BasicConfig::from_env();
    log::debug!("{config:?}");

    Runtime::run(
        RuntimeConfig {
            title: "tessera basic".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        },
        GpuInit::default(),
        Basic::new(config),
    )
}
