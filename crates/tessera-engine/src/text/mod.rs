//! Font loading and single-line text rasterization (fontdue).

mod font;
mod raster;

pub use font::{load_font, load_font_file, system_font, FontLoadError, SYSTEM_FONT_CANDIDATES};
pub use raster::rasterize_line;
