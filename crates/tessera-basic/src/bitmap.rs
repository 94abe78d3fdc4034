//! The 64x32 bitmap shown in the top-left quarter of the window.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::rng::XorShift;

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 32;

/// Pixels per frame turned black by [`scatter`].
pub const SCATTER_PER_FRAME: usize = 5;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draws the start pattern: both corners, a short horizontal bar at row 10
/// and a hook down its right end.
pub fn seed(img: &mut RgbaImage) {
    let mut ink = |x: u32, y: u32| {
        if x < img.width() && y < img.height() {
            img.put_pixel(x, y, INK);
        }
    };

    ink(0, 0);
    for x in 10..=15 {
        ink(x, 10);
    }
    for y in 11..=13 {
        ink(15, y);
    }
    ink(WIDTH - 1, HEIGHT - 1);
}

/// Turns `count` random pixels black. Pixels already black may be hit again.
pub fn scatter(img: &mut RgbaImage, rng: &mut XorShift, count: usize) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    for _ in 0..count {
        let x = rng.below(w);
        let y = rng.below(h);
        img.put_pixel(x, y, INK);
    }
}

pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
