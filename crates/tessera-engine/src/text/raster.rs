use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::{Rgba, RgbaImage};

use crate::coords::ColorRgba;

/// Renders one line of `text` at `px` pixels into a tightly sized image.
///
/// Glyph coverage becomes the alpha of `color`; everything else is
/// transparent. Returns `None` for text with no visible glyphs.
pub fn rasterize_line(font: &fontdue::Font, text: &str, px: f32, color: ColorRgba) -> Option<RgbaImage> {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));

    let glyphs = layout.glyphs();
    if glyphs.iter().all(|g| g.width == 0 || g.height == 0) {
        return None;
    }

    let width = glyphs
        .iter()
        .map(|g| (g.x + g.width as f32).ceil() as i64)
        .max()
        .unwrap_or(0);
    let height = glyphs
        .iter()
        .map(|g| (g.y + g.height as f32).ceil() as i64)
        .max()
        .unwrap_or(0)
        .max(layout.height().ceil() as i64);
    if width <= 0 || height <= 0 {
        return None;
    }

    let [r, g, b, a] = color.to_rgba8();
    let mut img = RgbaImage::new(width as u32, height as u32);

    for glyph in glyphs {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (_, coverage) = font.rasterize_config(glyph.key);
        let x0 = glyph.x.round() as i64;
        let y0 = glyph.y.round() as i64;

        for (i, cov) in coverage.iter().enumerate() {
            let x = x0 + (i % glyph.width) as i64;
            let y = y0 + (i / glyph.width) as i64;
            if *cov == 0 || x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }
            let alpha = (*cov as u16 * a as u16 / 255) as u8;
            let px = img.get_pixel_mut(x as u32, y as u32);
            if alpha > px.0[3] {
                *px = Rgba([r, g, b, alpha]);
            }
        }
    }

    Some(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::system_font;

    fn font() -> Option<fontdue::Font> {
        let font = system_font(None).ok();
        if font.is_none() {
            eprintln!("no system font installed; skipping");
        }
        font
    }

    #[test]
    fn line_is_tightly_sized_and_covered() {
        let Some(font) = font() else { return };
        let img = rasterize_line(&font, "60 FPS", 24.0, ColorRgba::black()).expect("visible text");

        assert!(img.width() > 0 && img.height() > 0);
        assert!(img.height() < 48);
        assert!(img.pixels().any(|p| p.0[3] > 0));
        assert!(img.pixels().any(|p| p.0[3] == 0));
        assert!(img.pixels().filter(|p| p.0[3] > 0).all(|p| p.0[..3] == [0, 0, 0]));
    }

    #[test]
    fn longer_text_is_wider() {
        let Some(font) = font() else { return };
        let short = rasterize_line(&font, "1", 16.0, ColorRgba::black()).expect("one glyph");
        let long = rasterize_line(&font, "11111", 16.0, ColorRgba::black()).expect("five glyphs");
        assert!(long.width() > short.width());
    }

    #[test]
    fn blank_text_has_no_image() {
        let Some(font) = font() else { return };
        assert!(rasterize_line(&font, "", 16.0, ColorRgba::black()).is_none());
        assert!(rasterize_line(&font, "   ", 16.0, ColorRgba::black()).is_none());
    }
}
