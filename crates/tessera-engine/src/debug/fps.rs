use std::path::Path;

use crate::coords::{ColorRgba, Vec2};
use crate::event::SizeEvent;
use crate::gl::{GlContext, Image, Images};
use crate::text;
use crate::time::{FpsCounter, FrameClock};

/// Text height of the overlay, in points.
const TEXT_PT: f32 = 12.0;

/// Frames-per-second overlay drawn in the bottom-left corner.
///
/// Every call to [`draw`](Self::draw) counts as one frame. The label is
/// re-rasterized only when the figure or the display scale changes.
pub struct Fps {
    font: Option<fontdue::Font>,
    warned: bool,
    clock: FrameClock,
    counter: FpsCounter,
    label: Option<Label>,
}

struct Label {
    image: Image,
    fps: Option<u32>,
    pixels_per_pt: f32,
}

impl Fps {
    pub fn new(font: Option<fontdue::Font>) -> Self {
        Self {
            font,
            warned: false,
            clock: FrameClock::new(),
            counter: FpsCounter::new(),
            label: None,
        }
    }

    /// Uses the font at `path`, or a system font when `path` is `None`.
    pub fn with_system_font(path: Option<&Path>) -> Self {
        let font = match text::system_font(path) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("fps overlay disabled: {e}");
                None
            }
        };
        let mut fps = Self::new(font);
        fps.warned = fps.font.is_none();
        fps
    }

    /// Counts a frame and draws the current figure.
    pub fn draw(&mut self, ctx: &mut dyn GlContext, images: &mut Images, size: &SizeEvent) {
        let ft = self.clock.tick();
        self.counter.record(&ft);

        if size.is_empty() {
            return;
        }
        let Some(font) = &self.font else {
            if !self.warned {
                log::warn!("fps overlay has no font; nothing will be drawn");
                self.warned = true;
            }
            return;
        };

        let fps = self.counter.fps();
        let scale = if size.pixels_per_pt > 0.0 { size.pixels_per_pt } else { 1.0 };

        let stale = self
            .label
            .as_ref()
            .is_none_or(|l| l.fps != fps || l.pixels_per_pt != scale);
        if stale {
            let text = match fps {
                Some(n) => format!("{n} FPS"),
                None => "-- FPS".to_string(),
            };
            let Some(pixels) = text::rasterize_line(font, &text, TEXT_PT * scale, ColorRgba::black())
            else {
                return;
            };

            if let Some(old) = self.label.take() {
                images.release_image(ctx, old.image);
            }
            let mut image = images.new_image(ctx, pixels.width(), pixels.height());
            image.rgba = pixels;
            image.upload(ctx);
            self.label = Some(Label {
                image,
                fps,
                pixels_per_pt: scale,
            });
        }

        let Some(label) = &self.label else { return };
        let w = label.image.width() as f32;
        let h = label.image.height() as f32;
        let bottom = size.height_px as f32;

        label.image.draw(
            ctx,
            size,
            Vec2::new(0.0, bottom - h),
            Vec2::new(w, bottom - h),
            Vec2::new(0.0, bottom),
            label.image.bounds(),
        );
    }

    /// Deletes the label texture and restarts timing, so the time spent
    /// without a context is not counted as one long frame.
    pub fn release(&mut self, ctx: &mut dyn GlContext, images: &mut Images) {
        if let Some(label) = self.label.take() {
            images.release_image(ctx, label.image);
        }
        self.clock.reset();
        self.counter.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::gl::{GlCall, TexturedQuad, TraceGl};
    use crate::time::FrameTime;

    fn with_font() -> Option<Fps> {
        match text::system_font(None) {
            Ok(font) => Some(Fps::new(Some(font))),
            Err(_) => {
                eprintln!("no system font installed; skipping");
                None
            }
        }
    }

    fn quads(calls: &[GlCall]) -> Vec<TexturedQuad> {
        calls
            .iter()
            .filter_map(|c| match c {
                GlCall::DrawTexture(q) => Some(*q),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn label_sits_in_the_bottom_left_corner() {
        let Some(mut fps) = with_font() else { return };
        let mut gl = TraceGl::new();
        let mut images = Images::new();

        fps.draw(&mut gl, &mut images, &SizeEvent::new(320, 240, 1.0));

        let calls = gl.take_calls();
        assert!(matches!(calls[0], GlCall::CreateTexture(_)));
        let drawn = quads(&calls);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].top_left[0], -1.0);
        assert_eq!(drawn[0].bottom_left, [-1.0, -1.0]);
        assert!(drawn[0].top_right[0] > -1.0);
        assert!(drawn[0].top_left[1] > -1.0);
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn label_is_rebuilt_only_when_the_figure_changes() {
        let Some(mut fps) = with_font() else { return };
        let mut gl = TraceGl::new();
        let mut images = Images::new();
        let size = SizeEvent::new(320, 240, 1.0);

        fps.draw(&mut gl, &mut images, &size);
        fps.draw(&mut gl, &mut images, &size);
        let steady = gl.take_calls();
        assert_eq!(
            steady.iter().filter(|c| matches!(c, GlCall::CreateTexture(_))).count(),
            1
        );

        // Complete a window in the future so later ticks stay inside it.
        let t0 = Instant::now() + Duration::from_secs(60);
        let frame = |now, frame_index| FrameTime { dt: 0.0, now, frame_index };
        fps.counter = FpsCounter::new();
        fps.counter.record(&frame(t0, 0));
        assert!(fps.counter.record(&frame(t0 + Duration::from_secs(1), 1)));

        fps.draw(&mut gl, &mut images, &size);
        let calls = gl.take_calls();
        assert!(calls.iter().any(|c| matches!(c, GlCall::DeleteTexture(_))));
        assert!(calls.iter().any(|c| matches!(c, GlCall::CreateTexture(_))));
        assert_eq!(quads(&calls).len(), 1);
        assert_eq!(gl.live_textures(), 1);
        assert_eq!(fps.label.as_ref().and_then(|l| l.fps), Some(1));
    }

    #[test]
    fn release_deletes_the_label() {
        let Some(mut fps) = with_font() else { return };
        let mut gl = TraceGl::new();
        let mut images = Images::new();

        fps.draw(&mut gl, &mut images, &SizeEvent::new(320, 240, 2.0));
        assert_eq!(gl.live_textures(), 1);

        fps.release(&mut gl, &mut images);
        assert_eq!(gl.live_textures(), 0);
        assert!(images.is_empty());
        assert!(fps.label.is_none());
    }

    #[test]
    fn without_a_font_nothing_is_drawn() {
        let mut gl = TraceGl::new();
        let mut images = Images::new();
        let mut fps = Fps::new(None);

        let size = SizeEvent::new(320, 240, 1.0);
        for _ in 0..3 {
            fps.draw(&mut gl, &mut images, &size);
        }

        assert!(gl.calls().is_empty());
        assert!(fps.warned);
        assert!(images.is_empty());
    }

    #[test]
    fn release_without_label_is_a_no_op() {
        let mut gl = TraceGl::new();
        let mut images = Images::new();
        let mut fps = Fps::new(None);
        fps.release(&mut gl, &mut images);
        assert!(gl.calls().is_empty());
    }
}
