use image::RgbaImage;

use crate::coords::{Rect, Vec2};
use crate::event::SizeEvent;

use super::{GlContext, Texture, TexturedQuad};

/// Owner of the textures behind a set of [`Image`]s.
///
/// Images are released together when the drawing context goes away.
#[derive(Debug, Default)]
pub struct Images {
    textures: Vec<Texture>,
}

impl Images {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `width` x `height` image, fully transparent, with a texture
    /// allocated on `ctx`.
    pub fn new_image(&mut self, ctx: &mut dyn GlContext, width: u32, height: u32) -> Image {
        let texture = ctx.create_texture();
        self.textures.push(texture);
        Image {
            rgba: RgbaImage::new(width, height),
            texture,
        }
    }

    /// Deletes the texture of a single image before the rest are released.
    pub fn release_image(&mut self, ctx: &mut dyn GlContext, image: Image) {
        if let Some(pos) = self.textures.iter().position(|t| *t == image.texture) {
            self.textures.swap_remove(pos);
            ctx.delete_texture(image.texture);
        }
    }

    /// Deletes every texture created through this set.
    pub fn release(&mut self, ctx: &mut dyn GlContext) {
        for texture in self.textures.drain(..) {
            ctx.delete_texture(texture);
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// CPU pixel buffer mirrored into a texture.
///
/// Edit `rgba`, then [`upload`](Self::upload) before drawing.
#[derive(Debug)]
pub struct Image {
    pub rgba: RgbaImage,
    texture: Texture,
}

impl Image {
    pub fn texture(&self) -> Texture {
        self.texture
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Pixel bounds of the image.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    /// Copies the pixel buffer into the texture and leaves the texture bound.
    pub fn upload(&self, ctx: &mut dyn GlContext) {
        ctx.bind_texture(self.texture);
        ctx.tex_image_2d(self.width(), self.height(), self.rgba.as_raw());
    }

    /// Draws the `src` region of the image onto the parallelogram spanned by
    /// `top_left`, `top_right` and `bottom_left` (window pixels, top-left origin).
    ///
    /// `src` is clipped to the image; nothing is drawn when it falls outside.
    pub fn draw(
        &self,
        ctx: &mut dyn GlContext,
        size: &SizeEvent,
        top_left: Vec2,
        top_right: Vec2,
        bottom_left: Vec2,
        src: Rect,
    ) {
        if size.is_empty() {
            return;
        }
        let Some(src) = src.intersect(self.bounds()) else {
            log::trace!("image source {src:?} is outside the image");
            return;
        };

        let extent = size.size();
        let (uv_min, uv_max) = src.to_uv(Vec2::new(self.width() as f32, self.height() as f32));

        ctx.bind_texture(self.texture);
        ctx.draw_texture(&TexturedQuad {
            top_left: top_left.to_clip(extent),
            top_right: top_right.to_clip(extent),
            bottom_left: bottom_left.to_clip(extent),
            uv_min,
            uv_max,
        });
    }
}
