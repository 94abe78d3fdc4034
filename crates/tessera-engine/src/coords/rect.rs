use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Overlap of two rectangles, or `None` when they share no area.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.max().x.min(other.max().x);
        let y1 = self.max().y.min(other.max().y);

        let r = Rect::new(x0, y0, x1 - x0, y1 - y0);
        if r.is_empty() { None } else { Some(r) }
    }

    /// Texture coordinates of this rectangle inside an image of `extent` pixels,
    /// as `(uv_min, uv_max)`.
    pub fn to_uv(self, extent: Vec2) -> ([f32; 2], [f32; 2]) {
        let w = extent.x.max(1.0);
        let h = extent.y.max(1.0);
        let max = self.max();
        (
            [self.origin.x / w, self.origin.y / h],
            [max.x / w, max.y / h],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b), Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_contained() {
        let outer = r(0.0, 0.0, 64.0, 32.0);
        let inner = r(10.0, 10.0, 20.0, 20.0);
        assert_eq!(outer.intersect(inner), Some(inner));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }

    #[test]
    fn full_rect_maps_to_unit_uv() {
        let (min, max) = r(0.0, 0.0, 64.0, 32.0).to_uv(Vec2::new(64.0, 32.0));
        assert_eq!(min, [0.0, 0.0]);
        assert_eq!(max, [1.0, 1.0]);
    }

    #[test]
    fn sub_rect_maps_to_fractional_uv() {
        let (min, max) = r(16.0, 8.0, 32.0, 16.0).to_uv(Vec2::new(64.0, 32.0));
        assert_eq!(min, [0.25, 0.25]);
        assert_eq!(max, [0.75, 0.75]);
    }
}
