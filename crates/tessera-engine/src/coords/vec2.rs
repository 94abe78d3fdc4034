use core::ops::Add;

/// 2D point or extent in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Maps a pixel position to clip space for a surface of `size` pixels.
    ///
    /// Pixel space has +Y down; clip space has +Y up and spans `[-1, 1]`.
    #[inline]
    pub fn to_clip(self, size: Vec2) -> [f32; 2] {
        let w = size.x.max(1.0);
        let h = size.y.max(1.0);
        [2.0 * self.x / w - 1.0, 1.0 - 2.0 * self.y / h]
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_clip_extremes() {
        let size = Vec2::new(200.0, 100.0);
        assert_eq!(Vec2::zero().to_clip(size), [-1.0, 1.0]);
        assert_eq!(Vec2::new(200.0, 100.0).to_clip(size), [1.0, -1.0]);
        assert_eq!(Vec2::new(100.0, 50.0).to_clip(size), [0.0, 0.0]);
    }

    #[test]
    fn zero_size_does_not_divide_by_zero() {
        let [x, y] = Vec2::new(1.0, 1.0).to_clip(Vec2::zero());
        assert!(x.is_finite() && y.is_finite());
    }
}
