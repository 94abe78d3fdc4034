use crate::coords::Vec2;

/// Screen orientation reported with a size change.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Orientation {
    #[default]
    Unknown,
    Portrait,
    Landscape,
}

/// Dimensions of the drawable surface.
///
/// Sizes are in physical pixels. `pixels_per_pt` is the platform scale factor
/// used to convert to points (logical pixels).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SizeEvent {
    pub width_px: u32,
    pub height_px: u32,
    pub pixels_per_pt: f32,
    pub orientation: Orientation,
}

impl SizeEvent {
    /// Builds a size event, deriving the orientation from the aspect ratio.
    pub fn new(width_px: u32, height_px: u32, pixels_per_pt: f32) -> Self {
        let orientation = match width_px.cmp(&height_px) {
            std::cmp::Ordering::Less => Orientation::Portrait,
            std::cmp::Ordering::Greater => Orientation::Landscape,
            std::cmp::Ordering::Equal => Orientation::Unknown,
        };

        Self {
            width_px,
            height_px,
            pixels_per_pt,
            orientation,
        }
    }

    /// Surface size in pixels.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width_px as f32, self.height_px as f32)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width_px == 0 || self.height_px == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_follows_aspect_ratio() {
        assert_eq!(SizeEvent::new(480, 800, 1.0).orientation, Orientation::Portrait);
        assert_eq!(SizeEvent::new(800, 480, 1.0).orientation, Orientation::Landscape);
        assert_eq!(SizeEvent::new(500, 500, 1.0).orientation, Orientation::Unknown);
    }

    #[test]
    fn default_size_is_empty() {
        let sz = SizeEvent::default();
        assert_eq!(sz.size(), Vec2::zero());
        assert!(sz.is_empty());
        assert!(!SizeEvent::new(1, 1, 1.0).is_empty());
    }
}
