/// Request to render and publish one frame.
///
/// `external` is true when the platform asked for the redraw (expose, resize,
/// occlusion change) and false when the application sent the event itself.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PaintEvent {
    pub external: bool,
}

impl PaintEvent {
    /// A paint sent by the application to drive its own redraw loop.
    #[inline]
    pub const fn requested() -> Self {
        Self { external: false }
    }

    /// A paint triggered by the platform.
    #[inline]
    pub const fn external() -> Self {
        Self { external: true }
    }
}
