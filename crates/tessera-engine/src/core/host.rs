use crate::event::Event;
use crate::gl::GlContext;

/// Services the runtime offers to an application while it handles an event.
pub trait Host {
    type Context: GlContext;

    /// Hands over the draw context created for the current visible period.
    ///
    /// Returns `None` when no context is pending, for example when it was
    /// already taken or the window has no surface yet.
    fn take_draw_context(&mut self) -> Option<Self::Context>;

    /// Queues an event for delivery after the current one.
    ///
    /// A non-external `Paint` is coalesced into the platform's next redraw,
    /// so it arrives after the previous frame was shown.
    fn send(&mut self, event: Event);

    /// Shows everything drawn with `ctx` since the last publish.
    fn publish(&mut self, ctx: &mut Self::Context);

    /// Terminates the process with `code`.
    fn exit(&mut self, code: i32);
}
