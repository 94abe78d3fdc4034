use crate::event::Event;
use crate::gl::GlContext;

use super::Host;

/// Application contract implemented by higher layers.
///
/// Events arrive in order, one at a time, on the thread that runs the
/// runtime. The application owns whatever draw context it takes from the
/// host and decides when to drop it.
pub trait App<C: GlContext> {
    fn on_event(&mut self, event: Event, host: &mut dyn Host<Context = C>);
}
