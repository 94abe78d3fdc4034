use std::collections::VecDeque;
use std::sync::Arc;

use winit::window::Window;

use crate::core::Host;
use crate::event::Event;
use crate::gl::WgpuGl;

/// The runtime's side of the `Host` contract.
///
/// Kept apart from the application so both can be borrowed mutably while an
/// event is handled.
#[derive(Default)]
pub(super) struct RuntimeHost {
    pub window: Option<Arc<Window>>,
    pub queue: VecDeque<Event>,
    pub pending_ctx: Option<WgpuGl>,
    /// Set when the app sent a paint; the next redraw is delivered as its answer.
    pub paint_requested: bool,
}

impl RuntimeHost {
    pub fn push(&mut self, event: impl Into<Event>) {
        self.queue.push_back(event.into());
    }

    /// Resolves a platform redraw into the paint the application sees.
    pub fn take_paint_request(&mut self) -> bool {
        std::mem::take(&mut self.paint_requested)
    }
}

impl Host for RuntimeHost {
    type Context = WgpuGl;

    fn take_draw_context(&mut self) -> Option<WgpuGl> {
        self.pending_ctx.take()
    }

    fn send(&mut self, event: Event) {
        match event {
            Event::Paint(p) if !p.external => {
                self.paint_requested = true;
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            other => self.queue.push_back(other),
        }
    }

    fn publish(&mut self, ctx: &mut WgpuGl) {
        ctx.present();
    }

    fn exit(&mut self, code: i32) {
        log::info!("exiting with code {code}");
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{PaintEvent, SizeEvent};

    #[test]
    fn requested_paint_becomes_a_redraw_request() {
        let mut host = RuntimeHost::default();
        host.send(PaintEvent::requested().into());

        assert!(host.paint_requested);
        assert!(host.queue.is_empty());
    }

    #[test]
    fn paint_request_is_taken_once() {
        let mut host = RuntimeHost::default();
        host.send(PaintEvent::requested().into());
        host.send(PaintEvent::requested().into());

        assert!(host.take_paint_request());
        assert!(!host.take_paint_request());
    }

    #[test]
    fn redraw_without_request_is_external() {
        let mut host = RuntimeHost::default();
        assert!(!host.take_paint_request());
    }

    #[test]
    fn other_events_are_queued_in_order() {
        let mut host = RuntimeHost::default();
        let size = SizeEvent::new(640, 480, 1.0);

        host.send(PaintEvent::external().into());
        host.send(size.into());
        host.push(PaintEvent::external());

        let queued: Vec<Event> = host.queue.drain(..).collect();
        assert_eq!(
            queued,
            vec![
                Event::Paint(PaintEvent::external()),
                Event::Size(size),
                Event::Paint(PaintEvent::external()),
            ]
        );
        assert!(!host.paint_requested);
    }

    #[test]
    fn no_context_until_the_runtime_provides_one() {
        let mut host = RuntimeHost::default();
        assert!(host.take_draw_context().is_none());
    }
}
