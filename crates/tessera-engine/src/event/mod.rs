//! Host event model.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform callbacks into `Event`s and delivers them to
//! the application strictly in arrival order.

mod key;
mod lifecycle;
mod paint;
mod size;
mod touch;

pub(crate) mod platform;

pub use key::{KeyCode, KeyDirection, KeyEvent, Modifiers};
pub use lifecycle::{Crossing, LifecycleEvent, Stage};
pub use paint::PaintEvent;
pub use size::{Orientation, SizeEvent};
pub use touch::{TouchEvent, TouchKind};

/// A single event delivered by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Lifecycle(LifecycleEvent),
    Size(SizeEvent),
    Paint(PaintEvent),
    Key(KeyEvent),
    Touch(TouchEvent),
}

impl From<LifecycleEvent> for Event {
    fn from(e: LifecycleEvent) -> Self {
        Event::Lifecycle(e)
    }
}

impl From<SizeEvent> for Event {
    fn from(e: SizeEvent) -> Self {
        Event::Size(e)
    }
}

impl From<PaintEvent> for Event {
    fn from(e: PaintEvent) -> Self {
        Event::Paint(e)
    }
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Event::Key(e)
    }
}

impl From<TouchEvent> for Event {
    fn from(e: TouchEvent) -> Self {
        Event::Touch(e)
    }
}
