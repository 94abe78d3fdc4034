//! Platform event translation.

mod winit;

pub(crate) use self::winit::{key_event, map_modifiers, size_event, touch_event, MouseTouch};
