use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Touch, TouchPhase};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

use crate::event::{KeyCode, KeyDirection, KeyEvent, Modifiers, SizeEvent, TouchEvent, TouchKind};

/// Sequence id used for touches synthesized from the mouse.
const MOUSE_SEQUENCE: u64 = 0;

pub(crate) fn size_event(size: PhysicalSize<u32>, scale_factor: f64) -> SizeEvent {
    SizeEvent::new(size.width, size.height, scale_factor as f32)
}

pub(crate) fn touch_event(touch: &Touch) -> TouchEvent {
    let kind = match touch.phase {
        TouchPhase::Started => TouchKind::Begin,
        TouchPhase::Moved => TouchKind::Move,
        TouchPhase::Ended | TouchPhase::Cancelled => TouchKind::End,
    };

    TouchEvent {
        x: touch.location.x as f32,
        y: touch.location.y as f32,
        sequence: touch.id,
        kind,
    }
}

pub(crate) fn key_event(event: &winit::event::KeyEvent, modifiers: Modifiers) -> KeyEvent {
    let direction = match event.state {
        ElementState::Pressed => KeyDirection::Press,
        ElementState::Released => KeyDirection::Release,
    };

    let rune = event.text.as_ref().and_then(|t| {
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    });

    KeyEvent {
        code: map_key(event.physical_key),
        rune,
        direction,
        modifiers,
    }
}

pub(crate) fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

/// Reports left-button mouse drags as touches so desktop builds behave like
/// a single-finger touch screen.
#[derive(Debug, Default)]
pub(crate) struct MouseTouch {
    cursor: Option<(f32, f32)>,
    pressed: bool,
}

impl MouseTouch {
    pub(crate) fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<TouchEvent> {
        let pos = (position.x as f32, position.y as f32);
        self.cursor = Some(pos);

        self.pressed.then(|| TouchEvent {
            x: pos.0,
            y: pos.1,
            sequence: MOUSE_SEQUENCE,
            kind: TouchKind::Move,
        })
    }

    pub(crate) fn left_button(&mut self, state: ElementState) -> Option<TouchEvent> {
        let (x, y) = self.cursor?;

        let kind = match (state, self.pressed) {
            (ElementState::Pressed, false) => TouchKind::Begin,
            (ElementState::Released, true) => TouchKind::End,
            _ => return None,
        };
        self.pressed = state == ElementState::Pressed;

        Some(TouchEvent {
            x,
            y,
            sequence: MOUSE_SEQUENCE,
            kind,
        })
    }

    pub(crate) fn cursor_left(&mut self) -> Option<TouchEvent> {
        let (x, y) = self.cursor.take()?;
        if !std::mem::take(&mut self.pressed) {
            return None;
        }

        Some(TouchEvent {
            x,
            y,
            sequence: MOUSE_SEQUENCE,
            kind: TouchKind::End,
        })
    }
}

fn map_key(pk: PhysicalKey) -> KeyCode {
    match pk {
        PhysicalKey::Code(code) => match code {
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Enter => KeyCode::Enter,
            WinitKeyCode::Tab => KeyCode::Tab,
            WinitKeyCode::Backspace => KeyCode::Backspace,
            WinitKeyCode::Space => KeyCode::Space,

            WinitKeyCode::Insert => KeyCode::Insert,
            WinitKeyCode::Delete => KeyCode::Delete,
            WinitKeyCode::Home => KeyCode::Home,
            WinitKeyCode::End => KeyCode::End,
            WinitKeyCode::PageUp => KeyCode::PageUp,
            WinitKeyCode::PageDown => KeyCode::PageDown,

            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

            WinitKeyCode::ShiftLeft | WinitKeyCode::ShiftRight => KeyCode::Shift,
            WinitKeyCode::ControlLeft | WinitKeyCode::ControlRight => KeyCode::Control,
            WinitKeyCode::AltLeft | WinitKeyCode::AltRight => KeyCode::Alt,
            WinitKeyCode::SuperLeft | WinitKeyCode::SuperRight => KeyCode::Meta,

            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyB => KeyCode::B,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyF => KeyCode::F,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyI => KeyCode::I,
            WinitKeyCode::KeyJ => KeyCode::J,
            WinitKeyCode::KeyK => KeyCode::K,
            WinitKeyCode::KeyL => KeyCode::L,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyN => KeyCode::N,
            WinitKeyCode::KeyO => KeyCode::O,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::KeyU => KeyCode::U,
            WinitKeyCode::KeyV => KeyCode::V,
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyX => KeyCode::X,
            WinitKeyCode::KeyY => KeyCode::Y,
            WinitKeyCode::KeyZ => KeyCode::Z,

            WinitKeyCode::Digit0 => KeyCode::Digit0,
            WinitKeyCode::Digit1 => KeyCode::Digit1,
            WinitKeyCode::Digit2 => KeyCode::Digit2,
            WinitKeyCode::Digit3 => KeyCode::Digit3,
            WinitKeyCode::Digit4 => KeyCode::Digit4,
            WinitKeyCode::Digit5 => KeyCode::Digit5,
            WinitKeyCode::Digit6 => KeyCode::Digit6,
            WinitKeyCode::Digit7 => KeyCode::Digit7,
            WinitKeyCode::Digit8 => KeyCode::Digit8,
            WinitKeyCode::Digit9 => KeyCode::Digit9,

            WinitKeyCode::F1 => KeyCode::F1,
            WinitKeyCode::F2 => KeyCode::F2,
            WinitKeyCode::F3 => KeyCode::F3,
            WinitKeyCode::F4 => KeyCode::F4,
            WinitKeyCode::F5 => KeyCode::F5,
            WinitKeyCode::F6 => KeyCode::F6,
            WinitKeyCode::F7 => KeyCode::F7,
            WinitKeyCode::F8 => KeyCode::F8,
            WinitKeyCode::F9 => KeyCode::F9,
            WinitKeyCode::F10 => KeyCode::F10,
            WinitKeyCode::F11 => KeyCode::F11,
            WinitKeyCode::F12 => KeyCode::F12,

            other => KeyCode::Unknown(other as u32),
        },

        // NativeKeyCode carries no stable numeric in winit 0.30.
        PhysicalKey::Unidentified(_) => KeyCode::Unknown(0),
    }
}
