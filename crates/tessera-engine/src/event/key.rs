/// Keyboard key identifier.
///
/// The runtime maps platform key codes into these variants where possible.
/// Unsupported keys map to `KeyCode::Unknown` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyCode {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

/// Whether the key went down, came up, or the platform could not tell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyDirection {
    None,
    Press,
    Release,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// A key press or release.
///
/// `rune` is the text produced by the key, when it produces exactly one
/// character.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub rune: Option<char>,
    pub direction: KeyDirection,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A press of `code` with no text and no modifiers.
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            rune: None,
            direction: KeyDirection::Press,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                meta: false,
            },
        }
    }
}
