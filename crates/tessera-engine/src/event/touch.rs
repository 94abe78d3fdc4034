/// Phase of a touch sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchKind {
    Begin,
    Move,
    End,
}

/// A touch (or left-button mouse drag on desktop), in physical pixels.
///
/// `sequence` identifies one finger from `Begin` to `End`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    pub x: f32,
    pub y: f32,
    pub sequence: u64,
    pub kind: TouchKind,
}
