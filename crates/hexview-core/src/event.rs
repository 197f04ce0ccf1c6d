#![forbid(unsafe_code)]

//! Canonical input events for the viewer.
//!
//! Hosts translate their native input (DOM events, terminal mouse reports,
//! test scripts) into these types. Coordinates are pixels relative to the
//! viewer's scroll container. Pointer events carry the cell they landed on,
//! already hit-tested by the host, since only the host knows its own cell
//! geometry.
//!
//! # Design Notes
//!
//! - A pointer-down with no target is a click outside the grid ("click away").
//! - Wheel deltas are in notches; positive scrolls towards the end of the buffer.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Size;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse or pen) event.
    Pointer(PointerEvent),

    /// A wheel event.
    Wheel(WheelEvent),

    /// A touch event.
    Touch(TouchEvent),

    /// The scroll container was resized.
    Resize(Size),
}

/// Which column of a row a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pane {
    /// The hex pair column.
    #[default]
    Hex,
    /// The decoded text column.
    Text,
}

impl Pane {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Text => "text",
        }
    }
}

/// A byte cell hit by a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellTarget {
    /// Byte index of the cell.
    pub index: usize,
    /// Column the cell belongs to.
    pub pane: Pane,
}

impl CellTarget {
    /// Create a new cell target.
    #[must_use]
    pub const fn new(index: usize, pane: Pane) -> Self {
        Self { index, pane }
    }

    /// Target in the hex column.
    #[must_use]
    pub const fn hex(index: usize) -> Self {
        Self::new(index, Pane::Hex)
    }

    /// Target in the text column.
    #[must_use]
    pub const fn text(index: usize) -> Self {
        Self::new(index, Pane::Text)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key (case-insensitive for ASCII).
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&c))
    }

    /// Check if Ctrl (or Cmd on macOS hosts) is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.intersects(Modifiers::CTRL.union(Modifiers::SUPER))
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,

    /// Cell under the pointer, if any.
    pub target: Option<CellTarget>,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerKind, target: Option<CellTarget>) -> Self {
        Self {
            kind,
            target,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button press on a cell.
    #[must_use]
    pub const fn down(target: CellTarget) -> Self {
        Self::new(PointerKind::Down(MouseButton::Left), Some(target))
    }

    /// Pointer entered a cell.
    #[must_use]
    pub const fn enter(target: CellTarget) -> Self {
        Self::new(PointerKind::Enter, Some(target))
    }

    /// Primary-button release, wherever it happens.
    #[must_use]
    pub const fn up() -> Self {
        Self::new(PointerKind::Up(MouseButton::Left), None)
    }

    /// Primary-button press outside the grid.
    #[must_use]
    pub const fn click_away() -> Self {
        Self::new(PointerKind::Down(MouseButton::Left), None)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed down.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Pointer entered a cell.
    Enter,
    /// Pointer left the grid.
    Leave,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// A wheel event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    /// Vertical notches; positive scrolls down.
    pub delta: i32,
}

impl WheelEvent {
    /// Create a new wheel event.
    #[must_use]
    pub const fn new(delta: i32) -> Self {
        Self { delta }
    }
}

/// A touch event for a single contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    /// Gesture phase.
    pub phase: TouchPhase,
    /// X coordinate in pixels.
    pub x: i32,
    /// Y coordinate in pixels.
    pub y: i32,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub const fn new(phase: TouchPhase, x: i32, y: i32) -> Self {
        Self { phase, x, y }
    }
}

/// Touch gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger placed.
    Start,
    /// Finger moved.
    Move,
    /// Finger lifted.
    End,
    /// Gesture cancelled by the host.
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_accepts_command_key() {
        let key = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::SUPER);
        assert!(key.ctrl());
        assert!(!key.shift());
    }

    #[test]
    fn is_char_ignores_ascii_case() {
        let key = KeyEvent::new(KeyCode::Char('C'));
        assert!(key.is_char('c'));
        assert!(!key.is_char('v'));
    }

    #[test]
    fn click_away_has_no_target() {
        let ev = PointerEvent::click_away();
        assert_eq!(ev.kind, PointerKind::Down(MouseButton::Left));
        assert!(ev.target.is_none());
    }

    #[test]
    fn pointer_constructors_carry_target() {
        let ev = PointerEvent::down(CellTarget::text(9));
        assert_eq!(ev.target, Some(CellTarget::new(9, Pane::Text)));
        assert_eq!(Pane::Text.as_str(), "text");
    }
}
