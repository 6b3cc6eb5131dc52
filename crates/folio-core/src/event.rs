#![forbid(unsafe_code)]

//! Canonical input events consumed by carousel adapters.
//!
//! The engine never measures or listens to a view layer itself. Hosts
//! translate whatever their view produces (DOM events, terminal input,
//! a test script) into these types and forward them.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish
//! - `Modifiers` use bitflags for easy combination
//! - Container height arrives as a `Resize` event in pixels

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// The pointer entered the carousel region.
    PointerEnter,

    /// The pointer left the carousel region.
    PointerLeave,

    /// The measured container height changed.
    Resize {
        /// New container height in pixels.
        height_px: f64,
    },
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// True when Ctrl, Alt or Super is held.
    ///
    /// Shift alone does not count: `P` arrives as Shift+`P` on most hosts.
    #[must_use]
    pub const fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER))
    }

    /// Map a DOM `KeyboardEvent.key` name onto a key code.
    ///
    /// Returns `None` for names the carousel has no use for.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        let code = match name {
            "ArrowUp" | "Up" => KeyCode::Up,
            "ArrowDown" | "Down" => KeyCode::Down,
            "ArrowLeft" | "Left" => KeyCode::Left,
            "ArrowRight" | "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "Enter" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            " " | "Space" | "Spacebar" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return None,
                }
            }
        };
        Some(Self::new(code))
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

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

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_defaults_to_press_without_modifiers() {
        let key = KeyEvent::new(KeyCode::Home);
        assert_eq!(key.kind, KeyEventKind::Press);
        assert_eq!(key.modifiers, Modifiers::NONE);
    }

    #[test]
    fn shift_is_not_a_command_modifier() {
        let key = KeyEvent::new(KeyCode::Char('P')).with_modifiers(Modifiers::SHIFT);
        assert!(!key.has_command_modifier());
        let key = key.with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(key.has_command_modifier());
    }

    #[test]
    fn dom_key_names_map_to_codes() {
        assert_eq!(
            KeyEvent::from_key_name("ArrowRight").map(|k| k.code),
            Some(KeyCode::Right)
        );
        assert_eq!(
            KeyEvent::from_key_name(" ").map(|k| k.code),
            Some(KeyCode::Char(' '))
        );
        assert_eq!(
            KeyEvent::from_key_name("p").map(|k| k.code),
            Some(KeyCode::Char('p'))
        );
        assert!(KeyEvent::from_key_name("F13").is_none());
    }

    #[test]
    fn is_char_matches_only_that_char() {
        let key = KeyEvent::new(KeyCode::Char('p'));
        assert!(key.is_char('p'));
        assert!(!key.is_char('P'));
    }
}
