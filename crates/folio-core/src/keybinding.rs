#![forbid(unsafe_code)]

//! Key-to-command mapping for carousels.
//!
//! # Key Concepts
//!
//! - **CarouselAction**: the navigation commands a carousel understands.
//! - **KeyMap**: turns a [`KeyEvent`] into at most one [`CarouselAction`].
//!
//! # Default bindings
//!
//! | Key | Action |
//! |-----|--------|
//! | `Up`, `Left` | [`CarouselAction::Previous`] |
//! | `Down`, `Right` | [`CarouselAction::Next`] |
//! | `Space`, `p`, `P` | [`CarouselAction::TogglePause`] |
//! | `Home` | [`CarouselAction::First`] |
//! | `End` | [`CarouselAction::Last`] |
//! | `PageUp` | [`CarouselAction::PageBackward`] |
//! | `PageDown` | [`CarouselAction::PageForward`] |
//!
//! Every other key maps to `None`.
//!
//! # Example
//!
//! ```
//! use folio_core::event::{KeyCode, KeyEvent};
//! use folio_core::keybinding::{CarouselAction, KeyMap};
//!
//! let keymap = KeyMap::default();
//! assert_eq!(
//!     keymap.map(&KeyEvent::new(KeyCode::PageDown)),
//!     Some(CarouselAction::PageForward)
//! );
//! assert_eq!(keymap.map(&KeyEvent::new(KeyCode::Char('x'))), None);
//! ```

use crate::event::{KeyCode, KeyEvent, KeyEventKind};

/// High-level navigation command produced from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselAction {
    /// Step one item back, wrapping around.
    Previous,
    /// Step one item forward, wrapping around.
    Next,
    /// Flip the manual pause flag.
    TogglePause,
    /// Jump to the first item.
    First,
    /// Jump to the last item.
    Last,
    /// Jump one screenful back, clamped at the start.
    PageBackward,
    /// Jump one screenful forward, clamped at the end.
    PageForward,
}

impl CarouselAction {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Next => "next",
            Self::TogglePause => "toggle_pause",
            Self::First => "first",
            Self::Last => "last",
            Self::PageBackward => "page_backward",
            Self::PageForward => "page_forward",
        }
    }
}

/// Maps key events to [`CarouselAction`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    /// Treat auto-repeat events like presses. Default: true.
    pub accept_repeat: bool,
    /// Drop keys held with Ctrl, Alt or Super so host shortcuts pass through.
    /// Default: true.
    pub ignore_command_modifiers: bool,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            accept_repeat: true,
            ignore_command_modifiers: true,
        }
    }
}

impl KeyMap {
    /// Create a key map with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore auto-repeat events.
    #[must_use]
    pub fn without_repeat(mut self) -> Self {
        self.accept_repeat = false;
        self
    }

    /// Resolve a key event. Unrecognized keys return `None`.
    #[must_use]
    pub fn map(&self, event: &KeyEvent) -> Option<CarouselAction> {
        match event.kind {
            KeyEventKind::Press => {}
            KeyEventKind::Repeat if self.accept_repeat => {}
            _ => return None,
        }
        if self.ignore_command_modifiers && event.has_command_modifier() {
            return None;
        }

        let action = match event.code {
            KeyCode::Up | KeyCode::Left => CarouselAction::Previous,
            KeyCode::Down | KeyCode::Right => CarouselAction::Next,
            KeyCode::Char(' ' | 'p' | 'P') => CarouselAction::TogglePause,
            KeyCode::Home => CarouselAction::First,
            KeyCode::End => CarouselAction::Last,
            KeyCode::PageUp => CarouselAction::PageBackward,
            KeyCode::PageDown => CarouselAction::PageForward,
            _ => return None,
        };
        Some(action)
    }
}
