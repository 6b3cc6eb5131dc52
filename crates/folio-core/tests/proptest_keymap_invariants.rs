//! Property-based invariant tests for the carousel key map.
//!
//! ## Invariants
//!
//! 1. Only Space, `p` and `P` produce an action among character keys
//! 2. Command modifiers always suppress the mapping
//! 3. Release events never produce an action
//! 4. Mapping is a pure function of the event

use folio_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
use folio_core::keybinding::{CarouselAction, KeyMap};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        any::<char>().prop_map(KeyCode::Char),
        Just(KeyCode::Enter),
        Just(KeyCode::Escape),
        Just(KeyCode::Tab),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
    ]
}

fn arb_modifiers() -> impl Strategy<Value = Modifiers> {
    (0u8..16).prop_map(Modifiers::from_bits_truncate)
}

fn arb_kind() -> impl Strategy<Value = KeyEventKind> {
    prop_oneof![
        Just(KeyEventKind::Press),
        Just(KeyEventKind::Repeat),
        Just(KeyEventKind::Release),
    ]
}

fn arb_event() -> impl Strategy<Value = KeyEvent> {
    (arb_code(), arb_modifiers(), arb_kind()).prop_map(|(code, modifiers, kind)| {
        KeyEvent::new(code).with_modifiers(modifiers).with_kind(kind)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ── 1. Character keys ────────────────────────────────────────────────

    #[test]
    fn only_pause_chars_map(ch in any::<char>()) {
        let action = KeyMap::default().map(&KeyEvent::new(KeyCode::Char(ch)));
        if matches!(ch, ' ' | 'p' | 'P') {
            prop_assert_eq!(action, Some(CarouselAction::TogglePause));
        } else {
            prop_assert_eq!(action, None);
        }
    }

    // ── 2. Command modifiers ─────────────────────────────────────────────

    #[test]
    fn command_modifiers_suppress(event in arb_event()) {
        let keymap = KeyMap::default();
        if event.has_command_modifier() {
            prop_assert_eq!(keymap.map(&event), None);
        }
    }

    // ── 3. Release ───────────────────────────────────────────────────────

    #[test]
    fn release_never_maps(code in arb_code(), modifiers in arb_modifiers()) {
        let event = KeyEvent::new(code)
            .with_modifiers(modifiers)
            .with_kind(KeyEventKind::Release);
        prop_assert_eq!(KeyMap::default().map(&event), None);
    }

    // ── 4. Purity ────────────────────────────────────────────────────────

    #[test]
    fn mapping_is_deterministic(event in arb_event()) {
        let keymap = KeyMap::default();
        prop_assert_eq!(keymap.map(&event), keymap.map(&event));
    }
}
