#![forbid(unsafe_code)]

//! Core: input events and key mapping for Folio carousels.
//!
//! # Role in Folio
//! `folio-core` is the input layer. It owns the normalized event types that
//! hosts feed into carousels and the mapping from keys to navigation
//! commands.
//!
//! # How it fits in the system
//! The runtime (`folio-runtime`) supplies clocks, timers and change feeds.
//! The widgets crate (`folio-widgets`) consumes `folio-core` events and
//! actions to drive its rotation scheduler.

pub mod event;
pub mod keybinding;
#[cfg(feature = "tracing")]
pub mod logging;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use keybinding::{CarouselAction, KeyMap};
