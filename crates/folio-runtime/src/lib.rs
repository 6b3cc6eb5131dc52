#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! Runtime primitives shared by every carousel engine instance.
//!
//! # Key Components
//!
//! - [`Clock`] - Time source trait, with [`SystemClock`] and [`ManualClock`]
//! - [`AutoplayTimer`] - Cooperative repeating timer with stale-handle detection
//! - [`Observable`] - Versioned value with change callbacks
//! - [`CarouselConfig`] - Per-instance tunables with env/file loading
//!
//! # Role in Folio
//! The runtime owns nothing global. Each carousel builds its own timer and
//! observable, and the host event loop drives time by calling `tick()` on
//! the carousel. No threads are spawned.

pub mod clock;
pub mod config;
pub mod reactive;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CarouselConfig, ConfigError};
pub use reactive::{Observable, Subscription};
pub use timer::{AutoplayTimer, TimerHandle};
