#![forbid(unsafe_code)]

//! Widgets: the auto-rotating carousel engine.
//!
//! # Role in Folio
//! `folio-widgets` holds everything with behavior: the author-aware
//! [`shuffle`](fn@shuffle::shuffle), the visible-window calculator, the
//! [`RotationScheduler`](rotation::RotationScheduler) and the two view
//! adapters built on it.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`testimonial`] | [`Authored`] trait, [`Testimonial`] record |
//! | [`shuffle`](mod@shuffle) | [`DisplayOrder`], no-adjacent-author shuffle |
//! | [`visible_window`] | [`VisibleWindow`], slices, [`WindowPolicy`] strategies |
//! | [`rotation`] | [`RotationScheduler`], pause/hover/autoplay state machine |
//! | [`carousel`] | [`Carousel`] testimonial adapter |
//! | [`slide_host`] | [`SlideHost`] single-slide adapter |
//!
//! # Feature Flags
//!
//! - `tracing`: debug events for navigation, autoplay, pause and reshuffle.
//! - `serde`: deserialize [`Testimonial`] lists from JSON.

pub mod carousel;
pub mod rotation;
pub mod shuffle;
pub mod slide_host;
pub mod testimonial;
pub mod visible_window;

pub use carousel::{Carousel, CarouselSnapshot};
pub use rotation::{PageDirection, RotationScheduler, RotationState, RotationStats};
pub use shuffle::{AuthorStats, DisplayOrder, Feasibility, shuffle, shuffle_seeded};
pub use slide_host::{SlideHost, SlideSnapshot};
pub use testimonial::{Authored, Testimonial};
pub use visible_window::{
    HeightAdaptive, MAX_FULL_COUNT, SingleSlide, SliceEntry, VisibleWindow, WindowPolicy,
    compute_visible_window, get_visible_slice,
};
