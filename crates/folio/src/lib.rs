#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! Re-exports the types a host page needs to run adaptive, auto-rotating
//! testimonial carousels, plus a prelude and a small loading surface.
//!
//! # Example
//!
//! ```
//! use folio::prelude::*;
//!
//! let items = vec![
//!     Testimonial::new("Ada", "Sharp"),
//!     Testimonial::new("Grace", "Reliable"),
//! ];
//! let mut carousel = Carousel::new(items, &CarouselConfig::default());
//! carousel.handle_event(&Event::Resize { height_px: 650.0 });
//! assert_eq!(carousel.snapshot().len, 2);
//! ```

pub mod error;

#[cfg(feature = "config")]
use std::path::Path;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use folio_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use folio_core::keybinding::{CarouselAction, KeyMap};
#[cfg(feature = "tracing")]
pub use folio_core::logging::init_logging;

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    AutoplayTimer, CarouselConfig, Clock, ConfigError, ManualClock, Observable, Subscription,
    SystemClock, TimerHandle,
};

// --- Widget re-exports -----------------------------------------------------

pub use folio_widgets::{
    Authored, Carousel, CarouselSnapshot, DisplayOrder, HeightAdaptive, PageDirection,
    RotationScheduler, RotationState, SingleSlide, SlideHost, SlideSnapshot, SliceEntry,
    Testimonial, VisibleWindow, WindowPolicy, compute_visible_window, get_visible_slice, shuffle,
    shuffle_seeded,
};

// --- Loading ---------------------------------------------------------------

/// Load a carousel config, picking the parser from the file extension.
///
/// `.toml` and `.json` are accepted; anything else is
/// [`Error::UnsupportedFormat`].
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<Path>) -> Result<CarouselConfig> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let config = match extension.as_deref() {
        Some("toml") => CarouselConfig::from_toml_file(path)?,
        Some("json") => CarouselConfig::from_json_file(path)?,
        _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(config)
}

/// Parse a JSON array of testimonials.
#[cfg(feature = "serde")]
pub fn testimonials_from_json(json: &str) -> Result<Vec<Testimonial>> {
    Ok(Testimonial::list_from_json(json)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Authored, Carousel, CarouselAction, CarouselConfig, CarouselSnapshot, Clock, Error, Event,
        KeyCode, KeyEvent, ManualClock, PageDirection, Result, SlideHost, SystemClock,
        Testimonial,
    };

    pub use crate::{core, runtime, widgets};
}

pub use folio_core as core;
pub use folio_runtime as runtime;
pub use folio_widgets as widgets;
