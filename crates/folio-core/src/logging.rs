#![forbid(unsafe_code)]

//! Tracing bootstrap for hosts and demos.
//!
//! The engine crates emit `tracing` events and never install a subscriber
//! themselves. Binaries call [`init_logging`] once at startup. The filter
//! comes from `RUST_LOG` (falling back to `warn`); the `tracing-json`
//! feature switches the formatter to JSON lines.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    result.is_ok()
}
