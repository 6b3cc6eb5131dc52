#![forbid(unsafe_code)]

//! Folio error model.
//!
//! The engine itself never fails: bad heights collapse to a one-item window,
//! short lists wrap, and empty lists are inert. Errors only come from the
//! edges where data enters, which are configuration files and testimonial
//! payloads.

use std::path::PathBuf;

use folio_runtime::ConfigError;

/// Top-level error type for Folio hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be read, parsed or validated.
    #[error("carousel config: {0}")]
    Config(#[from] ConfigError),
    /// The testimonial payload is not valid JSON for the record shape.
    #[cfg(feature = "serde")]
    #[error("testimonial data: {0}")]
    Data(#[from] serde_json::Error),
    /// A config file whose extension is neither `.toml` nor `.json`.
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl Error {
    /// Whether the error is an invalid value rather than unreadable input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Config(ConfigError::Validation(_)))
    }
}

/// Standard result type for Folio APIs.
pub type Result<T> = std::result::Result<T, Error>;
