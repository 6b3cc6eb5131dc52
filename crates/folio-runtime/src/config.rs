#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`CarouselConfig`] gathers every tunable of a carousel instance. Each
//! field has a default, so `CarouselConfig::default()` is a working
//! configuration; hosts override per instance with the builder setters,
//! from the environment, or from a TOML/JSON file.
//!
//! # Loading
//!
//! ```toml
//! # folio-carousel.toml
//! autoplay_interval_ms = 7000
//! avg_item_height_px = 180.0
//! partial_threshold_px = 40.0
//! pause_on_hover = true
//! ```
//!
//! ```rust,ignore
//! let config = CarouselConfig::from_toml_file("folio-carousel.toml")?;
//! let config = CarouselConfig::from_json_str(json)?;
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `FOLIO_AUTOPLAY_MS` | u64 | 6000 | Autoplay interval |
//! | `FOLIO_AVG_ITEM_HEIGHT_PX` | f64 | 210 | Estimated item height |
//! | `FOLIO_PARTIAL_THRESHOLD_PX` | f64 | 50 | Leftover height needed for a teaser |
//! | `FOLIO_PAUSE_ON_HOVER` | bool | true | Suspend autoplay under the pointer |

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Default autoplay interval.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 6000;

/// Minimum allowed autoplay interval.
pub const MIN_AUTOPLAY_INTERVAL_MS: u64 = 250;

/// Maximum allowed autoplay interval.
pub const MAX_AUTOPLAY_INTERVAL_MS: u64 = 600_000;

/// Default estimated height of one item.
pub const DEFAULT_AVG_ITEM_HEIGHT_PX: f64 = 210.0;

/// Default leftover height that earns a partial teaser item.
pub const DEFAULT_PARTIAL_THRESHOLD_PX: f64 = 50.0;

/// Tunables for one carousel instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselConfig {
    /// Delay between automatic advances, in milliseconds.
    pub autoplay_interval_ms: u64,
    /// Estimated rendered height of one item, in pixels.
    pub avg_item_height_px: f64,
    /// Leftover container height needed to show a partial teaser, in pixels.
    pub partial_threshold_px: f64,
    /// Whether hovering suspends autoplay.
    pub pause_on_hover: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            avg_item_height_px: DEFAULT_AVG_ITEM_HEIGHT_PX,
            partial_threshold_px: DEFAULT_PARTIAL_THRESHOLD_PX,
            pause_on_hover: true,
        }
    }
}

impl CarouselConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the autoplay interval.
    #[must_use]
    pub fn with_autoplay_interval(mut self, interval: Duration) -> Self {
        self.autoplay_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the estimated item height.
    #[must_use]
    pub fn with_avg_item_height(mut self, px: f64) -> Self {
        self.avg_item_height_px = px;
        self
    }

    /// Set the partial-item threshold.
    #[must_use]
    pub fn with_partial_threshold(mut self, px: f64) -> Self {
        self.partial_threshold_px = px;
        self
    }

    /// Set whether hovering suspends autoplay.
    #[must_use]
    pub fn with_pause_on_hover(mut self, pause: bool) -> Self {
        self.pause_on_hover = pause;
        self
    }

    /// The autoplay interval as a [`Duration`].
    #[must_use]
    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    /// Load from environment variables.
    ///
    /// Unparsable values are ignored. The result is [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (same keys as [`from_env`](Self::from_env)).
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("FOLIO_AUTOPLAY_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.autoplay_interval_ms = ms;
        }

        if let Some(val) = lookup("FOLIO_AVG_ITEM_HEIGHT_PX")
            && let Ok(px) = val.trim().parse::<f64>()
        {
            config.avg_item_height_px = px;
        }

        if let Some(val) = lookup("FOLIO_PARTIAL_THRESHOLD_PX")
            && let Ok(px) = val.trim().parse::<f64>()
        {
            config.partial_threshold_px = px;
        }

        if let Some(val) = lookup("FOLIO_PAUSE_ON_HOVER") {
            let val = val.trim();
            if val == "1" || val.eq_ignore_ascii_case("true") {
                config.pause_on_hover = true;
            } else if val == "0" || val.eq_ignore_ascii_case("false") {
                config.pause_on_hover = false;
            }
        }

        config.validated()
    }

    /// Clamp values into safe ranges.
    ///
    /// - `autoplay_interval_ms` clamped to 250-600000
    /// - non-finite or non-positive `avg_item_height_px` reset to the default
    /// - non-finite or negative `partial_threshold_px` reset to 0
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.autoplay_interval_ms = self
            .autoplay_interval_ms
            .clamp(MIN_AUTOPLAY_INTERVAL_MS, MAX_AUTOPLAY_INTERVAL_MS);

        if !self.avg_item_height_px.is_finite() || self.avg_item_height_px <= 0.0 {
            self.avg_item_height_px = DEFAULT_AVG_ITEM_HEIGHT_PX;
        }

        if !self.partial_threshold_px.is_finite() || self.partial_threshold_px < 0.0 {
            self.partial_threshold_px = 0.0;
        }

        self
    }

    /// List every out-of-range value. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(MIN_AUTOPLAY_INTERVAL_MS..=MAX_AUTOPLAY_INTERVAL_MS)
            .contains(&self.autoplay_interval_ms)
        {
            errors.push(format!(
                "autoplay_interval_ms must be in {MIN_AUTOPLAY_INTERVAL_MS}..={MAX_AUTOPLAY_INTERVAL_MS}, got {}",
                self.autoplay_interval_ms
            ));
        }

        if !self.avg_item_height_px.is_finite() || self.avg_item_height_px <= 0.0 {
            errors.push(format!(
                "avg_item_height_px must be a positive number, got {}",
                self.avg_item_height_px
            ));
        }

        if !self.partial_threshold_px.is_finite() || self.partial_threshold_px < 0.0 {
            errors.push(format!(
                "partial_threshold_px must be a non-negative number, got {}",
                self.partial_threshold_px
            ));
        }

        errors
    }

    /// True when [`validate`](Self::validate) reports nothing.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading carousel config");
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading carousel config");
        Self::from_json_str(&content)
    }

    /// Serialize to a pretty TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    #[cfg(feature = "config")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            tracing::warn!(count = errors.len(), "carousel config rejected");
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading a [`CarouselConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Out-of-range values.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = CarouselConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.autoplay_interval(), Duration::from_millis(6000));
        assert!(config.pause_on_hover);
    }

    #[test]
    fn builder_setters() {
        let config = CarouselConfig::new()
            .with_autoplay_interval(Duration::from_secs(7))
            .with_avg_item_height(180.0)
            .with_partial_threshold(40.0)
            .with_pause_on_hover(false);
        assert_eq!(config.autoplay_interval_ms, 7000);
        assert_eq!(config.avg_item_height_px, 180.0);
        assert_eq!(config.partial_threshold_px, 40.0);
        assert!(!config.pause_on_hover);
    }

    #[test]
    fn validated_clamps_out_of_range_values() {
        let config = CarouselConfig {
            autoplay_interval_ms: 10,
            avg_item_height_px: -3.0,
            partial_threshold_px: f64::NAN,
            pause_on_hover: true,
        };
        assert_eq!(config.validate().len(), 3);

        let fixed = config.validated();
        assert_eq!(fixed.autoplay_interval_ms, MIN_AUTOPLAY_INTERVAL_MS);
        assert_eq!(fixed.avg_item_height_px, DEFAULT_AVG_ITEM_HEIGHT_PX);
        assert_eq!(fixed.partial_threshold_px, 0.0);
        assert!(fixed.is_valid());
    }

    #[test]
    fn lookup_reads_overrides_and_ignores_garbage() {
        let config = CarouselConfig::from_lookup(lookup(&[
            ("FOLIO_AUTOPLAY_MS", "7000"),
            ("FOLIO_AVG_ITEM_HEIGHT_PX", "not-a-number"),
            ("FOLIO_PARTIAL_THRESHOLD_PX", " 30.5 "),
            ("FOLIO_PAUSE_ON_HOVER", "false"),
        ]));
        assert_eq!(config.autoplay_interval_ms, 7000);
        assert_eq!(config.avg_item_height_px, DEFAULT_AVG_ITEM_HEIGHT_PX);
        assert_eq!(config.partial_threshold_px, 30.5);
        assert!(!config.pause_on_hover);
    }

    #[test]
    fn lookup_clamps_interval() {
        let config = CarouselConfig::from_lookup(lookup(&[("FOLIO_AUTOPLAY_MS", "99999999")]));
        assert_eq!(config.autoplay_interval_ms, MAX_AUTOPLAY_INTERVAL_MS);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_document_fills_defaults() {
        let config = CarouselConfig::from_toml_str("autoplay_interval_ms = 7000\n")
            .expect("valid toml");
        assert_eq!(config.autoplay_interval_ms, 7000);
        assert_eq!(config.avg_item_height_px, DEFAULT_AVG_ITEM_HEIGHT_PX);
        assert!(config.pause_on_hover);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_with_invalid_values_is_rejected() {
        let err = CarouselConfig::from_json_str(r#"{"avg_item_height_px": 0.0}"#)
            .expect_err("zero height is invalid");
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("avg_item_height_px"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = CarouselConfig::from_json_str("{").expect_err("malformed");
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_string_reloads_to_same_config() {
        let config = CarouselConfig::default().with_pause_on_hover(false);
        let text = config.to_toml_string().expect("serializes");
        let loaded = CarouselConfig::from_toml_str(&text).expect("reloads");
        assert_eq!(loaded, config);
    }
}
