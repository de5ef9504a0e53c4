//! Page tunables parsed from the `data-page-config` JSON attribute.
//!
//! Every field has a default, so an absent attribute or an empty object
//! yields [`PageConfig::default`]. Parsing and validation failures are
//! returned as [`ConfigError`]; the host logs them and falls back to defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_EDGE_TOLERANCE_PX, DEFAULT_LOOKAHEAD_MARGIN_PX, DEFAULT_NAV_BREAKPOINT_PX, DEFAULT_STORAGE_KEY,
    DEFAULT_SUPPRESSION_MS, DEFAULT_TOP_HASH,
};
use crate::theme::ThemePolicy;

/// Error returned by [`PageConfig::from_json`] and [`PageConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse page config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid page config: `{field}` {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub storage_key: String,
    pub lookahead_margin_px: f64,
    pub edge_tolerance_px: f64,
    pub suppression_ms: f64,
    pub nav_breakpoint_px: f64,
    pub top_hash: String,
    pub theme_policy: ThemePolicy,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            lookahead_margin_px: DEFAULT_LOOKAHEAD_MARGIN_PX,
            edge_tolerance_px: DEFAULT_EDGE_TOLERANCE_PX,
            suppression_ms: DEFAULT_SUPPRESSION_MS,
            nav_breakpoint_px: DEFAULT_NAV_BREAKPOINT_PX,
            top_hash: DEFAULT_TOP_HASH.to_owned(),
            theme_policy: ThemePolicy::default(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON object. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controllers cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(invalid("storage_key", "must not be empty"));
        }
        if !non_negative(self.lookahead_margin_px) {
            return Err(invalid("lookahead_margin_px", "must be a finite, non-negative number"));
        }
        if !non_negative(self.edge_tolerance_px) {
            return Err(invalid("edge_tolerance_px", "must be a finite, non-negative number"));
        }
        if !(self.suppression_ms.is_finite() && self.suppression_ms > 0.0) {
            return Err(invalid("suppression_ms", "must be a finite, positive number"));
        }
        if !non_negative(self.nav_breakpoint_px) {
            return Err(invalid("nav_breakpoint_px", "must be a finite, non-negative number"));
        }
        if !self.top_hash.starts_with('#') || self.top_hash.len() < 2 {
            return Err(invalid("top_hash", "must be a fragment such as `#top`"));
        }
        Ok(())
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
