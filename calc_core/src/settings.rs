//! # Calculator Settings
//!
//! Timings of the form's transient feedback and the offline cache
//! configuration. Settings are plain JSON; every field has a default, so a
//! settings file only needs the values it changes.
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "error_flash_ms": 3000,
//!   "copied_overlay_ms": 1500,
//!   "flange_recompute_delay_ms": 200,
//!   "cache": {
//!     "name": "mechanical-calc-v1",
//!     "precache_urls": ["/", "/index.html", "/style.css", "/app.js"]
//!   }
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::asset_cache::{CACHE_NAME, PRECACHE_URLS};

/// Current schema version for settings files
pub const SETTINGS_VERSION: &str = "0.1.0";

/// Global calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// How long an invalid field stays flagged
    pub error_flash_ms: u64,

    /// How long the "copied" confirmation stays on a result
    pub copied_overlay_ms: u64,

    /// Delay before flange dimension C is recomputed on section entry
    pub flange_recompute_delay_ms: u64,

    /// Offline asset cache configuration
    pub cache: CacheSettings,
}

impl CalculatorSettings {
    pub fn error_flash(&self) -> Duration {
        Duration::from_millis(self.error_flash_ms)
    }

    pub fn copied_overlay(&self) -> Duration {
        Duration::from_millis(self.copied_overlay_ms)
    }

    pub fn flange_recompute_delay(&self) -> Duration {
        Duration::from_millis(self.flange_recompute_delay_ms)
    }
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            version: SETTINGS_VERSION.to_string(),
            error_flash_ms: 3000,
            copied_overlay_ms: 1500,
            flange_recompute_delay_ms: 200,
            cache: CacheSettings::default(),
        }
    }
}

/// Offline asset cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Versioned cache name; changing it invalidates the previous cache
    pub name: String,

    /// Paths fetched on install
    pub precache_urls: Vec<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            name: CACHE_NAME.to_string(),
            precache_urls: PRECACHE_URLS.iter().map(|u| u.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CalculatorSettings::default();
        assert_eq!(settings.error_flash(), Duration::from_secs(3));
        assert_eq!(settings.copied_overlay(), Duration::from_millis(1500));
        assert_eq!(settings.flange_recompute_delay(), Duration::from_millis(200));
        assert_eq!(settings.cache.name, "mechanical-calc-v1");
        assert_eq!(settings.cache.precache_urls.len(), 4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: CalculatorSettings =
            serde_json::from_str(r#"{ "error_flash_ms": 500 }"#).unwrap();
        assert_eq!(settings.error_flash_ms, 500);
        assert_eq!(settings.flange_recompute_delay_ms, 200);
        assert_eq!(settings.version, SETTINGS_VERSION);
    }

    #[test]
    fn test_cache_override() {
        let settings: CalculatorSettings =
            serde_json::from_str(r#"{ "cache": { "name": "mechanical-calc-v2" } }"#).unwrap();
        assert_eq!(settings.cache.name, "mechanical-calc-v2");
        assert_eq!(settings.cache.precache_urls[0], "/");
    }
}
