//! OpenStreetMap service configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// User agent required by the OSM usage policies
const DEFAULT_USER_AGENT: &str = "Catholic-Church-Map/1.0";

// ==============================
// Nominatim Configuration
// ==============================

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Identifying `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Country code filter (e.g., "us"); empty disables the filter
    #[serde(default)]
    pub country_filter: String,

    /// Preferred result language (e.g., "en"); empty leaves it to the service
    #[serde(default)]
    pub accept_language: String,

    /// Minimum interval between requests in milliseconds (0 to disable)
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

const fn default_rate_limit_ms() -> u64 {
    1000
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            user_agent: default_user_agent(),
            country_filter: String::new(),
            accept_language: String::new(),
            rate_limit_ms: default_rate_limit_ms(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            rate_limit_ms: 0,
            ..Default::default()
        }
    }

    /// Minimum interval between requests
    #[must_use]
    pub const fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

// ==============================
// Overpass Configuration
// ==============================

/// Configuration for the Overpass spatial query service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter endpoints, tried in order (primary first)
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// HTTP timeout per endpoint call in seconds
    #[serde(default = "default_overpass_timeout_secs")]
    pub timeout_secs: u64,

    /// Server-side query timeout rendered into `[timeout:T]`
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Largest search radius in meters; larger radii are clamped
    #[serde(default = "default_max_radius_meters")]
    pub max_radius_meters: u32,

    /// Minimum interval between requests in milliseconds (0 to disable)
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Identifying `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Drop untagged elements (skeleton nodes of way outlines)
    #[serde(default = "default_tagged_only")]
    pub tagged_only: bool,

    /// Retry policy across endpoint passes
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://overpass-api.de/api/interpreter".to_string(),
        "https://lz4.overpass-api.de/api/interpreter".to_string(),
    ]
}

const fn default_overpass_timeout_secs() -> u64 {
    30
}

const fn default_query_timeout_secs() -> u64 {
    25
}

const fn default_max_radius_meters() -> u32 {
    10_000
}

const fn default_tagged_only() -> bool {
    true
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout_secs: default_overpass_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
            max_radius_meters: default_max_radius_meters(),
            rate_limit_ms: default_rate_limit_ms(),
            user_agent: default_user_agent(),
            tagged_only: default_tagged_only(),
            retry: RetryPolicy::default(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            rate_limit_ms: 0,
            retry: RetryPolicy::immediate(3),
            ..Default::default()
        }
    }

    /// Minimum interval between requests
    #[must_use]
    pub const fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoints.is_empty() {
            return Err("at least one endpoint must be configured".to_string());
        }

        if self.endpoints.iter().any(|e| e.trim().is_empty()) {
            return Err("endpoints must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.query_timeout_secs == 0 {
            return Err("query_timeout_secs must be greater than 0".to_string());
        }

        if self.max_radius_meters == 0 {
            return Err("max_radius_meters must be greater than 0".to_string());
        }

        self.retry.validate()
    }
}
