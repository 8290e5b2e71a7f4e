//! Application configuration
//!
//! Every field has a default, so running without a file is valid. Values are
//! layered: built-in defaults, then `church-finder.toml` (or an explicit
//! path), then environment variables such as
//! `CHURCH_FINDER_OVERPASS__TIMEOUT_SECS=60`.

use std::path::Path;

use domain::DomainError;
use domain::value_objects::{
    Coordinate, InvalidCoordinates, SearchRadius, TagFilterSet, TagGroup, TagPredicate,
};
use integration_osm::{NominatimConfig, OverpassConfig};
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// Base name of the optional configuration file
pub const CONFIG_FILE_NAME: &str = "church-finder";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CHURCH_FINDER";

/// Fixed coordinate in configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateConfig {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl CoordinateConfig {
    /// Convert to a validated coordinate
    pub fn to_coordinate(self) -> Result<Coordinate, InvalidCoordinates> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl From<Coordinate> for CoordinateConfig {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

/// One `key = value` tag filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagConfig {
    /// Tag key, e.g. `amenity`
    pub key: String,
    /// Required value, e.g. `place_of_worship`
    pub value: String,
}

/// Tags that must all match one element
///
/// ```toml
/// [[search.filters]]
/// tags = [
///     { key = "amenity", value = "place_of_worship" },
///     { key = "denomination", value = "catholic" },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroupConfig {
    /// Tags in query order; a key may repeat
    pub tags: Vec<TagConfig>,
}

impl FilterGroupConfig {
    /// Group from `(key, value)` pairs, keeping their order
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            tags: pairs
                .into_iter()
                .map(|(key, value)| TagConfig { key, value })
                .collect(),
        }
    }

    fn to_group(&self) -> Result<TagGroup, DomainError> {
        let predicates = self
            .tags
            .iter()
            .map(|tag| TagPredicate::new(tag.key.as_str(), tag.value.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        TagGroup::new(predicates)
    }
}

/// Search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAppConfig {
    /// Radius used when none is given on the command line
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,

    /// Center used when no address is given
    #[serde(default)]
    pub default_center: Option<CoordinateConfig>,

    /// Tag filter groups, any of which may match; empty uses the built-in
    /// Catholic church filters
    #[serde(default)]
    pub filters: Vec<FilterGroupConfig>,
}

const fn default_radius_meters() -> u32 {
    SearchRadius::DEFAULT_METERS
}

impl Default for SearchAppConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius_meters(),
            default_center: None,
            filters: Vec::new(),
        }
    }
}

impl SearchAppConfig {
    /// Build the tag filter set
    pub fn filter_set(&self) -> Result<TagFilterSet, DomainError> {
        if self.filters.is_empty() {
            return Ok(TagFilterSet::default());
        }

        let groups = self
            .filters
            .iter()
            .map(FilterGroupConfig::to_group)
            .collect::<Result<Vec<_>, _>>()?;

        TagFilterSet::new(groups)
    }

    /// Default center, validated
    pub fn default_center(&self) -> Result<Option<Coordinate>, InvalidCoordinates> {
        self.default_center.map(CoordinateConfig::to_coordinate).transpose()
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding service
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Spatial query service
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchAppConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(CONFIG_FILE_NAME).required(false), environment())
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true), environment())
    }

    fn build<F>(file: F, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    /// Validate all sections
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.nominatim
            .validate()
            .map_err(|e| format!("nominatim: {e}"))?;
        self.overpass
            .validate()
            .map_err(|e| format!("overpass: {e}"))?;
        self.search
            .filter_set()
            .map_err(|e| format!("search.filters: {e}"))?;
        self.search
            .default_center()
            .map_err(|e| format!("search.default_center: {e}"))?;
        self.telemetry
            .validate()
            .map_err(|e| format!("telemetry: {e}"))
    }
}

/// Environment source, e.g. `CHURCH_FINDER_NOMINATIM__COUNTRY_FILTER=us`
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("overpass.endpoints")
}
