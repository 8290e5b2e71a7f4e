//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod place_search_adapter;

pub use geocoding_adapter::NominatimGeocodingAdapter;
pub use place_search_adapter::OverpassPlaceSearchAdapter;

use application::error::ApplicationError;
use integration_osm::OsmError;

/// Convert an integration error, preserving its classification
pub(crate) fn map_osm_error(err: OsmError) -> ApplicationError {
    match err {
        OsmError::NotFound(msg) => ApplicationError::NotFound(msg),
        OsmError::RateLimited { retry_after_secs } => {
            ApplicationError::RateLimited { retry_after_secs }
        },
        OsmError::ServiceUnavailable { status } => {
            ApplicationError::ServiceUnavailable(format!("HTTP {status}"))
        },
        OsmError::Timeout { timeout_secs } => {
            ApplicationError::Timeout(format!("no response within {timeout_secs}s"))
        },
        OsmError::InvalidRequest(msg) => ApplicationError::InvalidRequest(msg),
        OsmError::InvalidResponse(msg) => ApplicationError::InvalidResponse(msg),
        OsmError::ConnectionFailed(msg) => ApplicationError::Network(msg),
        OsmError::Transient { status } => ApplicationError::Network(format!("HTTP {status}")),
        OsmError::Configuration(msg) => ApplicationError::Configuration(msg),
    }
}
