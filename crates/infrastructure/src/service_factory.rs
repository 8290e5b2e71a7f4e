//! Wiring of the search service from configuration

use std::sync::Arc;

use application::error::ApplicationError;
use application::services::{ChurchSearchService, SearchSettings};
use integration_osm::{NominatimGeocodingClient, OverpassPlaceClient, RateLimiter};
use tracing::debug;

use crate::adapters::{NominatimGeocodingAdapter, OverpassPlaceSearchAdapter, map_osm_error};
use crate::config::AppConfig;

/// Build a ready-to-use search service
///
/// Each upstream service gets its own rate limiter, shared by every search
/// run through the returned service.
///
/// # Errors
///
/// Returns a configuration error if any section is invalid or an HTTP client
/// cannot be created.
pub fn create_search_service(config: &AppConfig) -> Result<ChurchSearchService, ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let geocoder = NominatimGeocodingClient::new(&config.nominatim)
        .map_err(map_osm_error)?
        .with_rate_limiter(RateLimiter::shared(config.nominatim.rate_limit_interval()));

    let places = OverpassPlaceClient::new(
        &config.overpass,
        RateLimiter::shared(config.overpass.rate_limit_interval()),
    )
    .map_err(map_osm_error)?;

    let settings = SearchSettings {
        max_radius_meters: config.overpass.max_radius_meters,
        filters: config.search.filter_set()?,
    };

    debug!(
        endpoints = config.overpass.endpoints.len(),
        max_radius = settings.max_radius_meters,
        "Search service configured"
    );

    Ok(ChurchSearchService::with_settings(
        Arc::new(NominatimGeocodingAdapter::new(geocoder)),
        Arc::new(OverpassPlaceSearchAdapter::new(places)),
        settings,
    ))
}
