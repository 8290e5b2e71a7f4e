//! Church search service
//!
//! Runs one search: resolve the center (geocode the address or fall back to a
//! default coordinate), clamp the radius, then query nearby places.

use std::{fmt, sync::Arc};

use domain::PointOfInterest;
use domain::value_objects::{Coordinate, SearchRadius, TagFilterSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{GeocodingPort, PlaceSearchPort},
};

/// Fixed parameters shared by every search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Largest radius a search may use
    pub max_radius_meters: u32,
    /// Tag filters identifying the places of interest
    pub filters: TagFilterSet,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_radius_meters: SearchRadius::DEFAULT_MAX_METERS,
            filters: TagFilterSet::default(),
        }
    }
}

/// A single search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Address to geocode; blank or absent uses `default_center`
    pub address: Option<String>,
    /// Requested radius in meters, clamped before use
    pub radius_meters: u32,
    /// Center used when no address is given
    pub default_center: Option<Coordinate>,
}

impl SearchRequest {
    /// Search around an address
    #[must_use]
    pub fn for_address(address: impl Into<String>, radius_meters: u32) -> Self {
        Self {
            address: Some(address.into()),
            radius_meters,
            default_center: None,
        }
    }

    /// Search around a known coordinate
    #[must_use]
    pub const fn at(center: Coordinate, radius_meters: u32) -> Self {
        Self {
            address: None,
            radius_meters,
            default_center: Some(center),
        }
    }

    /// Set the fallback center
    #[must_use]
    pub const fn with_default_center(mut self, center: Coordinate) -> Self {
        self.default_center = Some(center);
        self
    }

    fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}

/// Where the search center came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterSource {
    /// Geocoded from the request address
    Geocoded,
    /// Taken from the request's default center
    Default,
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Search center
    pub center: Coordinate,
    /// How the center was obtained
    pub center_source: CenterSource,
    /// Radius actually used
    pub radius: SearchRadius,
    /// Places found, in service order
    pub places: Vec<PointOfInterest>,
}

impl SearchOutcome {
    /// Whether nothing was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places ordered by distance from the center, nearest first
    #[must_use]
    pub fn places_by_distance(&self) -> Vec<&PointOfInterest> {
        let mut places: Vec<_> = self.places.iter().collect();
        places.sort_by(|a, b| {
            a.distance_km_from(&self.center)
                .total_cmp(&b.distance_km_from(&self.center))
        });
        places
    }
}

/// Church search service orchestrating geocoding and place search
pub struct ChurchSearchService {
    geocoder: Arc<dyn GeocodingPort>,
    places: Arc<dyn PlaceSearchPort>,
    settings: SearchSettings,
}

impl fmt::Debug for ChurchSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChurchSearchService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ChurchSearchService {
    /// Create a new search service with default settings
    pub fn new(geocoder: Arc<dyn GeocodingPort>, places: Arc<dyn PlaceSearchPort>) -> Self {
        Self::with_settings(geocoder, places, SearchSettings::default())
    }

    /// Create a new search service with explicit settings
    pub fn with_settings(
        geocoder: Arc<dyn GeocodingPort>,
        places: Arc<dyn PlaceSearchPort>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            geocoder,
            places,
            settings,
        }
    }

    /// Settings in use
    #[must_use]
    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Run one search
    #[instrument(skip(self), fields(radius = request.radius_meters))]
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, ApplicationError> {
        let (center, center_source) = self.resolve_center(&request).await?;
        let radius = SearchRadius::clamped(request.radius_meters, self.settings.max_radius_meters);
        if radius.meters() != request.radius_meters {
            debug!(
                requested = request.radius_meters,
                used = radius.meters(),
                "Search radius clamped"
            );
        }

        let places = self
            .places
            .find_places(&center, radius, &self.settings.filters)
            .await?;

        info!(
            %center,
            radius = radius.meters(),
            count = places.len(),
            "Church search completed"
        );

        Ok(SearchOutcome {
            center,
            center_source,
            radius,
            places,
        })
    }

    async fn resolve_center(
        &self,
        request: &SearchRequest,
    ) -> Result<(Coordinate, CenterSource), ApplicationError> {
        if let Some(address) = request.address() {
            let center = self.geocoder.geocode(address).await?;
            debug!(%address, %center, "Address geocoded");
            return Ok((center, CenterSource::Geocoded));
        }

        request
            .default_center
            .map(|center| (center, CenterSource::Default))
            .ok_or_else(|| {
                ApplicationError::InvalidRequest(
                    "an address or a default center is required".to_string(),
                )
            })
    }
}
