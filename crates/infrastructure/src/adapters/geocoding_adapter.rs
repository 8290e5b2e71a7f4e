//! Geocoding adapter - Implements GeocodingPort using integration_osm

use std::fmt;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use integration_osm::{GeocodingClient, NominatimGeocodingClient};
use tracing::instrument;

use super::map_osm_error;

/// Adapter for address geocoding via Nominatim
pub struct NominatimGeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl fmt::Debug for NominatimGeocodingAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NominatimGeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl NominatimGeocodingAdapter {
    /// Create a new geocoding adapter
    #[must_use]
    pub fn new(client: NominatimGeocodingClient) -> Self {
        Self::with_client(Box::new(client))
    }

    /// Create an adapter around any geocoding client
    #[must_use]
    pub fn with_client(client: Box<dyn GeocodingClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError> {
        self.client.geocode(address).await.map_err(map_osm_error)
    }
}
