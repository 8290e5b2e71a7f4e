//! Place search adapter - Implements PlaceSearchPort using integration_osm

use std::fmt;

use application::error::ApplicationError;
use application::ports::PlaceSearchPort;
use async_trait::async_trait;
use domain::PointOfInterest;
use domain::value_objects::{Coordinate, SearchRadius, TagFilterSet};
use integration_osm::{OverpassPlaceClient, PlaceSearchClient};
use tracing::instrument;

use super::map_osm_error;

/// Adapter for spatial place queries via Overpass
pub struct OverpassPlaceSearchAdapter {
    client: Box<dyn PlaceSearchClient>,
}

impl fmt::Debug for OverpassPlaceSearchAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverpassPlaceSearchAdapter")
            .field("client", &"PlaceSearchClient")
            .finish()
    }
}

impl OverpassPlaceSearchAdapter {
    /// Create a new place search adapter
    #[must_use]
    pub fn new(client: OverpassPlaceClient) -> Self {
        Self::with_client(Box::new(client))
    }

    /// Create an adapter around any place search client
    #[must_use]
    pub fn with_client(client: Box<dyn PlaceSearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlaceSearchPort for OverpassPlaceSearchAdapter {
    #[instrument(skip(self, filters))]
    async fn find_places(
        &self,
        center: &Coordinate,
        radius: SearchRadius,
        filters: &TagFilterSet,
    ) -> Result<Vec<PointOfInterest>, ApplicationError> {
        self.client
            .find_places(center, radius, filters)
            .await
            .map_err(map_osm_error)
    }
}
