//! Place search over the Overpass API

use std::sync::Arc;

use async_trait::async_trait;
use domain::PointOfInterest;
use domain::value_objects::{Coordinate, SearchRadius, TagFilterSet};
use tracing::{info, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OsmError;
use crate::fetcher::ResilientFetcher;
use crate::normalizer::{NormalizeOptions, normalize_with};
use crate::query::QueryBuilder;
use crate::rate_limiter::RateLimiter;

/// Trait for place search clients
#[async_trait]
pub trait PlaceSearchClient: Send + Sync {
    /// Find places matching `filters` within `radius` of `center`
    async fn find_places(
        &self,
        center: &Coordinate,
        radius: SearchRadius,
        filters: &TagFilterSet,
    ) -> Result<Vec<PointOfInterest>, OsmError>;
}

/// Overpass-backed place search: build, fetch, normalize
#[derive(Debug, Clone)]
pub struct OverpassPlaceClient {
    builder: QueryBuilder,
    fetcher: ResilientFetcher,
    options: NormalizeOptions,
}

impl OverpassPlaceClient {
    /// Create a client for the configured endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OverpassConfig, rate_limiter: Arc<RateLimiter>) -> Result<Self, OsmError> {
        let fetcher = ResilientFetcher::from_config(config, rate_limiter)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create a client around an existing fetcher
    #[must_use]
    pub fn with_fetcher(config: &OverpassConfig, fetcher: ResilientFetcher) -> Self {
        Self {
            builder: QueryBuilder::from_config(config),
            fetcher,
            options: NormalizeOptions {
                tagged_only: config.tagged_only,
            },
        }
    }

    /// Query builder in use
    #[must_use]
    pub const fn builder(&self) -> &QueryBuilder {
        &self.builder
    }
}

#[async_trait]
impl PlaceSearchClient for OverpassPlaceClient {
    #[instrument(skip(self, filters), fields(radius = radius.meters()))]
    async fn find_places(
        &self,
        center: &Coordinate,
        radius: SearchRadius,
        filters: &TagFilterSet,
    ) -> Result<Vec<PointOfInterest>, OsmError> {
        let query = self.builder.build(center, radius.meters(), filters);
        let response = self.fetcher.fetch(&query).await?;

        if let Some(remark) = &response.remark {
            warn!(%remark, "Overpass returned a remark, results may be incomplete");
        }

        let places = normalize_with(&response, self.options);
        info!(
            elements = response.elements.len(),
            places = places.len(),
            "Place search completed"
        );
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::QueryEndpoint;
    use crate::models::RawResponse;
    use crate::normalizer::parse_response;
    use crate::query::QueryText;
    use crate::retry::RetryPolicy;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingEndpoint {
        body: String,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QueryEndpoint for RecordingEndpoint {
        fn name(&self) -> &str {
            "recording"
        }

        async fn execute(&self, query: &QueryText) -> Result<RawResponse, OsmError> {
            self.queries.lock().unwrap().push(query.to_string());
            parse_response(&self.body)
        }
    }

    fn client_with(endpoint: &Arc<RecordingEndpoint>, config: &OverpassConfig) -> OverpassPlaceClient {
        let fetcher = ResilientFetcher::new(
            vec![Arc::clone(endpoint) as Arc<dyn QueryEndpoint>],
            RetryPolicy::immediate(1),
            Arc::new(RateLimiter::unlimited()),
        );
        OverpassPlaceClient::with_fetcher(config, fetcher)
    }

    const BODY: &str = r#"{"elements": [
        {"id": 5, "type": "way", "center": {"lat": 40.713, "lon": -74.0058}, "nodes": [1, 2],
         "tags": {"name": "St. Mary's", "amenity": "place_of_worship"}},
        {"id": 1, "type": "node", "lat": 40.7129, "lon": -74.0057},
        {"id": 2, "type": "node", "lat": 40.7131, "lon": -74.0059}
    ]}"#;

    #[tokio::test]
    async fn test_skeleton_nodes_dropped_by_default() {
        let endpoint = Arc::new(RecordingEndpoint {
            body: BODY.to_string(),
            ..Default::default()
        });
        let client = client_with(&endpoint, &OverpassConfig::for_testing());

        let places = client
            .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
            .await
            .unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name(), "St. Mary's");
    }

    #[tokio::test]
    async fn test_untagged_nodes_kept_when_configured() {
        let endpoint = Arc::new(RecordingEndpoint {
            body: BODY.to_string(),
            ..Default::default()
        });
        let config = OverpassConfig {
            tagged_only: false,
            ..OverpassConfig::for_testing()
        };
        let client = client_with(&endpoint, &config);

        let places = client
            .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
            .await
            .unwrap();

        assert_eq!(places.len(), 3);
    }

    #[tokio::test]
    async fn test_radius_clamped_to_configured_max() {
        let endpoint = Arc::new(RecordingEndpoint {
            body: r#"{"elements": []}"#.to_string(),
            ..Default::default()
        });
        let config = OverpassConfig {
            max_radius_meters: 2000,
            ..OverpassConfig::for_testing()
        };
        let client = client_with(&endpoint, &config);

        let places = client
            .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(9000), &TagFilterSet::default())
            .await
            .unwrap();

        assert!(places.is_empty());
        let queries = endpoint.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("(around:2000,"));
    }

    #[tokio::test]
    async fn test_invalid_payload_is_surfaced() {
        let endpoint = Arc::new(RecordingEndpoint {
            body: "<html>Too busy</html>".to_string(),
            ..Default::default()
        });
        let client = client_with(&endpoint, &OverpassConfig::for_testing());

        let err = client
            .find_places(&Coordinate::new(40.7128, -74.006).unwrap(), SearchRadius::new(1000), &TagFilterSet::default())
            .await
            .unwrap_err();

        assert!(matches!(err, OsmError::InvalidResponse(_)));
    }
}
