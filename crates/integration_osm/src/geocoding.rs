//! Nominatim geocoding client
//!
//! Converts free-form address strings to geographic coordinates using
//! the [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Each lookup is a single outbound request. Failures are surfaced to the
//! caller without retry since they usually stem from the input address.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::NominatimConfig;
use crate::error::OsmError;
use crate::rate_limiter::RateLimiter;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to geographic coordinates
    async fn geocode(&self, address: &str) -> Result<Coordinate, OsmError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, OsmError> {
        config.validate().map_err(OsmError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| OsmError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            rate_limiter: None,
        })
    }

    /// Gate every request through `rate_limiter`
    #[must_use]
    pub fn with_rate_limiter(mut self, rate_limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &NominatimConfig {
        &self.config
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire().await;
        }
    }

    fn optional_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }
        if !self.config.accept_language.is_empty() {
            params.push(("accept-language", self.config.accept_language.clone()));
        }
        params
    }

    async fn send(&self, url: &str, params: &[(&str, String)]) -> Result<Response, OsmError> {
        self.throttle().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| OsmError::from_transport(&e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OsmError::from_status(
                status,
                response.headers(),
                self.config.timeout_secs,
            ));
        }

        Ok(response)
    }

    async fn read_body(&self, response: Response) -> Result<String, OsmError> {
        response
            .text()
            .await
            .map_err(|e| OsmError::from_transport(&e, self.config.timeout_secs))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, OsmError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(OsmError::NotFound("Address must not be empty".to_string()));
        }

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", address.to_string()),
            ("limit", "1".to_string()),
        ];
        params.extend(self.optional_params());

        debug!(%address, "Geocoding address");

        let response = self.send(&url, &params).await?;
        let body = self.read_body(response).await?;
        let results: Vec<NominatimResult> = serde_json::from_str(&body)
            .map_err(|e| OsmError::InvalidResponse(e.to_string()))?;

        let result = results
            .first()
            .ok_or_else(|| OsmError::NotFound(address.to_string()))?;

        let coordinate = result.coordinate()?;
        debug!(%address, %coordinate, "Geocoded address");
        Ok(coordinate)
    }
}

/// Raw Nominatim search result
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl NominatimResult {
    fn coordinate(&self) -> Result<Coordinate, OsmError> {
        Coordinate::parse(&self.lat, &self.lon).map_err(|e| OsmError::InvalidResponse(e.to_string()))
    }
}
