//! Resilient Overpass query execution
//!
//! Two independent knobs govern a fetch. Within one attempt the endpoints are
//! tried in order (failover); between attempts the fetcher sleeps with
//! exponential backoff (retry). Every endpoint call is a separate outbound
//! request and passes through the shared [`RateLimiter`].
//!
//! Dropping the returned future cancels the in-flight call and skips all
//! remaining endpoints and attempts.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OsmError;
use crate::models::RawResponse;
use crate::normalizer::parse_response;
use crate::query::QueryText;
use crate::rate_limiter::RateLimiter;
use crate::retry::RetryPolicy;

/// A single service endpoint able to run a query
#[async_trait]
pub trait QueryEndpoint: Send + Sync + fmt::Debug {
    /// Endpoint name used in logs
    fn name(&self) -> &str;

    /// Execute one query request
    async fn execute(&self, query: &QueryText) -> Result<RawResponse, OsmError>;
}

/// Overpass interpreter endpoint over HTTP
#[derive(Debug, Clone)]
pub struct OverpassEndpoint {
    client: Client,
    url: String,
    timeout_secs: u64,
}

impl OverpassEndpoint {
    /// Create an endpoint with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(url: impl Into<String>, timeout_secs: u64, user_agent: &str) -> Result<Self, OsmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| OsmError::Configuration(e.to_string()))?;

        Ok(Self::with_client(client, url, timeout_secs))
    }

    /// Create an endpoint sharing an existing HTTP client
    #[must_use]
    pub fn with_client(client: Client, url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client,
            url: url.into(),
            timeout_secs,
        }
    }
}

#[async_trait]
impl QueryEndpoint for OverpassEndpoint {
    fn name(&self) -> &str {
        &self.url
    }

    async fn execute(&self, query: &QueryText) -> Result<RawResponse, OsmError> {
        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| OsmError::from_transport(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OsmError::from_status(
                status,
                response.headers(),
                self.timeout_secs,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OsmError::from_transport(&e, self.timeout_secs))?;

        parse_response(&body)
    }
}

/// Outcome of a fetch with attempt metadata
#[derive(Debug)]
pub struct FetchReport {
    /// The response, or the last error encountered
    pub result: Result<RawResponse, OsmError>,
    /// Attempts started (passes over the endpoint list)
    pub attempts: u32,
    /// Endpoint calls made across all attempts
    pub endpoint_calls: u32,
    /// Total time spent including rate limiting and backoff
    pub total_duration: Duration,
}

impl FetchReport {
    /// Check if the fetch succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert to standard Result, discarding metadata
    pub fn into_result(self) -> Result<RawResponse, OsmError> {
        self.result
    }
}

/// Executes queries with endpoint failover and retry backoff
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    endpoints: Vec<Arc<dyn QueryEndpoint>>,
    policy: RetryPolicy,
    rate_limiter: Arc<RateLimiter>,
}

impl ResilientFetcher {
    /// Create a fetcher over `endpoints`, tried in the given order
    #[must_use]
    pub fn new(
        endpoints: Vec<Arc<dyn QueryEndpoint>>,
        policy: RetryPolicy,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            endpoints,
            policy,
            rate_limiter,
        }
    }

    /// Create a fetcher for the configured Overpass endpoints
    ///
    /// All endpoints share one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn from_config(
        config: &OverpassConfig,
        rate_limiter: Arc<RateLimiter>,
    ) -> Result<Self, OsmError> {
        config.validate().map_err(OsmError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| OsmError::Configuration(e.to_string()))?;

        let endpoints = config
            .endpoints
            .iter()
            .map(|url| {
                Arc::new(OverpassEndpoint::with_client(
                    client.clone(),
                    url.clone(),
                    config.timeout_secs,
                )) as Arc<dyn QueryEndpoint>
            })
            .collect();

        Ok(Self::new(endpoints, config.retry.clone(), rate_limiter))
    }

    /// Number of configured endpoints
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Retry policy in use
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `query`, returning the first successful response
    pub async fn fetch(&self, query: &QueryText) -> Result<RawResponse, OsmError> {
        self.fetch_with_report(query).await.into_result()
    }

    /// Execute `query` and report attempts, calls and duration
    #[instrument(skip(self, query), fields(endpoints = self.endpoints.len()))]
    pub async fn fetch_with_report(&self, query: &QueryText) -> FetchReport {
        let start = Instant::now();
        let max_attempts = self.policy.attempts();
        let mut endpoint_calls = 0u32;
        let mut last_error = None;

        if self.endpoints.is_empty() {
            return FetchReport {
                result: Err(OsmError::InvalidRequest(
                    "no query endpoints configured".to_string(),
                )),
                attempts: 0,
                endpoint_calls,
                total_duration: start.elapsed(),
            };
        }

        for attempt in 0..max_attempts {
            for endpoint in &self.endpoints {
                self.rate_limiter.acquire().await;
                endpoint_calls += 1;
                debug!(endpoint = endpoint.name(), attempt = attempt + 1, "Sending query");

                match endpoint.execute(query).await {
                    Ok(response) => {
                        if endpoint_calls > 1 {
                            info!(
                                endpoint = endpoint.name(),
                                attempt = attempt + 1,
                                endpoint_calls,
                                "Query succeeded after failures"
                            );
                        }
                        return FetchReport {
                            result: Ok(response),
                            attempts: attempt + 1,
                            endpoint_calls,
                            total_duration: start.elapsed(),
                        };
                    },
                    Err(err) if !err.is_retryable() => {
                        warn!(
                            endpoint = endpoint.name(),
                            error = %err,
                            "Query failed with non-retryable error"
                        );
                        return FetchReport {
                            result: Err(err),
                            attempts: attempt + 1,
                            endpoint_calls,
                            total_duration: start.elapsed(),
                        };
                    },
                    Err(err) => {
                        warn!(
                            endpoint = endpoint.name(),
                            attempt = attempt + 1,
                            error = %err,
                            "Endpoint failed, trying next"
                        );
                        last_error = Some(err);
                    },
                }
            }

            if attempt + 1 < max_attempts {
                let delay = self.policy.delay_for_attempt(attempt);
                #[allow(clippy::cast_possible_truncation)]
                let delay_ms = delay.as_millis() as u64;
                warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms,
                    "All endpoints failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }

        warn!(max_attempts, endpoint_calls, "Query failed after max attempts");
        FetchReport {
            result: Err(last_error.unwrap_or_else(|| {
                OsmError::InvalidRequest("no query endpoints configured".to_string())
            })),
            attempts: max_attempts,
            endpoint_calls,
            total_duration: start.elapsed(),
        }
    }
}
