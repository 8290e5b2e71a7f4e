//! OpenStreetMap integration for the church finder
//!
//! Provides address geocoding via [Nominatim](https://nominatim.openstreetmap.org)
//! and spatial place queries via the [Overpass API](https://overpass-api.de).
//!
//! # Architecture
//!
//! Each service sits behind a client trait.
//! [`GeocodingClient`] converts addresses to coordinates and is implemented by
//! [`NominatimGeocodingClient`]. [`PlaceSearchClient`] finds places around a
//! coordinate and is implemented by [`OverpassPlaceClient`], which combines:
//!
//! - [`QueryBuilder`]: renders the Overpass QL text for a center, radius and tag filters
//! - [`ResilientFetcher`]: executes it against ordered mirror endpoints with
//!   failover inside an attempt and exponential backoff between attempts
//! - [`RateLimiter`]: shared gate spacing every outbound request
//! - [`normalize`]: turns raw node/way/relation elements into [`domain::PointOfInterest`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain::value_objects::{Coordinate, SearchRadius, TagFilterSet};
//! use integration_osm::{OverpassConfig, OverpassPlaceClient, PlaceSearchClient, RateLimiter};
//!
//! let config = OverpassConfig::default();
//! let limiter = Arc::new(RateLimiter::new(config.rate_limit_interval()));
//! let client = OverpassPlaceClient::new(&config, limiter)?;
//!
//! let places = client
//!     .find_places(&Coordinate::new(40.7128, -74.006)?, SearchRadius::new(1000), &TagFilterSet::default())
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod fetcher;
mod geocoding;
mod models;
mod normalizer;
mod query;
mod rate_limiter;
mod retry;

pub use client::{OverpassPlaceClient, PlaceSearchClient};
pub use config::{NominatimConfig, OverpassConfig};
pub use error::OsmError;
pub use fetcher::{FetchReport, OverpassEndpoint, QueryEndpoint, ResilientFetcher};
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
pub use models::{RawCenter, RawElement, RawElementKind, RawResponse};
pub use normalizer::{NormalizeOptions, format_address, normalize, normalize_with, parse_response};
pub use query::{QueryBuilder, QueryText};
pub use rate_limiter::RateLimiter;
pub use retry::RetryPolicy;
