//! Geocoding port
//!
//! Resolves a free-form address to the coordinate a search is centered on.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve `address` to its best-ranked coordinate
    async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError>;
}
