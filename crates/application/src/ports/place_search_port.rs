//! Place search port

use async_trait::async_trait;
use domain::PointOfInterest;
use domain::value_objects::{Coordinate, SearchRadius, TagFilterSet};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for spatial place queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceSearchPort: Send + Sync {
    /// Find places matching `filters` within `radius` of `center`
    ///
    /// Results keep the order reported by the data service.
    async fn find_places(
        &self,
        center: &Coordinate,
        radius: SearchRadius,
        filters: &TagFilterSet,
    ) -> Result<Vec<PointOfInterest>, ApplicationError>;
}
