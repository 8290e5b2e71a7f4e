//! Raw Overpass API response types
//!
//! Elements arrive in three shapes: nodes carry `lat`/`lon`, ways and
//! relations carry a computed `center` when requested, and any of them may
//! lack `tags`. Every optional part is an explicit `Option`.

use std::collections::HashMap;

use domain::value_objects::{Coordinate, ElementKind};
use serde::Deserialize;

/// Top-level Overpass JSON response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawResponse {
    /// Returned elements in service order
    pub elements: Vec<RawElement>,

    /// Runtime remark (set when the server aborted or truncated the query)
    #[serde(default)]
    pub remark: Option<String>,
}

/// Element type as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawElementKind {
    /// Point element
    Node,
    /// Way element
    Way,
    /// Relation element
    Relation,
    /// Anything else (`area`, `count`, ...)
    #[serde(other)]
    Other,
}

impl RawElementKind {
    /// Domain element kind, if this is a map feature
    #[must_use]
    pub const fn to_domain(self) -> Option<ElementKind> {
        match self {
            Self::Node => Some(ElementKind::Node),
            Self::Way => Some(ElementKind::Way),
            Self::Relation => Some(ElementKind::Relation),
            Self::Other => None,
        }
    }
}

/// Centroid computed by the service for ways and relations
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawCenter {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
}

/// A single raw map element
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawElement {
    /// Element id, unique within its kind
    pub id: i64,

    /// Element kind
    #[serde(rename = "type")]
    pub kind: RawElementKind,

    /// Latitude (nodes)
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude (nodes)
    #[serde(default)]
    pub lon: Option<f64>,

    /// Computed center (ways and relations)
    #[serde(default)]
    pub center: Option<RawCenter>,

    /// Tags, absent on skeleton elements
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

impl RawElement {
    /// Resolve a valid coordinate: direct `lat`/`lon` first, then `center`
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Coordinate::new(lat, lon).ok(),
            (_, _, Some(center)) => Coordinate::new(center.lat, center.lon).ok(),
            _ => None,
        }
    }

    /// Look up a tag value, treating blank values as absent
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get(key))
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Whether the element carries at least one tag
    #[must_use]
    pub fn has_tags(&self) -> bool {
        self.tags.as_ref().is_some_and(|tags| !tags.is_empty())
    }
}
