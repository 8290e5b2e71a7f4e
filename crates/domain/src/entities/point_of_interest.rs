//! Point of interest entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, ElementId};

/// Name used when a place carries no usable `name` tag
pub const UNNAMED_PLACE: &str = "Unnamed Church";

/// Denomination used when a place carries no `denomination` tag
pub const UNKNOWN_DENOMINATION: &str = "Catholic";

/// Address used when no address component is tagged
pub const UNKNOWN_ADDRESS: &str = "Address not available";

/// A canonical place of worship found near a search center
///
/// `name`, `denomination` and `address` are never empty: blank inputs fall
/// back to their placeholders. Optional contact fields stay `None` when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    id: ElementId,
    name: String,
    denomination: String,
    address: String,
    coordinate: Coordinate,
    website: Option<String>,
    phone: Option<String>,
    schedule: Option<String>,
}

impl PointOfInterest {
    /// Create a place with placeholder name, denomination and address
    #[must_use]
    pub fn new(id: ElementId, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: UNNAMED_PLACE.to_string(),
            denomination: UNKNOWN_DENOMINATION.to_string(),
            address: UNKNOWN_ADDRESS.to_string(),
            coordinate,
            website: None,
            phone: None,
            schedule: None,
        }
    }

    /// Set the name, keeping the placeholder for blank input
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        if let Some(name) = non_blank(name.into()) {
            self.name = name;
        }
        self
    }

    /// Set the denomination, keeping the placeholder for blank input
    #[must_use]
    pub fn with_denomination(mut self, denomination: impl Into<String>) -> Self {
        if let Some(denomination) = non_blank(denomination.into()) {
            self.denomination = denomination;
        }
        self
    }

    /// Set the address, keeping the placeholder for blank input
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        if let Some(address) = non_blank(address.into()) {
            self.address = address;
        }
        self
    }

    /// Set the website
    #[must_use]
    pub fn with_website(mut self, website: Option<String>) -> Self {
        self.website = website.and_then(non_blank);
        self
    }

    /// Set the phone number
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone.and_then(non_blank);
        self
    }

    /// Set the service schedule
    #[must_use]
    pub fn with_schedule(mut self, schedule: Option<String>) -> Self {
        self.schedule = schedule.and_then(non_blank);
        self
    }

    /// Element identity (kind and id)
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Denomination
    #[must_use]
    pub fn denomination(&self) -> &str {
        &self.denomination
    }

    /// Postal address
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Location
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Website, when tagged
    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Phone number, when tagged
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Service or mass schedule, when tagged
    #[must_use]
    pub fn schedule(&self) -> Option<&str> {
        self.schedule.as_deref()
    }

    /// Distance from `origin` in kilometers
    #[must_use]
    pub fn distance_km_from(&self, origin: &Coordinate) -> f64 {
        origin.distance_km(&self.coordinate)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
