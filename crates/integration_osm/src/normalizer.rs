//! Conversion of raw Overpass elements into points of interest

use domain::PointOfInterest;
use domain::value_objects::ElementId;
use tracing::debug;

use crate::error::OsmError;
use crate::models::{RawElement, RawResponse};

/// Options controlling which elements survive normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    /// Drop elements without any tags
    pub tagged_only: bool,
}

/// Parse a response body
///
/// # Errors
///
/// Returns `OsmError::InvalidResponse` if the body is not JSON or has no
/// `elements` array.
pub fn parse_response(body: &str) -> Result<RawResponse, OsmError> {
    serde_json::from_str(body).map_err(|e| OsmError::InvalidResponse(e.to_string()))
}

/// Normalize every placeable element, preserving service order
#[must_use]
pub fn normalize(payload: &RawResponse) -> Vec<PointOfInterest> {
    normalize_with(payload, NormalizeOptions::default())
}

/// Normalize with explicit options
#[must_use]
pub fn normalize_with(payload: &RawResponse, options: NormalizeOptions) -> Vec<PointOfInterest> {
    let places: Vec<_> = payload
        .elements
        .iter()
        .filter(|element| !options.tagged_only || element.has_tags())
        .filter_map(convert_element)
        .collect();

    debug!(
        received = payload.elements.len(),
        kept = places.len(),
        "Normalized elements"
    );
    places
}

fn convert_element(element: &RawElement) -> Option<PointOfInterest> {
    let kind = element.kind.to_domain()?;
    let coordinate = element.coordinate()?;

    let mut place = PointOfInterest::new(ElementId::new(kind, element.id), coordinate);
    if let Some(name) = element.tag("name") {
        place = place.with_name(name);
    }
    if let Some(denomination) = element.tag("denomination") {
        place = place.with_denomination(denomination);
    }
    if let Some(address) = format_address(element) {
        place = place.with_address(address);
    }

    Some(
        place
            .with_website(first_tag(element, &["website", "contact:website"]))
            .with_phone(first_tag(element, &["phone", "contact:phone"]))
            .with_schedule(first_tag(element, &["service_times", "service:schedule"])),
    )
}

/// Compose `street housenumber, city, postcode` from address tags
///
/// Returns `None` when no component is tagged. A house number without a
/// street is ignored.
#[must_use]
pub fn format_address(element: &RawElement) -> Option<String> {
    let mut components = Vec::with_capacity(3);

    if let Some(street) = element.tag("addr:street") {
        match element.tag("addr:housenumber") {
            Some(number) => components.push(format!("{street} {number}")),
            None => components.push(street.to_string()),
        }
    }
    if let Some(city) = element.tag("addr:city") {
        components.push(city.to_string());
    }
    if let Some(postcode) = element.tag("addr:postcode") {
        components.push(postcode.to_string());
    }

    if components.is_empty() {
        None
    } else {
        Some(components.join(", "))
    }
}

fn first_tag(element: &RawElement, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| element.tag(key))
        .map(ToString::to_string)
}
