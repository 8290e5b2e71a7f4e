//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::errors::DomainError;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Why a latitude/longitude pair was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCoordinates {
    /// Latitude outside `-90..=90` (or NaN)
    #[error("latitude {0} is outside -90..=90")]
    Latitude(f64),

    /// Longitude outside `-180..=180` (or NaN)
    #[error("longitude {0} is outside -180..=180")]
    Longitude(f64),

    /// Text that is not a finite decimal degree value
    #[error("'{0}' is not a decimal degree value")]
    NotANumber(String),
}

impl From<InvalidCoordinates> for DomainError {
    fn from(err: InvalidCoordinates) -> Self {
        Self::InvalidCoordinates(err.to_string())
    }
}

/// A WGS84 position in decimal degrees
///
/// Both axes are range-checked on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct UncheckedCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedCoordinate> for Coordinate {
    type Error = InvalidCoordinates;

    fn try_from(raw: UncheckedCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate from decimal degrees
    ///
    /// # Errors
    ///
    /// Returns the offending axis if it is out of range or NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse the string degrees geocoding services return, e.g. `"40.7128"`
    ///
    /// # Errors
    ///
    /// Returns `NotANumber` for unparseable or non-finite text, otherwise the
    /// same range errors as [`Coordinate::new`].
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, InvalidCoordinates> {
        Self::new(parse_degrees(latitude)?, parse_degrees(longitude)?)
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let (lat_a, lat_b) = (self.latitude.to_radians(), other.latitude.to_radians());
        let half_dlat = (lat_b - lat_a) / 2.0;
        let half_dlon = (other.longitude - self.longitude).to_radians() / 2.0;

        let h = (lat_a.cos() * lat_b.cos()).mul_add(half_dlon.sin().powi(2), half_dlat.sin().powi(2));
        2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
    }
}

fn parse_degrees(raw: &str) -> Result<f64, InvalidCoordinates> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|degrees| degrees.is_finite())
        .ok_or_else(|| InvalidCoordinates::NotANumber(raw.to_string()))
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoded_center_is_accepted() {
        let center = Coordinate::new(40.7128, -74.006).unwrap();
        assert!((center.latitude() - 40.7128).abs() < f64::EPSILON);
        assert!((center.longitude() - -74.006).abs() < f64::EPSILON);
    }

    #[test]
    fn poles_and_antimeridian_are_in_range() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn out_of_range_axis_is_reported() {
        assert_eq!(Coordinate::new(91.0, 0.0), Err(InvalidCoordinates::Latitude(91.0)));
        assert_eq!(Coordinate::new(0.0, -180.5), Err(InvalidCoordinates::Longitude(-180.5)));
    }

    #[test]
    fn nan_is_out_of_range() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0),
            Err(InvalidCoordinates::Latitude(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, f64::NAN),
            Err(InvalidCoordinates::Longitude(_))
        ));
    }

    #[test]
    fn parse_geocoder_strings() {
        let center = Coordinate::parse("40.7128", " -74.0060 ").unwrap();
        assert_eq!(center, Coordinate::new(40.7128, -74.006).unwrap());
    }

    #[test]
    fn parse_rejects_text_and_infinity() {
        assert_eq!(
            Coordinate::parse("north", "12.45"),
            Err(InvalidCoordinates::NotANumber("north".to_string()))
        );
        assert!(matches!(
            Coordinate::parse("41.9", "inf"),
            Err(InvalidCoordinates::NotANumber(_))
        ));
    }

    #[test]
    fn parse_checks_range() {
        assert_eq!(
            Coordinate::parse("95.0", "0"),
            Err(InvalidCoordinates::Latitude(95.0))
        );
    }

    #[test]
    fn display_uses_six_decimals() {
        let center = Coordinate::new(40.7128, -74.006).unwrap();
        assert_eq!(center.to_string(), "40.712800, -74.006000");
    }

    #[test]
    fn element_center_is_a_few_meters_away() {
        let geocoded = Coordinate::new(40.7128, -74.006).unwrap();
        let church = Coordinate::new(40.7130, -74.0058).unwrap();

        let km = geocoded.distance_km(&church);
        assert!((0.025..0.031).contains(&km), "distance was {km}");
        assert!((km - church.distance_km(&geocoded)).abs() < 1e-12);
        assert!(geocoded.distance_km(&geocoded).abs() < 1e-12);
    }

    #[test]
    fn deserialization_checks_range() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude": 40.713, "longitude": -74.0058}"#).unwrap();
        assert_eq!(ok, Coordinate::new(40.713, -74.0058).unwrap());

        let err = serde_json::from_str::<Coordinate>(r#"{"latitude": 91.0, "longitude": 0.0}"#);
        assert!(err.unwrap_err().to_string().contains("latitude 91"));
    }

    #[test]
    fn converts_into_domain_error() {
        let err: DomainError = InvalidCoordinates::Longitude(200.0).into();
        assert_eq!(
            err.to_string(),
            "Invalid coordinates: longitude 200 is outside -180..=180"
        );
    }
}
