//! Bounded search radius value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A search radius in meters, always within `1..=max`
///
/// Values above the configured maximum are clamped rather than rejected so a
/// caller can never issue an unbounded-cost spatial query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchRadius(u32);

impl SearchRadius {
    /// Upper bound applied when no other maximum is configured
    pub const DEFAULT_MAX_METERS: u32 = 10_000;

    /// Radius used when a search does not specify one
    pub const DEFAULT_METERS: u32 = 5_000;

    /// Create a radius, clamping it into `1..=max_meters`
    ///
    /// A `max_meters` of zero is treated as one.
    #[must_use]
    pub fn clamped(meters: u32, max_meters: u32) -> Self {
        let max = max_meters.max(1);
        Self(meters.clamp(1, max))
    }

    /// Create a radius bounded by [`Self::DEFAULT_MAX_METERS`]
    #[must_use]
    pub fn new(meters: u32) -> Self {
        Self::clamped(meters, Self::DEFAULT_MAX_METERS)
    }

    /// Radius in meters
    #[must_use]
    pub const fn meters(self) -> u32 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_METERS)
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}
