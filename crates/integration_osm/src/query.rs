//! Overpass QL query rendering
//!
//! Rendering is a pure function of its inputs so identical searches always
//! produce byte-identical query text.

use std::fmt::{self, Write as _};

use domain::value_objects::{Coordinate, ElementKind, SearchRadius, TagFilterSet, TagGroup};

use crate::config::OverpassConfig;

/// Rendered Overpass QL text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryText(String);

impl QueryText {
    /// Query text as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QueryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds `around` queries for nodes, ways and relations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBuilder {
    max_radius_meters: u32,
    server_timeout_secs: u64,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(SearchRadius::DEFAULT_MAX_METERS, 25)
    }
}

impl QueryBuilder {
    /// Create a builder with a radius ceiling and server-side timeout
    #[must_use]
    pub const fn new(max_radius_meters: u32, server_timeout_secs: u64) -> Self {
        Self {
            max_radius_meters,
            server_timeout_secs,
        }
    }

    /// Create a builder from service configuration
    #[must_use]
    pub const fn from_config(config: &OverpassConfig) -> Self {
        Self::new(config.max_radius_meters, config.query_timeout_secs)
    }

    /// Largest radius the builder renders
    #[must_use]
    pub const fn max_radius_meters(&self) -> u32 {
        self.max_radius_meters
    }

    /// Render the query for `center`, `radius_meters` and `filters`
    ///
    /// The radius is clamped into `1..=max_radius_meters` first. Every tag
    /// group is emitted once per element kind; ways and relations get a
    /// computed center through `out body center`, and `>;` recurses into
    /// their member nodes.
    #[must_use]
    pub fn build(&self, center: &Coordinate, radius_meters: u32, filters: &TagFilterSet) -> QueryText {
        let radius = SearchRadius::clamped(radius_meters, self.max_radius_meters);
        let around = format!(
            "(around:{},{},{})",
            radius.meters(),
            format_degrees(center.latitude()),
            format_degrees(center.longitude())
        );

        let mut query = format!("[out:json][timeout:{}];\n(\n", self.server_timeout_secs);
        for group in filters.groups() {
            let predicates = render_group(group);
            for kind in ElementKind::ALL {
                let _ = writeln!(query, "  {kind}{predicates}{around};");
            }
        }
        query.push_str(");\nout body center;\n>;\nout skel qt;");

        QueryText(query)
    }
}

fn render_group(group: &TagGroup) -> String {
    group.predicates().iter().fold(String::new(), |mut acc, p| {
        let _ = write!(acc, "[\"{}\"=\"{}\"]", escape(p.key()), escape(p.value()));
        acc
    })
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Round to 7 decimal places (about 1 cm) without padding zeros
fn format_degrees(value: f64) -> String {
    let rounded = (value * 1e7).round() / 1e7;
    format!("{rounded}")
}
