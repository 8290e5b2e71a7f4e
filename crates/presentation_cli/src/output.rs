//! Result rendering

use std::fmt::Write as _;

use application::SearchOutcome;
use domain::PointOfInterest;

/// Render results as human-readable text
///
/// `nearest_first` orders by distance from the center; otherwise the
/// service order is kept.
#[must_use]
pub fn render_text(outcome: &SearchOutcome, nearest_first: bool) -> String {
    let mut out = String::new();

    if outcome.is_empty() {
        let _ = writeln!(
            out,
            "No churches found within {} of {}.",
            outcome.radius, outcome.center
        );
        return out;
    }

    let count = outcome.places.len();
    let noun = if count == 1 { "church" } else { "churches" };
    let _ = writeln!(
        out,
        "⛪ Found {count} {noun} within {} of {}",
        outcome.radius, outcome.center
    );

    let places: Vec<&PointOfInterest> = if nearest_first {
        outcome.places_by_distance()
    } else {
        outcome.places.iter().collect()
    };

    for (i, place) in places.iter().enumerate() {
        out.push('\n');
        render_place(&mut out, i + 1, place, outcome);
    }

    out
}

fn render_place(out: &mut String, index: usize, place: &PointOfInterest, outcome: &SearchOutcome) {
    let _ = writeln!(out, "{index}. {} ({})", place.name(), place.denomination());
    let _ = writeln!(out, "   📍 {}", place.address());
    let _ = writeln!(
        out,
        "   📏 {:.2} km away ({}, {})",
        place.distance_km_from(&outcome.center),
        place.coordinate(),
        place.id()
    );
    if let Some(schedule) = place.schedule() {
        let _ = writeln!(out, "   🕐 {schedule}");
    }
    if let Some(phone) = place.phone() {
        let _ = writeln!(out, "   📞 {phone}");
    }
    if let Some(website) = place.website() {
        let _ = writeln!(out, "   🌐 {website}");
    }
}

/// Render results as pretty-printed JSON
pub fn render_json(outcome: &SearchOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}
