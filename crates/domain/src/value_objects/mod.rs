//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod element;
mod search_radius;
mod tag_filter;

pub use coordinate::{Coordinate, InvalidCoordinates};
pub use element::{ElementId, ElementKind};
pub use search_radius::SearchRadius;
pub use tag_filter::{TagFilterSet, TagGroup, TagPredicate};
