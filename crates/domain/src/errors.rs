//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Tag predicate with an empty key or value
    #[error("Invalid tag predicate: {0}")]
    InvalidTagPredicate(String),

    /// A filter set or group without any predicates
    #[error("Empty tag filter: {0}")]
    EmptyTagFilter(String),
}
