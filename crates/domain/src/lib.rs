//! Domain layer for the church finder
//!
//! Contains the value objects and entities of a nearby places-of-worship
//! search: coordinates, bounded search radii, tag filters and the canonical
//! point-of-interest record. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
