//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! OpenStreetMap integration, loads configuration, and sets up tracing.

pub mod adapters;
pub mod config;
mod service_factory;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, CoordinateConfig, FilterGroupConfig, SearchAppConfig, TagConfig};
pub use service_factory::create_search_service;
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
