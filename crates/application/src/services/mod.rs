//! Application services - Use case implementations

mod church_search_service;

pub use church_search_service::{
    CenterSource, ChurchSearchService, SearchOutcome, SearchRequest, SearchSettings,
};
