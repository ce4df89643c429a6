//! `Tripdesk` - travel planning backend
//!
//! This library glues together a flight-search aggregator and an LLM for
//! attraction discovery, and keeps a small in-memory per-user itinerary.

pub mod api;
pub mod attractions;
pub mod config;
pub mod error;
pub mod flights;
pub mod itinerary;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use attractions::AttractionClient;
pub use config::TripdeskConfig;
pub use error::TripdeskError;
pub use flights::FlightApiClient;
pub use itinerary::ItineraryStore;
pub use models::{Attraction, FlightQueryParams, FlightResult, LocationRef};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
