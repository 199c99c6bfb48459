//! Client for the Mapbox Geocoding `mapbox.places` endpoint: forward
//! geocoding of a free-text address and autocomplete suggestions.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GeocodeClient, MIN_SUGGEST_QUERY_CHARS, SUGGESTION_LIMIT};
pub use error::GeocodeError;
pub use types::Place;
