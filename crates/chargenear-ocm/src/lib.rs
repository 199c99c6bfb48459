//! Client for the OpenChargeMap `poi` endpoint and the API-Gateway
//! passthrough that mirrors it.

pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::{ChargerQuery, EndpointMode, OcmClient};
pub use error::OcmError;
pub use normalize::normalize_poi;
pub use types::OcmPoi;
