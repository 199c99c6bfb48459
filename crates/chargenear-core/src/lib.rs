pub mod app_config;
pub mod charger;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod geo;
pub mod kinds;

pub use app_config::AppConfig;
pub use charger::{AddressInfo, ChargerId, ChargerRecord, Connection, TitledRef};
pub use config::{load_app_config, load_app_config_from_env};
pub use criteria::FilterCriteria;
pub use engine::{sort_by_distance, ChargerFilterEngine, ClassifiedCharger, DisplayClass};
pub use geo::Coordinates;
pub use kinds::{ConnectorKind, OperatorKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejected latitude/longitude pairs.
#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}
