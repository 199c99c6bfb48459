//! Lat/lon helpers: validation and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::CoordinateError;

const EARTH_RADIUS_MILES: f64 = 3958.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, rejecting out-of-range or non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is out of range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Geocoders return centers as `[lon, lat]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is out of range.
    pub fn from_lon_lat(center: [f64; 2]) -> Result<Self, CoordinateError> {
        Self::new(center[1], center[0])
    }

    /// Haversine distance in miles.
    #[must_use]
    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
