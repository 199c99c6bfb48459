//! Mapbox `mapbox.places` response types.

use chargenear_core::Coordinates;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    pub place_name: Option<String>,
    /// `[lon, lat]`.
    #[serde(default)]
    pub center: Option<[f64; 2]>,
}

/// A geocoded place: display name plus its center point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Feature {
    /// Features without a center, or with an out-of-range one, are dropped.
    pub(crate) fn into_place(self) -> Option<Place> {
        let coordinates = Coordinates::from_lon_lat(self.center?).ok()?;
        let name = self.place_name.unwrap_or_else(|| coordinates.to_string());
        Some(Place { name, coordinates })
    }
}
