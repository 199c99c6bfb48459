//! OpenChargeMap POI wire types.
//!
//! Field names follow the provider's PascalCase JSON. Nearly everything is
//! optional on the wire, so every field defaults; [`crate::normalize`]
//! decides which gaps make a record unusable.

use chargenear_core::ChargerId;
use serde::Deserialize;

/// A single point of interest (charging station).
#[derive(Debug, Clone, Deserialize)]
pub struct OcmPoi {
    #[serde(rename = "ID")]
    pub id: ChargerId,
    #[serde(rename = "AddressInfo", default)]
    pub address_info: Option<OcmAddressInfo>,
    #[serde(rename = "OperatorInfo", default)]
    pub operator_info: Option<OcmTitled>,
    #[serde(rename = "StatusType", default)]
    pub status_type: Option<OcmTitled>,
    /// `null` and absent are both treated as no connections.
    #[serde(rename = "Connections", default)]
    pub connections: Option<Vec<OcmConnection>>,
    #[serde(rename = "UsageCost", default)]
    pub usage_cost: Option<String>,
    /// ISO-8601 timestamp, usually with a `Z` suffix.
    #[serde(rename = "DateLastStatusUpdate", default)]
    pub date_last_status_update: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcmAddressInfo {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "AddressLine1", default)]
    pub address_line1: Option<String>,
    #[serde(rename = "Town", default)]
    pub town: Option<String>,
    #[serde(rename = "StateOrProvince", default)]
    pub state_or_province: Option<String>,
    #[serde(rename = "Postcode", default)]
    pub postcode: Option<String>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
    /// Present when the query carried a latitude/longitude.
    #[serde(rename = "Distance", default)]
    pub distance: Option<f64>,
}

/// Reference objects (`OperatorInfo`, `StatusType`, `ConnectionType`) all
/// carry a `Title`; that is the only field the filters look at.
#[derive(Debug, Clone, Deserialize)]
pub struct OcmTitled {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcmConnection {
    #[serde(rename = "LevelID", default)]
    pub level_id: Option<u8>,
    #[serde(rename = "ConnectionType", default)]
    pub connection_type: Option<OcmTitled>,
    #[serde(rename = "PowerKW", default)]
    pub power_kw: Option<f64>,
    #[serde(rename = "Quantity", default)]
    pub quantity: Option<u32>,
    #[serde(rename = "StatusType", default)]
    pub status_type: Option<OcmTitled>,
}
