//! Charger station records as the filter engine sees them.
//!
//! These are the semantic shapes of the provider's POI objects. Wire-level
//! (PascalCase) types live in the provider client crates and are normalized
//! into these before filtering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::kinds::{ConnectorKind, OperatorKind};

/// Provider-assigned station identifier. OpenChargeMap uses integers, but
/// passthrough deployments have been seen returning strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChargerId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ChargerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChargerId::Number(n) => write!(f, "{n}"),
            ChargerId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A `{ title }` reference object (operator, status, connection type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledRef {
    pub title: String,
}

impl TitledRef {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    pub title: String,
    pub line1: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the query point, in the unit the query asked for.
    /// Only present when the provider computed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl AddressInfo {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

/// One physical plug at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// 1, 2 or 3 (DC fast). Missing on some provider records.
    pub level_id: Option<u8>,
    pub connection_type: Option<TitledRef>,
    pub power_kw: Option<f64>,
    pub quantity: Option<u32>,
    pub status: Option<TitledRef>,
}

impl Connection {
    #[must_use]
    pub fn is_level(&self, level: u8) -> bool {
        self.level_id == Some(level)
    }

    #[must_use]
    pub fn connector_kind(&self) -> ConnectorKind {
        match &self.connection_type {
            Some(t) => ConnectorKind::from_title(&t.title),
            None => ConnectorKind::Other,
        }
    }

    /// True when the connection reports a positive power rating and `pred`
    /// holds for it. A missing or zero rating never matches.
    pub fn power_matches(&self, pred: impl Fn(f64) -> bool) -> bool {
        self.power_kw.is_some_and(|kw| kw > 0.0 && pred(kw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargerRecord {
    pub id: ChargerId,
    pub address: AddressInfo,
    pub operator: Option<TitledRef>,
    pub status: Option<TitledRef>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    pub usage_cost: Option<String>,
    pub last_status_update: Option<DateTime<Utc>>,
}

pub const OPERATIONAL_STATUS: &str = "Operational";

impl ChargerRecord {
    /// Exact match on the status title; a missing status is not operational.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.title == OPERATIONAL_STATUS)
    }

    #[must_use]
    pub fn operator_title(&self) -> Option<&str> {
        self.operator.as_ref().map(|o| o.title.as_str())
    }

    /// `None` when the record carries no operator at all, so that it matches
    /// no operator-based predicate.
    #[must_use]
    pub fn operator_kind(&self) -> Option<OperatorKind> {
        self.operator_title().map(OperatorKind::from_title)
    }

    pub fn any_connection(&self, pred: impl Fn(&Connection) -> bool) -> bool {
        self.connections.iter().any(pred)
    }

    /// Highest power rating across all connections, if any reports one.
    #[must_use]
    pub fn max_power_kw(&self) -> Option<f64> {
        self.connections
            .iter()
            .filter_map(|c| c.power_kw)
            .reduce(f64::max)
    }

    /// Link that opens turn-by-turn directions to the station.
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            self.address.latitude, self.address.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ChargerRecord {
        ChargerRecord {
            id: ChargerId::Number(7),
            address: AddressInfo {
                title: "Pike Place Garage".to_string(),
                line1: Some("1531 Western Ave".to_string()),
                town: Some("Seattle".to_string()),
                state_or_province: Some("WA".to_string()),
                postcode: Some("98101".to_string()),
                latitude: 47.609,
                longitude: -122.342,
                distance: None,
            },
            operator: None,
            status: Some(TitledRef::new("Operational")),
            connections: vec![
                Connection {
                    level_id: Some(2),
                    connection_type: None,
                    power_kw: Some(7.2),
                    quantity: Some(2),
                    status: None,
                },
                Connection {
                    level_id: Some(3),
                    connection_type: None,
                    power_kw: None,
                    quantity: None,
                    status: None,
                },
            ],
            usage_cost: None,
            last_status_update: None,
        }
    }

    #[test]
    fn status_match_is_exact() {
        let mut r = record();
        assert!(r.is_operational());
        r.status = Some(TitledRef::new("operational"));
        assert!(!r.is_operational());
        r.status = None;
        assert!(!r.is_operational());
    }

    #[test]
    fn zero_rating_never_matches_a_power_rule() {
        let mut conn = record().connections[0].clone();
        conn.power_kw = Some(0.0);
        assert!(!conn.power_matches(|kw| kw < 50.0));
        conn.power_kw = Some(7.2);
        assert!(conn.power_matches(|kw| kw < 50.0));
    }

    #[test]
    fn max_power_ignores_missing_ratings() {
        assert_eq!(record().max_power_kw(), Some(7.2));
    }

    #[test]
    fn max_power_is_none_without_connections() {
        let mut r = record();
        r.connections.clear();
        assert_eq!(r.max_power_kw(), None);
    }

    #[test]
    fn directions_url_uses_station_coordinates() {
        assert_eq!(
            record().directions_url(),
            "https://www.google.com/maps/dir/?api=1&destination=47.609,-122.342"
        );
    }

    #[test]
    fn operator_kind_is_none_without_operator() {
        assert!(record().operator_kind().is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json["address"].get("stateOrProvince").is_some());
        assert_eq!(json["connections"][0]["levelId"], 2);
        assert_eq!(json["connections"][0]["powerKw"], 7.2);
        assert!(json["address"].get("distance").is_none());
    }

    #[test]
    fn charger_id_accepts_numbers_and_strings() {
        let n: ChargerId = serde_json::from_str("42").unwrap();
        let s: ChargerId = serde_json::from_str("\"ocm-42\"").unwrap();
        assert_eq!(n, ChargerId::Number(42));
        assert_eq!(s.to_string(), "ocm-42");
    }
}
