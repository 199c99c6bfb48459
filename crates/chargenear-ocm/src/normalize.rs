//! Conversion from OpenChargeMap wire types to `chargenear-core` records.

use chargenear_core::{AddressInfo, ChargerRecord, Connection, TitledRef};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::{OcmConnection, OcmPoi, OcmTitled};

const UNTITLED_STATION: &str = "Charging station";

/// Normalize one POI. Returns `None` when the record has no usable location,
/// since a charger that cannot be placed on the map is of no use downstream.
#[must_use]
pub fn normalize_poi(poi: OcmPoi) -> Option<ChargerRecord> {
    let Some(address) = poi.address_info else {
        tracing::debug!(id = %poi.id, "skipping POI without AddressInfo");
        return None;
    };
    let (Some(latitude), Some(longitude)) = (address.latitude, address.longitude) else {
        tracing::debug!(id = %poi.id, "skipping POI without coordinates");
        return None;
    };

    let title = address
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED_STATION.to_string());

    Some(ChargerRecord {
        id: poi.id,
        address: AddressInfo {
            title,
            line1: address.address_line1,
            town: address.town,
            state_or_province: address.state_or_province,
            postcode: address.postcode,
            latitude,
            longitude,
            distance: address.distance,
        },
        operator: titled(poi.operator_info),
        status: titled(poi.status_type),
        connections: poi
            .connections
            .unwrap_or_default()
            .into_iter()
            .map(normalize_connection)
            .collect(),
        usage_cost: poi.usage_cost,
        last_status_update: poi
            .date_last_status_update
            .as_deref()
            .and_then(parse_timestamp),
    })
}

fn normalize_connection(conn: OcmConnection) -> Connection {
    Connection {
        level_id: conn.level_id,
        connection_type: titled(conn.connection_type),
        power_kw: conn.power_kw,
        quantity: conn.quantity,
        status: titled(conn.status_type),
    }
}

/// A reference object with a null title carries no information.
fn titled(value: Option<OcmTitled>) -> Option<TitledRef> {
    value.and_then(|v| v.title).map(TitledRef::new)
}

/// Accepts RFC 3339 and the zone-less form the provider sometimes emits
/// (interpreted as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .ok()
}

#[cfg(test)]
mod tests {
    use chargenear_core::ChargerId;
    use chrono::{Datelike, Timelike};

    use super::*;

    fn poi(json: serde_json::Value) -> OcmPoi {
        serde_json::from_value(json).expect("fixture should deserialize")
    }

    #[test]
    fn maps_full_record() {
        let record = normalize_poi(poi(serde_json::json!({
            "ID": 101,
            "AddressInfo": {
                "Title": "Bellevue Square",
                "AddressLine1": "575 Bellevue Square",
                "Town": "Bellevue",
                "StateOrProvince": "WA",
                "Postcode": "98004",
                "Latitude": 47.6157,
                "Longitude": -122.2035,
                "Distance": 3.2
            },
            "OperatorInfo": { "ID": 5, "Title": "ChargePoint" },
            "StatusType": { "Title": "Operational", "IsOperational": true },
            "Connections": [
                {
                    "LevelID": 2,
                    "ConnectionType": { "Title": "J1772" },
                    "PowerKW": 6.6,
                    "Quantity": 4,
                    "StatusType": { "Title": "Operational" }
                }
            ],
            "UsageCost": "$0.30/kWh",
            "DateLastStatusUpdate": "2024-03-05T17:34:00Z"
        })))
        .expect("record has coordinates");

        assert_eq!(record.id, ChargerId::Number(101));
        assert_eq!(record.address.title, "Bellevue Square");
        assert_eq!(record.address.town.as_deref(), Some("Bellevue"));
        assert_eq!(record.address.distance, Some(3.2));
        assert_eq!(record.operator_title(), Some("ChargePoint"));
        assert!(record.is_operational());
        assert_eq!(record.connections.len(), 1);
        assert_eq!(record.connections[0].level_id, Some(2));
        assert_eq!(record.connections[0].power_kw, Some(6.6));
        let connector = record.connections[0].connection_type.as_ref();
        assert_eq!(connector.map(|t| t.title.as_str()), Some("J1772"));
        let updated = record.last_status_update.expect("timestamp parses");
        assert_eq!((updated.year(), updated.month(), updated.hour()), (2024, 3, 17));
    }

    #[test]
    fn skips_record_without_address() {
        let bare = poi(serde_json::json!({ "ID": 1 }));
        assert!(normalize_poi(bare).is_none());
    }

    #[test]
    fn skips_record_without_coordinates() {
        let p = poi(serde_json::json!({
            "ID": 1,
            "AddressInfo": { "Title": "Nowhere", "Latitude": 47.0 }
        }));
        assert!(normalize_poi(p).is_none());
    }

    #[test]
    fn null_connections_become_empty() {
        let record = normalize_poi(poi(serde_json::json!({
            "ID": 2,
            "AddressInfo": { "Title": "Lot", "Latitude": 47.0, "Longitude": -122.0 },
            "Connections": null
        })))
        .unwrap();
        assert!(record.connections.is_empty());
    }

    #[test]
    fn null_titles_drop_reference_objects() {
        let record = normalize_poi(poi(serde_json::json!({
            "ID": 3,
            "AddressInfo": { "Title": "Lot", "Latitude": 47.0, "Longitude": -122.0 },
            "OperatorInfo": { "Title": null },
            "StatusType": null
        })))
        .unwrap();
        assert!(record.operator.is_none());
        assert!(record.status.is_none());
    }

    #[test]
    fn blank_title_gets_placeholder() {
        let record = normalize_poi(poi(serde_json::json!({
            "ID": "gw-9",
            "AddressInfo": { "Title": "  ", "Latitude": 47.0, "Longitude": -122.0 }
        })))
        .unwrap();
        assert_eq!(record.address.title, UNTITLED_STATION);
        assert_eq!(record.id, ChargerId::Text("gw-9".to_string()));
    }

    #[test]
    fn parses_zone_less_timestamp_as_utc() {
        let dt = parse_timestamp("2023-11-02T08:15:00").expect("zone-less form parses");
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn unparseable_timestamp_is_dropped() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
