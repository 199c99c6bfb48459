//! Charger filtering and display classification.
//!
//! The engine is a pure function of its input list and criteria: stable
//! (order-preserving), no I/O, and infallible. An empty input yields an
//! empty output.
//!
//! Composition is fixed: the operational gate is an unconditional AND with
//! the OR-group result. The OR-group stage runs only when at least one of
//! its flags is selected; otherwise every charger passes it.

use serde::{Deserialize, Serialize};

use crate::charger::{ChargerRecord, Connection};
use crate::criteria::FilterCriteria;
use crate::kinds::OperatorKind;

/// Minimum rating for a Tesla DC plug to count as a Supercharger, and the
/// ceiling below which a Tesla level 2 plug counts as a destination charger.
const TESLA_SUPERCHARGER_MIN_KW: f64 = 72.0;
const HIGH_POWER_MIN_KW: f64 = 150.0;
const MEDIUM_POWER_MIN_KW: f64 = 50.0;

/// How a charger's marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayClass {
    OperationalStandard,
    OperationalHighPower,
    NonOperational,
}

impl DisplayClass {
    #[must_use]
    pub fn marker_color(self) -> &'static str {
        match self {
            DisplayClass::OperationalStandard => "#2e86de",
            DisplayClass::OperationalHighPower => "#27ae60",
            DisplayClass::NonOperational => "#95a5a6",
        }
    }
}

impl std::fmt::Display for DisplayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayClass::OperationalStandard => write!(f, "operational-standard"),
            DisplayClass::OperationalHighPower => write!(f, "operational-high-power"),
            DisplayClass::NonOperational => write!(f, "non-operational"),
        }
    }
}

/// A filtered charger paired with its derived display class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedCharger {
    pub charger: ChargerRecord,
    pub display_class: DisplayClass,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChargerFilterEngine {
    criteria: FilterCriteria,
}

impl ChargerFilterEngine {
    #[must_use]
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Keeps the chargers that pass both stages, in input order.
    #[must_use]
    pub fn filter(&self, chargers: Vec<ChargerRecord>) -> Vec<ChargerRecord> {
        let before = chargers.len();
        let kept: Vec<ChargerRecord> = chargers
            .into_iter()
            .filter(|c| self.matches(c))
            .collect();
        tracing::debug!(before, after = kept.len(), "applied charger filters");
        kept
    }

    /// Filters, then attaches the display class of each survivor.
    #[must_use]
    pub fn filter_and_classify(&self, chargers: Vec<ChargerRecord>) -> Vec<ClassifiedCharger> {
        self.filter(chargers)
            .into_iter()
            .map(|charger| {
                let display_class = Self::classify(&charger);
                ClassifiedCharger {
                    charger,
                    display_class,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn matches(&self, charger: &ChargerRecord) -> bool {
        if self.criteria.operational_only && !charger.is_operational() {
            return false;
        }
        !self.criteria.has_or_group() || self.matches_or_group(charger)
    }

    fn matches_or_group(&self, charger: &ChargerRecord) -> bool {
        let c = &self.criteria;
        let operator = charger.operator_kind();
        let is_operator = |kind: OperatorKind| operator == Some(kind);

        (c.fast_only && has_level(charger, 3))
            || (c.level2_only && has_level(charger, 2))
            || (c.tesla_supercharger && is_tesla_supercharger(charger))
            || (c.tesla_destination && is_tesla_destination(charger))
            || (c.chargepoint_only && is_operator(OperatorKind::ChargePoint))
            || (c.electrify_america && is_operator(OperatorKind::ElectrifyAmerica))
            || (c.evgo && is_operator(OperatorKind::Evgo))
            || (c.blink && is_operator(OperatorKind::Blink))
            || (c.high_power && has_power(charger, is_high_power))
            || (c.medium_power && has_power(charger, is_medium_power))
            || (c.low_power && has_power(charger, is_low_power))
    }

    /// Marker class for a charger. Independent of the criteria.
    #[must_use]
    pub fn classify(charger: &ChargerRecord) -> DisplayClass {
        if !charger.is_operational() {
            return DisplayClass::NonOperational;
        }

        let fast_or_high = has_level(charger, 3) || has_power(charger, is_high_power);
        if fast_or_high || is_tesla_branded_supercharger(charger) {
            DisplayClass::OperationalHighPower
        } else {
            DisplayClass::OperationalStandard
        }
    }
}

fn has_level(charger: &ChargerRecord, level: u8) -> bool {
    charger.any_connection(|conn| conn.is_level(level))
}

fn has_power(charger: &ChargerRecord, tier: fn(f64) -> bool) -> bool {
    charger.any_connection(|conn| conn.power_matches(tier))
}

fn is_high_power(kw: f64) -> bool {
    kw >= HIGH_POWER_MIN_KW
}

fn is_medium_power(kw: f64) -> bool {
    (MEDIUM_POWER_MIN_KW..HIGH_POWER_MIN_KW).contains(&kw)
}

fn is_low_power(kw: f64) -> bool {
    kw < MEDIUM_POWER_MIN_KW
}

/// Classification matches the operator loosely, unlike the filters.
fn is_tesla_branded_supercharger(charger: &ChargerRecord) -> bool {
    let tesla_operator = charger
        .operator_title()
        .is_some_and(|t| t.to_lowercase().contains("tesla"));
    tesla_operator && charger.any_connection(is_supercharger_connector)
}

fn is_supercharger_connector(conn: &Connection) -> bool {
    conn.connector_kind().is_supercharger_type()
}

fn is_tesla_supercharger(charger: &ChargerRecord) -> bool {
    let dc_rated = |conn: &Connection| {
        conn.is_level(3) && conn.power_matches(|kw| kw >= TESLA_SUPERCHARGER_MIN_KW)
    };
    charger.operator_kind() == Some(OperatorKind::Tesla)
        && charger.any_connection(|conn| is_supercharger_connector(conn) || dc_rated(conn))
}

fn is_tesla_destination(charger: &ChargerRecord) -> bool {
    let ac_rated = |conn: &Connection| {
        conn.is_level(2) && conn.power_matches(|kw| kw < TESLA_SUPERCHARGER_MIN_KW)
    };
    let destination = |conn: &Connection| conn.connector_kind().is_destination_type();
    charger.operator_kind() == Some(OperatorKind::Tesla)
        && charger.any_connection(|conn| destination(conn) || ac_rated(conn))
}

/// Stable ascending sort by provider-supplied distance. Chargers without a
/// distance sort last, keeping their relative order.
pub fn sort_by_distance(chargers: &mut [ChargerRecord]) {
    chargers.sort_by(|a, b| {
        let da = a.address.distance.unwrap_or(f64::INFINITY);
        let db = b.address.distance.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
