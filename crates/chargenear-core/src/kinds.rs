//! Operator and connector kinds mapped from provider title strings.
//!
//! Matching is exact and case-sensitive: the provider's titles are the only
//! source of truth, and a differently-cased title is a different operator.

use serde::{Deserialize, Serialize};

pub const TESLA_OPERATOR_TITLE: &str = "Tesla (Tesla-only charging)";
pub const CHARGEPOINT_OPERATOR_TITLE: &str = "ChargePoint";
pub const ELECTRIFY_AMERICA_OPERATOR_TITLE: &str = "Electrify America";
pub const EVGO_OPERATOR_TITLE: &str = "EVgo";
pub const BLINK_OPERATOR_TITLE: &str = "Blink Charging";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Tesla,
    ChargePoint,
    ElectrifyAmerica,
    Evgo,
    Blink,
    Other,
}

impl OperatorKind {
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        match title {
            TESLA_OPERATOR_TITLE => Self::Tesla,
            CHARGEPOINT_OPERATOR_TITLE => Self::ChargePoint,
            ELECTRIFY_AMERICA_OPERATOR_TITLE => Self::ElectrifyAmerica,
            EVGO_OPERATOR_TITLE => Self::Evgo,
            BLINK_OPERATOR_TITLE => Self::Blink,
            _ => Self::Other,
        }
    }

    /// Provider title for the known networks.
    #[must_use]
    pub fn title(self) -> Option<&'static str> {
        match self {
            Self::Tesla => Some(TESLA_OPERATOR_TITLE),
            Self::ChargePoint => Some(CHARGEPOINT_OPERATOR_TITLE),
            Self::ElectrifyAmerica => Some(ELECTRIFY_AMERICA_OPERATOR_TITLE),
            Self::Evgo => Some(EVGO_OPERATOR_TITLE),
            Self::Blink => Some(BLINK_OPERATOR_TITLE),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    NacsTeslaSupercharger,
    TeslaSupercharger,
    TeslaModelSx,
    TeslaDestination,
    Other,
}

impl ConnectorKind {
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        match title {
            "NACS / Tesla Supercharger" => Self::NacsTeslaSupercharger,
            "Tesla Supercharger" => Self::TeslaSupercharger,
            "Tesla (Model S/X)" => Self::TeslaModelSx,
            "Tesla Destination" => Self::TeslaDestination,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn is_supercharger_type(self) -> bool {
        matches!(
            self,
            Self::NacsTeslaSupercharger | Self::TeslaSupercharger | Self::TeslaModelSx
        )
    }

    /// Model S/X plugs count as both supercharger and destination types.
    #[must_use]
    pub fn is_destination_type(self) -> bool {
        matches!(self, Self::TeslaDestination | Self::TeslaModelSx)
    }
}
