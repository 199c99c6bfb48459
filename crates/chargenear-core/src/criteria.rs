use serde::{Deserialize, Serialize};

/// Filter flags selected by the user.
///
/// Every flag except `operational_only` belongs to the OR-group: a charger is
/// kept when it matches at least one selected predicate. `operational_only`
/// is an independent AND gate and is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterCriteria {
    pub fast_only: bool,
    pub level2_only: bool,
    pub tesla_supercharger: bool,
    pub tesla_destination: bool,
    pub chargepoint_only: bool,
    pub electrify_america: bool,
    pub evgo: bool,
    pub blink: bool,
    pub operational_only: bool,
    pub high_power: bool,
    pub medium_power: bool,
    pub low_power: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            fast_only: false,
            level2_only: false,
            tesla_supercharger: false,
            tesla_destination: false,
            chargepoint_only: false,
            electrify_america: false,
            evgo: false,
            blink: false,
            operational_only: true,
            high_power: false,
            medium_power: false,
            low_power: false,
        }
    }
}

impl FilterCriteria {
    /// Every flag off, including the operational gate: keeps everything.
    #[must_use]
    pub fn pass_through() -> Self {
        Self {
            operational_only: false,
            ..Self::default()
        }
    }

    /// True when at least one OR-group flag is selected.
    #[must_use]
    pub fn has_or_group(&self) -> bool {
        self.fast_only
            || self.level2_only
            || self.tesla_supercharger
            || self.tesla_destination
            || self.chargepoint_only
            || self.electrify_america
            || self.evgo
            || self.blink
            || self.high_power
            || self.medium_power
            || self.low_power
    }
}
