//! Core value types shared by the optimizer, comparison, and runtime layers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a geographic cell in the simulation grid.
pub type LocationId = i64;

/// Rows grouped per location, iterated in ascending id order.
///
/// Row order inside each location is the load order and decides ties.
pub type LocationTable = BTreeMap<LocationId, Vec<ConfigurationRow>>;

/// One simulated sizing outcome at one location.
///
/// `solar_gw` and `batt_gwh` are sizing ratios relative to the normalised
/// baseload block, not absolute capacities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationRow {
    /// Location identifier.
    pub location_id: LocationId,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Solar sizing (>= 0).
    pub solar_gw: f64,
    /// Battery sizing (>= 0).
    pub batt_gwh: f64,
    /// Fraction of the year the baseload block is served, in `[0, 1]`.
    pub annual_cf: f64,
}

/// Selects the optimisation mode and carries its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", content = "target", rename_all = "snake_case")]
pub enum OptimizationTarget {
    /// Cheapest configuration with `annual_cf >= target`.
    CapacityFactor(f64),
    /// Most reliable configuration with `lcoe <= target` ($/MWh).
    Lcoe(f64),
}

impl OptimizationTarget {
    /// Short mode label used in logs, cache keys and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CapacityFactor(_) => "cf",
            Self::Lcoe(_) => "lcoe",
        }
    }

    /// The numeric threshold regardless of mode.
    pub fn threshold(&self) -> f64 {
        match self {
            Self::CapacityFactor(t) | Self::Lcoe(t) => *t,
        }
    }
}

/// The per-location winner of one optimizer pass.
///
/// Serialized with the dashboard's presentation names for the derived
/// fields; the row fields keep their column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedResult {
    /// The winning configuration row.
    #[serde(flatten)]
    pub row: ConfigurationRow,
    /// Levelized cost of the winning row ($/MWh).
    pub lcoe: f64,
    /// Whether the winner satisfies the active target.
    #[serde(rename = "meetsTarget")]
    pub meets_target: bool,
    /// Solar sizing of the largest configuration (capacity-factor mode only).
    #[serde(rename = "maxConfigSolar")]
    pub max_config_solar: Option<f64>,
    /// Battery sizing paired with the largest solar sizing.
    #[serde(rename = "maxConfigBatt")]
    pub max_config_batt: Option<f64>,
    /// Levelized cost of the largest configuration.
    #[serde(rename = "maxConfigLcoe")]
    pub max_config_lcoe: Option<f64>,
}

impl OptimizedResult {
    /// Builds a result without max-configuration data.
    pub fn new(row: ConfigurationRow, lcoe: f64, meets_target: bool) -> Self {
        Self {
            row,
            lcoe,
            meets_target,
            max_config_solar: None,
            max_config_batt: None,
            max_config_lcoe: None,
        }
    }

    /// Attaches the largest configuration at the same location.
    pub fn with_max_config(mut self, max_row: &ConfigurationRow, max_lcoe: f64) -> Self {
        self.max_config_solar = Some(max_row.solar_gw);
        self.max_config_batt = Some(max_row.batt_gwh);
        self.max_config_lcoe = Some(max_lcoe);
        self
    }

    /// Location identifier of the winner.
    pub fn location_id(&self) -> LocationId {
        self.row.location_id
    }

    /// Capacity factor of the winner.
    pub fn annual_cf(&self) -> f64 {
        self.row.annual_cf
    }
}

impl fmt::Display for OptimizedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loc {:>6} | solar {:>6.2} | batt {:>6.2} | cf {:>5.1}% | lcoe {:>8.2} $/MWh | {}",
            self.row.location_id,
            self.row.solar_gw,
            self.row.batt_gwh,
            self.row.annual_cf * 100.0,
            self.lcoe,
            if self.meets_target { "meets" } else { "misses" }
        )
    }
}
