//! Financial assumptions consumed by the cost model.

use std::collections::HashMap;

use serde::Serialize;

use crate::optimizer::LocationId;

/// Time-indexed cost-decline multipliers applied to the global CAPEX inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostMultipliers {
    /// Multiplier applied to `solar_capex_per_kw`.
    pub solar: f64,
    /// Multiplier applied to `battery_capex_per_kwh`.
    pub battery: f64,
}

impl Default for CostMultipliers {
    fn default() -> Self {
        Self {
            solar: 1.0,
            battery: 1.0,
        }
    }
}

/// Global cost assumptions for one optimizer invocation.
///
/// Every field arrives explicitly from the caller; the cost model never reads
/// ambient state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialParameters {
    /// Solar CAPEX per kW of AC nameplate ($/kW).
    pub solar_capex_per_kw: f64,
    /// Battery CAPEX per kWh of storage ($/kWh).
    pub battery_capex_per_kwh: f64,
    /// Annual solar O&M as a fraction of solar CAPEX.
    pub solar_opex_fraction: f64,
    /// Annual battery O&M as a fraction of battery CAPEX.
    pub battery_opex_fraction: f64,
    /// Solar asset life (years).
    pub solar_life_years: u32,
    /// Battery asset life (years).
    pub battery_life_years: u32,
    /// Weighted average cost of capital used as discount rate.
    pub wacc: f64,
    /// DC-to-AC oversizing factor applied to solar CAPEX.
    pub inverter_load_ratio: f64,
    /// Cost-decline multipliers for the selected year.
    pub cost_multipliers: CostMultipliers,
}

impl Default for FinancialParameters {
    fn default() -> Self {
        Self {
            solar_capex_per_kw: 720.0,
            battery_capex_per_kwh: 120.0,
            solar_opex_fraction: 0.015,
            battery_opex_fraction: 0.02,
            solar_life_years: 30,
            battery_life_years: 20,
            wacc: 0.07,
            inverter_load_ratio: 1.3,
            cost_multipliers: CostMultipliers::default(),
        }
    }
}

impl FinancialParameters {
    /// Returns a copy with the given cost multipliers applied.
    pub fn with_multipliers(mut self, cost_multipliers: CostMultipliers) -> Self {
        self.cost_multipliers = cost_multipliers;
        self
    }
}

/// Per-location financing and cost data that supersedes the global inputs.
///
/// A value that is `None` or non-finite is ignored and the global parameter
/// is used instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LocationOverride {
    /// Local discount rate.
    pub local_wacc: Option<f64>,
    /// Local solar CAPEX ($/kW AC), already time-adjusted.
    pub local_solar_capex_per_kw: Option<f64>,
    /// Local battery CAPEX ($/kWh), already time-adjusted.
    pub local_battery_capex_per_kwh: Option<f64>,
}

impl LocationOverride {
    /// Returns `true` when no field carries a usable value.
    pub fn is_empty(&self) -> bool {
        finite(self.local_wacc).is_none()
            && finite(self.local_solar_capex_per_kw).is_none()
            && finite(self.local_battery_capex_per_kwh).is_none()
    }
}

/// Resolved overrides keyed by location.
pub type OverrideMap = HashMap<LocationId, LocationOverride>;

/// Filters an optional value down to finite numbers only.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_assumptions() {
        let p = FinancialParameters::default();
        assert_eq!(p.solar_capex_per_kw, 720.0);
        assert_eq!(p.battery_capex_per_kwh, 120.0);
        assert_eq!(p.solar_life_years, 30);
        assert_eq!(p.battery_life_years, 20);
        assert_eq!(p.wacc, 0.07);
        assert_eq!(p.inverter_load_ratio, 1.3);
        assert_eq!(p.cost_multipliers, CostMultipliers::default());
    }

    #[test]
    fn override_with_only_nan_is_empty() {
        let o = LocationOverride {
            local_wacc: Some(f64::NAN),
            local_solar_capex_per_kw: None,
            local_battery_capex_per_kwh: Some(f64::INFINITY),
        };
        assert!(o.is_empty());
        assert!(LocationOverride::default().is_empty());
    }

    #[test]
    fn override_with_wacc_is_not_empty() {
        let o = LocationOverride {
            local_wacc: Some(0.12),
            ..LocationOverride::default()
        };
        assert!(!o.is_empty());
    }
}
