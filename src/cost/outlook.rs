//! Time-indexed cost outlook and per-location override resolution.
//!
//! Global CAPEX declines are expressed as multipliers anchored at the base
//! year (1.0), 2035 and 2050. Locations with their own CAPEX projections are
//! interpolated from 2024/2035/2050 anchor values instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::params::{CostMultipliers, LocationOverride, OverrideMap};
use crate::optimizer::LocationId;

/// Last year covered by the outlook.
pub const OUTLOOK_END_YEAR: u32 = 2050;

const SOLAR_ANCHORS: [(u32, f64); 2] = [(2035, 0.61), (OUTLOOK_END_YEAR, 0.50)];
const BATTERY_ANCHORS: [(u32, f64); 2] = [(2035, 0.66), (OUTLOOK_END_YEAR, 0.55)];

const LOCAL_ANCHOR_YEARS: [u32; 3] = [2024, 2035, OUTLOOK_END_YEAR];

/// Computes the global cost multipliers for `year`.
///
/// The year is clamped to `[base_year, 2050]`. Both curves start at `1.0` in
/// the base year and fall linearly between anchors.
///
/// # Arguments
///
/// * `base_year` - Year at which current CAPEX inputs apply unchanged
/// * `year` - Selected outlook year
pub fn cost_multipliers_for_year(base_year: u32, year: u32) -> CostMultipliers {
    let year = year.clamp(base_year.min(OUTLOOK_END_YEAR), OUTLOOK_END_YEAR);
    CostMultipliers {
        solar: interpolate_factor(base_year, year, &SOLAR_ANCHORS),
        battery: interpolate_factor(base_year, year, &BATTERY_ANCHORS),
    }
}

fn interpolate_factor(base_year: u32, year: u32, tail: &[(u32, f64)]) -> f64 {
    let anchors = std::iter::once((base_year, 1.0)).chain(tail.iter().copied());
    let mut prev: Option<(u32, f64)> = None;
    for (anchor_year, factor) in anchors {
        if year <= anchor_year {
            return match prev {
                None => factor,
                Some((prev_year, prev_factor)) => {
                    let span = f64::from(anchor_year) - f64::from(prev_year);
                    let span = if span == 0.0 { 1.0 } else { span };
                    let t = (f64::from(year) - f64::from(prev_year)) / span;
                    prev_factor + t * (factor - prev_factor)
                }
            };
        }
        prev = Some((anchor_year, factor));
    }
    prev.map_or(1.0, |(_, factor)| factor)
}

/// Local CAPEX projections for one location at 2024, 2035 and 2050.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapexAnchors {
    /// Solar CAPEX ($/kW) at each anchor year.
    pub solar: [f64; 3],
    /// Battery CAPEX ($/kWh) at each anchor year.
    pub battery: [f64; 3],
}

impl CapexAnchors {
    /// Interpolated solar and battery CAPEX for `year`, or `None` when either
    /// series has a non-finite anchor.
    pub fn at_year(&self, year: u32) -> Option<(f64, f64)> {
        let solar = interpolate_local(year, &self.solar)?;
        let battery = interpolate_local(year, &self.battery)?;
        (solar.is_finite() && battery.is_finite()).then_some((solar, battery))
    }
}

fn interpolate_local(year: u32, values: &[f64; 3]) -> Option<f64> {
    if !values.iter().all(|v| v.is_finite()) {
        return None;
    }
    let [y0, y1, y2] = LOCAL_ANCHOR_YEARS;
    let [v0, v1, v2] = *values;
    let year_f = f64::from(year);
    let value = if year <= y0 {
        v0
    } else if year >= y2 {
        v2
    } else if year <= y1 {
        v0 + (v1 - v0) * (year_f - f64::from(y0)) / f64::from(y1 - y0)
    } else {
        v1 + (v2 - v1) * (year_f - f64::from(y1)) / f64::from(y2 - y1)
    };
    Some(value)
}

/// Which local data sets supersede the global inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverrideSelection {
    /// Use per-location discount rates.
    pub local_wacc: bool,
    /// Use per-location CAPEX projections.
    pub local_capex: bool,
}

impl OverrideSelection {
    /// `true` when neither toggle is set.
    pub fn is_global(&self) -> bool {
        !self.local_wacc && !self.local_capex
    }
}

/// All per-location financing data loaded at the boundary.
#[derive(Debug, Clone, Default)]
pub struct LocalOverrides {
    /// Local WACC as a fraction (already divided by 100).
    pub wacc: HashMap<LocationId, f64>,
    /// Local CAPEX anchors.
    pub capex: HashMap<LocationId, CapexAnchors>,
}

impl LocalOverrides {
    /// Resolves the override for one location under `selection` at `year`.
    ///
    /// Returns `None` when nothing applies. CAPEX values are only used when
    /// both solar and battery interpolate to finite numbers.
    pub fn resolve(
        &self,
        location_id: LocationId,
        selection: OverrideSelection,
        year: u32,
    ) -> Option<LocationOverride> {
        let mut resolved = LocationOverride::default();
        if selection.local_wacc {
            resolved.local_wacc = self.wacc.get(&location_id).copied().filter(|w| w.is_finite());
        }
        if selection.local_capex {
            if let Some((solar, battery)) = self.capex.get(&location_id).and_then(|a| a.at_year(year)) {
                resolved.local_solar_capex_per_kw = Some(solar);
                resolved.local_battery_capex_per_kwh = Some(battery);
            }
        }
        (!resolved.is_empty()).then_some(resolved)
    }

    /// Resolves every location that has local data into an [`OverrideMap`].
    pub fn resolve_all(&self, selection: OverrideSelection, year: u32) -> OverrideMap {
        if selection.is_global() {
            return OverrideMap::new();
        }
        self.wacc
            .keys()
            .chain(self.capex.keys())
            .filter_map(|id| self.resolve(*id, selection, year).map(|o| (*id, o)))
            .collect()
    }

    /// `true` when no local data was loaded.
    pub fn is_empty(&self) -> bool {
        self.wacc.is_empty() && self.capex.is_empty()
    }
}
