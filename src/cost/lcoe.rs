//! Levelized cost of energy for one solar-plus-storage sizing.

use super::crf::capital_recovery_factor;
use super::params::{FinancialParameters, LocationOverride, finite};
use crate::optimizer::types::ConfigurationRow;

/// Scale from the simulation grid's solar sizing column to kW.
///
/// The grid labels sizes as "GW" but they are ratios to the normalised
/// baseload block; the factor must stay `1e6` to reproduce published figures.
pub const GW_TO_KW: f64 = 1_000_000.0;
/// Scale from the simulation grid's battery sizing column to kWh.
pub const GWH_TO_KWH: f64 = 1_000_000.0;
/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: f64 = 8760.0;
/// Normalised constant demand block served by each configuration (MW).
pub const BASELOAD_MW: f64 = 1000.0;

/// Energy delivered to the baseload block over one year (MWh).
pub fn annual_energy_mwh(annual_cf: f64) -> f64 {
    annual_cf * HOURS_PER_YEAR * BASELOAD_MW
}

/// Computes the levelized cost ($/MWh) of one configuration row.
///
/// Local override values take precedence over the global parameters when
/// they are finite. Rows that deliver no energy cost `f64::INFINITY` so they
/// lose every arg-min comparison.
///
/// # Arguments
///
/// * `row` - Simulated outcome for one sizing at one location
/// * `params` - Global financial assumptions
/// * `location_override` - Optional local WACC / CAPEX data
///
/// # Returns
///
/// Annualised cost divided by annual energy, or `f64::INFINITY`.
pub fn compute_lcoe(
    row: &ConfigurationRow,
    params: &FinancialParameters,
    location_override: Option<&LocationOverride>,
) -> f64 {
    let solar_kw = row.solar_gw * GW_TO_KW;
    let battery_kwh = row.batt_gwh * GWH_TO_KWH;

    let local = location_override.copied().unwrap_or_default();
    let solar_unit_cost = finite(local.local_solar_capex_per_kw).unwrap_or_else(|| {
        params.solar_capex_per_kw * effective_multiplier(params.cost_multipliers.solar)
    });
    let battery_unit_cost = finite(local.local_battery_capex_per_kwh).unwrap_or_else(|| {
        params.battery_capex_per_kwh * effective_multiplier(params.cost_multipliers.battery)
    });

    let ilr = if params.inverter_load_ratio.is_finite() && params.inverter_load_ratio > 0.0 {
        params.inverter_load_ratio
    } else {
        1.0
    };
    let solar_capex_total = solar_unit_cost / ilr * solar_kw;
    let battery_capex_total = battery_unit_cost * battery_kwh;

    let wacc = finite(local.local_wacc).unwrap_or(params.wacc);
    let annual_cost = solar_capex_total * capital_recovery_factor(wacc, params.solar_life_years)
        + battery_capex_total * capital_recovery_factor(wacc, params.battery_life_years)
        + solar_capex_total * params.solar_opex_fraction
        + battery_capex_total * params.battery_opex_fraction;

    let energy = annual_energy_mwh(row.annual_cf);
    if !energy.is_finite() || energy <= 0.0 {
        return f64::INFINITY;
    }
    annual_cost / energy
}

/// Zero or non-finite multipliers fall back to no adjustment.
fn effective_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() && multiplier != 0.0 {
        multiplier
    } else {
        1.0
    }
}
