//! Transmission breakeven: how much a line to the reference site may cost
//! before local generation stops being the cheaper option.

use serde::Serialize;

use crate::cost::{annual_energy_mwh, capital_recovery_factor};
use crate::optimizer::ConfigurationRow;

/// Mean Earth radius (km) used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Discount rate applied to transmission assets.
pub const TX_WACC: f64 = 0.06;
/// Transmission asset life (years).
pub const TX_LIFE_YEARS: u32 = 50;

/// Breakeven figures for connecting one location to the reference site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransmissionMetrics {
    /// Great-circle distance to the reference (km).
    pub distance_km: f64,
    /// Cost saved per MWh by sourcing from this location (`-delta`).
    pub savings_per_mwh: f64,
    /// Maximum transmission CAPEX per unit of baseload capacity ($).
    pub breakeven_per_gw: f64,
    /// `breakeven_per_gw` spread over the distance ($/km).
    pub breakeven_per_gw_km: f64,
}

/// Haversine distance between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Computes transmission breakeven metrics for `row` against `reference`.
///
/// # Arguments
///
/// * `row` - Winning configuration at the candidate location
/// * `reference` - Winning configuration at the reference location
/// * `delta` - `row.lcoe - reference.lcoe` ($/MWh)
///
/// # Returns
///
/// `None` when `delta` or the distance is non-finite. Breakevens are zero
/// when there are no savings or the row delivers no energy, so they are
/// never negative.
pub fn compute_transmission_metrics(
    row: &ConfigurationRow,
    reference: &ConfigurationRow,
    delta: f64,
) -> Option<TransmissionMetrics> {
    if !delta.is_finite() {
        return None;
    }
    let distance_km = haversine_km(row.latitude, row.longitude, reference.latitude, reference.longitude);
    if !distance_km.is_finite() {
        return None;
    }

    let savings_per_mwh = -delta;
    if savings_per_mwh <= 0.0 || row.annual_cf <= 0.0 {
        return Some(TransmissionMetrics {
            distance_km,
            savings_per_mwh,
            breakeven_per_gw: 0.0,
            breakeven_per_gw_km: 0.0,
        });
    }

    let annual_savings = savings_per_mwh * annual_energy_mwh(row.annual_cf);
    let crf = capital_recovery_factor(TX_WACC, TX_LIFE_YEARS);
    let breakeven_per_gw = if crf > 0.0 { annual_savings / crf } else { 0.0 };
    let breakeven_per_gw_km = if distance_km > 0.0 {
        breakeven_per_gw / distance_km
    } else {
        0.0
    };

    Some(TransmissionMetrics {
        distance_km,
        savings_per_mwh,
        breakeven_per_gw,
        breakeven_per_gw_km,
    })
}
