//! Capacity-factor target: cheapest sizing that is reliable enough.

use super::types::{ConfigurationRow, OptimizedResult};
use crate::cost::{FinancialParameters, LocationOverride, compute_lcoe};

/// Finds the cheapest configuration at one location with
/// `annual_cf >= target_cf`.
///
/// When no row qualifies, the most reliable row is returned with
/// `meets_target = false`. Either way the result carries the largest
/// configuration at the location (largest solar, then largest battery).
///
/// Ties keep the first row seen: comparisons are strict, so an equal-cost or
/// equal-capacity-factor row later in `rows` never displaces an earlier one.
///
/// # Arguments
///
/// * `rows` - All configurations simulated for one location, in load order
/// * `target_cf` - Minimum capacity factor a winner must reach
/// * `params` - Global financial assumptions
/// * `location_override` - Optional local WACC / CAPEX data
///
/// # Returns
///
/// `None` only when `rows` is empty.
pub fn find_best_meeting_cf_target(
    rows: &[ConfigurationRow],
    target_cf: f64,
    params: &FinancialParameters,
    location_override: Option<&LocationOverride>,
) -> Option<OptimizedResult> {
    let mut best_meeting: Option<(&ConfigurationRow, f64)> = None;
    let mut most_reliable: Option<(&ConfigurationRow, f64)> = None;
    let mut largest: Option<(&ConfigurationRow, f64)> = None;

    for row in rows {
        let lcoe = compute_lcoe(row, params, location_override);

        if row.annual_cf >= target_cf && best_meeting.is_none_or(|(_, best)| lcoe < best) {
            best_meeting = Some((row, lcoe));
        }
        if most_reliable.is_none_or(|(best, _)| row.annual_cf > best.annual_cf) {
            most_reliable = Some((row, lcoe));
        }
        if largest.is_none_or(|(max, _)| is_larger(row, max)) {
            largest = Some((row, lcoe));
        }
    }

    let (max_row, max_lcoe) = largest?;
    let result = match (best_meeting, most_reliable) {
        (Some((row, lcoe)), _) => OptimizedResult::new(*row, lcoe, true),
        (None, Some((row, lcoe))) => OptimizedResult::new(*row, lcoe, false),
        (None, None) => return None,
    };
    Some(result.with_max_config(max_row, max_lcoe))
}

fn is_larger(row: &ConfigurationRow, current: &ConfigurationRow) -> bool {
    row.solar_gw > current.solar_gw
        || (row.solar_gw == current.solar_gw && row.batt_gwh > current.batt_gwh)
}
