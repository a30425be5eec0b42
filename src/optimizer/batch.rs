//! Batch optimisation across every location in a table.

use super::cf_target::find_best_meeting_cf_target;
use super::lcoe_target::find_best_meeting_lcoe_target;
use super::types::{LocationTable, OptimizationTarget, OptimizedResult};
use crate::cost::{FinancialParameters, OverrideMap};

/// Runs the per-location optimizer for every location in `table`.
///
/// Locations with no rows are skipped. Output is ordered by ascending
/// `location_id` because the table is a `BTreeMap`.
///
/// # Arguments
///
/// * `table` - Configuration rows grouped per location
/// * `target` - Optimisation mode and threshold
/// * `params` - Global financial assumptions
/// * `overrides` - Resolved local overrides keyed by location
///
/// # Returns
///
/// One `OptimizedResult` per non-empty location.
pub fn compute_best_for_all_locations(
    table: &LocationTable,
    target: OptimizationTarget,
    params: &FinancialParameters,
    overrides: &OverrideMap,
) -> Vec<OptimizedResult> {
    table
        .iter()
        .filter_map(|(id, rows)| {
            let location_override = overrides.get(id);
            match target {
                OptimizationTarget::CapacityFactor(target_cf) => {
                    find_best_meeting_cf_target(rows, target_cf, params, location_override)
                }
                OptimizationTarget::Lcoe(target_lcoe) => {
                    find_best_meeting_lcoe_target(rows, target_lcoe, params, location_override)
                }
            }
        })
        .collect()
}
