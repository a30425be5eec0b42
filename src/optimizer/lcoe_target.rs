//! Cost-ceiling target: most reliable sizing that is cheap enough.

use super::types::{ConfigurationRow, OptimizedResult};
use crate::cost::{FinancialParameters, LocationOverride, compute_lcoe};

/// Finds the configuration at one location with the highest capacity factor
/// among rows whose `lcoe <= target_lcoe`, preferring the cheaper row on an
/// exact capacity-factor tie.
///
/// When no row is under the ceiling, the cheapest row is returned with
/// `meets_target = false`. Results from this mode never carry max-config
/// data.
///
/// # Returns
///
/// `None` only when `rows` is empty.
pub fn find_best_meeting_lcoe_target(
    rows: &[ConfigurationRow],
    target_lcoe: f64,
    params: &FinancialParameters,
    location_override: Option<&LocationOverride>,
) -> Option<OptimizedResult> {
    let mut best_meeting: Option<(&ConfigurationRow, f64)> = None;
    let mut cheapest: Option<(&ConfigurationRow, f64)> = None;

    for row in rows {
        let lcoe = compute_lcoe(row, params, location_override);

        if lcoe <= target_lcoe
            && best_meeting.is_none_or(|(best, best_lcoe)| {
                row.annual_cf > best.annual_cf
                    || (row.annual_cf == best.annual_cf && lcoe < best_lcoe)
            })
        {
            best_meeting = Some((row, lcoe));
        }
        if cheapest.is_none_or(|(_, best_lcoe)| lcoe < best_lcoe) {
            cheapest = Some((row, lcoe));
        }
    }

    match (best_meeting, cheapest) {
        (Some((row, lcoe)), _) => Some(OptimizedResult::new(*row, lcoe, true)),
        (None, Some((row, lcoe))) => Some(OptimizedResult::new(*row, lcoe, false)),
        (None, None) => None,
    }
}
