//! Deltas against a pinned reference location.

use serde::Serialize;

use super::transmission::{TransmissionMetrics, compute_transmission_metrics};
use crate::optimizer::{LocationId, OptimizationTarget, OptimizedResult};

/// An optimizer result annotated with its comparison to the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedResult {
    /// The optimizer result being compared.
    #[serde(flatten)]
    pub result: OptimizedResult,
    /// LCOE difference (capacity-factor mode) or capacity-factor difference
    /// (cost mode) relative to the reference. `None` without a reference.
    pub delta: Option<f64>,
    /// Transmission breakeven metrics (capacity-factor mode only).
    #[serde(rename = "txMetrics")]
    pub tx_metrics: Option<TransmissionMetrics>,
}

/// Annotates every result with its delta against `reference_id`.
///
/// The reference is looked up among `results` themselves so it always
/// reflects the same parameters. When it is absent, every delta is `None`.
pub fn compare_to_reference(
    results: &[OptimizedResult],
    reference_id: Option<LocationId>,
    target: OptimizationTarget,
) -> Vec<ComparedResult> {
    let reference = reference_id.and_then(|id| results.iter().find(|r| r.location_id() == id));

    results
        .iter()
        .map(|result| {
            let (delta, tx_metrics) = match (reference, target) {
                (None, _) => (None, None),
                (Some(reference), OptimizationTarget::CapacityFactor(_)) => {
                    let delta = result.lcoe - reference.lcoe;
                    let tx = compute_transmission_metrics(&result.row, &reference.row, delta);
                    (Some(delta), tx)
                }
                (Some(reference), OptimizationTarget::Lcoe(_)) => {
                    (Some(result.annual_cf() - reference.annual_cf()), None)
                }
            };
            ComparedResult {
                result: result.clone(),
                delta,
                tx_metrics,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::ConfigurationRow;

    fn result(location_id: i64, longitude: f64, lcoe: f64, annual_cf: f64) -> OptimizedResult {
        let row = ConfigurationRow {
            location_id,
            latitude: 0.0,
            longitude,
            solar_gw: 4.0,
            batt_gwh: 6.0,
            annual_cf,
        };
        OptimizedResult::new(row, lcoe, true)
    }

    fn results() -> Vec<OptimizedResult> {
        vec![result(1, 0.0, 80.0, 0.9), result(2, 1.0, 60.0, 0.95), result(3, 2.0, 95.0, 0.92)]
    }

    #[test]
    fn cf_mode_reports_cost_delta_and_tx() {
        let compared = compare_to_reference(&results(), Some(1), OptimizationTarget::CapacityFactor(0.9));
        assert_eq!(compared[0].delta, Some(0.0));
        assert_eq!(compared[1].delta, Some(-20.0));
        assert_eq!(compared[2].delta, Some(15.0));
        assert!(compared[1].tx_metrics.map(|m| m.breakeven_per_gw > 0.0).unwrap_or(false));
        assert_eq!(compared[2].tx_metrics.map(|m| m.breakeven_per_gw), Some(0.0));
    }

    #[test]
    fn lcoe_mode_reports_cf_delta_without_tx() {
        let compared = compare_to_reference(&results(), Some(2), OptimizationTarget::Lcoe(90.0));
        let delta = compared[0].delta.unwrap_or(f64::NAN);
        assert!((delta - (0.9 - 0.95)).abs() < 1e-12);
        assert!(compared.iter().all(|c| c.tx_metrics.is_none()));
    }

    #[test]
    fn missing_reference_clears_everything() {
        let compared = compare_to_reference(&results(), Some(404), OptimizationTarget::CapacityFactor(0.9));
        assert!(compared.iter().all(|c| c.delta.is_none() && c.tx_metrics.is_none()));
        let compared = compare_to_reference(&results(), None, OptimizationTarget::CapacityFactor(0.9));
        assert!(compared.iter().all(|c| c.delta.is_none()));
    }

    #[test]
    fn tx_metrics_are_never_negative() {
        let compared = compare_to_reference(&results(), Some(3), OptimizationTarget::CapacityFactor(0.9));
        for c in &compared {
            if let Some(m) = c.tx_metrics {
                assert!(m.breakeven_per_gw >= 0.0);
                assert!(m.breakeven_per_gw_km >= 0.0);
            }
        }
    }
}
