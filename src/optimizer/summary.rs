//! Aggregate statistics over a batch of optimizer results.

use std::fmt;

use serde::Serialize;

use super::types::{OptimizationTarget, OptimizedResult};

/// Headline figures for one optimizer pass.
///
/// Cost statistics only consider locations that meet the target and have a
/// finite LCOE; they are `None` when no such location exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationSummary {
    /// Mode label (`"cf"` or `"lcoe"`).
    pub mode: &'static str,
    /// Active threshold.
    pub target: f64,
    /// Number of locations with a result.
    pub locations: usize,
    /// Number of locations whose winner meets the target.
    pub meeting_target: usize,
    /// Cheapest target-meeting LCOE ($/MWh).
    pub min_lcoe: Option<f64>,
    /// Median target-meeting LCOE ($/MWh).
    pub median_lcoe: Option<f64>,
    /// Most expensive target-meeting LCOE ($/MWh).
    pub max_lcoe: Option<f64>,
    /// Mean winning capacity factor over all locations.
    pub mean_cf: f64,
}

impl OptimizationSummary {
    /// Computes the summary from a batch of results.
    pub fn from_results(results: &[OptimizedResult], target: OptimizationTarget) -> Self {
        let mut costs: Vec<f64> = results
            .iter()
            .filter(|r| r.meets_target && r.lcoe.is_finite())
            .map(|r| r.lcoe)
            .collect();
        costs.sort_by(f64::total_cmp);

        let median_lcoe = match costs.len() {
            0 => None,
            n if n % 2 == 1 => Some(costs[n / 2]),
            n => Some((costs[n / 2 - 1] + costs[n / 2]) / 2.0),
        };

        let mean_cf = if results.is_empty() {
            0.0
        } else {
            results.iter().map(OptimizedResult::annual_cf).sum::<f64>() / results.len() as f64
        };

        Self {
            mode: target.label(),
            target: target.threshold(),
            locations: results.len(),
            meeting_target: results.iter().filter(|r| r.meets_target).count(),
            min_lcoe: costs.first().copied(),
            median_lcoe,
            max_lcoe: costs.last().copied(),
            mean_cf,
        }
    }
}

impl fmt::Display for OptimizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |c| format!("{c:.2} $/MWh"));
        writeln!(f, "--- Optimization Summary ---")?;
        writeln!(f, "Mode:                  {} (target {})", self.mode, self.target)?;
        writeln!(f, "Locations:             {}", self.locations)?;
        writeln!(f, "Meeting target:        {}", self.meeting_target)?;
        writeln!(f, "Min LCOE:              {}", cost(self.min_lcoe))?;
        writeln!(f, "Median LCOE:           {}", cost(self.median_lcoe))?;
        writeln!(f, "Max LCOE:              {}", cost(self.max_lcoe))?;
        write!(f, "Mean capacity factor:  {:.1}%", self.mean_cf * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::types::ConfigurationRow;

    fn result(location_id: i64, lcoe: f64, annual_cf: f64, meets_target: bool) -> OptimizedResult {
        let row = ConfigurationRow {
            location_id,
            latitude: 0.0,
            longitude: 0.0,
            solar_gw: 1.0,
            batt_gwh: 1.0,
            annual_cf,
        };
        OptimizedResult::new(row, lcoe, meets_target)
    }

    #[test]
    fn counts_and_cost_range() {
        let results = vec![
            result(1, 80.0, 0.9, true),
            result(2, 60.0, 0.95, true),
            result(3, 70.0, 0.92, true),
            result(4, 40.0, 0.5, false),
        ];
        let s = OptimizationSummary::from_results(&results, OptimizationTarget::CapacityFactor(0.9));
        assert_eq!(s.locations, 4);
        assert_eq!(s.meeting_target, 3);
        assert_eq!(s.min_lcoe, Some(60.0));
        assert_eq!(s.median_lcoe, Some(70.0));
        assert_eq!(s.max_lcoe, Some(80.0));
        assert!((s.mean_cf - 0.8175).abs() < 1e-12);
    }

    #[test]
    fn even_count_median_averages() {
        let results = vec![result(1, 50.0, 0.9, true), result(2, 70.0, 0.9, true)];
        let s = OptimizationSummary::from_results(&results, OptimizationTarget::Lcoe(90.0));
        assert_eq!(s.median_lcoe, Some(60.0));
        assert_eq!(s.mode, "lcoe");
    }

    #[test]
    fn infinite_costs_are_excluded() {
        let results = vec![result(1, f64::INFINITY, 0.0, true)];
        let s = OptimizationSummary::from_results(&results, OptimizationTarget::CapacityFactor(0.0));
        assert_eq!(s.meeting_target, 1);
        assert_eq!(s.min_lcoe, None);
        assert_eq!(s.median_lcoe, None);
    }

    #[test]
    fn empty_results() {
        let s = OptimizationSummary::from_results(&[], OptimizationTarget::CapacityFactor(0.9));
        assert_eq!(s.locations, 0);
        assert_eq!(s.mean_cf, 0.0);
        assert!(s.to_string().contains("n/a"));
    }
}
