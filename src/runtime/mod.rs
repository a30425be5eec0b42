//! Execution runtime: inline or off-thread batch evaluation with caching.
//!
//! Both execution paths call the same pure [`run_batch`]; the strategy only
//! decides where it runs.

pub mod cache;
pub mod service;
pub mod worker;

use serde::Serialize;

use crate::cost::{FinancialParameters, LocalOverrides, OverrideSelection};
use crate::optimizer::{LocationTable, OptimizationTarget, OptimizedResult, compute_best_for_all_locations};

pub use cache::{CacheKey, DEFAULT_CACHE_CAPACITY, ResultCache};
pub use service::{ExecutionStrategy, LcoeService};
pub use worker::{OptimizerWorker, WorkerError};

/// Everything loaded once and shared read-only by every computation.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Configuration rows grouped per location.
    pub table: LocationTable,
    /// Optional per-location WACC and CAPEX data.
    pub overrides: LocalOverrides,
}

impl Dataset {
    /// Wraps `table` with no local override data.
    pub fn new(table: LocationTable) -> Self {
        Self {
            table,
            overrides: LocalOverrides::default(),
        }
    }

    /// Attaches per-location WACC and CAPEX data.
    pub fn with_overrides(mut self, overrides: LocalOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// One full set of optimizer inputs besides the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRequest {
    /// Mode and threshold.
    pub target: OptimizationTarget,
    /// Global financial assumptions, multipliers included.
    pub params: FinancialParameters,
    /// Which local data sets apply.
    pub selection: OverrideSelection,
    /// Outlook year used to interpolate local CAPEX.
    pub year: u32,
}

/// Resolves local overrides for the request and runs the batch optimizer.
pub fn run_batch(dataset: &Dataset, request: &OptimizationRequest) -> Vec<OptimizedResult> {
    let overrides = dataset.overrides.resolve_all(request.selection, request.year);
    compute_best_for_all_locations(&dataset.table, request.target, &request.params, &overrides)
}
