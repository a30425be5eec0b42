//! Per-location arg-min / arg-max over simulated sizing rows.
//!
//! Two modes are supported: the cheapest configuration meeting a
//! capacity-factor target, and the most reliable configuration under a cost
//! ceiling. Every function here is pure and never reads ambient state.

pub mod batch;
pub mod cf_target;
pub mod lcoe_target;
pub mod summary;
pub mod types;

pub use batch::compute_best_for_all_locations;
pub use cf_target::find_best_meeting_cf_target;
pub use lcoe_target::find_best_meeting_lcoe_target;
pub use summary::OptimizationSummary;
pub use types::{ConfigurationRow, LocationId, LocationTable, OptimizationTarget, OptimizedResult};
