//! Cost model: capital recovery, levelized cost, and time-indexed outlook.

pub mod crf;
pub mod lcoe;
pub mod outlook;
pub mod params;

pub use crf::capital_recovery_factor;
pub use lcoe::{BASELOAD_MW, GW_TO_KW, GWH_TO_KWH, HOURS_PER_YEAR, annual_energy_mwh, compute_lcoe};
pub use outlook::{CapexAnchors, LocalOverrides, OverrideSelection, cost_multipliers_for_year};
pub use params::{CostMultipliers, FinancialParameters, LocationOverride, OverrideMap};
