//! Reference deltas and transmission breakeven metrics.

pub mod reference;
pub mod transmission;

pub use reference::{ComparedResult, compare_to_reference};
pub use transmission::{TransmissionMetrics, compute_transmission_metrics, haversine_km};
