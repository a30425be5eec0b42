//! Best solar-plus-storage configuration per location by levelized cost.

pub mod cli;
pub mod comparison;
pub mod config;
pub mod cost;
pub mod io;
pub mod logging;
/// Per-location optimizer, batch runner and summary.
pub mod optimizer;
pub mod runtime;
pub mod synthetic;

#[cfg(feature = "api")]
pub mod api;
