//! API query and error types.

use serde::{Deserialize, Serialize};

use crate::optimizer::LocationId;

/// Query parameters for the results endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    /// Location to compare against.
    pub reference: Option<LocationId>,
    /// Keep only results whose `meets_target` equals this value.
    pub meets_target: Option<bool>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
