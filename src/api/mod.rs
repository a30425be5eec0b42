//! REST API over one computed optimizer batch.
//!
//! Provides three GET endpoints:
//! - `/summary`: mode, target and aggregate cost statistics
//! - `/results`: every location, optionally compared to a reference
//! - `/results/{location_id}`: a single location

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::optimizer::{OptimizationSummary, OptimizationTarget, OptimizedResult};

pub use types::{ErrorResponse, ResultsQuery};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the batch completes and wrapped in `Arc`; no locks
/// are needed since all data is read-only.
pub struct AppState {
    /// Mode and threshold the batch was computed for.
    pub target: OptimizationTarget,
    /// Aggregate statistics.
    pub summary: OptimizationSummary,
    /// Per-location winners, ordered by location id.
    pub results: Arc<Vec<OptimizedResult>>,
}

impl AppState {
    pub fn new(target: OptimizationTarget, results: Arc<Vec<OptimizedResult>>) -> Self {
        Self {
            target,
            summary: OptimizationSummary::from_results(&results, target),
            results,
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/results", get(handlers::get_results))
        .route("/results/{location_id}", get(handlers::get_location))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
