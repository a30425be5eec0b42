//! Cached computation entry point with worker fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::cache::{CacheKey, ResultCache};
use super::worker::OptimizerWorker;
use super::{Dataset, OptimizationRequest, run_batch};
use crate::config::WorkerConfig;
use crate::optimizer::OptimizedResult;

/// Where batches are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// On the calling task.
    Inline,
    /// On the background worker, falling back inline after `timeout`.
    Worker { timeout: Duration },
}

impl From<&WorkerConfig> for ExecutionStrategy {
    fn from(config: &WorkerConfig) -> Self {
        if config.enabled {
            Self::Worker {
                timeout: Duration::from_millis(config.timeout_ms),
            }
        } else {
            Self::Inline
        }
    }
}

/// Computes batch results for requests against one dataset.
///
/// Results are cached by [`CacheKey`]; a repeated request returns the same
/// `Arc` without recomputation.
#[derive(Debug)]
pub struct LcoeService {
    dataset: Arc<Dataset>,
    cache: ResultCache,
    worker: Option<(OptimizerWorker, Duration)>,
}

impl LcoeService {
    /// Creates a service using `strategy`.
    ///
    /// A worker strategy needs a running tokio runtime. Without one the
    /// service logs a warning and evaluates inline.
    pub fn new(dataset: Arc<Dataset>, strategy: ExecutionStrategy) -> Self {
        let worker = match strategy {
            ExecutionStrategy::Inline => None,
            ExecutionStrategy::Worker { timeout } => match OptimizerWorker::spawn(Arc::clone(&dataset)) {
                Ok(worker) => Some((worker, timeout)),
                Err(e) => {
                    warn!(error = %e, "worker init failed, computing inline");
                    None
                }
            },
        };
        Self {
            dataset,
            cache: ResultCache::new(),
            worker,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Active strategy after initialisation.
    pub fn strategy(&self) -> ExecutionStrategy {
        match &self.worker {
            Some((_, timeout)) => ExecutionStrategy::Worker { timeout: *timeout },
            None => ExecutionStrategy::Inline,
        }
    }

    /// Returns the batch for `request`, from cache when possible.
    ///
    /// Worker failures never surface to the caller: on timeout, closed
    /// queue or dropped job the batch is recomputed inline.
    pub async fn compute(&self, request: &OptimizationRequest) -> Arc<Vec<OptimizedResult>> {
        let key = CacheKey::from_request(request);
        if let Some(hit) = self.cache.get(&key) {
            debug!(mode = request.target.label(), "result cache hit");
            return hit;
        }

        let results = match &self.worker {
            Some((worker, timeout)) => match worker.submit(request.clone(), *timeout).await {
                Ok(results) => results,
                Err(e) => {
                    warn!(error = %e, "falling back to inline computation");
                    run_batch(&self.dataset, request)
                }
            },
            None => run_batch(&self.dataset, request),
        };

        info!(
            mode = request.target.label(),
            target = request.target.threshold(),
            locations = results.len(),
            "optimization complete"
        );
        self.cache.insert(key, results)
    }

    #[cfg(test)]
    fn with_worker(dataset: Arc<Dataset>, worker: OptimizerWorker, timeout: Duration) -> Self {
        Self {
            dataset,
            cache: ResultCache::new(),
            worker: Some((worker, timeout)),
        }
    }
}
