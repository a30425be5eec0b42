//! Background optimizer worker.
//!
//! The worker receives the dataset once at spawn time and then serves batch
//! requests from a bounded queue. Each batch runs on the blocking pool so
//! the async executor stays responsive.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::{Dataset, OptimizationRequest, run_batch};
use crate::optimizer::OptimizedResult;

const QUEUE_DEPTH: usize = 16;

/// Failure modes of the off-thread path. All of them are recoverable by
/// running the batch inline.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("optimizer worker is unavailable")]
    Unavailable,
    #[error("optimizer worker timed out after {0:?}")]
    Timeout(Duration),
    #[error("optimizer worker dropped the job")]
    Crashed,
}

struct Job {
    request: OptimizationRequest,
    reply: oneshot::Sender<Vec<OptimizedResult>>,
}

/// Handle to a running worker task.
#[derive(Debug, Clone)]
pub struct OptimizerWorker {
    jobs: mpsc::Sender<Job>,
}

impl OptimizerWorker {
    /// Spawns the worker on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Unavailable`] when called outside a runtime.
    pub fn spawn(dataset: Arc<Dataset>) -> Result<Self, WorkerError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| WorkerError::Unavailable)?;
        let (jobs, mut queue) = mpsc::channel::<Job>(QUEUE_DEPTH);

        handle.spawn(async move {
            debug!(locations = dataset.table.len(), "optimizer worker ready");
            while let Some(job) = queue.recv().await {
                let dataset = Arc::clone(&dataset);
                let Job { request, reply } = job;
                if reply.is_closed() {
                    debug!("skipping job abandoned by its caller");
                    continue;
                }
                match tokio::task::spawn_blocking(move || run_batch(&dataset, &request)).await {
                    Ok(results) => {
                        // the requester may have given up already
                        let _ = reply.send(results);
                    }
                    Err(e) => warn!(error = %e, "optimizer job failed"),
                }
            }
            debug!("optimizer worker stopped");
        });

        Ok(Self { jobs })
    }

    /// Submits a request and waits at most `timeout` for the reply.
    ///
    /// The deadline covers both enqueueing and the reply, so a full queue
    /// behind a stuck job also times out.
    ///
    /// # Errors
    ///
    /// * [`WorkerError::Unavailable`] if the worker task has exited
    /// * [`WorkerError::Timeout`] if the job is not queued and answered in time
    /// * [`WorkerError::Crashed`] if the job was dropped without a reply
    pub async fn submit(
        &self,
        request: OptimizationRequest,
        timeout: Duration,
    ) -> Result<Vec<OptimizedResult>, WorkerError> {
        let (reply, response) = oneshot::channel();
        let round_trip = async {
            self.jobs
                .send(Job { request, reply })
                .await
                .map_err(|_| WorkerError::Unavailable)?;
            response.await.map_err(|_| WorkerError::Crashed)
        };

        tokio::time::timeout(timeout, round_trip)
            .await
            .unwrap_or(Err(WorkerError::Timeout(timeout)))
    }

    /// A worker that accepts jobs but never answers them.
    #[cfg(test)]
    pub(crate) fn stalled() -> Self {
        let (jobs, mut queue) = mpsc::channel::<Job>(QUEUE_DEPTH);
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Some(job) = queue.recv().await {
                held.push(job);
            }
        });
        Self { jobs }
    }

    /// A worker whose queue is never drained, so it fills after
    /// `QUEUE_DEPTH` jobs.
    #[cfg(test)]
    pub(crate) fn unread() -> Self {
        let (jobs, queue) = mpsc::channel::<Job>(QUEUE_DEPTH);
        tokio::spawn(async move {
            let _queue = queue;
            std::future::pending::<()>().await;
        });
        Self { jobs }
    }

    /// A worker whose task has already exited.
    #[cfg(test)]
    pub(crate) fn closed() -> Self {
        let (jobs, _) = mpsc::channel::<Job>(1);
        Self { jobs }
    }

    /// A worker that drops every job without replying.
    #[cfg(test)]
    pub(crate) fn dropping() -> Self {
        let (jobs, mut queue) = mpsc::channel::<Job>(QUEUE_DEPTH);
        tokio::spawn(async move {
            while let Some(job) = queue.recv().await {
                drop(job);
            }
        });
        Self { jobs }
    }
}
