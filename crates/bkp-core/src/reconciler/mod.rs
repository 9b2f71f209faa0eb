//! Cluster-facing capability the orchestrator reconciles through.

#[cfg(feature = "memory")]
pub mod memory;

use async_trait::async_trait;
use bkp_model::{Env, OneShotWorkload, ReconcileOutcome, RecurringWorkload};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("workload {namespace}/{name} not found")]
    NotFound { name: String, namespace: String },

    #[error("cluster error: {0}")]
    Cluster(String),
}

/// Creates and updates workloads in the cluster.
///
/// Create is an atomic test-and-set: either the object did not exist and now does, or it already
/// existed and [`ReconcileOutcome::AlreadyExists`] is returned with its identity. Implementations
/// never compare specs and never retry.
///
/// Calls may block on network I/O; dropping the returned future cancels the call.
#[async_trait]
pub trait JobCreator: Send + Sync + 'static {
    /// Create a recurring workload unless one with the same identity exists.
    async fn create_recurring(&self, workload: &RecurringWorkload) -> ReconcileOutcome;

    /// Replace the container environment of an existing recurring workload.
    ///
    /// Schedule and image stay untouched.
    async fn update_recurring(
        &self,
        name: &str,
        namespace: &str,
        env: Env,
    ) -> Result<(), ReconcileError>;

    /// Create a one-shot workload unless one with the same identity exists.
    async fn create_one_shot(&self, workload: &OneShotWorkload) -> ReconcileOutcome;
}
