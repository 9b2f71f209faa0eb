//! Post-call hook for side channels (logging, metrics).
//!
//! The orchestrator never calls observers itself: whoever drives it (the API adapter) reports
//! each finished request, so the core stays free of process-wide state.

use std::time::Duration;

use async_trait::async_trait;
use bkp_model::{OrchestrationResponse, ResponseStatus};

/// Request kind an observation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Backup,
    Update,
    Restore,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Backup => "backup",
            Operation::Update => "update",
            Operation::Restore => "restore",
        }
    }
}

/// One finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub operation: Operation,
    pub status: ResponseStatus,
    pub name: String,
    pub namespace: String,
    pub elapsed: Duration,
}

impl Observation {
    pub fn new(operation: Operation, response: &OrchestrationResponse, elapsed: Duration) -> Self {
        Self {
            operation,
            status: response.status,
            name: response.name.clone(),
            namespace: response.namespace.clone(),
            elapsed,
        }
    }
}

#[async_trait]
pub trait OutcomeObserver: Send + Sync + 'static {
    async fn on_outcome(&self, observation: &Observation);

    fn name(&self) -> &'static str;
}
