use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bkp_core::{JobCreator, Observation, Operation, Orchestrator, OutcomeObserver};
use bkp_model::{BackupSpec, OrchestrationResponse, RestoreSpec, UpdateSpec};
use tracing::trace;

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Adapter that bridges `Orchestrator` to `ApiHandler`.
///
/// Delegates every call to the orchestrator, then reports the finished request to the
/// registered observers in registration order.
pub struct OrchestratorAdapter<R> {
    orchestrator: Arc<Orchestrator<R>>,
    observers: Vec<Arc<dyn OutcomeObserver>>,
}

impl<R> OrchestratorAdapter<R>
where
    R: JobCreator,
{
    /// Create a new adapter wrapping the given orchestrator.
    pub fn new(orchestrator: Arc<Orchestrator<R>>) -> Self {
        Self {
            orchestrator,
            observers: Vec::new(),
        }
    }

    pub fn with_observers(mut self, observers: Vec<Arc<dyn OutcomeObserver>>) -> Self {
        self.observers = observers;
        self
    }

    async fn notify(&self, operation: Operation, response: &OrchestrationResponse, started: Instant) {
        let observation = Observation::new(operation, response, started.elapsed());
        for observer in &self.observers {
            trace!(observer = observer.name(), "notifying observer");
            observer.on_outcome(&observation).await;
        }
    }
}

#[async_trait]
impl<R> ApiHandler for OrchestratorAdapter<R>
where
    R: JobCreator,
{
    async fn backup(&self, spec: BackupSpec) -> Result<OrchestrationResponse, ApiError> {
        let started = Instant::now();
        let response = self.orchestrator.backup(spec).await;
        self.notify(Operation::Backup, &response, started).await;
        Ok(response)
    }

    async fn update(&self, spec: UpdateSpec) -> Result<OrchestrationResponse, ApiError> {
        let started = Instant::now();
        match self.orchestrator.update(spec).await {
            Ok(response) => {
                self.notify(Operation::Update, &response, started).await;
                Ok(response)
            }
            Err(e) => {
                self.notify(Operation::Update, e.response(), started).await;
                Err(ApiError::from(e))
            }
        }
    }

    async fn restore(&self, spec: RestoreSpec) -> Result<OrchestrationResponse, ApiError> {
        let started = Instant::now();
        let response = self.orchestrator.restore(spec).await;
        self.notify(Operation::Restore, &response, started).await;
        Ok(response)
    }
}
