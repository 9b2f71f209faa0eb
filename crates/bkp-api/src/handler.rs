use async_trait::async_trait;
use bkp_model::{BackupSpec, OrchestrationResponse, RestoreSpec, UpdateSpec};

use crate::error::ApiError;

/// Backup scheduling API handler.
///
/// This trait abstracts the backend implementation, allowing users to:
/// - Use the provided `OrchestratorAdapter`
/// - Wrap it with additional logic (auth, auditing, etc.)
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Ensure a backup schedule exists. Domain failures come back as a response status.
    async fn backup(&self, spec: BackupSpec) -> Result<OrchestrationResponse, ApiError>;

    /// Replace the environment of an existing backup schedule.
    async fn update(&self, spec: UpdateSpec) -> Result<OrchestrationResponse, ApiError>;

    /// Launch a restore. Domain failures come back as a response status.
    async fn restore(&self, spec: RestoreSpec) -> Result<OrchestrationResponse, ApiError>;
}
