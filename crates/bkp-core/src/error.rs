use bkp_model::OrchestrationResponse;
use thiserror::Error;

use crate::reconciler::ReconcileError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The schedule update was rejected.
    ///
    /// `response` is what the caller would have been answered with; it carries the failure status and no identity.
    #[error("{}: {source}", .response.status)]
    UpdateFailed {
        response: OrchestrationResponse,
        #[source]
        source: ReconcileError,
    },
}

impl CoreError {
    /// Failure response attached to the error.
    pub fn response(&self) -> &OrchestrationResponse {
        match self {
            CoreError::UpdateFailed { response, .. } => response,
        }
    }
}
