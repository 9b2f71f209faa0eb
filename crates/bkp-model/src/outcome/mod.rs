use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of one reconciliation attempt against the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The workload did not exist and has been created.
    Created { name: String, namespace: String },
    /// A workload with the same identity was already present; nothing changed.
    AlreadyExists { name: String, namespace: String },
    /// The cluster rejected or could not process the request.
    Failed { cause: String },
}

/// Status strings returned to callers.
///
/// The string values are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseStatus {
    CronJobCreated,
    Exists,
    CronJobCreateFailed,
    CronJobUpdated,
    CronJobUpdateFailed,
    JobCreated,
    JobCreateFailed,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::CronJobCreated => "CronJob created successfully",
            ResponseStatus::Exists => "Exists",
            ResponseStatus::CronJobCreateFailed => "Failed to create CronJob",
            ResponseStatus::CronJobUpdated => "CronJob updated successfully",
            ResponseStatus::CronJobUpdateFailed => "Failed to update cronjob",
            ResponseStatus::JobCreated => "Job created successfully",
            ResponseStatus::JobCreateFailed => "Failed to create Job",
        }
    }

    /// Short label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ResponseStatus::CronJobCreated | ResponseStatus::JobCreated => "created",
            ResponseStatus::Exists => "exists",
            ResponseStatus::CronJobUpdated => "updated",
            ResponseStatus::CronJobCreateFailed
            | ResponseStatus::CronJobUpdateFailed
            | ResponseStatus::JobCreateFailed => "failed",
        }
    }

    /// Returns `true` for the failure statuses.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ResponseStatus::CronJobCreateFailed
                | ResponseStatus::CronJobUpdateFailed
                | ResponseStatus::JobCreateFailed
        )
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a caller gets back for a backup, update or restore request.
///
/// `name` and `namespace` are empty on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationResponse {
    pub status: ResponseStatus,
    pub name: String,
    pub namespace: String,
}

impl OrchestrationResponse {
    pub fn new(status: ResponseStatus, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            status,
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Response without a resource identity.
    pub fn failed(status: ResponseStatus) -> Self {
        Self::new(status, String::new(), String::new())
    }
}
