mod identity;
pub use identity::workload_name;

use serde::{Deserialize, Serialize};

use crate::{Env, Schedule};

/// Which image a workload runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkloadRole {
    Backup,
    Restore,
}

impl WorkloadRole {
    /// Short symbolic identifier, used in names, labels and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadRole::Backup => "backup",
            WorkloadRole::Restore => "restore",
        }
    }
}

/// A workload that runs on a schedule (a CronJob in the cluster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringWorkload {
    pub name_prefix: String,
    pub namespace: String,
    pub schedule: Schedule,
    pub image: String,
    pub env: Env,
}

/// A workload that runs once (a Job in the cluster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneShotWorkload {
    pub name_prefix: String,
    pub namespace: String,
    pub image: String,
    pub env: Env,
}

/// Declarative description of the workload that should exist in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WorkloadDescriptor {
    Recurring(RecurringWorkload),
    OneShot(OneShotWorkload),
}

impl WorkloadDescriptor {
    pub fn namespace(&self) -> &str {
        match self {
            WorkloadDescriptor::Recurring(w) => &w.namespace,
            WorkloadDescriptor::OneShot(w) => &w.namespace,
        }
    }

    pub fn env(&self) -> &Env {
        match self {
            WorkloadDescriptor::Recurring(w) => &w.env,
            WorkloadDescriptor::OneShot(w) => &w.env,
        }
    }

    /// Present only for recurring workloads.
    pub fn schedule(&self) -> Option<&str> {
        match self {
            WorkloadDescriptor::Recurring(w) => Some(&w.schedule),
            WorkloadDescriptor::OneShot(_) => None,
        }
    }
}

impl From<RecurringWorkload> for WorkloadDescriptor {
    fn from(w: RecurringWorkload) -> Self {
        WorkloadDescriptor::Recurring(w)
    }
}

impl From<OneShotWorkload> for WorkloadDescriptor {
    fn from(w: OneShotWorkload) -> Self {
        WorkloadDescriptor::OneShot(w)
    }
}
