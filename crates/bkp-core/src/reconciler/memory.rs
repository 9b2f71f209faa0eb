//! In-process [`JobCreator`] keeping workloads in a map.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bkp_model::{
    Env, OneShotWorkload, ReconcileOutcome, RecurringWorkload, WorkloadDescriptor, workload_name,
};

use super::{JobCreator, ReconcileError};

type Key = (String, String);

/// Workload store backed by a mutex-guarded map keyed by `(namespace, name)`.
///
/// Names are derived with [`workload_name`], the same way a cluster-backed creator derives them.
#[derive(Default)]
pub struct InMemoryJobCreator {
    workloads: Mutex<HashMap<Key, WorkloadDescriptor>>,
    fail_with: Mutex<Option<String>>,
}

impl InMemoryJobCreator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `cause` until [`InMemoryJobCreator::heal`] is called.
    pub fn fail_with(&self, cause: impl Into<String>) {
        *lock(&self.fail_with) = Some(cause.into());
    }

    pub fn heal(&self) {
        *lock(&self.fail_with) = None;
    }

    pub fn get(&self, name: &str, namespace: &str) -> Option<WorkloadDescriptor> {
        lock(&self.workloads)
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.workloads).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected_failure(&self) -> Option<String> {
        lock(&self.fail_with).clone()
    }

    fn create(&self, descriptor: WorkloadDescriptor) -> ReconcileOutcome {
        if let Some(cause) = self.injected_failure() {
            return ReconcileOutcome::Failed { cause };
        }

        let name = workload_name(&descriptor);
        let namespace = descriptor.namespace().to_string();
        let key = (namespace.clone(), name.clone());

        let mut map = lock(&self.workloads);
        if map.contains_key(&key) {
            return ReconcileOutcome::AlreadyExists { name, namespace };
        }
        map.insert(key, descriptor);
        ReconcileOutcome::Created { name, namespace }
    }
}

#[async_trait]
impl JobCreator for InMemoryJobCreator {
    async fn create_recurring(&self, workload: &RecurringWorkload) -> ReconcileOutcome {
        self.create(workload.clone().into())
    }

    async fn update_recurring(
        &self,
        name: &str,
        namespace: &str,
        env: Env,
    ) -> Result<(), ReconcileError> {
        if let Some(cause) = self.injected_failure() {
            return Err(ReconcileError::Cluster(cause));
        }

        let mut map = lock(&self.workloads);
        match map.get_mut(&(namespace.to_string(), name.to_string())) {
            Some(WorkloadDescriptor::Recurring(w)) => {
                w.env = env;
                Ok(())
            }
            _ => Err(ReconcileError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            }),
        }
    }

    async fn create_one_shot(&self, workload: &OneShotWorkload) -> ReconcileOutcome {
        self.create(workload.clone().into())
    }
}

/// The map holds plain data, so a poisoned lock is still consistent.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
