//! Request handling: compose the environment, build the descriptor, reconcile, map the outcome.
//!
//! Handlers share nothing but the read-only builder config, so concurrent calls need no locking.
//! Reconciler failures are reported once and never retried here.

use std::sync::Arc;

use bkp_model::{
    BackupSpec, ConnectionEnv, Env, EnvSource, OrchestrationResponse, ReconcileOutcome,
    ResponseStatus, RestoreSpec, RetentionEnv, RevisionEnv, StorageEnv, UpdateSpec, compose,
};
use tracing::{debug, info, instrument, warn};

use crate::{builder::WorkloadSpecBuilder, error::CoreError, reconciler::JobCreator};

pub struct Orchestrator<R> {
    builder: WorkloadSpecBuilder,
    jobs: Arc<R>,
}

impl<R> Orchestrator<R>
where
    R: JobCreator,
{
    pub fn new(builder: WorkloadSpecBuilder, jobs: Arc<R>) -> Self {
        Self { builder, jobs }
    }

    /// Ensure a backup schedule exists for the database.
    ///
    /// Never fails: a rejected create is reported through the response status only.
    #[instrument(level = "debug", skip_all, fields(schedule = %spec.schedule, db = %spec.connection.database))]
    pub async fn backup(&self, spec: BackupSpec) -> OrchestrationResponse {
        let env = backup_env(&spec);
        let workload = self.builder.build_recurring(spec.schedule, env);

        match self.jobs.create_recurring(&workload).await {
            ReconcileOutcome::Created { name, namespace } => {
                info!(%name, %namespace, "cronjob created");
                OrchestrationResponse::new(ResponseStatus::CronJobCreated, name, namespace)
            }
            ReconcileOutcome::AlreadyExists { name, namespace } => {
                debug!(%name, %namespace, "cronjob already exists");
                OrchestrationResponse::new(ResponseStatus::Exists, name, namespace)
            }
            ReconcileOutcome::Failed { cause } => {
                warn!(%cause, "failed to create cronjob");
                OrchestrationResponse::failed(ResponseStatus::CronJobCreateFailed)
            }
        }
    }

    /// Replace the environment of an existing backup schedule.
    ///
    /// Unlike [`Orchestrator::backup`] and [`Orchestrator::restore`], a rejected update is
    /// returned as an error. The error still carries the failure response.
    #[instrument(level = "debug", skip_all, fields(name = %spec.name, namespace = %spec.namespace))]
    pub async fn update(&self, spec: UpdateSpec) -> Result<OrchestrationResponse, CoreError> {
        let env = backup_env(&spec.backup);

        match self
            .jobs
            .update_recurring(&spec.name, &spec.namespace, env)
            .await
        {
            Ok(()) => {
                info!("cronjob updated");
                Ok(OrchestrationResponse::new(
                    ResponseStatus::CronJobUpdated,
                    spec.name,
                    spec.namespace,
                ))
            }
            Err(source) => {
                warn!(error = %source, "failed to update cronjob");
                Err(CoreError::UpdateFailed {
                    response: OrchestrationResponse::failed(ResponseStatus::CronJobUpdateFailed),
                    source,
                })
            }
        }
    }

    /// Launch a one-off restore of the given revision.
    ///
    /// Never fails: a rejected create is reported through the response status only.
    #[instrument(level = "debug", skip_all, fields(revision = %spec.revision, db = %spec.connection.database))]
    pub async fn restore(&self, spec: RestoreSpec) -> OrchestrationResponse {
        let workload = self.builder.build_one_shot(restore_env(&spec));

        match self.jobs.create_one_shot(&workload).await {
            ReconcileOutcome::Created { name, namespace } => {
                info!(%name, %namespace, "job created");
                OrchestrationResponse::new(ResponseStatus::JobCreated, name, namespace)
            }
            ReconcileOutcome::AlreadyExists { name, namespace } => {
                debug!(%name, %namespace, "job already exists");
                OrchestrationResponse::new(ResponseStatus::Exists, name, namespace)
            }
            ReconcileOutcome::Failed { cause } => {
                warn!(%cause, "failed to create job");
                OrchestrationResponse::failed(ResponseStatus::JobCreateFailed)
            }
        }
    }
}

/// Connection, storage (with callback address), retention.
pub fn backup_env(spec: &BackupSpec) -> Env {
    let sources: [&dyn EnvSource; 3] = [
        &ConnectionEnv {
            connection: &spec.connection,
        },
        &StorageEnv {
            storage: &spec.storage,
            core_addr: &spec.core_addr,
        },
        &RetentionEnv {
            max_backup_count: spec.max_backup_count,
        },
    ];
    compose(&sources)
}

/// Connection, storage (with callback address), revision.
pub fn restore_env(spec: &RestoreSpec) -> Env {
    let sources: [&dyn EnvSource; 3] = [
        &ConnectionEnv {
            connection: &spec.connection,
        },
        &StorageEnv {
            storage: &spec.storage,
            core_addr: &spec.core_addr,
        },
        &RevisionEnv {
            revision: &spec.revision,
        },
    ];
    compose(&sources)
}
