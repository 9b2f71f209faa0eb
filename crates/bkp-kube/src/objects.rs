use std::collections::BTreeMap;

use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, Job, JobSpec, JobTemplateSpec};
use k8s_openapi::api::core::v1::{Container, EnvVar, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use bkp_model::{Env, OneShotWorkload, RecurringWorkload, WorkloadRole};

pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";
pub const COMPONENT_LABEL: &str = "app.kubernetes.io/component";
pub const MANAGED_BY: &str = "bkp-scheduler";

/// Each scheduled backup run gets one retry.
const BACKUP_BACKOFF_LIMIT: i32 = 1;
/// Restores run at most once.
const RESTORE_BACKOFF_LIMIT: i32 = 0;
/// Finished restore Jobs are garbage collected after a day.
const RESTORE_TTL_SECONDS: i32 = 86_400;
const CRON_HISTORY_LIMIT: i32 = 3;

pub fn to_env_vars(env: &Env) -> Vec<EnvVar> {
    env.iter()
        .map(|kv| EnvVar {
            name: kv.key().to_string(),
            value: Some(kv.value().to_string()),
            ..Default::default()
        })
        .collect()
}

/// Build the CronJob for a recurring backup workload.
///
/// - one `backup` container with the workload image and env
/// - `concurrencyPolicy: Forbid`, so runs of the same schedule never overlap
/// - `restartPolicy: Never`, retries go through the Job backoff limit
pub fn build_cron_job(workload: &RecurringWorkload, name: &str) -> CronJob {
    let labels = labels(WorkloadRole::Backup);
    let pod = pod_template(
        WorkloadRole::Backup,
        &workload.image,
        &workload.env,
        labels.clone(),
    );

    CronJob {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(workload.namespace.clone()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(CronJobSpec {
            schedule: workload.schedule.clone(),
            concurrency_policy: Some("Forbid".to_string()),
            successful_jobs_history_limit: Some(CRON_HISTORY_LIMIT),
            failed_jobs_history_limit: Some(CRON_HISTORY_LIMIT),
            job_template: JobTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(JobSpec {
                    backoff_limit: Some(BACKUP_BACKOFF_LIMIT),
                    template: pod,
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Build the Job for a one-shot restore workload.
pub fn build_job(workload: &OneShotWorkload, name: &str) -> Job {
    let labels = labels(WorkloadRole::Restore);
    let pod = pod_template(
        WorkloadRole::Restore,
        &workload.image,
        &workload.env,
        labels.clone(),
    );

    Job {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(workload.namespace.clone()),
            labels: Some(labels),
            ..Default::default()
        },
        spec: Some(JobSpec {
            backoff_limit: Some(RESTORE_BACKOFF_LIMIT),
            ttl_seconds_after_finished: Some(RESTORE_TTL_SECONDS),
            template: pod,
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn labels(role: WorkloadRole) -> BTreeMap<String, String> {
    BTreeMap::from([
        (MANAGED_BY_LABEL.to_string(), MANAGED_BY.to_string()),
        (COMPONENT_LABEL.to_string(), role.as_str().to_string()),
    ])
}

fn pod_template(
    role: WorkloadRole,
    image: &str,
    env: &Env,
    labels: BTreeMap<String, String>,
) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: Some(ObjectMeta {
            labels: Some(labels),
            ..Default::default()
        }),
        spec: Some(PodSpec {
            containers: vec![Container {
                name: role.as_str().to_string(),
                image: Some(image.to_string()),
                env: Some(to_env_vars(env)),
                ..Default::default()
            }],
            restart_policy: Some("Never".to_string()),
            ..Default::default()
        }),
    }
}
