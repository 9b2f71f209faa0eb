use async_trait::async_trait;
use k8s_openapi::api::batch::v1::{CronJob, Job};
use kube::{
    Api, Client,
    api::PostParams,
};
use tracing::{debug, instrument};

use bkp_core::{JobCreator, ReconcileError};
use bkp_model::{
    Env, OneShotWorkload, ReconcileOutcome, RecurringWorkload, WorkloadDescriptor, workload_name,
};

use crate::objects::{build_cron_job, build_job, to_env_vars};

/// [`JobCreator`] talking to the Kubernetes API server.
///
/// Object names come from [`workload_name`], so repeating a request hits the same object
/// and the API server answers `409 Conflict`, which is reported as
/// [`ReconcileOutcome::AlreadyExists`].
#[derive(Clone)]
pub struct KubeJobCreator {
    client: Client,
}

impl KubeJobCreator {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect with the in-cluster service account or the local kubeconfig.
    pub async fn try_default() -> Result<Self, kube::Error> {
        Ok(Self::new(Client::try_default().await?))
    }
}

#[async_trait]
impl JobCreator for KubeJobCreator {
    #[instrument(level = "debug", skip_all, fields(namespace = %workload.namespace))]
    async fn create_recurring(&self, workload: &RecurringWorkload) -> ReconcileOutcome {
        let name = workload_name(&WorkloadDescriptor::Recurring(workload.clone()));
        let cron_jobs: Api<CronJob> = Api::namespaced(self.client.clone(), &workload.namespace);

        debug!(%name, schedule = %workload.schedule, "creating cronjob");
        let result = cron_jobs
            .create(&PostParams::default(), &build_cron_job(workload, &name))
            .await
            .map(|_| ());
        create_outcome(result, name, workload.namespace.clone())
    }

    #[instrument(level = "debug", skip(self, env))]
    async fn update_recurring(
        &self,
        name: &str,
        namespace: &str,
        env: Env,
    ) -> Result<(), ReconcileError> {
        let cron_jobs: Api<CronJob> = Api::namespaced(self.client.clone(), namespace);

        // The fetched resourceVersion makes the replace fail on a concurrent change.
        let mut cron_job = cron_jobs
            .get(name)
            .await
            .map_err(|e| update_error(e, name, namespace))?;
        set_container_env(&mut cron_job, &env)?;

        cron_jobs
            .replace(name, &PostParams::default(), &cron_job)
            .await
            .map_err(|e| update_error(e, name, namespace))?;

        debug!(vars = env.len(), "cronjob env replaced");
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(namespace = %workload.namespace))]
    async fn create_one_shot(&self, workload: &OneShotWorkload) -> ReconcileOutcome {
        let name = workload_name(&WorkloadDescriptor::OneShot(workload.clone()));
        let jobs: Api<Job> = Api::namespaced(self.client.clone(), &workload.namespace);

        debug!(%name, "creating job");
        let result = jobs
            .create(&PostParams::default(), &build_job(workload, &name))
            .await
            .map(|_| ());
        create_outcome(result, name, workload.namespace.clone())
    }
}

fn create_outcome(
    result: Result<(), kube::Error>,
    name: String,
    namespace: String,
) -> ReconcileOutcome {
    match result {
        Ok(()) => ReconcileOutcome::Created { name, namespace },
        Err(kube::Error::Api(ae)) if ae.code == 409 => {
            ReconcileOutcome::AlreadyExists { name, namespace }
        }
        Err(e) => ReconcileOutcome::Failed {
            cause: e.to_string(),
        },
    }
}

fn update_error(err: kube::Error, name: &str, namespace: &str) -> ReconcileError {
    match err {
        kube::Error::Api(ae) if ae.code == 404 => ReconcileError::NotFound {
            name: name.to_string(),
            namespace: namespace.to_string(),
        },
        e => ReconcileError::Cluster(e.to_string()),
    }
}

/// Swap the env of the first container of the CronJob's pod template.
fn set_container_env(cron_job: &mut CronJob, env: &Env) -> Result<(), ReconcileError> {
    let container = cron_job
        .spec
        .as_mut()
        .and_then(|s| s.job_template.spec.as_mut())
        .and_then(|j| j.template.spec.as_mut())
        .and_then(|p| p.containers.first_mut())
        .ok_or_else(|| ReconcileError::Cluster("cronjob has no container to update".into()))?;

    container.env = Some(to_env_vars(env));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bkp_model::KeyValue;
    use kube::error::ErrorResponse;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: format!("{reason} for test"),
            reason: reason.to_string(),
            code,
        })
    }

    fn recurring() -> RecurringWorkload {
        RecurringWorkload {
            name_prefix: "postgres-backup".into(),
            namespace: "default".into(),
            schedule: "@daily".into(),
            image: "registry/backuper:1".into(),
            env: vec![KeyValue::new("DB_HOST", "old")].into(),
        }
    }

    #[test]
    fn create_ok_is_created() {
        let out = create_outcome(Ok(()), "cj".into(), "default".into());
        assert_eq!(
            out,
            ReconcileOutcome::Created {
                name: "cj".into(),
                namespace: "default".into()
            }
        );
    }

    #[test]
    fn create_conflict_is_already_exists() {
        let out = create_outcome(
            Err(api_error(409, "AlreadyExists")),
            "cj".into(),
            "default".into(),
        );
        assert_eq!(
            out,
            ReconcileOutcome::AlreadyExists {
                name: "cj".into(),
                namespace: "default".into()
            }
        );
    }

    #[test]
    fn create_other_error_is_failed() {
        let out = create_outcome(Err(api_error(422, "Invalid")), "cj".into(), "default".into());
        let ReconcileOutcome::Failed { cause } = out else {
            panic!("expected failure");
        };
        assert!(cause.contains("Invalid"));
    }

    #[test]
    fn update_not_found_maps_to_not_found() {
        let err = update_error(api_error(404, "NotFound"), "cj", "default");
        assert_eq!(
            err,
            ReconcileError::NotFound {
                name: "cj".into(),
                namespace: "default".into()
            }
        );

        let err = update_error(api_error(409, "Conflict"), "cj", "default");
        assert!(matches!(err, ReconcileError::Cluster(_)));
    }

    #[test]
    fn set_env_keeps_schedule_and_image() {
        let mut cj = build_cron_job(&recurring(), "cj");
        let env: Env = vec![KeyValue::new("DB_HOST", "new"), KeyValue::new("DB_PORT", "1")].into();

        set_container_env(&mut cj, &env).unwrap();

        let spec = cj.spec.as_ref().unwrap();
        assert_eq!(spec.schedule, "@daily");
        let container = &spec
            .job_template
            .spec
            .as_ref()
            .unwrap()
            .template
            .spec
            .as_ref()
            .unwrap()
            .containers[0];
        assert_eq!(container.image.as_deref(), Some("registry/backuper:1"));
        assert_eq!(container.env.as_ref().unwrap(), &to_env_vars(&env));
    }

    #[test]
    fn set_env_without_container_fails() {
        let mut cj = CronJob::default();
        let err = set_container_env(&mut cj, &Env::new()).unwrap_err();
        assert!(matches!(err, ReconcileError::Cluster(_)));
    }
}
