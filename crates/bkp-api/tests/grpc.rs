use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use bkp_api::proto::{self, backup_service_client::BackupServiceClient};
use bkp_api::{BackupApiService, BackupServiceServer, OrchestratorAdapter};
use bkp_core::{
    BuilderConfig, InMemoryJobCreator, JobCreator, Orchestrator, ReconcileError,
    WorkloadSpecBuilder,
};
use bkp_model::{
    ENV_DB_PASSWORD, ENV_MAX_BACKUP_COUNT, Env, OneShotWorkload, ReconcileOutcome,
    RecurringWorkload, WorkloadDescriptor,
};
use tokio::task::JoinHandle;
use tonic::transport::Channel;
use tonic::{Code, transport::Server};

struct Harness {
    client: BackupServiceClient<Channel>,
    jobs: Arc<InMemoryJobCreator>,
    server: JoinHandle<Result<(), tonic::transport::Error>>,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn start() -> Harness {
    let jobs = Arc::new(InMemoryJobCreator::new());
    let builder = WorkloadSpecBuilder::new(BuilderConfig {
        namespace: "backups".into(),
        name_prefix: "postgres".into(),
        backup_image: "ashadrinnn/pgbackuper:0.0.1-0".into(),
        restore_image: "sveb00/pgrestorer:0.0.1-1".into(),
    });
    let orchestrator = Arc::new(Orchestrator::new(builder, jobs.clone()));
    let handler = Arc::new(OrchestratorAdapter::new(orchestrator));

    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let actual_addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        Server::builder()
            .add_service(BackupServiceServer::new(BackupApiService::new(handler)))
            .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = BackupServiceClient::connect(format!("http://{actual_addr}"))
        .await
        .unwrap();

    Harness {
        client,
        jobs,
        server,
    }
}

fn backup_request(schedule: &str) -> proto::BackupRequest {
    proto::BackupRequest {
        schedule: schedule.into(),
        db_uri: "localhost".into(),
        db_port: 5432,
        db_user: "user".into(),
        db_pass: "pass".into(),
        db_name: "mydb".into(),
        s3_endpoint: "s3.example.com".into(),
        s3_access_key: "key".into(),
        s3_secret_key: "secret".into(),
        s3_bucket_name: "bucket".into(),
        core_addr: "http://core:8080".into(),
        max_backup_count: 5,
    }
}

fn restore_request(revision: &str) -> proto::RestoreRequest {
    proto::RestoreRequest {
        db_uri: "localhost".into(),
        db_port: 5432,
        db_user: "user".into(),
        db_pass: "pass".into(),
        db_name: "mydb".into(),
        s3_endpoint: "s3.example.com".into(),
        s3_access_key: "key".into(),
        s3_secret_key: "secret".into(),
        s3_bucket_name: "bucket".into(),
        core_addr: "http://core:8080".into(),
        backup_revision: revision.into(),
    }
}

#[tokio::test]
async fn backup_creates_then_reports_exists() {
    let mut h = start().await;

    let first = h
        .client
        .backup(backup_request("0 0 * * *"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(first.status, "CronJob created successfully");
    assert!(first.cronjob_name.starts_with("postgres-backup-"));
    assert_eq!(first.cronjob_namespace, "backups");

    let second = h
        .client
        .backup(backup_request("0 0 * * *"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(second.status, "Exists");
    assert_eq!(second.cronjob_name, first.cronjob_name);
    assert_eq!(second.cronjob_namespace, "backups");
    assert_eq!(h.jobs.len(), 1);

    let Some(WorkloadDescriptor::Recurring(stored)) =
        h.jobs.get(&first.cronjob_name, "backups")
    else {
        panic!("expected a recurring workload");
    };
    assert_eq!(stored.schedule, "0 0 * * *");
    assert_eq!(stored.env.get(ENV_DB_PASSWORD), Some("pass"));
    assert_eq!(stored.env.get(ENV_MAX_BACKUP_COUNT), Some("5"));
}

#[tokio::test]
async fn update_replaces_env_of_created_cronjob() {
    let mut h = start().await;

    let created = h
        .client
        .backup(backup_request("0 0 * * *"))
        .await
        .unwrap()
        .into_inner();

    let mut changed = backup_request("*/5 * * * *");
    changed.db_pass = "rotated".into();
    changed.max_backup_count = 9;

    let updated = h
        .client
        .update(proto::UpdateBackupRequest {
            cronjob_name: created.cronjob_name.clone(),
            cronjob_namespace: created.cronjob_namespace.clone(),
            request: Some(changed),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(updated.status, "CronJob updated successfully");
    assert_eq!(updated.cronjob_name, created.cronjob_name);
    assert_eq!(updated.cronjob_namespace, created.cronjob_namespace);

    let Some(WorkloadDescriptor::Recurring(stored)) =
        h.jobs.get(&created.cronjob_name, "backups")
    else {
        panic!("expected a recurring workload");
    };
    assert_eq!(stored.schedule, "0 0 * * *");
    assert_eq!(stored.env.get(ENV_DB_PASSWORD), Some("rotated"));
    assert_eq!(stored.env.get(ENV_MAX_BACKUP_COUNT), Some("9"));
}

#[tokio::test]
async fn update_of_unknown_cronjob_fails_the_call() {
    let mut h = start().await;

    let status = h
        .client
        .update(proto::UpdateBackupRequest {
            cronjob_name: "missing".into(),
            cronjob_namespace: "backups".into(),
            request: Some(backup_request("0 0 * * *")),
        })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Internal);
    assert!(status.message().starts_with("Failed to update cronjob"));
}

#[tokio::test]
async fn restore_creates_job_and_reports_failure_in_status() {
    let mut h = start().await;

    let created = h
        .client
        .restore(restore_request("rev-1"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(created.status, "Job created successfully");
    assert!(created.job_name.starts_with("postgres-restore-"));
    assert_eq!(created.job_namespace, "backups");

    h.jobs.fail_with("api server unavailable");

    let failed = h
        .client
        .restore(restore_request("rev-2"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(failed.status, "Failed to create Job");
    assert!(failed.job_name.is_empty());
    assert!(failed.job_namespace.is_empty());
}

#[tokio::test]
async fn invalid_port_is_reported_in_status() {
    let mut h = start().await;

    let mut req = backup_request("0 0 * * *");
    req.db_port = 70_000;

    let resp = h.client.backup(req).await.unwrap().into_inner();
    assert_eq!(resp.status, "Failed to create CronJob");
    assert!(resp.cronjob_name.is_empty());
    assert!(resp.cronjob_namespace.is_empty());
    assert!(h.jobs.is_empty());
}

/// Never answers; records when the in-flight call is dropped.
#[derive(Default)]
struct HangingJobs {
    started: AtomicBool,
    dropped: Arc<AtomicBool>,
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl HangingJobs {
    async fn hang(&self) -> ReconcileOutcome {
        let _guard = SetOnDrop(self.dropped.clone());
        self.started.store(true, Ordering::SeqCst);
        std::future::pending().await
    }
}

#[async_trait]
impl JobCreator for HangingJobs {
    async fn create_recurring(&self, _workload: &RecurringWorkload) -> ReconcileOutcome {
        self.hang().await
    }

    async fn update_recurring(
        &self,
        _name: &str,
        _namespace: &str,
        _env: Env,
    ) -> Result<(), ReconcileError> {
        self.hang().await;
        Ok(())
    }

    async fn create_one_shot(&self, _workload: &OneShotWorkload) -> ReconcileOutcome {
        self.hang().await
    }
}

#[tokio::test]
async fn server_timeout_cancels_the_cluster_call() {
    let jobs = Arc::new(HangingJobs::default());
    let builder = WorkloadSpecBuilder::new(BuilderConfig {
        namespace: "backups".into(),
        name_prefix: "postgres".into(),
        backup_image: "backuper:1".into(),
        restore_image: "restorer:1".into(),
    });
    let orchestrator = Arc::new(Orchestrator::new(builder, jobs.clone()));
    let handler = Arc::new(OrchestratorAdapter::new(orchestrator));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let actual_addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        Server::builder()
            .timeout(Duration::from_millis(200))
            .add_service(BackupServiceServer::new(BackupApiService::new(handler)))
            .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(listener))
            .await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut client = BackupServiceClient::connect(format!("http://{actual_addr}"))
        .await
        .unwrap();

    let status = tokio::time::timeout(
        Duration::from_secs(5),
        client.backup(backup_request("0 0 * * *")),
    )
    .await
    .expect("server did not enforce its timeout")
    .unwrap_err();

    assert!(
        matches!(status.code(), Code::Cancelled | Code::DeadlineExceeded),
        "unexpected code {:?}",
        status.code()
    );
    assert!(jobs.started.load(Ordering::SeqCst));

    for _ in 0..50 {
        if jobs.dropped.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(jobs.dropped.load(Ordering::SeqCst));

    server.abort();
}
