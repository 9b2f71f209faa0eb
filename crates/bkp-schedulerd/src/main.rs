mod config;
mod metrics;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tonic::transport::Server;
use tracing::{error, info, warn};

use bkp_api::{BackupApiService, BackupServiceServer, OrchestratorAdapter};
use bkp_core::{Orchestrator, OutcomeObserver, WorkloadSpecBuilder};
use bkp_kube::KubeJobCreator;
use bkp_observe::{Journal, logger_init};
use bkp_prometheus::PrometheusMetrics;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Config + logger
    let cfg = Config::parse();
    logger_init(&cfg.logger_config()?)?;
    info!(
        namespace = %cfg.system_namespace,
        db_kind = %cfg.db_kind,
        backup_image = %cfg.backuper_version,
        restore_image = %cfg.restorer_version,
        "configuration loaded"
    );

    // 2) Cluster client
    let jobs = KubeJobCreator::try_default()
        .await
        .context("failed to create kubernetes client")?;
    info!("kubernetes client ready");

    // 3) Observers
    let mut observers: Vec<Arc<dyn OutcomeObserver>> = vec![Arc::new(Journal::new())];
    if let Some(port) = cfg.metrics_port {
        let prometheus = PrometheusMetrics::new()?;
        observers.push(Arc::new(prometheus.clone()));

        tokio::spawn(async move {
            if let Err(e) = metrics::serve(port, prometheus).await {
                error!(error = %e, "metrics endpoint stopped");
            }
        });
    }

    // 4) Orchestrator behind the gRPC service
    let orchestrator = Arc::new(Orchestrator::new(
        WorkloadSpecBuilder::new(cfg.builder_config()),
        Arc::new(jobs),
    ));
    let handler = Arc::new(OrchestratorAdapter::new(orchestrator).with_observers(observers));

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!(address = %addr, timeout_ms = cfg.request_timeout_ms, "serving gRPC");

    Server::builder()
        .timeout(cfg.request_timeout())
        .add_service(BackupServiceServer::new(BackupApiService::new(handler)))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server failed")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown requested");
}
