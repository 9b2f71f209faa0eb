use std::sync::Arc;

use tonic::{Request, Response, Status};

use bkp_model::{BackupSpec, OrchestrationResponse, ResponseStatus, RestoreSpec, UpdateSpec};
use tracing::warn;

use crate::error::ApiError;
use crate::handler::ApiHandler;
use crate::proto::{self, backup_service_server::BackupService};

/// gRPC service implementation.
///
/// This struct wraps an `ApiHandler` and implements the generated `BackupService` trait.
/// Backup and Restore answer malformed requests with a failure status, like any other
/// domain failure; only Update fails the call with `INVALID_ARGUMENT`.
pub struct BackupApiService<H> {
    handler: Arc<H>,
}

impl<H> BackupApiService<H>
where
    H: ApiHandler,
{
    /// Create a new gRPC service with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

#[tonic::async_trait]
impl<H> BackupService for BackupApiService<H>
where
    H: ApiHandler,
{
    async fn backup(
        &self,
        request: Request<proto::BackupRequest>,
    ) -> Result<Response<proto::BackupResponse>, Status> {
        let spec = match BackupSpec::try_from(request.into_inner()) {
            Ok(spec) => spec,
            Err(e) => {
                warn!(error = %e, "backup request rejected");
                return Ok(Response::new(proto::BackupResponse::from(
                    OrchestrationResponse::failed(ResponseStatus::CronJobCreateFailed),
                )));
            }
        };

        let resp = self.handler.backup(spec).await.map_err(Status::from)?;

        Ok(Response::new(proto::BackupResponse::from(resp)))
    }

    async fn update(
        &self,
        request: Request<proto::UpdateBackupRequest>,
    ) -> Result<Response<proto::BackupResponse>, Status> {
        let spec = UpdateSpec::try_from(request.into_inner()).map_err(|e: ApiError| Status::from(e))?;

        let resp = self.handler.update(spec).await.map_err(Status::from)?;

        Ok(Response::new(proto::BackupResponse::from(resp)))
    }

    async fn restore(
        &self,
        request: Request<proto::RestoreRequest>,
    ) -> Result<Response<proto::RestoreResponse>, Status> {
        let spec = match RestoreSpec::try_from(request.into_inner()) {
            Ok(spec) => spec,
            Err(e) => {
                warn!(error = %e, "restore request rejected");
                return Ok(Response::new(proto::RestoreResponse::from(
                    OrchestrationResponse::failed(ResponseStatus::JobCreateFailed),
                )));
            }
        };

        let resp = self.handler.restore(spec).await.map_err(Status::from)?;

        Ok(Response::new(proto::RestoreResponse::from(resp)))
    }
}
