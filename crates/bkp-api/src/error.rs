use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Core(#[from] bkp_core::CoreError),
}

#[cfg(feature = "grpc")]
impl From<ApiError> for tonic::Status {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidRequest(msg) => tonic::Status::invalid_argument(msg),
            ApiError::Core(e) => tonic::Status::internal(e.to_string()),
        }
    }
}

#[cfg(all(test, feature = "grpc"))]
mod tests {
    use bkp_core::{CoreError, ReconcileError};
    use bkp_model::{OrchestrationResponse, ResponseStatus};
    use tonic::Code;

    use super::*;

    #[test]
    fn maps_to_grpc_codes() {
        let status = tonic::Status::from(ApiError::InvalidRequest("cronjob name is empty".into()));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "cronjob name is empty");

        let status = tonic::Status::from(ApiError::from(CoreError::UpdateFailed {
            response: OrchestrationResponse::failed(ResponseStatus::CronJobUpdateFailed),
            source: ReconcileError::Cluster("conflict".into()),
        }));
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Failed to update cronjob: cluster error: conflict");
    }
}
