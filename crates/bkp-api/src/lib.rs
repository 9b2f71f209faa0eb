#[cfg(feature = "grpc")]
pub mod proto {
    tonic::include_proto!("bkp.v1");
}

mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::OrchestratorAdapter;

#[cfg(feature = "grpc")]
mod convert;

#[cfg(feature = "grpc")]
mod grpc;

#[cfg(feature = "grpc")]
pub use grpc::BackupApiService;

#[cfg(feature = "grpc")]
pub use proto::backup_service_server::BackupServiceServer;

#[cfg(feature = "grpc")]
pub use tonic;
