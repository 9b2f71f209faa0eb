use bkp_model::{
    BackupSpec, ConnectionParams, OrchestrationResponse, RestoreSpec, StorageParams, UpdateSpec,
};

use crate::error::ApiError;
use crate::proto;

impl From<OrchestrationResponse> for proto::BackupResponse {
    fn from(resp: OrchestrationResponse) -> Self {
        proto::BackupResponse {
            status: resp.status.as_str().to_string(),
            cronjob_name: resp.name,
            cronjob_namespace: resp.namespace,
        }
    }
}

impl From<OrchestrationResponse> for proto::RestoreResponse {
    fn from(resp: OrchestrationResponse) -> Self {
        proto::RestoreResponse {
            status: resp.status.as_str().to_string(),
            job_name: resp.name,
            job_namespace: resp.namespace,
        }
    }
}

impl TryFrom<proto::BackupRequest> for BackupSpec {
    type Error = ApiError;

    fn try_from(req: proto::BackupRequest) -> Result<Self, Self::Error> {
        Ok(BackupSpec {
            connection: ConnectionParams {
                host: req.db_uri,
                port: validate_port(req.db_port)?,
                user: req.db_user,
                password: req.db_pass,
                database: req.db_name,
            },
            storage: StorageParams {
                endpoint: req.s3_endpoint,
                access_key: req.s3_access_key,
                secret_key: req.s3_secret_key,
                bucket: req.s3_bucket_name,
            },
            max_backup_count: validate_backup_count(req.max_backup_count)?,
            schedule: req.schedule,
            core_addr: req.core_addr,
        })
    }
}

impl TryFrom<proto::UpdateBackupRequest> for UpdateSpec {
    type Error = ApiError;

    fn try_from(req: proto::UpdateBackupRequest) -> Result<Self, Self::Error> {
        if req.cronjob_name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("cronjob name is empty".into()));
        }
        if req.cronjob_namespace.trim().is_empty() {
            return Err(ApiError::InvalidRequest("cronjob namespace is empty".into()));
        }

        let backup = req
            .request
            .ok_or_else(|| ApiError::InvalidRequest("missing request".into()))?;

        Ok(UpdateSpec {
            name: req.cronjob_name,
            namespace: req.cronjob_namespace,
            backup: BackupSpec::try_from(backup)?,
        })
    }
}

impl TryFrom<proto::RestoreRequest> for RestoreSpec {
    type Error = ApiError;

    fn try_from(req: proto::RestoreRequest) -> Result<Self, Self::Error> {
        Ok(RestoreSpec {
            connection: ConnectionParams {
                host: req.db_uri,
                port: validate_port(req.db_port)?,
                user: req.db_user,
                password: req.db_pass,
                database: req.db_name,
            },
            storage: StorageParams {
                endpoint: req.s3_endpoint,
                access_key: req.s3_access_key,
                secret_key: req.s3_secret_key,
                bucket: req.s3_bucket_name,
            },
            core_addr: req.core_addr,
            revision: req.backup_revision,
        })
    }
}

fn validate_port(port: i64) -> Result<u16, ApiError> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ApiError::InvalidRequest(format!(
            "db_port must be in 1..=65535, got {port}"
        ))),
    }
}

fn validate_backup_count(count: i64) -> Result<u32, ApiError> {
    u32::try_from(count).map_err(|_| {
        ApiError::InvalidRequest(format!(
            "max_backup_count must be a non-negative 32-bit value, got {count}"
        ))
    })
}
