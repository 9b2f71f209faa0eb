//! Environment variable names read by the backup and restore workloads.
//!
//! These names are the contract between the scheduler and the images it launches.

pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_PORT: &str = "DB_PORT";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_NAME: &str = "DB_NAME";

pub const ENV_S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const ENV_S3_ACCESS_KEY: &str = "S3_ACCESS_KEY";
pub const ENV_S3_SECRET_KEY: &str = "S3_SECRET_KEY";
pub const ENV_S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";

/// Address the workload reports its result to.
pub const ENV_CORE_ADDR: &str = "CORE_ADDR";

/// Backup role only.
pub const ENV_MAX_BACKUP_COUNT: &str = "MAX_BACKUP_COUNT";

/// Restore role only.
pub const ENV_BACKUP_REVISION: &str = "BACKUP_REVISION";
