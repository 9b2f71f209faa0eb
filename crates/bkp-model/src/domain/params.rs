use std::fmt;

use crate::Schedule;

const REDACTED: &str = "<unset>";

/// How the workload reaches the database.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("database", &self.database)
            .finish()
    }
}

/// Object storage the workload uploads to or downloads from.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageParams {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

impl fmt::Debug for StorageParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageParams")
            .field("endpoint", &self.endpoint)
            .field("access_key", &REDACTED)
            .field("secret_key", &REDACTED)
            .field("bucket", &self.bucket)
            .finish()
    }
}

/// Request to schedule recurring backups of one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSpec {
    pub schedule: Schedule,
    pub connection: ConnectionParams,
    pub storage: StorageParams,
    /// Callback address of the controller, passed to the workload.
    pub core_addr: String,
    /// How many backups the workload keeps in the bucket.
    pub max_backup_count: u32,
}

/// Request to replace the environment of an existing backup schedule.
///
/// `backup.schedule` is not applied: only the container environment changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSpec {
    pub name: String,
    pub namespace: String,
    pub backup: BackupSpec,
}

/// Request to restore a database from a stored revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSpec {
    pub connection: ConnectionParams,
    pub storage: StorageParams,
    pub core_addr: String,
    pub revision: String,
}
