use crate::{
    ConnectionParams, ENV_BACKUP_REVISION, ENV_CORE_ADDR, ENV_DB_HOST, ENV_DB_NAME,
    ENV_DB_PASSWORD, ENV_DB_PORT, ENV_DB_USER, ENV_MAX_BACKUP_COUNT, ENV_S3_ACCESS_KEY,
    ENV_S3_BUCKET_NAME, ENV_S3_ENDPOINT, ENV_S3_SECRET_KEY, EnvSource, KeyValue, StorageParams,
};

/// Database connection variables.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionEnv<'a> {
    pub connection: &'a ConnectionParams,
}

impl EnvSource for ConnectionEnv<'_> {
    fn name(&self) -> &'static str {
        "connection"
    }

    fn emit(&self) -> Vec<KeyValue> {
        let c = self.connection;
        vec![
            KeyValue::new(ENV_DB_HOST, c.host.as_str()),
            KeyValue::new(ENV_DB_PORT, c.port.to_string()),
            KeyValue::new(ENV_DB_USER, c.user.as_str()),
            KeyValue::new(ENV_DB_PASSWORD, c.password.as_str()),
            KeyValue::new(ENV_DB_NAME, c.database.as_str()),
        ]
    }
}

/// Object storage credentials plus the controller callback address.
#[derive(Debug, Clone, Copy)]
pub struct StorageEnv<'a> {
    pub storage: &'a StorageParams,
    pub core_addr: &'a str,
}

impl EnvSource for StorageEnv<'_> {
    fn name(&self) -> &'static str {
        "storage"
    }

    fn emit(&self) -> Vec<KeyValue> {
        let s = self.storage;
        vec![
            KeyValue::new(ENV_S3_ENDPOINT, s.endpoint.as_str()),
            KeyValue::new(ENV_S3_ACCESS_KEY, s.access_key.as_str()),
            KeyValue::new(ENV_S3_SECRET_KEY, s.secret_key.as_str()),
            KeyValue::new(ENV_S3_BUCKET_NAME, s.bucket.as_str()),
            KeyValue::new(ENV_CORE_ADDR, self.core_addr),
        ]
    }
}

/// Retention limit of the backup role.
#[derive(Debug, Clone, Copy)]
pub struct RetentionEnv {
    pub max_backup_count: u32,
}

impl EnvSource for RetentionEnv {
    fn name(&self) -> &'static str {
        "retention"
    }

    fn emit(&self) -> Vec<KeyValue> {
        vec![KeyValue::new(
            ENV_MAX_BACKUP_COUNT,
            self.max_backup_count.to_string(),
        )]
    }
}

/// Revision the restore role downloads.
#[derive(Debug, Clone, Copy)]
pub struct RevisionEnv<'a> {
    pub revision: &'a str,
}

impl EnvSource for RevisionEnv<'_> {
    fn name(&self) -> &'static str {
        "revision"
    }

    fn emit(&self) -> Vec<KeyValue> {
        vec![KeyValue::new(ENV_BACKUP_REVISION, self.revision)]
    }
}
