use std::time::Duration;

use clap::Parser;

use bkp_core::BuilderConfig;
use bkp_observe::{LoggerConfig, LoggerError, LoggerFormat};

/// Backup scheduler daemon: creates backup CronJobs and restore Jobs on request.
///
/// Every option can also be set through the environment variable named next to it.
#[derive(Parser, Debug, Clone)]
#[command(name = "bkp-schedulerd", version, about, long_about = None)]
pub struct Config {
    /// Namespace every workload is created in.
    #[arg(long, env = "SYSTEM_NAMESPACE")]
    pub system_namespace: String,

    /// Image of the backup workload.
    #[arg(long, env = "BACKUPER_VERSION", default_value = "ashadrinnn/pgbackuper:0.0.1-0")]
    pub backuper_version: String,

    /// Image of the restore workload.
    #[arg(long, env = "RESTORER_VERSION", default_value = "sveb00/pgrestorer:0.0.1-1")]
    pub restorer_version: String,

    /// gRPC listen port.
    #[arg(long, env = "PORT", default_value_t = 50051)]
    pub port: u16,

    /// Database kind, used as the workload name prefix.
    #[arg(long, env = "DB_KIND", default_value = "postgres")]
    pub db_kind: String,

    /// Per-request deadline in milliseconds.
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value_t = 30_000)]
    pub request_timeout_ms: u64,

    /// Port of the Prometheus `/metrics` endpoint. Disabled when unset.
    #[arg(long, env = "METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Log filter directive, e.g. `info` or `bkp_core=debug,info`.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output: text, json or journald.
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,
}

impl Config {
    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            namespace: self.system_namespace.clone(),
            name_prefix: self.db_kind.clone(),
            backup_image: self.backuper_version.clone(),
            restore_image: self.restorer_version.clone(),
        }
    }

    pub fn logger_config(&self) -> Result<LoggerConfig, LoggerError> {
        let format: LoggerFormat = self.log_format.parse()?;
        Ok(LoggerConfig::new(format, self.log_level.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
