mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;

mod params;
pub use params::{BackupSpec, ConnectionParams, RestoreSpec, StorageParams, UpdateSpec};

mod constants;
pub use constants::*;

/// Cron-style schedule expression.
///
/// Opaque to this crate: syntax is checked by the cluster when the workload is created.
pub type Schedule = String;
