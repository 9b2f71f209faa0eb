//! Kubernetes backend of [`bkp_core::JobCreator`].
//!
//! Recurring workloads become `batch/v1` CronJobs, one-shot workloads become Jobs.

mod objects;
pub use objects::{
    COMPONENT_LABEL, MANAGED_BY, MANAGED_BY_LABEL, build_cron_job, build_job, to_env_vars,
};

mod creator;
pub use creator::KubeJobCreator;
