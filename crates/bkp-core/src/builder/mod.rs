//! Turns a composed environment into a workload descriptor.

use bkp_model::{Env, OneShotWorkload, RecurringWorkload, Schedule, WorkloadRole};
use tracing::trace;

/// Process-wide settings every descriptor is stamped with.
///
/// Loaded once at start and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Namespace the workloads are created in.
    pub namespace: String,
    /// Leading part of workload names, usually the database kind (`postgres`).
    pub name_prefix: String,
    /// Image of the backup role.
    pub backup_image: String,
    /// Image of the restore role.
    pub restore_image: String,
}

#[derive(Debug, Clone)]
pub struct WorkloadSpecBuilder {
    cfg: BuilderConfig,
}

impl WorkloadSpecBuilder {
    pub fn new(cfg: BuilderConfig) -> Self {
        Self { cfg }
    }

    /// Describe a scheduled backup.
    ///
    /// `schedule` is passed through unchecked; the cluster validates it on create.
    pub fn build_recurring(&self, schedule: Schedule, env: Env) -> RecurringWorkload {
        trace!(%schedule, vars = env.len(), "building recurring workload");
        RecurringWorkload {
            name_prefix: self.name_prefix(WorkloadRole::Backup),
            namespace: self.cfg.namespace.clone(),
            schedule,
            image: self.cfg.backup_image.clone(),
            env,
        }
    }

    /// Describe a one-off restore.
    pub fn build_one_shot(&self, env: Env) -> OneShotWorkload {
        trace!(vars = env.len(), "building one-shot workload");
        OneShotWorkload {
            name_prefix: self.name_prefix(WorkloadRole::Restore),
            namespace: self.cfg.namespace.clone(),
            image: self.cfg.restore_image.clone(),
            env,
        }
    }

    fn name_prefix(&self, role: WorkloadRole) -> String {
        format!("{}-{}", self.cfg.name_prefix, role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bkp_model::{KeyValue, WorkloadDescriptor};

    fn builder() -> WorkloadSpecBuilder {
        WorkloadSpecBuilder::new(BuilderConfig {
            namespace: "backups".into(),
            name_prefix: "postgres".into(),
            backup_image: "registry/backuper:1".into(),
            restore_image: "registry/restorer:1".into(),
        })
    }

    #[test]
    fn recurring_uses_backup_image_and_schedule() {
        let env: Env = vec![KeyValue::new("DB_HOST", "h")].into();
        let w = builder().build_recurring("0 0 * * *".into(), env.clone());

        assert_eq!(w.image, "registry/backuper:1");
        assert_eq!(w.namespace, "backups");
        assert_eq!(w.name_prefix, "postgres-backup");
        assert_eq!(w.schedule, "0 0 * * *");
        assert_eq!(w.env, env);
    }

    #[test]
    fn one_shot_uses_restore_image_and_has_no_schedule() {
        let w = builder().build_one_shot(Env::new());

        assert_eq!(w.image, "registry/restorer:1");
        assert_eq!(w.name_prefix, "postgres-restore");
        assert_eq!(WorkloadDescriptor::from(w).schedule(), None);
    }

    #[test]
    fn schedule_is_not_validated() {
        let w = builder().build_recurring("not a cron".into(), Env::new());
        assert_eq!(WorkloadDescriptor::from(w).schedule(), Some("not a cron"));
    }
}
