use sha2::{Digest, Sha256};

use crate::{
    ENV_BACKUP_REVISION, ENV_DB_HOST, ENV_DB_NAME, ENV_DB_PORT, WorkloadDescriptor,
};

/// Hex characters of the digest kept in the name.
const DIGEST_LEN: usize = 10;

/// Derive the cluster object name of a workload.
///
/// The name is `<prefix>-<digest>` where the digest covers the namespace, the database identity
/// (`DB_HOST`, `DB_PORT`, `DB_NAME`) and either the schedule or the restore revision.
/// Two descriptors built from the same request fields get the same name.
pub fn workload_name(descriptor: &WorkloadDescriptor) -> String {
    let env = descriptor.env();
    let mut hasher = Sha256::new();

    let mut feed = |part: &str| {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    };

    feed(descriptor.namespace());
    for key in [ENV_DB_HOST, ENV_DB_PORT, ENV_DB_NAME] {
        feed(env.get(key).unwrap_or_default());
    }
    match descriptor.schedule() {
        Some(schedule) => feed(schedule),
        None => feed(env.get(ENV_BACKUP_REVISION).unwrap_or_default()),
    }

    let digest = hex::encode(hasher.finalize());
    let prefix = match descriptor {
        WorkloadDescriptor::Recurring(w) => &w.name_prefix,
        WorkloadDescriptor::OneShot(w) => &w.name_prefix,
    };
    format!("{}-{}", prefix, &digest[..DIGEST_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Env, KeyValue, OneShotWorkload, RecurringWorkload};

    fn env(pairs: &[(&str, &str)]) -> Env {
        pairs.iter().map(|(k, v)| KeyValue::new(*k, *v)).collect()
    }

    fn recurring(schedule: &str, env: Env) -> WorkloadDescriptor {
        RecurringWorkload {
            name_prefix: "postgres-backup".into(),
            namespace: "default".into(),
            schedule: schedule.into(),
            image: "img".into(),
            env,
        }
        .into()
    }

    #[test]
    fn same_fields_same_name() {
        let base = env(&[("DB_HOST", "h"), ("DB_PORT", "5432"), ("DB_NAME", "db")]);
        let a = recurring("0 0 * * *", base.clone());
        let b = recurring("0 0 * * *", base);
        assert_eq!(workload_name(&a), workload_name(&b));
    }

    #[test]
    fn name_has_prefix_and_fixed_digest() {
        let d = recurring("0 0 * * *", Env::new());
        let name = workload_name(&d);
        let digest = name.strip_prefix("postgres-backup-").unwrap();
        assert_eq!(digest.len(), DIGEST_LEN);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn schedule_and_database_change_identity() {
        let base = env(&[("DB_HOST", "h"), ("DB_PORT", "5432"), ("DB_NAME", "db")]);
        let other_db = env(&[("DB_HOST", "h"), ("DB_PORT", "5432"), ("DB_NAME", "other")]);

        let daily = workload_name(&recurring("0 0 * * *", base.clone()));
        let hourly = workload_name(&recurring("0 * * * *", base));
        let other = workload_name(&recurring("0 0 * * *", other_db));

        assert_ne!(daily, hourly);
        assert_ne!(daily, other);
    }

    #[test]
    fn credentials_do_not_change_identity() {
        let a = env(&[("DB_HOST", "h"), ("DB_PASSWORD", "one")]);
        let b = env(&[("DB_HOST", "h"), ("DB_PASSWORD", "two")]);
        assert_eq!(
            workload_name(&recurring("@daily", a)),
            workload_name(&recurring("@daily", b))
        );
    }

    #[test]
    fn restore_identity_follows_revision() {
        let one_shot = |rev: &str| -> WorkloadDescriptor {
            OneShotWorkload {
                name_prefix: "postgres-restore".into(),
                namespace: "default".into(),
                image: "img".into(),
                env: env(&[("DB_HOST", "h"), ("BACKUP_REVISION", rev)]),
            }
            .into()
        };

        assert_eq!(workload_name(&one_shot("r1")), workload_name(&one_shot("r1")));
        assert_ne!(workload_name(&one_shot("r1")), workload_name(&one_shot("r2")));
        assert!(workload_name(&one_shot("r1")).starts_with("postgres-restore-"));
    }
}
