//! Environment sources and their composition.
//!
//! Each source covers one configuration concern of a workload and emits its variables in a
//! fixed order. [`compose`] flattens an ordered list of sources into a single [`Env`].

mod kinds;
pub use kinds::{ConnectionEnv, RetentionEnv, RevisionEnv, StorageEnv};

use std::collections::HashMap;

use crate::{Env, KeyValue, ModelError};

/// Producer of environment variables for one configuration concern.
///
/// Implementations are pure: calling [`EnvSource::emit`] twice yields the same pairs.
pub trait EnvSource: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Pairs contributed by this source, in emission order.
    fn emit(&self) -> Vec<KeyValue>;
}

/// Compose sources in order; a key emitted again by a later source overwrites the earlier value.
///
/// The overwritten key keeps the position of its first insertion. No sources yields an empty env.
pub fn compose(sources: &[&dyn EnvSource]) -> Env {
    let mut env = Env::new();
    for source in sources {
        env.extend(source.emit());
    }
    env
}

/// Like [`compose`], but fails on the first key emitted by two different sources.
pub fn compose_strict(sources: &[&dyn EnvSource]) -> Result<Env, ModelError> {
    let mut owners: HashMap<String, &'static str> = HashMap::new();
    let mut env = Env::new();

    for source in sources {
        for kv in source.emit() {
            if let Some(first) = owners.get(kv.key())
                && *first != source.name()
            {
                return Err(ModelError::KeyCollision {
                    key: kv.key().to_string(),
                    first: *first,
                    second: source.name(),
                });
            }
            owners.insert(kv.key().to_string(), source.name());
            let (k, v) = kv.into_parts();
            env.set(k, v);
        }
    }
    Ok(env)
}
