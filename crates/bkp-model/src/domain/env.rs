use serde::{Deserialize, Serialize};

use crate::KeyValue;

/// Composed environment payload injected into a workload container.
///
/// Keeps insertion order and holds every key at most once.
/// Writing an existing key replaces its value in place, so the position of a key is decided by its first insertion.
/// Serialized as a plain array of key–value pairs; duplicates in the input collapse with the last one winning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<KeyValue>", into = "Vec<KeyValue>")]
pub struct Env(Vec<KeyValue>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(KeyValue::key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|kv| kv.key() == key).map(KeyValue::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|kv| kv.key() == key)
    }

    /// Insert or overwrite a variable.
    ///
    /// Returns the previous value when the key was already present.
    pub fn set<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let kv = KeyValue::new(key, value);
        match self.0.iter_mut().find(|cur| cur.key() == kv.key()) {
            Some(slot) => {
                let (_, old) = std::mem::replace(slot, kv).into_parts();
                Some(old)
            }
            None => {
                self.0.push(kv);
                None
            }
        }
    }
}

impl Extend<KeyValue> for Env {
    fn extend<I: IntoIterator<Item = KeyValue>>(&mut self, iter: I) {
        for kv in iter {
            let (k, v) = kv.into_parts();
            self.set(k, v);
        }
    }
}

impl FromIterator<KeyValue> for Env {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        let mut env = Env::new();
        env.extend(iter);
        env
    }
}

impl From<Vec<KeyValue>> for Env {
    fn from(pairs: Vec<KeyValue>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Env> for Vec<KeyValue> {
    fn from(env: Env) -> Self {
        env.0
    }
}

impl IntoIterator for Env {
    type Item = KeyValue;
    type IntoIter = std::vec::IntoIter<KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
