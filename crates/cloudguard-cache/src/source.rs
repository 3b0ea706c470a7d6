use crate::{CacheKey, CacheStore};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Thread-safe recorder of the cache keys a run consulted.
///
/// Recording is idempotent: repeated lookups of the same key are stored once.
#[derive(Debug, Default)]
pub struct SourceTracker {
    keys: Mutex<BTreeSet<CacheKey>>,
}

impl SourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, key: &CacheKey) {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.contains(key) {
            keys.insert(key.clone());
        }
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> SourceRecord {
        let keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        SourceRecord { keys: keys.clone() }
    }

    pub fn into_record(self) -> SourceRecord {
        SourceRecord {
            keys: self
                .keys
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// The cache keys a check run consulted. Diagnostics only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRecord {
    keys: BTreeSet<CacheKey>,
}

impl SourceRecord {
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CacheKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Render the consulted entries back into the collector's nested shape:
    /// `resourceType -> operation -> location -> [resourceId ->] {err?, data?}`.
    pub fn to_value(&self, cache: &CacheStore) -> Value {
        let mut root = Map::new();
        for key in &self.keys {
            let Some(entry) = cache.get(key) else {
                continue;
            };
            let mut leaf = Map::new();
            if let Some(err) = &entry.error {
                leaf.insert("err".into(), Value::String(err.clone()));
            }
            if let Some(records) = &entry.records {
                leaf.insert("data".into(), Value::Array(records.clone()));
            }

            let ops = child_object(&mut root, &key.resource_type);
            let locations = child_object(ops, &key.operation);
            match &key.resource_id {
                Some(id) => {
                    let resources = child_object(locations, key.location.as_str());
                    resources.insert(id.clone(), Value::Object(leaf));
                }
                None => {
                    locations.insert(key.location.as_str().to_string(), Value::Object(leaf));
                }
            }
        }
        Value::Object(root)
    }
}

fn child_object<'m>(map: &'m mut Map<String, Value>, name: &str) -> &'m mut Map<String, Value> {
    let slot = map
        .entry(name.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(inner) => inner,
        _ => unreachable!("slot was just made an object"),
    }
}
