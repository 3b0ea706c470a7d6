use crate::{CacheEntry, CacheKey, CacheStore};
use anyhow::{Context, bail};
use cloudguard_types::LocationId;
use serde_json::{Map, Value};

impl CacheStore {
    /// Parse a collector snapshot from JSON text.
    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(input).context("parse cache JSON")?;
        Self::from_value(value)
    }

    /// Build the store from the collector's nested mapping:
    /// `resourceType -> operation -> location -> ({err?, data?} | resourceId -> {err?, data?})`.
    ///
    /// A location node carrying `err` or `data` is a listing leaf; any other object is a map of
    /// per-resource leaves.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        let mut store = CacheStore::new();
        let root = as_object(&value, "cache root")?;

        for (resource_type, ops) in root {
            let ops = as_object(ops, resource_type)?;
            for (operation, locations) in ops {
                let path = format!("{resource_type}.{operation}");
                let locations = as_object(locations, &path)?;
                for (location, node) in locations {
                    let path = format!("{path}.{location}");
                    let node = as_object(node, &path)?;
                    let location = LocationId::new(location);

                    if is_leaf(node) {
                        let key = CacheKey::listing(resource_type, operation, location);
                        store.insert(leaf_entry(key, node));
                        continue;
                    }

                    for (resource_id, leaf) in node {
                        let leaf = as_object(leaf, &format!("{path}.{resource_id}"))?;
                        let key = CacheKey::for_resource(
                            resource_type,
                            operation,
                            location.clone(),
                            resource_id,
                        );
                        store.insert(leaf_entry(key, leaf));
                    }
                }
            }
        }

        tracing::debug!(entries = store.len(), "loaded cache snapshot");
        Ok(store)
    }
}

fn is_leaf(node: &Map<String, Value>) -> bool {
    node.contains_key("err") || node.contains_key("data")
}

fn leaf_entry(key: CacheKey, node: &Map<String, Value>) -> CacheEntry {
    CacheEntry::from_raw(key, node.get("err"), node.get("data"))
}

fn as_object<'v>(value: &'v Value, path: &str) -> anyhow::Result<&'v Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("expected an object at {path}, found {}", kind(other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
