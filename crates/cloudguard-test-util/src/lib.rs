//! Shared test utilities for the cloudguard workspace.
//!
//! Builds collector-shaped cache snapshots so tests exercise the same JSON loader the
//! application uses instead of poking entries into the store directly.

use cloudguard_cache::CacheStore;
use serde_json::{Map, Value, json};

/// Fluent builder for the nested collector JSON:
/// `resourceType -> operation -> location -> [resourceId ->] {err?, data?}`.
#[derive(Clone, Debug, Default)]
pub struct CacheBuilder {
    root: Map<String, Value>,
}

impl CacheBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location-level listing with `data`.
    pub fn listing(mut self, resource_type: &str, operation: &str, location: &str, data: Value) -> Self {
        self.location_map(resource_type, operation)
            .insert(location.to_string(), json!({ "data": data }));
        self
    }

    /// Location-level listing that failed with `err`.
    pub fn listing_error(
        mut self,
        resource_type: &str,
        operation: &str,
        location: &str,
        err: &str,
    ) -> Self {
        self.location_map(resource_type, operation)
            .insert(location.to_string(), json!({ "err": err }));
        self
    }

    /// Per-resource entry with `data`.
    pub fn resource(
        mut self,
        resource_type: &str,
        operation: &str,
        location: &str,
        resource_id: &str,
        data: Value,
    ) -> Self {
        self.resource_map(resource_type, operation, location)
            .insert(resource_id.to_string(), json!({ "data": data }));
        self
    }

    /// Per-resource entry that failed with `err`.
    pub fn resource_error(
        mut self,
        resource_type: &str,
        operation: &str,
        location: &str,
        resource_id: &str,
        err: &str,
    ) -> Self {
        self.resource_map(resource_type, operation, location)
            .insert(resource_id.to_string(), json!({ "err": err }));
        self
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    /// Load the snapshot through [`CacheStore::from_value`].
    pub fn build(&self) -> CacheStore {
        CacheStore::from_value(self.to_value()).expect("builder produces a valid cache shape")
    }

    fn location_map(&mut self, resource_type: &str, operation: &str) -> &mut Map<String, Value> {
        let ops = object_at(&mut self.root, resource_type);
        object_at(ops, operation)
    }

    fn resource_map(
        &mut self,
        resource_type: &str,
        operation: &str,
        location: &str,
    ) -> &mut Map<String, Value> {
        let locations = self.location_map(resource_type, operation);
        object_at(locations, location)
    }
}

fn object_at<'m>(map: &'m mut Map<String, Value>, key: &str) -> &'m mut Map<String, Value> {
    map.entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .expect("fixture paths never collide with leaves")
}

/// Minimal App Service record as returned by `webApps:list`.
pub fn web_app(id: &str) -> Value {
    json!({ "id": id, "name": id.rsplit('/').next().unwrap_or(id), "kind": "app" })
}

/// Minimal Automation account record with an optional identity type.
pub fn automation_account(id: &str, identity_type: Option<&str>) -> Value {
    match identity_type {
        Some(t) => json!({ "id": id, "identity": { "type": t } }),
        None => json!({ "id": id }),
    }
}
