use cloudguard_types::LocationId;
use serde::Serialize;
use std::fmt;

/// Typed path into the cache snapshot: resource type, operation, location and an optional
/// resource id for per-resource queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CacheKey {
    pub resource_type: String,
    pub operation: String,
    pub location: LocationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl CacheKey {
    /// Key for a location-level listing (e.g. `webApps:list:eastus`).
    pub fn listing(resource_type: &str, operation: &str, location: LocationId) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            operation: operation.to_string(),
            location,
            resource_id: None,
        }
    }

    /// Key for a per-resource query (e.g. `webApps:listConfigurations:eastus:<id>`).
    pub fn for_resource(
        resource_type: &str,
        operation: &str,
        location: LocationId,
        resource_id: &str,
    ) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            operation: operation.to_string(),
            location,
            resource_id: Some(resource_id.to_string()),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.resource_type, self.operation, self.location
        )?;
        if let Some(id) = &self.resource_id {
            write!(f, ":{id}")?;
        }
        Ok(())
    }
}
