//! Check descriptors and the per-resource evaluation contract.

use cloudguard_cache::{CacheKey, CacheStore, DataError, SourceTracker, resolve};
use cloudguard_settings::{ResolvedSettings, SettingSpec};
use cloudguard_types::{LocationId, Severity};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One `(resourceType, operation)` query a check depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ApiCall {
    pub resource_type: &'static str,
    pub operation: &'static str,
}

impl ApiCall {
    pub const fn new(resource_type: &'static str, operation: &'static str) -> Self {
        Self {
            resource_type,
            operation,
        }
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.operation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Resource naming used in location-level and per-resource messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Noun {
    pub singular: &'static str,
    pub plural: &'static str,
}

/// Immutable descriptor of a check. Validated once when the catalog is built.
#[derive(Debug)]
pub struct CheckSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub domain: &'static str,
    pub risk: Option<RiskLevel>,
    pub description: &'static str,
    pub more_info: &'static str,
    pub recommended_action: &'static str,
    pub link: &'static str,
    /// Ordered queries. The first entry is the primary per-location listing.
    pub apis: &'static [ApiCall],
    pub settings: &'static [SettingSpec],
    pub realtime_triggers: &'static [&'static str],
    pub noun: Noun,
    /// Emitted once per location when resources exist but none is applicable.
    pub none_applicable: Option<&'static str>,
}

impl CheckSpec {
    pub fn primary_api(&self) -> Option<ApiCall> {
        self.apis.first().copied()
    }
}

/// Resource record from the primary listing. Records without an `id` never reach a check.
#[derive(Clone, Copy, Debug)]
pub struct Resource<'a> {
    pub id: &'a str,
    pub record: &'a Value,
}

impl<'a> Resource<'a> {
    pub fn from_record(record: &'a Value) -> Option<Self> {
        let id = record.get("id").and_then(Value::as_str)?;
        Some(Self { id, record })
    }

    pub fn str_field(&self, name: &str) -> Option<&'a str> {
        self.record.get(name).and_then(Value::as_str)
    }
}

/// Outcome of evaluating one resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// The check's rule does not apply to this resource; no finding.
    NotApplicable,
    Finding { severity: Severity, message: String },
}

impl Evaluation {
    pub fn ok(message: impl Into<String>) -> Self {
        Evaluation::Finding {
            severity: Severity::Ok,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Evaluation::Finding {
            severity: Severity::Fail,
            message: message.into(),
        }
    }
}

/// Per-resource failure. Both variants become a single `UNKNOWN` finding for the resource.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// A secondary query for the resource errored or carried no data.
    #[error(transparent)]
    Data(#[from] DataError),
    /// The resource's data could not be judged (e.g. a malformed version string).
    #[error("{0}")]
    Predicate(String),
}

/// What a check may consult while evaluating one resource.
pub struct ResourceContext<'a> {
    pub(crate) location: &'a LocationId,
    pub(crate) resource_id: &'a str,
    pub(crate) settings: &'a ResolvedSettings,
    pub(crate) cache: &'a CacheStore,
    pub(crate) tracker: &'a SourceTracker,
}

impl<'a> ResourceContext<'a> {
    pub fn location(&self) -> &'a LocationId {
        self.location
    }

    pub fn settings(&self) -> &'a ResolvedSettings {
        self.settings
    }

    /// Per-resource data for `api` at the current location.
    ///
    /// `Ok(None)` means the collector has not gathered it yet.
    pub fn secondary(&self, api: ApiCall) -> Result<Option<&'a [Value]>, DataError> {
        let key = CacheKey::for_resource(
            api.resource_type,
            api.operation,
            self.location.clone(),
            self.resource_id,
        );
        match resolve(self.cache, self.tracker, &key) {
            None => Ok(None),
            Some(entry) => entry.payload().map(Some),
        }
    }
}

/// A compliance check: a fixed descriptor plus a stateless per-resource predicate.
pub trait Check: Send + Sync {
    fn spec(&self) -> &'static CheckSpec;

    fn evaluate(
        &self,
        cx: &ResourceContext<'_>,
        resource: Resource<'_>,
    ) -> Result<Evaluation, EvalError>;
}
