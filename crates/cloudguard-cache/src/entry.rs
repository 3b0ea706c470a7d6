use crate::CacheKey;
use serde_json::Value;

/// Collector-reported failure for a cache entry, or an entry without usable data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DataError {
    pub message: String,
}

impl DataError {
    pub const UNKNOWN: &'static str = "Unknown error";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN)
    }
}

/// One collected API response.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    /// Rendered collector error, if the collector reported one.
    pub error: Option<String>,
    /// Ordered resource records; `None` when the collector stored no data.
    pub records: Option<Vec<Value>>,
}

impl CacheEntry {
    pub fn ok(key: CacheKey, records: Vec<Value>) -> Self {
        Self {
            key,
            error: None,
            records: Some(records),
        }
    }

    pub fn failed(key: CacheKey, error: impl Into<String>) -> Self {
        Self {
            key,
            error: Some(error.into()),
            records: None,
        }
    }

    /// Build an entry from the raw `err` / `data` members of a collector node.
    pub fn from_raw(key: CacheKey, err: Option<&Value>, data: Option<&Value>) -> Self {
        let error = err.filter(|e| is_truthy(e)).map(render_error);
        let records = data.filter(|d| is_truthy(d)).map(|d| match d {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        });
        Self {
            key,
            error,
            records,
        }
    }

    /// Records of a usable entry, or the error to surface as an `UNKNOWN` finding.
    pub fn payload(&self) -> Result<&[Value], DataError> {
        if let Some(err) = &self.error {
            return Err(DataError::new(err.clone()));
        }
        match &self.records {
            Some(records) => Ok(records),
            None => Err(DataError::unknown()),
        }
    }

    /// First record of the payload, if any.
    pub fn first(&self) -> Option<&Value> {
        self.records.as_ref().and_then(|r| r.first())
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render_error(err: &Value) -> String {
    match err {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("message").and_then(Value::as_str) {
            Some(msg) => msg.to_string(),
            None => err.to_string(),
        },
        other => other.to_string(),
    }
}
